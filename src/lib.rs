//! Strictly Morris - a referee for board games played by external programs
//!
//! Two player programs talk to the referee over stdin/stdout, one line per
//! message. The referee tells each its color, relays moves between them,
//! enforces the rules and a per-move deadline, and announces one result.
//!
//! # Architecture
//!
//! - **Games**: rule sets behind the [`RuleSet`] capability (Lasker Morris,
//!   tic-tac-toe)
//! - **Referee**: the [`TurnController`] state machine and player transports
//! - **Spectator**: terminal rendering and the web visualizer
//!
//! # Example
//!
//! ```no_run
//! use strictly_morris::{LaskerMorris, ProcessPlayer, RefereeConfig, Seats, TurnController};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = RefereeConfig::default();
//! let seats = Seats::new(
//!     Box::new(ProcessPlayer::spawn("blue", "python3 a.py", false)?),
//!     Box::new(ProcessPlayer::spawn("orange", "python3 b.py", false)?),
//! );
//! let report = TurnController::new(LaskerMorris::new(), seats, &config).run().await;
//! println!("{}", report.message());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod render;
mod spectator;
mod web;

pub mod games;
pub mod referee;

// Crate-level exports - Configuration
pub use config::{ConfigError, RefereeConfig};

// Crate-level exports - Game capability
pub use games::{BoardView, Color, DrawReason, Ending, RuleSet, WinReason};
pub use games::lasker::LaskerMorris;
pub use games::tictactoe::TicTacToe;

// Crate-level exports - Referee
pub use referee::players::{
    ChannelError, PlayerChannel, ProcessPlayer, Received, ScriptLog, ScriptStep, ScriptedPlayer,
};
pub use referee::{
    ForfeitKind, MatchEvent, MatchFault, MatchReport, Reason, Seats, StateSnapshot, TurnController,
    TurnPhase, Verdict,
};

// Crate-level exports - Visualization
pub use render::{render_board, render_snapshot};
pub use spectator::{SharedSpectator, SpectatorState, follow};
pub use web::{router, serve};
