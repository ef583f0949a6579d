//! Player transports.
//!
//! The controller only ever sees a [`PlayerChannel`]: a line goes out, a
//! line (or silence, or a closed stream) comes back.

mod process;
mod scripted;

pub use process::ProcessPlayer;
pub use scripted::{ScriptLog, ScriptStep, ScriptedPlayer};

use std::time::Duration;

/// Result of waiting for a player's line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    /// A complete line, terminator stripped.
    Line(String),
    /// Nothing complete arrived before the deadline.
    TimedOut,
    /// The player's output stream is closed.
    Closed,
}

/// Failure of the transport itself.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ChannelError {
    /// The command line was blank.
    #[display("empty player command")]
    EmptyCommand,
    /// The program could not be started.
    #[display("failed to spawn '{command}': {message}")]
    Spawn {
        /// Command as given.
        command: String,
        /// OS error.
        message: String,
    },
    /// The player's input could not be written.
    #[display("failed to write to '{player}': {message}")]
    Write {
        /// Player name.
        player: String,
        /// I/O error.
        message: String,
    },
}

impl std::error::Error for ChannelError {}

/// Line-based connection to one player.
#[async_trait::async_trait]
pub trait PlayerChannel: Send {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Sends one line. The newline is added here.
    async fn send_line(&mut self, line: &str) -> Result<(), ChannelError>;

    /// Waits at most `deadline` for one complete line.
    ///
    /// A line that arrives after the deadline is not consumed.
    async fn receive_line(&mut self, deadline: Duration) -> Received;

    /// A line the player produced without being asked, if one is pending.
    fn poll_unsolicited(&mut self) -> Option<String> {
        None
    }

    /// Stops the player. No I/O happens afterwards.
    async fn shutdown(&mut self);
}
