//! Command-line interface for strictly_morris.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Morris - referee for matches between player programs
#[derive(Parser, Debug)]
#[command(name = "strictly_morris")]
#[command(about = "Referee Lasker Morris and tic-tac-toe matches between external programs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Game to referee
    #[command(subcommand)]
    pub command: Command,
}

/// Available games
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Referee a Lasker Morris match
    Lasker(MatchArgs),

    /// Referee a tic-tac-toe match
    Tictactoe(MatchArgs),
}

/// Players and overrides shared by every game.
#[derive(Args, Debug, Clone)]
pub struct MatchArgs {
    /// Command that starts the first player (e.g. "python3 player.py")
    #[arg(long)]
    pub player1: String,

    /// Command that starts the second player
    #[arg(long)]
    pub player2: String,

    /// TOML file with referee settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Per-move timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Do not draw the board after each move
    #[arg(long)]
    pub no_visual: bool,

    /// Serve the web visualizer
    #[arg(long)]
    pub web: bool,

    /// Port for the web visualizer
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Player 1 always plays blue
    #[arg(long)]
    pub no_random: bool,

    /// Pass player stderr through and log at debug level
    #[arg(long)]
    pub debug: bool,

    /// Pause after every accepted move, in milliseconds
    #[arg(long)]
    pub move_delay_ms: Option<u64>,

    /// Draw after this many consecutive moves without a capture
    #[arg(long)]
    pub quiet_move_limit: Option<u32>,

    /// Also write the log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
