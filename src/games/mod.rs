//! Rule sets the referee can enforce.
//!
//! Each game plugs into the turn controller through [`RuleSet`]. The
//! controller never looks inside a move; it parses, validates, applies and
//! asks whether the game is over, in that order.

pub mod lasker;
pub mod tictactoe;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::instrument;

pub use lasker::Hands;

/// Side a player program is assigned at the start of a match.
///
/// Blue always moves first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    /// First mover.
    Blue,
    /// Second mover.
    Orange,
}

impl Color {
    /// Both colors in turn order.
    pub const ALL: [Color; 2] = [Color::Blue, Color::Orange];

    /// Returns the other color.
    pub fn opponent(self) -> Self {
        match self {
            Color::Blue => Color::Orange,
            Color::Orange => Color::Blue,
        }
    }
}

/// Why a rule set declared a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    /// The loser's hand plus board count dropped below three.
    FewerThanThreeStones,
    /// The winner completed a line of three (tic-tac-toe).
    ThreeInARow,
}

/// Why a rule set declared a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum DrawReason {
    /// The same position occurred for the third time.
    #[display("threefold repetition")]
    Repetition,
    /// Too many consecutive moves without a capture.
    #[display("{} moves without a capture", _0)]
    QuietMoves(u32),
    /// Every cell is taken and nobody has a line.
    #[display("board full")]
    BoardFull,
}

/// End condition reported by a rule set after an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    /// One side won by the rules of the game.
    Win {
        /// The winning color.
        winner: Color,
        /// The rule that decided it.
        reason: WinReason,
    },
    /// Nobody won.
    Draw(DrawReason),
}

/// Plain view of a board for renderers and the visualizer.
///
/// Cells are keyed by their label (`"d1"`). Labels missing from `cells` are
/// not points on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    /// Number of columns (letters) and rows (digits).
    pub size: u8,
    /// Occupancy of every valid point.
    pub cells: BTreeMap<String, Option<Color>>,
    /// Unplaced stones, for games that have them.
    pub hands: Option<Hands>,
    /// Color whose turn it is next.
    pub to_move: Color,
}

impl BoardView {
    /// Label of the cell at column `col` (0-based) and row `row` (1-based).
    #[instrument]
    pub fn label(col: u8, row: u8) -> String {
        format!("{}{}", char::from(b'a' + col), row)
    }
}

/// Capability a game exposes to the turn controller.
///
/// Implementations own their game state. `validate_move` must not mutate it;
/// `apply_move` is only ever called with a delta `validate_move` produced for
/// the current state.
pub trait RuleSet: Send {
    /// A syntactically well-formed move.
    type Move: fmt::Debug + Send;
    /// State change produced by a legal move.
    type Delta: fmt::Debug + Send;
    /// Why a line is not a move at all.
    type SyntaxError: std::error::Error + Send;
    /// Why a well-formed move is not allowed here.
    type Violation: std::error::Error + Send;

    /// Short game name for logs and the visualizer.
    fn name(&self) -> &'static str;

    /// Turns a raw player line into a move.
    fn parse_move(&self, line: &str) -> Result<Self::Move, Self::SyntaxError>;

    /// Decides whether `mover` may play `mv` in the current state.
    fn validate_move(&self, mover: Color, mv: &Self::Move) -> Result<Self::Delta, Self::Violation>;

    /// Applies an accepted move. `line` is the verbatim text the player sent.
    fn apply_move(&mut self, delta: Self::Delta, line: &str);

    /// End condition after the last applied move, if any.
    fn check_terminal(&self) -> Option<Ending>;

    /// Current board for display.
    fn view(&self) -> BoardView;
}
