//! Tic-tac-toe, the simple variant served by the same referee.

mod game;
mod position;
pub mod rules;
mod types;

pub use game::{IllegalMove, ParseError, Placement, TicTacToe};
pub use position::Position;
pub use types::{Board, Square};
