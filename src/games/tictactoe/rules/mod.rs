//! Game rules for tic-tac-toe.
//!
//! Pure functions over a board, kept apart from board storage.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::check_winner;
