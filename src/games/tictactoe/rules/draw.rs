//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Square};
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner indicates a draw.
#[instrument]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

#[cfg(test)]
mod tests {
    use super::super::super::Position;
    use super::super::win::check_winner;
    use super::*;
    use crate::games::Color;

    fn is_draw(board: &Board) -> bool {
        is_full(board) && check_winner(board).is_none()
    }

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Color::Blue));
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        let mut board = Board::new();
        // Draw: B O B / O B B / O B O
        let layout = [
            Color::Blue,
            Color::Orange,
            Color::Blue,
            Color::Orange,
            Color::Blue,
            Color::Blue,
            Color::Orange,
            Color::Blue,
            Color::Orange,
        ];
        for (pos, color) in Position::ALL.into_iter().zip(layout) {
            board.set(pos, Square::Occupied(color));
        }
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let mut board = Board::new();
        for pos in Position::ALL {
            board.set(pos, Square::Occupied(Color::Blue));
        }
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
