//! Tests for tic-tac-toe cells and the tic-tac-toe rule set.

use strictly_morris::games::tictactoe::{Board, IllegalMove, Position, Square, TicTacToe};
use strictly_morris::{Color, DrawReason, Ending, RuleSet, WinReason};

#[test]
fn test_position_to_index() {
    assert_eq!(Position::TopLeft.to_index(), 0);
    assert_eq!(Position::Center.to_index(), 4);
    assert_eq!(Position::BottomRight.to_index(), 8);
}

#[test]
fn test_position_from_index() {
    assert_eq!(Position::from_index(0), Some(Position::TopLeft));
    assert_eq!(Position::from_index(4), Some(Position::Center));
    assert_eq!(Position::from_index(8), Some(Position::BottomRight));
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_position_labels() {
    assert_eq!("a1".parse::<Position>().ok(), Some(Position::TopLeft));
    assert_eq!("c3".parse::<Position>().ok(), Some(Position::BottomRight));
    assert_eq!(Position::MiddleRight.to_string(), "c2");
    assert!("d1".parse::<Position>().is_err());
}

#[test]
fn test_board_set_and_clear() {
    let mut board = Board::new();
    board.set(Position::Center, Square::Occupied(Color::Orange));
    assert!(!board.is_empty(Position::Center));
    assert_eq!(board.squares().iter().filter(|s| **s == Square::Empty).count(), 8);
}

#[test]
fn test_occupied_cell_is_illegal() {
    let mut game = TicTacToe::new();
    let mv = game.parse_move("a1").unwrap();
    let placement = game.validate_move(Color::Blue, &mv).unwrap();
    game.apply_move(placement, "a1");

    assert_eq!(
        game.validate_move(Color::Orange, &Position::TopLeft),
        Err(IllegalMove::SquareOccupied(Position::TopLeft))
    );
}

#[test]
fn test_diagonal_win_for_orange() {
    let mut game = TicTacToe::new();
    let mut ending = None;
    for (mover, line) in [
        (Color::Blue, "a2"),
        (Color::Orange, "a1"),
        (Color::Blue, "b1"),
        (Color::Orange, "b2"),
        (Color::Blue, "c1"),
        (Color::Orange, "c3"),
    ] {
        assert!(ending.is_none());
        let mv = game.parse_move(line).unwrap();
        let placement = game.validate_move(mover, &mv).unwrap();
        game.apply_move(placement, line);
        ending = game.check_terminal();
    }
    assert_eq!(
        ending,
        Some(Ending::Win {
            winner: Color::Orange,
            reason: WinReason::ThreeInARow
        })
    );
    assert_ne!(ending, Some(Ending::Draw(DrawReason::BoardFull)));
}
