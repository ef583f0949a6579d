//! Terminal rendering of board snapshots.

use crate::games::{BoardView, Color};
use crate::referee::StateSnapshot;
use crossterm::style::Stylize;
use tracing::instrument;

fn stone(occupant: Option<Color>, colored: bool) -> String {
    match (occupant, colored) {
        (None, _) => ".".to_string(),
        (Some(Color::Blue), false) => "B".to_string(),
        (Some(Color::Orange), false) => "O".to_string(),
        (Some(Color::Blue), true) => "B".blue().bold().to_string(),
        (Some(Color::Orange), true) => "O".yellow().bold().to_string(),
    }
}

/// Draws the grid, row 1 first. Cells that are not points are blank.
#[instrument(skip(view))]
pub fn render_board(view: &BoardView, colored: bool) -> String {
    let mut out = String::from("  ");
    for col in 0..view.size {
        out.push(' ');
        out.push(char::from(b'a' + col));
    }
    out.push('\n');

    for row in 1..=view.size {
        out.push_str(&format!("{row} "));
        for col in 0..view.size {
            out.push(' ');
            match view.cells.get(&BoardView::label(col, row)) {
                Some(occupant) => out.push_str(&stone(*occupant, colored)),
                None => out.push(' '),
            }
        }
        out.push('\n');
    }

    if let Some(hands) = view.hands {
        out.push_str(&format!(
            "hands: blue {}, orange {}\n",
            hands.blue, hands.orange
        ));
    }
    out
}

/// Full frame for one snapshot: last move, board, and whose turn it is.
#[instrument(skip(snapshot))]
pub fn render_snapshot(snapshot: &StateSnapshot, colored: bool) -> String {
    let mut out = String::new();
    match (&snapshot.mover, &snapshot.last_move) {
        (Some(mover), Some(line)) => {
            out.push_str(&format!("move {}: {mover} played {line}\n", snapshot.turn));
        }
        _ => out.push_str("opening position\n"),
    }
    out.push_str(&render_board(&snapshot.board, colored));
    match &snapshot.message {
        Some(message) => out.push_str(&format!("{message}\n")),
        None => out.push_str(&format!("to move: {}\n", snapshot.board.to_move)),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::RuleSet;
    use crate::games::lasker::LaskerMorris;
    use crate::games::tictactoe::TicTacToe;

    #[test]
    fn test_empty_tictactoe_grid() {
        let view = TicTacToe::new().view();
        assert_eq!(render_board(&view, false), "   a b c\n1  . . .\n2  . . .\n3  . . .\n");
    }

    #[test]
    fn test_lasker_grid_blanks_non_points() {
        let mut game = LaskerMorris::new();
        let mv = game.parse_move("h1 d1 r0").unwrap();
        let delta = game.validate_move(Color::Blue, &mv).unwrap();
        game.apply_move(delta, "h1 d1 r0");

        let text = render_board(&game.view(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "   a b c d e f g");
        assert_eq!(lines[1], "1  .     B     .");
        assert_eq!(lines[4], "4  . . .   . . .");
        assert_eq!(lines[8], "hands: blue 9, orange 10");
    }

    #[test]
    fn test_snapshot_frame_mentions_move() {
        let mut snapshot = StateSnapshot::opening(TicTacToe::new().view());
        assert!(render_snapshot(&snapshot, false).starts_with("opening position\n"));
        snapshot.finish("END: Draw!");
        assert!(render_snapshot(&snapshot, false).ends_with("END: Draw!\n"));
    }

    #[test]
    fn test_frame_after_a_move() {
        let mut game = TicTacToe::new();
        let mv = game.parse_move("b2").unwrap();
        let delta = game.validate_move(Color::Blue, &mv).unwrap();
        game.apply_move(delta, "b2");
        let snapshot = StateSnapshot {
            turn: 1,
            mover: Some(Color::Blue),
            last_move: Some("b2".into()),
            board: game.view(),
            game_over: false,
            message: None,
        };

        let frame = render_snapshot(&snapshot, false);
        assert_eq!(
            frame,
            "move 1: blue played b2\n   a b c\n1  . . .\n2  . B .\n3  . . .\nto move: orange\n"
        );
    }
}
