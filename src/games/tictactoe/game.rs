//! Tic-tac-toe as a [`RuleSet`].

use super::position::Position;
use super::rules::{check_winner, is_full};
use super::types::{Board, Square};
use crate::games::{BoardView, Color, DrawReason, Ending, RuleSet, WinReason};
use tracing::{debug, instrument};

/// Why a line is not a cell label.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("invalid cell '{}'", _0)]
pub struct ParseError(pub String);

impl std::error::Error for ParseError {}

/// Error that can occur when validating a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMove {
    /// The square at the position is already occupied.
    #[display("square {} is already occupied", _0)]
    SquareOccupied(Position),
}

impl std::error::Error for IllegalMove {}

/// A placement accepted by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The player placing a mark.
    pub player: Color,
    /// Where the mark goes.
    pub position: Position,
}

/// Tic-tac-toe game engine.
#[derive(Debug, Clone)]
pub struct TicTacToe {
    board: Board,
    to_move: Color,
    history: Vec<Placement>,
}

impl TicTacToe {
    /// Creates a new game with blue to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Color::Blue,
            history: Vec::new(),
        }
    }

    /// Returns a reference to the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    /// Returns the color to move.
    pub fn to_move(&self) -> Color {
        self.to_move
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet for TicTacToe {
    type Move = Position;
    type Delta = Placement;
    type SyntaxError = ParseError;
    type Violation = IllegalMove;

    fn name(&self) -> &'static str {
        "tictactoe"
    }

    fn parse_move(&self, line: &str) -> Result<Position, ParseError> {
        line.trim()
            .parse::<Position>()
            .map_err(|_| ParseError(line.to_string()))
    }

    fn validate_move(&self, mover: Color, position: &Position) -> Result<Placement, IllegalMove> {
        if !self.board.is_empty(*position) {
            return Err(IllegalMove::SquareOccupied(*position));
        }
        Ok(Placement {
            player: mover,
            position: *position,
        })
    }

    #[instrument(skip(self))]
    fn apply_move(&mut self, placement: Placement, _line: &str) {
        self.board
            .set(placement.position, Square::Occupied(placement.player));
        self.history.push(placement);
        self.to_move = placement.player.opponent();
        debug!(moves = self.history.len(), "Mark placed");
    }

    fn check_terminal(&self) -> Option<Ending> {
        if let Some(winner) = check_winner(&self.board) {
            return Some(Ending::Win {
                winner,
                reason: WinReason::ThreeInARow,
            });
        }
        is_full(&self.board).then_some(Ending::Draw(DrawReason::BoardFull))
    }

    fn view(&self) -> BoardView {
        BoardView {
            size: 3,
            cells: Position::ALL
                .iter()
                .map(|&pos| {
                    let occupant = match self.board.get(pos) {
                        Square::Empty => None,
                        Square::Occupied(color) => Some(color),
                    };
                    (pos.to_string(), occupant)
                })
                .collect(),
            hands: None,
            to_move: self.to_move,
        }
    }
}
