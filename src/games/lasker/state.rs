//! Mutable Lasker Morris game state.

use super::rules::Delta;
use super::topology::Position;
use super::types::{Board, Hands};
use crate::games::Color;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Compact encoding of (board, hands, side to move).
///
/// Bits 0..48 hold two bits per point, 48..52 and 52..56 the hands,
/// bit 56 the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature(u64);

impl Signature {
    /// Encodes a position.
    #[instrument(skip(board))]
    pub fn of(board: &Board, hands: &Hands, to_move: Color) -> Self {
        let mut bits = 0u64;
        for (i, point) in board.points().iter().enumerate() {
            let code = match point {
                None => 0u64,
                Some(Color::Blue) => 1,
                Some(Color::Orange) => 2,
            };
            bits |= code << (2 * i);
        }
        bits |= u64::from(hands.blue & 0x0f) << 48;
        bits |= u64::from(hands.orange & 0x0f) << 52;
        if to_move == Color::Orange {
            bits |= 1 << 56;
        }
        Self(bits)
    }
}

/// One accepted move and the position it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Who moved.
    pub mover: Color,
    /// The line exactly as the player sent it.
    pub line: String,
    /// Board after the move.
    pub board: Board,
    /// Hands after the move.
    pub hands: Hands,
}

/// Board, hands, turn and everything needed to detect repetition.
///
/// Only [`GameState::apply`] mutates it, and only with a delta the
/// validator accepted.
#[derive(Debug, Clone, Getters)]
pub struct GameState {
    /// Point occupancy.
    board: Board,
    /// Unplaced stones.
    hands: Hands,
    /// Side to move next.
    to_move: Color,
    /// Accepted moves in order.
    history: Vec<HistoryEntry>,
    /// Occurrences of each position reached after a move.
    #[getter(skip)]
    repetitions: HashMap<Signature, u32>,
    /// Consecutive accepted moves without a capture.
    quiet_moves: u32,
}

impl GameState {
    /// Empty board, full hands, blue to move.
    #[instrument]
    pub fn new() -> Self {
        Self::from_position(Board::new(), Hands::new(), Color::Blue)
    }

    /// Starts from an arbitrary position. Used to set up scenarios.
    #[instrument]
    pub fn from_position(board: Board, hands: Hands, to_move: Color) -> Self {
        Self {
            board,
            hands,
            to_move,
            history: Vec::new(),
            repetitions: HashMap::new(),
            quiet_moves: 0,
        }
    }

    /// Stones `color` still owns, in hand and on the board.
    pub fn total_stones(&self, color: Color) -> u8 {
        self.hands.get(color) + self.board.count(color)
    }

    /// Signature of the current position.
    pub fn signature(&self) -> Signature {
        Signature::of(&self.board, &self.hands, self.to_move)
    }

    /// How many times the current position has been reached by a move.
    pub fn repetition_count(&self) -> u32 {
        self.repetitions
            .get(&self.signature())
            .copied()
            .unwrap_or(0)
    }

    /// Applies an accepted move and records the resulting position.
    #[instrument(skip(self), fields(mover = %delta.mover))]
    pub fn apply(&mut self, delta: &Delta, line: &str) {
        match delta.from {
            Some(from) => self.board.set(from, None),
            None => self.hands.take(delta.mover),
        }
        self.board.set(delta.to, Some(delta.mover));

        if let Some(captured) = delta.capture {
            self.board.set(captured, None);
            self.quiet_moves = 0;
        } else {
            self.quiet_moves += 1;
        }

        self.to_move = delta.mover.opponent();
        self.history.push(HistoryEntry {
            mover: delta.mover,
            line: line.to_string(),
            board: self.board,
            hands: self.hands,
        });

        let seen = self.repetitions.entry(self.signature()).or_insert(0);
        *seen += 1;
        debug!(
            occurrences = *seen,
            quiet_moves = self.quiet_moves,
            "Position recorded"
        );
    }

    /// Stone at `pos`, if any.
    pub fn occupant(&self, pos: Position) -> Option<Color> {
        self.board.get(pos)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
