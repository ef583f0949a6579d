//! Move legality for Lasker Morris.
//!
//! Checks run in a fixed order and the first failure is reported:
//! source, target, adjacency, then mill and capture coupling.

use super::action::{HandToken, Move, Removal, Source};
use super::state::GameState;
use super::topology::Position;
use crate::games::Color;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Stone count at which a side may fly to any empty point.
pub const FLYING_THRESHOLD: u8 = 3;

/// State change of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    /// Side that moved.
    pub mover: Color,
    /// Vacated point, or `None` for a placement from hand.
    pub from: Option<Position>,
    /// Newly occupied point.
    pub to: Position,
    /// Opponent stone taken off the board.
    pub capture: Option<Position>,
}

/// Why a well-formed move is rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMove {
    /// Hand token belongs to the other side.
    #[display("{} cannot place from {}", color, token)]
    WrongHand {
        /// Side that moved.
        color: Color,
        /// Token it used.
        token: HandToken,
    },
    /// Hand token is right but the hand is spent.
    #[display("{} has no stones left in hand", _0)]
    EmptyHand(Color),
    /// Source point does not hold one of the mover's stones.
    #[display("{} has no stone at {}", color, position)]
    NotOwnStone {
        /// Side that moved.
        color: Color,
        /// Named source point.
        position: Position,
    },
    /// Target point is taken.
    #[display("target {} is already occupied", _0)]
    TargetOccupied(Position),
    /// Step to a non-neighbor while not flying.
    #[display("{} is not adjacent to {}", to, from)]
    NotAdjacent {
        /// Source point.
        from: Position,
        /// Target point.
        to: Position,
    },
    /// A mill formed but `r0` was given.
    #[display("mill formed at {}, a removal is required", _0)]
    MissingRemoval(Position),
    /// Removal names a point without an opponent stone.
    #[display("no opponent stone at {}", _0)]
    NotOpponentStone(Position),
    /// Removal names a stone protected by a mill.
    #[display("stone at {} is protected by a mill", _0)]
    ProtectedStone(Position),
    /// A removal was given although no mill formed.
    #[display("no mill formed, cannot remove {}", _0)]
    UnexpectedRemoval(Position),
}

impl std::error::Error for IllegalMove {}

/// Decides whether `mover` may play `mv` in `state`.
///
/// Returns the delta to apply on success. Never mutates `state`.
#[instrument(skip(state), fields(mv = %mv))]
pub fn validate(state: &GameState, mover: Color, mv: &Move) -> Result<Delta, IllegalMove> {
    let board = state.board();

    // Source
    let from = match mv.source {
        Source::Hand(token) => {
            if token != HandToken::of(mover) {
                return Err(IllegalMove::WrongHand {
                    color: mover,
                    token,
                });
            }
            if state.hands().get(mover) == 0 {
                return Err(IllegalMove::EmptyHand(mover));
            }
            None
        }
        Source::Board(position) => {
            if board.get(position) != Some(mover) {
                return Err(IllegalMove::NotOwnStone {
                    color: mover,
                    position,
                });
            }
            Some(position)
        }
    };

    // Target
    if !board.is_empty(mv.target) {
        return Err(IllegalMove::TargetOccupied(mv.target));
    }

    // Adjacency, unless placing or flying
    if let Some(from) = from {
        let flying = state.total_stones(mover) == FLYING_THRESHOLD;
        if !flying && !from.is_adjacent(mv.target) {
            return Err(IllegalMove::NotAdjacent {
                from,
                to: mv.target,
            });
        }
    }

    // Mill and capture
    let mut after = *board;
    if let Some(from) = from {
        after.set(from, None);
    }
    after.set(mv.target, Some(mover));
    let formed_mill = after.completes_mill(mv.target, mover);
    let opponent = mover.opponent();

    let capture = match (formed_mill, mv.removal) {
        (false, Removal::Nothing) => None,
        (false, Removal::Capture(pos)) => return Err(IllegalMove::UnexpectedRemoval(pos)),
        (true, Removal::Nothing) => {
            if after.count(opponent) > 0 {
                return Err(IllegalMove::MissingRemoval(mv.target));
            }
            debug!("Mill formed with no opponent stone on the board");
            None
        }
        (true, Removal::Capture(pos)) => {
            if after.get(pos) != Some(opponent) {
                return Err(IllegalMove::NotOpponentStone(pos));
            }
            if after.in_mill(pos) && !all_in_mills(&after, opponent) {
                return Err(IllegalMove::ProtectedStone(pos));
            }
            Some(pos)
        }
    };

    Ok(Delta {
        mover,
        from,
        to: mv.target,
        capture,
    })
}

/// Whether every stone `color` has on the board is part of a mill.
fn all_in_mills(board: &super::types::Board, color: Color) -> bool {
    board.stones(color).all(|pos| board.in_mill(pos))
}
