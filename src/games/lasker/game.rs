//! Lasker Morris as a [`RuleSet`] the referee can drive.

use super::action::{Move, ParseError, parse};
use super::rules::{Delta, IllegalMove, validate};
use super::state::GameState;
use super::topology::Position;
use crate::games::{BoardView, Color, DrawReason, Ending, RuleSet, WinReason};
use tracing::{info, instrument};

/// Stones below which a side has lost.
pub const MIN_STONES: u8 = 3;

/// Repetitions of one position that end the game in a draw.
pub const REPETITION_LIMIT: u32 = 3;

/// Lasker Morris rule engine.
#[derive(Debug, Clone)]
pub struct LaskerMorris {
    state: GameState,
    quiet_move_limit: Option<u32>,
}

impl LaskerMorris {
    /// Starts a new game.
    #[instrument]
    pub fn new() -> Self {
        Self::from_state(GameState::new())
    }

    /// Continues from a prepared state.
    #[instrument(skip(state))]
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            quiet_move_limit: None,
        }
    }

    /// Ends the game in a draw after `limit` consecutive moves without a capture.
    pub fn with_quiet_move_limit(mut self, limit: Option<u32>) -> Self {
        self.quiet_move_limit = limit;
        self
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }
}

impl Default for LaskerMorris {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet for LaskerMorris {
    type Move = Move;
    type Delta = Delta;
    type SyntaxError = ParseError;
    type Violation = IllegalMove;

    fn name(&self) -> &'static str {
        "lasker_morris"
    }

    fn parse_move(&self, line: &str) -> Result<Move, ParseError> {
        parse(line)
    }

    fn validate_move(&self, mover: Color, mv: &Move) -> Result<Delta, IllegalMove> {
        validate(&self.state, mover, mv)
    }

    fn apply_move(&mut self, delta: Delta, line: &str) {
        self.state.apply(&delta, line);
    }

    #[instrument(skip(self))]
    fn check_terminal(&self) -> Option<Ending> {
        // The side that just moved cannot lose stones on its own move, so
        // check the side to move first.
        let to_move = *self.state.to_move();
        for color in [to_move, to_move.opponent()] {
            let total = self.state.total_stones(color);
            if total < MIN_STONES {
                info!(%color, total, "Side dropped below three stones");
                return Some(Ending::Win {
                    winner: color.opponent(),
                    reason: WinReason::FewerThanThreeStones,
                });
            }
        }

        let repetitions = self.state.repetition_count();
        if repetitions >= REPETITION_LIMIT {
            info!(repetitions, "Position repeated");
            return Some(Ending::Draw(DrawReason::Repetition));
        }

        if let Some(limit) = self.quiet_move_limit
            && *self.state.quiet_moves() >= limit
        {
            info!(limit, "Quiet move limit reached");
            return Some(Ending::Draw(DrawReason::QuietMoves(limit)));
        }

        None
    }

    fn view(&self) -> BoardView {
        let board = self.state.board();
        BoardView {
            size: 7,
            cells: Position::ALL
                .iter()
                .map(|&pos| (pos.to_string(), board.get(pos)))
                .collect(),
            hands: Some(*self.state.hands()),
            to_move: *self.state.to_move(),
        }
    }
}
