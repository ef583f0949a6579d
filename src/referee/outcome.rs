//! Terminal verdicts, the message announcing them and visualizer snapshots.
//!
//! Nothing here decides anything. The controller picks the verdict; this
//! module only formats it.

use super::fault::{ForfeitKind, MatchFault};
use crate::games::{BoardView, Color, DrawReason, Ending, WinReason};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Why the winner won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reason {
    /// Decided by the game rules.
    Rules(WinReason),
    /// The loser forfeited.
    Forfeit(ForfeitKind),
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// One color won.
    Win {
        /// The winning color.
        winner: Color,
        /// How it was decided.
        reason: Reason,
    },
    /// Nobody won.
    Draw(DrawReason),
}

impl Verdict {
    /// Verdict for an end condition reported by a rule set.
    pub fn from_ending(ending: Ending) -> Self {
        match ending {
            Ending::Win { winner, reason } => Verdict::Win {
                winner,
                reason: Reason::Rules(reason),
            },
            Ending::Draw(reason) => Verdict::Draw(reason),
        }
    }

    /// Verdict against `offender`.
    pub fn forfeit(offender: Color, fault: &MatchFault) -> Self {
        Verdict::Win {
            winner: offender.opponent(),
            reason: Reason::Forfeit(fault.kind()),
        }
    }

    /// The winning color, if any.
    pub fn winner(&self) -> Option<Color> {
        match self {
            Verdict::Win { winner, .. } => Some(*winner),
            Verdict::Draw(_) => None,
        }
    }

    /// The losing color, if any.
    pub fn loser(&self) -> Option<Color> {
        self.winner().map(Color::opponent)
    }

    /// The single line announcing the result.
    #[instrument]
    pub fn message(&self) -> String {
        match self {
            Verdict::Win { winner, reason } => {
                let loser = winner.opponent();
                let because = match reason {
                    Reason::Rules(WinReason::FewerThanThreeStones) => {
                        format!("{} has fewer than 3 stones", loser)
                    }
                    Reason::Rules(WinReason::ThreeInARow) => {
                        format!("{} has three in a row", winner)
                    }
                    Reason::Forfeit(ForfeitKind::TimeOut) => "Time out".to_string(),
                    Reason::Forfeit(ForfeitKind::InvalidMove) => "Invalid move".to_string(),
                    Reason::Forfeit(ForfeitKind::OutOfOrder) => "Out-of-order move".to_string(),
                };
                format!("END: {} WINS! {} LOSES! {}!", winner, loser, because)
            }
            Verdict::Draw(_) => "END: Draw!".to_string(),
        }
    }
}

/// State handed to the visualizer after every accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Number of accepted moves so far.
    pub turn: usize,
    /// Who made `last_move`.
    pub mover: Option<Color>,
    /// The move line just applied, `None` for the opening position.
    pub last_move: Option<String>,
    /// Board and hands after the move.
    pub board: BoardView,
    /// Whether the match is over.
    pub game_over: bool,
    /// Terminal message, once there is one.
    pub message: Option<String>,
}

impl StateSnapshot {
    /// Snapshot of the position before any move.
    pub fn opening(board: BoardView) -> Self {
        Self {
            turn: 0,
            mover: None,
            last_move: None,
            board,
            game_over: false,
            message: None,
        }
    }

    /// Marks the snapshot as final.
    pub fn finish(&mut self, message: &str) {
        self.game_over = true;
        self.message = Some(message.to_string());
    }
}

/// Everything the controller knows once a match is over.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct MatchReport {
    /// Rule set name.
    game: String,
    /// How it ended.
    verdict: Verdict,
    /// The terminal message.
    message: String,
    /// Position after every accepted move, opening position first.
    snapshots: Vec<StateSnapshot>,
}

impl MatchReport {
    /// Creates a report.
    pub fn new(
        game: String,
        verdict: Verdict,
        message: String,
        snapshots: Vec<StateSnapshot>,
    ) -> Self {
        Self {
            game,
            verdict,
            message,
            snapshots,
        }
    }

    /// Move lines in the order they were accepted.
    pub fn moves(&self) -> Vec<&str> {
        self.snapshots
            .iter()
            .filter_map(|s| s.last_move.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_loss_message() {
        let verdict = Verdict::from_ending(Ending::Win {
            winner: Color::Blue,
            reason: WinReason::FewerThanThreeStones,
        });
        assert_eq!(
            verdict.message(),
            "END: blue WINS! orange LOSES! orange has fewer than 3 stones!"
        );
        assert_eq!(verdict.loser(), Some(Color::Orange));
    }

    #[test]
    fn test_forfeit_messages() {
        let timeout = Verdict::forfeit(Color::Blue, &MatchFault::Timeout { timeout_ms: 5000 });
        assert_eq!(timeout.message(), "END: orange WINS! blue LOSES! Time out!");

        let invalid = Verdict::forfeit(
            Color::Orange,
            &MatchFault::ProcessTermination {
                detail: "eof".into(),
            },
        );
        assert_eq!(invalid.message(), "END: blue WINS! orange LOSES! Invalid move!");

        let early = Verdict::forfeit(
            Color::Orange,
            &MatchFault::OutOfOrder {
                line: "h2 a1 r0".into(),
            },
        );
        assert_eq!(
            early.message(),
            "END: blue WINS! orange LOSES! Out-of-order move!"
        );
    }

    #[test]
    fn test_three_in_a_row_message() {
        let verdict = Verdict::from_ending(Ending::Win {
            winner: Color::Orange,
            reason: WinReason::ThreeInARow,
        });
        assert_eq!(
            verdict.message(),
            "END: orange WINS! blue LOSES! orange has three in a row!"
        );
    }

    #[test]
    fn test_draw_message_has_no_cause() {
        for reason in [
            DrawReason::Repetition,
            DrawReason::QuietMoves(20),
            DrawReason::BoardFull,
        ] {
            let verdict = Verdict::from_ending(Ending::Draw(reason));
            assert_eq!(verdict.message(), "END: Draw!");
            assert_eq!(verdict.winner(), None);
        }
    }
}
