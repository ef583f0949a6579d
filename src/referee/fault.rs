//! Ways a player can forfeit a match.

use serde::{Deserialize, Serialize};

/// A protocol or rules violation by the player whose turn it was.
///
/// Every fault ends the match; there is no re-prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum MatchFault {
    /// The line is not a move at all.
    #[display("unparseable move '{line}': {detail}")]
    SyntaxError {
        /// Line as received.
        line: String,
        /// Parser diagnostic.
        detail: String,
    },
    /// The move is well formed but not allowed.
    #[display("illegal move '{line}': {detail}")]
    IllegalMove {
        /// Line as received.
        line: String,
        /// Validator diagnostic.
        detail: String,
    },
    /// No complete line before the deadline.
    #[display("no move within {timeout_ms} ms")]
    Timeout {
        /// The deadline that expired.
        timeout_ms: u64,
    },
    /// The player spoke without being asked.
    #[display("line '{line}' sent out of turn")]
    OutOfOrder {
        /// The unsolicited line.
        line: String,
    },
    /// The player's stream closed or could not be written.
    #[display("player stream closed: {detail}")]
    ProcessTermination {
        /// What the transport reported.
        detail: String,
    },
}

impl std::error::Error for MatchFault {}

/// Reason printed in the terminal message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForfeitKind {
    /// `Invalid move`.
    InvalidMove,
    /// `Time out`.
    TimeOut,
    /// `Out-of-order move`.
    OutOfOrder,
}

impl MatchFault {
    /// Collapses the fault into the reason the outcome reports.
    ///
    /// Syntax errors, illegal moves and dead processes are indistinguishable
    /// in the terminal message.
    pub fn kind(&self) -> ForfeitKind {
        match self {
            MatchFault::SyntaxError { .. }
            | MatchFault::IllegalMove { .. }
            | MatchFault::ProcessTermination { .. } => ForfeitKind::InvalidMove,
            MatchFault::Timeout { .. } => ForfeitKind::TimeOut,
            MatchFault::OutOfOrder { .. } => ForfeitKind::OutOfOrder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_move_family() {
        let faults = [
            MatchFault::SyntaxError {
                line: "d1d2e3".into(),
                detail: "expected 3 tokens, found 1".into(),
            },
            MatchFault::IllegalMove {
                line: "h2 d1 r0".into(),
                detail: "wrong hand".into(),
            },
            MatchFault::ProcessTermination {
                detail: "eof".into(),
            },
        ];
        for fault in faults {
            assert_eq!(fault.kind(), ForfeitKind::InvalidMove, "{fault}");
        }
    }

    #[test]
    fn test_timeout_and_out_of_order() {
        assert_eq!(
            MatchFault::Timeout { timeout_ms: 5000 }.kind(),
            ForfeitKind::TimeOut
        );
        assert_eq!(
            MatchFault::OutOfOrder { line: "h2 a1 r0".into() }.kind(),
            ForfeitKind::OutOfOrder
        );
    }

    #[test]
    fn test_display_keeps_diagnostics() {
        let fault = MatchFault::SyntaxError {
            line: "d1d2e3".into(),
            detail: "expected 3 tokens, found 1".into(),
        };
        assert_eq!(
            fault.to_string(),
            "unparseable move 'd1d2e3': expected 3 tokens, found 1"
        );
    }
}
