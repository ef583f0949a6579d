//! Move lines and their syntax.
//!
//! A move line is `<source> <target> <removal>`:
//! - source: `h1`, `h2` or a board point,
//! - target: a board point,
//! - removal: `r0` or a board point.
//!
//! Parsing is purely syntactic. Whether the move makes sense on the current
//! board is the validator's business.

use super::topology::Position;
use crate::games::Color;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Hand token naming which reserve a stone comes from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum HandToken {
    /// Reserve of the first mover (blue).
    H1,
    /// Reserve of the second mover (orange).
    H2,
}

impl HandToken {
    /// Token owned by `color`.
    pub fn of(color: Color) -> Self {
        match color {
            Color::Blue => HandToken::H1,
            Color::Orange => HandToken::H2,
        }
    }
}

/// Where the moved stone comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Source {
    /// Placement from a hand.
    #[display("{}", _0)]
    Hand(HandToken),
    /// Step or flight from a board point.
    #[display("{}", _0)]
    Board(Position),
}

/// Which opponent stone, if any, is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Removal {
    /// `r0`: nothing is removed.
    #[display("r0")]
    Nothing,
    /// The opponent stone at this point is removed.
    #[display("{}", _0)]
    Capture(Position),
}

/// A syntactically valid move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{} {} {}", source, target, removal)]
pub struct Move {
    /// Origin of the stone.
    pub source: Source,
    /// Destination point.
    pub target: Position,
    /// Capture carried by the move.
    pub removal: Removal,
}

impl Move {
    /// Creates a move.
    pub fn new(source: Source, target: Position, removal: Removal) -> Self {
        Self {
            source,
            target,
            removal,
        }
    }
}

/// Why a line is not a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseError {
    /// The line did not split into exactly three tokens.
    #[display("expected 3 tokens, found {}", _0)]
    TokenCount(usize),
    /// First token is neither a hand token nor a point.
    #[display("invalid source '{}'", _0)]
    Source(String),
    /// Second token is not a point.
    #[display("invalid target '{}'", _0)]
    Target(String),
    /// Third token is neither `r0` nor a point.
    #[display("invalid removal '{}'", _0)]
    Removal(String),
}

impl std::error::Error for ParseError {}

impl FromStr for Move {
    type Err = ParseError;

    #[instrument]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [source, target, removal] = tokens.as_slice() else {
            return Err(ParseError::TokenCount(tokens.len()));
        };

        let source = if let Ok(hand) = source.parse::<HandToken>() {
            Source::Hand(hand)
        } else {
            source
                .parse::<Position>()
                .map(Source::Board)
                .map_err(|_| ParseError::Source(source.to_string()))?
        };

        let target = target
            .parse::<Position>()
            .map_err(|_| ParseError::Target(target.to_string()))?;

        let removal = if *removal == "r0" {
            Removal::Nothing
        } else {
            removal
                .parse::<Position>()
                .map(Removal::Capture)
                .map_err(|_| ParseError::Removal(removal.to_string()))?
        };

        Ok(Move::new(source, target, removal))
    }
}

/// Parses a move line.
#[instrument]
pub fn parse(line: &str) -> Result<Move, ParseError> {
    line.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Position::*;

    #[test]
    fn test_parse_hand_placement() {
        let mv = parse("h1 d1 r0").unwrap();
        assert_eq!(mv, Move::new(Source::Hand(HandToken::H1), D1, Removal::Nothing));
    }

    #[test]
    fn test_parse_board_move_with_capture() {
        let mv = parse("d1 a1 e3").unwrap();
        assert_eq!(mv, Move::new(Source::Board(D1), A1, Removal::Capture(E3)));
    }

    #[test]
    fn test_display_round_trips_text() {
        for line in ["h2 g7 r0", "b4 c4 d2"] {
            assert_eq!(parse(line).unwrap().to_string(), line);
        }
    }

    #[test]
    fn test_extra_whitespace_is_tolerated() {
        assert!(parse("  h1\td1   r0 ").is_ok());
    }

    #[test]
    fn test_wrong_token_count() {
        assert_eq!(parse("d1d2e3"), Err(ParseError::TokenCount(1)));
        assert_eq!(parse(""), Err(ParseError::TokenCount(0)));
        assert_eq!(parse("h1 d1"), Err(ParseError::TokenCount(2)));
        assert_eq!(parse("h1 d1 r0 extra"), Err(ParseError::TokenCount(4)));
    }

    #[test]
    fn test_bad_tokens() {
        assert_eq!(parse("h3 d1 r0"), Err(ParseError::Source("h3".into())));
        assert_eq!(parse("h d1 r0"), Err(ParseError::Source("h".into())));
        assert_eq!(parse("h1 x9 r0"), Err(ParseError::Target("x9".into())));
        assert_eq!(parse("h1 h1 r0"), Err(ParseError::Target("h1".into())));
        assert_eq!(parse("h1 d4 r0"), Err(ParseError::Target("d4".into())));
        assert_eq!(parse("h1 d1 x9"), Err(ParseError::Removal("x9".into())));
        assert_eq!(parse("h1 d1 r1"), Err(ParseError::Removal("r1".into())));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(parse("H1 D1 R0").is_err());
    }

    #[test]
    fn test_no_semantic_checks() {
        // Same source and target is a validator concern.
        assert!(parse("d1 d1 d1").is_ok());
    }
}
