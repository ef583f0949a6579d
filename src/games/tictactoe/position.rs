//! Cells of the tic-tac-toe grid.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell, labelled by column letter and row digit (`a1` is top-left).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
pub enum Position {
    /// Top-left (`a1`)
    #[strum(serialize = "a1")]
    TopLeft,
    /// Top-center (`b1`)
    #[strum(serialize = "b1")]
    TopCenter,
    /// Top-right (`c1`)
    #[strum(serialize = "c1")]
    TopRight,
    /// Middle-left (`a2`)
    #[strum(serialize = "a2")]
    MiddleLeft,
    /// Center (`b2`)
    #[strum(serialize = "b2")]
    Center,
    /// Middle-right (`c2`)
    #[strum(serialize = "c2")]
    MiddleRight,
    /// Bottom-left (`a3`)
    #[strum(serialize = "a3")]
    BottomLeft,
    /// Bottom-center (`b3`)
    #[strum(serialize = "b3")]
    BottomCenter,
    /// Bottom-right (`c3`)
    #[strum(serialize = "c3")]
    BottomRight,
}

impl Position {
    /// All 9 positions, row by row.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_to_index() {
        assert_eq!(Position::TopLeft.to_index(), 0);
        assert_eq!(Position::Center.to_index(), 4);
        assert_eq!(Position::BottomRight.to_index(), 8);
    }

    #[test]
    fn test_position_from_index() {
        assert_eq!(Position::from_index(0), Some(Position::TopLeft));
        assert_eq!(Position::from_index(8), Some(Position::BottomRight));
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_cell_labels() {
        assert_eq!(Position::TopRight.to_string(), "c1");
        assert_eq!("a3".parse::<Position>().ok(), Some(Position::BottomLeft));
        for bad in ["", "a", "a11", "d1", "a4", "aa", "11", "B2"] {
            assert!(bad.parse::<Position>().is_err(), "{bad}");
        }
    }
}
