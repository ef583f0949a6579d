//! Fixed geometry of the Lasker Morris board.
//!
//! The board is a 7x7 grid labelled `a`..`g` by `1`..`7` of which only 24
//! points are playable. Nothing here is mutable.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A playable point on the board.
///
/// Variants are ordered so that `pos as usize` is a dense index `0..24`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[allow(missing_docs)]
pub enum Position {
    A1,
    A4,
    A7,
    B2,
    B4,
    B6,
    C3,
    C4,
    C5,
    D1,
    D2,
    D3,
    D5,
    D6,
    D7,
    E3,
    E4,
    E5,
    F2,
    F4,
    F6,
    G1,
    G4,
    G7,
}

/// Number of playable points.
pub const POSITION_COUNT: usize = 24;

/// Three points on a line. Filling one with a single color forms a mill.
pub type Mill = [Position; 3];

use Position::*;

/// All 16 mills: eight running along the letters, eight along the digits.
pub const MILLS: [Mill; 16] = [
    [A1, A4, A7],
    [B2, B4, B6],
    [C3, C4, C5],
    [D1, D2, D3],
    [D5, D6, D7],
    [E3, E4, E5],
    [F2, F4, F6],
    [G1, G4, G7],
    [A1, D1, G1],
    [B2, D2, F2],
    [C3, D3, E3],
    [A4, B4, C4],
    [E4, F4, G4],
    [C5, D5, E5],
    [B6, D6, F6],
    [A7, D7, G7],
];

impl Position {
    /// Every playable point in index order.
    pub const ALL: [Position; POSITION_COUNT] = [
        A1, A4, A7, B2, B4, B6, C3, C4, C5, D1, D2, D3, D5, D6, D7, E3, E4, E5, F2, F4, F6, G1, G4,
        G7,
    ];

    /// Dense index of this point.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Points reachable in one step along a line.
    pub fn adjacent(self) -> &'static [Position] {
        match self {
            A1 => &[D1, A4],
            A4 => &[A1, A7, B4],
            A7 => &[A4, D7],
            B2 => &[D2, B4],
            B4 => &[B2, B6, A4, C4],
            B6 => &[B4, D6],
            C3 => &[D3, C4],
            C4 => &[C3, C5, B4],
            C5 => &[C4, D5],
            D1 => &[A1, D2, G1],
            D2 => &[D1, D3, B2, F2],
            D3 => &[D2, C3, E3],
            D5 => &[D6, C5, E5],
            D6 => &[D5, D7, B6, F6],
            D7 => &[D6, A7, G7],
            E3 => &[D3, E4],
            E4 => &[E3, E5, F4],
            E5 => &[E4, D5],
            F2 => &[D2, F4],
            F4 => &[F2, F6, E4, G4],
            F6 => &[F4, D6],
            G1 => &[D1, G4],
            G4 => &[G1, G7, F4],
            G7 => &[G4, D7],
        }
    }

    /// Whether `other` is one step away.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.adjacent().contains(&other)
    }

    /// The two mills passing through this point.
    pub fn mills(self) -> impl Iterator<Item = &'static Mill> {
        MILLS.iter().filter(move |mill| mill.contains(&self))
    }
}

/// Whether `label` names a playable point. Case-sensitive.
#[instrument]
pub fn is_valid(label: &str) -> bool {
    label.parse::<Position>().is_ok()
}
