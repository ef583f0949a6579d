//! Board occupancy and hand counts for Lasker Morris.

use super::topology::{MILLS, POSITION_COUNT, Position};
use crate::games::Color;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Stones each side starts with in hand.
pub const STARTING_HAND: u8 = 10;

/// Occupancy of the 24 points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    points: [Option<Color>; POSITION_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            points: [None; POSITION_COUNT],
        }
    }

    /// Creates a board with the given stones placed.
    #[instrument]
    pub fn with_stones(stones: &[(Position, Color)]) -> Self {
        let mut board = Self::new();
        for &(pos, color) in stones {
            board.set(pos, Some(color));
        }
        board
    }

    /// Occupant of `pos`.
    pub fn get(&self, pos: Position) -> Option<Color> {
        self.points[pos.index()]
    }

    /// Sets or clears `pos`.
    pub fn set(&mut self, pos: Position, occupant: Option<Color>) {
        self.points[pos.index()] = occupant;
    }

    /// Whether `pos` is free.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Points occupied by `color`.
    pub fn stones(&self, color: Color) -> impl Iterator<Item = Position> + '_ {
        Position::ALL
            .into_iter()
            .filter(move |&pos| self.get(pos) == Some(color))
    }

    /// Number of stones `color` has on the board.
    pub fn count(&self, color: Color) -> u8 {
        self.points.iter().filter(|p| **p == Some(color)).count() as u8
    }

    /// Whether the stone at `pos` sits in a complete mill of its own color.
    pub fn in_mill(&self, pos: Position) -> bool {
        match self.get(pos) {
            Some(color) => pos
                .mills()
                .any(|mill| mill.iter().all(|&p| self.get(p) == Some(color))),
            None => false,
        }
    }

    /// Whether any mill through `pos` is filled entirely by `color`.
    pub fn completes_mill(&self, pos: Position, color: Color) -> bool {
        pos.mills()
            .any(|mill| mill.iter().all(|&p| self.get(p) == Some(color)))
    }

    /// Number of complete mills currently held by `color`.
    pub fn mill_count(&self, color: Color) -> usize {
        MILLS
            .iter()
            .filter(|mill| mill.iter().all(|&p| self.get(p) == Some(color)))
            .count()
    }

    /// Raw occupancy in index order.
    pub fn points(&self) -> &[Option<Color>; POSITION_COUNT] {
        &self.points
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Unplaced stones per color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hands {
    /// Blue's reserve.
    pub blue: u8,
    /// Orange's reserve.
    pub orange: u8,
}

impl Hands {
    /// Both hands full.
    pub fn new() -> Self {
        Self {
            blue: STARTING_HAND,
            orange: STARTING_HAND,
        }
    }

    /// Stones left in `color`'s hand.
    pub fn get(&self, color: Color) -> u8 {
        match color {
            Color::Blue => self.blue,
            Color::Orange => self.orange,
        }
    }

    /// Sets `color`'s hand.
    pub fn set(&mut self, color: Color, count: u8) {
        match color {
            Color::Blue => self.blue = count,
            Color::Orange => self.orange = count,
        }
    }

    /// Takes one stone out of `color`'s hand. Never goes below zero.
    pub fn take(&mut self, color: Color) {
        let count = self.get(color);
        debug_assert!(count > 0, "{color} placed from an empty hand");
        self.set(color, count.saturating_sub(1));
    }
}

impl Default for Hands {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Position::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(Position::ALL.iter().all(|&p| board.is_empty(p)));
        assert_eq!(board.count(Color::Blue), 0);
    }

    #[test]
    fn test_in_mill() {
        let board = Board::with_stones(&[
            (D1, Color::Blue),
            (D2, Color::Blue),
            (D3, Color::Blue),
            (E3, Color::Orange),
        ]);
        assert!(board.in_mill(D2));
        assert!(!board.in_mill(E3));
        assert!(!board.in_mill(A1));
        assert_eq!(board.mill_count(Color::Blue), 1);
        assert_eq!(board.mill_count(Color::Orange), 0);
    }

    #[test]
    fn test_mixed_line_is_not_mill() {
        let board = Board::with_stones(&[
            (D1, Color::Blue),
            (D2, Color::Orange),
            (D3, Color::Blue),
        ]);
        assert!(!board.completes_mill(D3, Color::Blue));
    }

    #[test]
    fn test_hands_take() {
        let mut hands = Hands::new();
        hands.take(Color::Orange);
        assert_eq!(hands.get(Color::Orange), STARTING_HAND - 1);
        assert_eq!(hands.get(Color::Blue), STARTING_HAND);
    }

    #[test]
    fn test_stones_lists_owned_points() {
        let board = Board::with_stones(&[(G7, Color::Orange), (A1, Color::Orange)]);
        let stones: Vec<_> = board.stones(Color::Orange).collect();
        assert_eq!(stones, vec![A1, G7]);
    }
}
