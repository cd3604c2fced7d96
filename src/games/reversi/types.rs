//! Core domain types for reversi.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Side length of the board.
pub const BOARD_SIZE: usize = 8;

/// Piece color. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    /// Moves first.
    Black,
    /// Moves second.
    White,
}

impl Color {
    /// Returns the other color.
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Single-character symbol used by [`Board::from_rows`](super::Board::from_rows)
    /// and board rendering.
    pub fn symbol(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No disk.
    #[default]
    Empty,
    /// Disk of the given color.
    Occupied(Color),
}

/// A board coordinate, zero-based from the top-left corner.
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
    derive_new::new,
)]
pub struct Coord {
    /// Row, 0-7.
    pub row: u8,
    /// Column, 0-7.
    pub col: u8,
}

impl Coord {
    /// Returns true if the coordinate lies on the board.
    pub fn in_bounds(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// Steps one cell in direction `(dr, dc)`, returning `None` off the board.
    pub(crate) fn step(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        let range = 0..BOARD_SIZE as i8;
        if range.contains(&row) && range.contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Fixed participant identity. Slots never change during a match; colors do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Slot {
    /// Creator of the match. Starts as black.
    A,
    /// Second participant. Starts as white.
    B,
}

impl Slot {
    /// Returns the other slot.
    pub fn other(self) -> Self {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

/// Two values indexed by [`Slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotPair<T> {
    /// Value for slot A.
    pub a: T,
    /// Value for slot B.
    pub b: T,
}

impl<T> SlotPair<T> {
    /// Creates a pair from both values.
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    /// Iterates `(slot, value)` in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &T)> {
        [(Slot::A, &self.a), (Slot::B, &self.b)].into_iter()
    }

    /// Iterates `(slot, value)` mutably in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Slot, &mut T)> {
        [(Slot::A, &mut self.a), (Slot::B, &mut self.b)].into_iter()
    }
}

impl<T> Index<Slot> for SlotPair<T> {
    type Output = T;

    fn index(&self, slot: Slot) -> &T {
        match slot {
            Slot::A => &self.a,
            Slot::B => &self.b,
        }
    }
}

impl<T> IndexMut<Slot> for SlotPair<T> {
    fn index_mut(&mut self, slot: Slot) -> &mut T {
        match slot {
            Slot::A => &mut self.a,
            Slot::B => &mut self.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_color() {
        assert_eq!(Color::Black.opposite(), Color::White);
        assert_eq!(Color::White.opposite(), Color::Black);
    }

    #[test]
    fn test_coord_step_off_board() {
        assert_eq!(Coord::new(0, 0).step(-1, 0), None);
        assert_eq!(Coord::new(7, 7).step(0, 1), None);
        assert_eq!(Coord::new(3, 3).step(1, -1), Some(Coord::new(4, 2)));
    }

    #[test]
    fn test_slot_pair_index() {
        let mut pair = SlotPair::new(1, 2);
        assert_eq!(pair[Slot::A], 1);
        pair[Slot::B] = 5;
        assert_eq!(pair[Slot::B], 5);
        assert_eq!(Slot::A.other(), Slot::B);
    }
}
