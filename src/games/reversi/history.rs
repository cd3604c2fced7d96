//! Append-only move log.

use super::types::{Color, Coord};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// An accepted move: a color placing a disk at a coordinate.
///
/// Passes are never recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// Where the disk was placed.
    pub coord: Coord,
    /// Who placed it.
    pub color: Color,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.color, self.coord)
    }
}

/// Ordered log of accepted moves since the last reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    moves: Vec<Move>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a move.
    #[instrument(skip(self))]
    pub fn append(&mut self, coord: Coord, color: Color) {
        self.moves.push(Move::new(coord, color));
    }

    /// Clears the log.
    #[instrument(skip(self), fields(len = self.moves.len()))]
    pub fn reset(&mut self) {
        self.moves.clear();
    }

    /// Moves in the order they were played.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Number of recorded moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if nothing has been played since the last reset.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_reset() {
        let mut history = History::new();
        history.append(Coord::new(2, 3), Color::Black);
        history.append(Coord::new(2, 2), Color::White);
        assert_eq!(history.len(), 2);
        assert_eq!(history.moves()[1], Move::new(Coord::new(2, 2), Color::White));

        history.reset();
        assert!(history.is_empty());
    }
}
