//! The 8x8 reversi board: placement, capture and legality queries.

use super::types::{BOARD_SIZE, Cell, Color, Coord};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The eight ray directions as `(row delta, col delta)`.
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Result of asking the board to place a disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// The disk was placed and these opponent disks were flipped (never empty).
    Captured(Vec<Coord>),
    /// The cell is occupied, off the board, or captures nothing. Board untouched.
    NotPossible,
}

impl Placement {
    /// Returns true for [`Placement::NotPossible`].
    pub fn is_not_possible(&self) -> bool {
        matches!(self, Placement::NotPossible)
    }
}

/// Who is ahead once neither side can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardWinner {
    /// This color has more disks.
    Color(Color),
    /// Equal disk counts.
    Tie,
    /// At least one side can still move.
    InProgress,
}

/// Error parsing a textual board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid board text: {}", message)]
pub struct BoardParseError {
    /// What was wrong.
    pub message: String,
}

/// Reversi board in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a board in the standard starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// Creates a board with no disks.
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Builds a board from eight rows of `B`, `W` and `.`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardParseError`] if there are not eight rows of eight
    /// characters or a character is not one of `B`, `W`, `.`.
    #[instrument(skip(rows))]
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardParseError> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardParseError {
                message: format!("expected {} rows, got {}", BOARD_SIZE, rows.len()),
            });
        }

        let mut board = Self::empty();
        for (r, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != BOARD_SIZE {
                return Err(BoardParseError {
                    message: format!("row {} has {} cells", r, chars.len()),
                });
            }
            for (c, ch) in chars.into_iter().enumerate() {
                board.cells[r][c] = match ch {
                    'B' => Cell::Occupied(Color::Black),
                    'W' => Cell::Occupied(Color::White),
                    '.' => Cell::Empty,
                    other => {
                        return Err(BoardParseError {
                            message: format!("unexpected '{}' at row {} col {}", other, r, c),
                        });
                    }
                };
            }
        }
        Ok(board)
    }

    /// Restores the standard four-disk opening.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        self.cells[3][3] = Cell::Occupied(Color::White);
        self.cells[4][4] = Cell::Occupied(Color::White);
        self.cells[3][4] = Cell::Occupied(Color::Black);
        self.cells[4][3] = Cell::Occupied(Color::Black);
    }

    /// Returns the cell at `coord`, or `None` off the board.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if coord.in_bounds() {
            Some(self.cells[coord.row as usize][coord.col as usize])
        } else {
            None
        }
    }

    fn set(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.row as usize][coord.col as usize] = cell;
    }

    /// Opponent disks that placing `color` at `coord` would flip.
    fn captures(&self, coord: Coord, color: Color) -> Vec<Coord> {
        if self.get(coord) != Some(Cell::Empty) {
            return Vec::new();
        }

        let own = Cell::Occupied(color);
        let opp = Cell::Occupied(color.opposite());
        let mut flips = Vec::new();

        for (dr, dc) in DIRECTIONS {
            let mut ray = Vec::new();
            let mut cursor = coord.step(dr, dc);
            while let Some(at) = cursor {
                match self.get(at) {
                    Some(cell) if cell == opp => ray.push(at),
                    Some(cell) if cell == own => {
                        flips.extend(ray);
                        break;
                    }
                    _ => break,
                }
                cursor = at.step(dr, dc);
            }
        }

        flips
    }

    /// Places `color` at `coord` and flips every bracketed opponent disk.
    ///
    /// A placement that would capture nothing leaves the board untouched.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, coord: Coord, color: Color) -> Placement {
        let mut flipped = self.captures(coord, color);
        if flipped.is_empty() {
            debug!("Placement captures nothing");
            return Placement::NotPossible;
        }

        self.set(coord, Cell::Occupied(color));
        for at in &flipped {
            self.set(*at, Cell::Occupied(color));
        }
        flipped.sort();

        debug!(flipped = flipped.len(), "Placement applied");
        Placement::Captured(flipped)
    }

    /// All coordinates where `color` may legally play, in row-major order.
    #[instrument(skip(self))]
    pub fn legal_moves(&self, color: Color) -> Vec<Coord> {
        all_coords()
            .filter(|coord| !self.captures(*coord, color).is_empty())
            .collect()
    }

    /// Returns true if `color` has at least one legal move.
    #[instrument(skip(self))]
    pub fn has_legal_move(&self, color: Color) -> bool {
        all_coords().any(|coord| !self.captures(coord, color).is_empty())
    }

    /// Number of disks of `color`.
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Cell::Occupied(color))
            .count()
    }

    /// Number of disks of either color.
    pub fn occupied(&self) -> usize {
        self.count(Color::Black) + self.count(Color::White)
    }

    /// Decides the winner by disk count once neither side can move.
    #[instrument(skip(self))]
    pub fn winner(&self) -> BoardWinner {
        if self.has_legal_move(Color::Black) || self.has_legal_move(Color::White) {
            return BoardWinner::InProgress;
        }

        let black = self.count(Color::Black);
        let white = self.count(Color::White);
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => BoardWinner::Color(Color::Black),
            std::cmp::Ordering::Less => BoardWinner::Color(Color::White),
            std::cmp::Ordering::Equal => BoardWinner::Tie,
        }
    }

    /// Copy of the grid.
    pub fn snapshot(&self) -> [[Cell; BOARD_SIZE]; BOARD_SIZE] {
        self.cells
    }

    /// Formats the board as a human-readable grid with row and column labels.
    pub fn display(&self) -> String {
        let mut result = String::from("  0 1 2 3 4 5 6 7\n");
        for (r, row) in self.cells.iter().enumerate() {
            result.push_str(&r.to_string());
            for cell in row {
                result.push(' ');
                result.push(match cell {
                    Cell::Empty => '.',
                    Cell::Occupied(color) => color.symbol(),
                });
            }
            if r + 1 < BOARD_SIZE {
                result.push('\n');
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn all_coords() -> impl Iterator<Item = Coord> {
    (0..BOARD_SIZE as u8).flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Coord::new(row, col)))
}
