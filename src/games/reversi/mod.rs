mod board;
mod history;
pub mod invariants;
mod outcome;
mod phases;
mod player;
mod types;

pub use board::{Board, BoardParseError, BoardWinner, Placement};
pub use history::{History, Move};
pub use outcome::{MatchWinner, MoveOutcome, PassStatus, RematchStatus, WinStatus};
pub use phases::{Phase, PhaseError, PhaseEvent, PhaseSignal, Transition};
pub use player::Player;
pub use types::{BOARD_SIZE, Cell, Color, Coord, Slot, SlotPair};
