//! Tagged results reported by the move pipeline and winner queries.

use super::board::Placement;
use super::types::{Coord, Slot};
use serde::{Deserialize, Serialize};

/// Whether the opponent was skipped after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassStatus {
    /// The opponent had no legal move; the mover goes again.
    Pass,
    /// Normal alternation.
    NoPass,
}

/// Whether a move ended the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinStatus {
    /// Neither side can move; the match is finished.
    Win,
    /// Play continues.
    NoWin,
}

/// Composite reply to a move request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Captured disks, or `NotPossible` if the board rejected the placement.
    pub placement: Placement,
    /// Pass check result.
    pub pass: PassStatus,
    /// Win check result.
    pub win: WinStatus,
    /// Legal moves for whoever is on move now. Empty once finished.
    pub possible_moves: Vec<Coord>,
}

impl MoveOutcome {
    /// Returns the flipped coordinates unless the move was rejected.
    pub fn captured(&self) -> Option<&[Coord]> {
        match &self.placement {
            Placement::Captured(flipped) => Some(flipped),
            Placement::NotPossible => None,
        }
    }
}

/// Result of a winner query, expressed in slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchWinner {
    /// This slot has more disks.
    Slot(Slot),
    /// Equal disk counts.
    Tie,
    /// At least one side can still move.
    InProgress,
}

/// Result of a rematch vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RematchStatus {
    /// Both slots voted; the board is reset and colors are swapped.
    Rematched,
    /// Waiting for the other slot.
    RematchPending,
}
