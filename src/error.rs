//! Error types for match orchestration and the match directory.

use crate::games::reversi::{Color, PhaseError};
use crate::session::MatchId;
use derive_more::{Display, Error};
use tracing::instrument;

/// A rejected match operation. Nothing was mutated.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MatchError {
    /// Join attempted with both slots occupied.
    #[display("Match already has two players")]
    AlreadyFull,

    /// Move attempted before the second player joined.
    #[display("Match has not started")]
    NotStarted,

    /// Move attempted after the game ended.
    #[display("Game is already over")]
    GameOver,

    /// Move attempted by the side that is not on move.
    #[display("Not your turn: {} to move, you are {}", expected, provided)]
    NotYourTurn {
        /// Color on move.
        expected: Color,
        /// Color of the caller.
        provided: Color,
    },

    /// Rematch vote while the game is still running.
    #[display("Rematch is only available after the game is finished")]
    RematchNotAvailable,

    /// The match worker is gone (stopped or crashed).
    #[display("Match {} is no longer running", _0)]
    Unavailable(#[error(not(source))] MatchId),
}

impl From<PhaseError> for MatchError {
    fn from(err: PhaseError) -> Self {
        match err {
            PhaseError::AlreadyFull => MatchError::AlreadyFull,
            PhaseError::NotStarted => MatchError::NotStarted,
            PhaseError::GameOver => MatchError::GameOver,
            PhaseError::WrongColor { expected, provided } => {
                MatchError::NotYourTurn { expected, provided }
            }
            PhaseError::NotFinished => MatchError::RematchNotAvailable,
        }
    }
}

/// A rejected directory operation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum DirectoryError {
    /// No match registered under this id.
    #[display("Match {} not found", _0)]
    NotFound(#[error(not(source))] MatchId),

    /// A match is already registered under this id.
    #[display("Match {} already exists", _0)]
    Duplicate(#[error(not(source))] MatchId),
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
