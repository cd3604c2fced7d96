//! Strictly Reversi library - actor-per-match reversi orchestration
//!
//! Each match is owned by a single tokio task that processes requests one at
//! a time, so a match needs no locks while unrelated matches run in parallel.
//!
//! # Architecture
//!
//! - **Games**: board, history, players and the pure turn state machine
//! - **Session**: one match's state and its move pipeline
//! - **Worker / Handle**: the per-match mailbox and its request/reply client
//! - **Directory**: shared registry resolving match ids to handles
//!
//! # Example
//!
//! ```no_run
//! use strictly_reversi::{MatchConfig, MatchDirectory, Slot};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let directory = MatchDirectory::new(MatchConfig::default());
//! let game = directory.open_match("m1".to_string(), "Alice".to_string()).await?;
//! game.join("Bob".to_string()).await?;
//!
//! let outcome = game.make_move(Slot::A, 2, 3).await?;
//! println!("{:?}", outcome.possible_moves);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod directory;
mod error;
mod games;
mod handle;
mod session;
mod worker;

// Crate-level exports - Configuration
pub use config::MatchConfig;

// Crate-level exports - Errors
pub use error::{ConfigError, DirectoryError, MatchError};

// Crate-level exports - Match orchestration
pub use directory::MatchDirectory;
pub use handle::MatchHandle;
pub use session::{FullState, MatchId, MatchSession};
pub use worker::MatchWorker;

// Crate-level exports - Game types (reversi)
pub use games::reversi::invariants;
pub use games::reversi::{
    BOARD_SIZE, Board, BoardParseError, BoardWinner, Cell, Color, Coord, History, MatchWinner,
    Move, MoveOutcome, PassStatus, Phase, PhaseError, PhaseEvent, PhaseSignal, Placement, Player,
    RematchStatus, Slot, SlotPair, Transition, WinStatus,
};
