//! Cloneable client for a running match worker.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::error::MatchError;
use crate::games::reversi::{Coord, History, MatchWinner, MoveOutcome, Phase, RematchStatus, Slot};
use crate::session::{FullState, MatchId};
use crate::worker::Command;

/// Client-facing handle to one running match.
///
/// Cloning is cheap; every clone talks to the same worker.
#[derive(Debug, Clone)]
pub struct MatchHandle {
    match_id: MatchId,
    command_tx: mpsc::Sender<Command>,
}

impl MatchHandle {
    pub(crate) fn new(match_id: MatchId, command_tx: mpsc::Sender<Command>) -> Self {
        Self {
            match_id,
            command_tx,
        }
    }

    /// Identifier of the match this handle addresses.
    pub fn match_id(&self) -> &MatchId {
        &self.match_id
    }

    /// Returns true once the worker has exited.
    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, MatchError> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| self.unavailable())?;

        reply_rx.await.map_err(|_| self.unavailable())
    }

    fn unavailable(&self) -> MatchError {
        debug!(match_id = %self.match_id, "Match worker unavailable");
        MatchError::Unavailable(self.match_id.clone())
    }

    /// Seats a second player.
    #[instrument(skip(self), fields(match_id = %self.match_id))]
    pub async fn join(&self, name: String) -> Result<Slot, MatchError> {
        self.request(|reply| Command::Join { name, reply }).await?
    }

    /// Records a rematch vote for `slot`.
    #[instrument(skip(self), fields(match_id = %self.match_id))]
    pub async fn request_rematch(&self, slot: Slot) -> Result<RematchStatus, MatchError> {
        self.request(|reply| Command::RequestRematch { slot, reply }).await?
    }

    /// Plays a disk for `slot` at `(row, col)`.
    #[instrument(skip(self), fields(match_id = %self.match_id))]
    pub async fn make_move(&self, slot: Slot, row: u8, col: u8) -> Result<MoveOutcome, MatchError> {
        let coord = Coord::new(row, col);
        self.request(|reply| Command::MakeMove { slot, coord, reply }).await?
    }

    /// Winner by disk count.
    pub async fn get_winner(&self) -> Result<MatchWinner, MatchError> {
        self.request(|reply| Command::GetWinner { reply }).await
    }

    /// Full snapshot.
    pub async fn get_full_state(&self) -> Result<FullState, MatchError> {
        self.request(|reply| Command::GetFullState { reply }).await
    }

    /// Current phase.
    pub async fn get_phase(&self) -> Result<Phase, MatchError> {
        self.request(|reply| Command::GetPhase { reply }).await
    }

    /// Moves played since the last reset.
    pub async fn get_history(&self) -> Result<History, MatchError> {
        self.request(|reply| Command::GetHistory { reply }).await
    }

    /// Asks the worker to exit once everything queued before this is handled.
    ///
    /// Does not wait for the worker to finish.
    #[instrument(skip(self), fields(match_id = %self.match_id))]
    pub async fn stop(&self) {
        if self.command_tx.send(Command::Stop).await.is_err() {
            debug!("Match already stopped");
        }
    }
}
