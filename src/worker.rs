//! Match worker that owns the authoritative [`MatchSession`].
//!
//! Each match runs as its own tokio task and drains its mailbox one command
//! at a time, so no command ever observes another command half done.

use crate::error::MatchError;
use crate::games::reversi::{Coord, History, MatchWinner, MoveOutcome, Phase, RematchStatus, Slot};
use crate::handle::MatchHandle;
use crate::session::{FullState, MatchSession};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Commands that can be sent to a match worker.
#[derive(Debug)]
pub(crate) enum Command {
    /// Seat a second player.
    Join {
        name: String,
        reply: oneshot::Sender<Result<Slot, MatchError>>,
    },
    /// Record a rematch vote.
    RequestRematch {
        slot: Slot,
        reply: oneshot::Sender<Result<RematchStatus, MatchError>>,
    },
    /// Run the move pipeline.
    MakeMove {
        slot: Slot,
        coord: Coord,
        reply: oneshot::Sender<Result<MoveOutcome, MatchError>>,
    },
    /// Query the winner.
    GetWinner { reply: oneshot::Sender<MatchWinner> },
    /// Query a full snapshot.
    GetFullState { reply: oneshot::Sender<FullState> },
    /// Query the phase.
    GetPhase { reply: oneshot::Sender<Phase> },
    /// Query the move log.
    GetHistory { reply: oneshot::Sender<History> },
    /// Terminate after everything queued before it.
    Stop,
}

/// Background task that processes one match's commands in arrival order.
pub struct MatchWorker {
    session: MatchSession,
    command_rx: mpsc::Receiver<Command>,
}

impl MatchWorker {
    /// Creates a new match worker.
    pub(crate) fn new(session: MatchSession, command_rx: mpsc::Receiver<Command>) -> Self {
        Self {
            session,
            command_rx,
        }
    }

    /// Spawns a worker for `session` and returns its handle.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(session), fields(match_id = %session.id()))]
    pub fn spawn(session: MatchSession, mailbox_capacity: usize) -> (MatchHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(mailbox_capacity);
        let handle = MatchHandle::new(session.id().clone(), command_tx);
        let task = tokio::spawn(Self::new(session, command_rx).run());
        (handle, task)
    }

    /// Main worker loop. Returns when stopped or when every handle is dropped.
    pub(crate) async fn run(mut self) {
        info!(match_id = %self.session.id(), "Match worker started");
        while let Some(cmd) = self.command_rx.recv().await {
            if !self.handle_command(cmd) {
                break;
            }
            if !self.verify() {
                break;
            }
        }
        self.command_rx.close();
        info!(match_id = %self.session.id(), "Match worker stopped");
    }

    /// Returns false when the worker should exit.
    fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Join { name, reply } => {
                let _ = reply.send(self.session.join(name));
            }
            Command::RequestRematch { slot, reply } => {
                let _ = reply.send(self.session.request_rematch(slot));
            }
            Command::MakeMove { slot, coord, reply } => {
                let _ = reply.send(self.session.make_move(slot, coord));
            }
            Command::GetWinner { reply } => {
                let _ = reply.send(self.session.winner());
            }
            Command::GetFullState { reply } => {
                let _ = reply.send(self.session.full_state());
            }
            Command::GetPhase { reply } => {
                let _ = reply.send(self.session.phase());
            }
            Command::GetHistory { reply } => {
                let _ = reply.send(self.session.history().clone());
            }
            Command::Stop => {
                debug!(match_id = %self.session.id(), "Stop received");
                return false;
            }
        }
        true
    }

    #[cfg(debug_assertions)]
    fn verify(&self) -> bool {
        match crate::games::reversi::invariants::check_invariants(&self.session) {
            Ok(()) => true,
            Err(violations) => {
                tracing::error!(
                    match_id = %self.session.id(),
                    ?violations,
                    "Invariant violated, terminating match"
                );
                false
            }
        }
    }

    #[cfg(not(debug_assertions))]
    fn verify(&self) -> bool {
        true
    }
}
