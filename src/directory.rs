//! Registry mapping match identifiers to running match workers.

use crate::config::MatchConfig;
use crate::error::DirectoryError;
use crate::handle::MatchHandle;
use crate::session::{MatchId, MatchSession};
use crate::worker::MatchWorker;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Shared directory of running matches.
///
/// This is the only state shared between matches. Lookups take a read lock
/// and never wait on a match worker.
#[derive(Debug, Clone)]
pub struct MatchDirectory {
    matches: Arc<RwLock<HashMap<MatchId, MatchHandle>>>,
    config: MatchConfig,
}

impl MatchDirectory {
    /// Creates an empty directory.
    #[instrument]
    pub fn new(config: MatchConfig) -> Self {
        info!("Creating match directory");
        Self {
            matches: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Configuration applied to matches opened here.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Registers a handle under `match_id`.
    ///
    /// An entry whose worker has already exited is replaced.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Duplicate`] if the id is taken by a running match.
    #[instrument(skip(self, handle))]
    pub async fn register(
        &self,
        match_id: MatchId,
        handle: MatchHandle,
    ) -> Result<(), DirectoryError> {
        let mut matches = self.matches.write().await;
        if is_running(&matches, &match_id) {
            warn!(match_id = %match_id, "Match already registered");
            return Err(DirectoryError::Duplicate(match_id));
        }
        debug!(match_id = %match_id, "Match registered");
        matches.insert(match_id, handle);
        Ok(())
    }

    /// Looks up the handle for `match_id`.
    ///
    /// A match whose worker has exited is evicted and reported as missing.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::NotFound`] if no running match is registered.
    #[instrument(skip(self))]
    pub async fn resolve(&self, match_id: &str) -> Result<MatchHandle, DirectoryError> {
        let found = self.matches.read().await.get(match_id).cloned();
        match found {
            Some(handle) if !handle.is_closed() => Ok(handle),
            Some(_) => {
                self.evict_exited(match_id).await;
                Err(DirectoryError::NotFound(match_id.to_string()))
            }
            None => {
                warn!(match_id, "Match not found");
                Err(DirectoryError::NotFound(match_id.to_string()))
            }
        }
    }

    async fn evict_exited(&self, match_id: &str) {
        let mut matches = self.matches.write().await;
        if matches.get(match_id).is_some_and(MatchHandle::is_closed) {
            matches.remove(match_id);
            warn!(match_id, "Evicted match whose worker exited");
        }
    }

    /// Starts a worker for `session` and registers it.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Duplicate`] if the session's id is taken by a running
    /// match. No worker is spawned in that case.
    #[instrument(skip(self, session), fields(match_id = %session.id()))]
    pub async fn launch(&self, session: MatchSession) -> Result<MatchHandle, DirectoryError> {
        let mut matches = self.matches.write().await;
        if is_running(&matches, session.id()) {
            warn!("Match already registered");
            return Err(DirectoryError::Duplicate(session.id().clone()));
        }

        let match_id = session.id().clone();
        let (handle, _task) = MatchWorker::spawn(session, *self.config.mailbox_capacity());
        matches.insert(match_id, handle.clone());
        info!(count = matches.len(), "Match launched");
        Ok(handle)
    }

    /// Opens a new match in the standard opening with `first_name` in slot A.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::Duplicate`] if `match_id` is taken.
    #[instrument(skip(self))]
    pub async fn open_match(
        &self,
        match_id: MatchId,
        first_name: String,
    ) -> Result<MatchHandle, DirectoryError> {
        self.launch(MatchSession::new(match_id, first_name)).await
    }

    /// Sends `stop` to the match and removes it from the directory.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::NotFound`] if nothing is registered.
    #[instrument(skip(self))]
    pub async fn stop(&self, match_id: &str) -> Result<(), DirectoryError> {
        let handle = self
            .matches
            .write()
            .await
            .remove(match_id)
            .ok_or_else(|| DirectoryError::NotFound(match_id.to_string()))?;
        handle.stop().await;
        info!(match_id, "Match stopped");
        Ok(())
    }

    /// Lists ids of running matches, sorted.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Vec<MatchId> {
        let mut ids: Vec<_> = self
            .matches
            .read()
            .await
            .iter()
            .filter(|(_, handle)| !handle.is_closed())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        debug!(count = ids.len(), "Listed matches");
        ids
    }
}

fn is_running(matches: &HashMap<MatchId, MatchHandle>, match_id: &str) -> bool {
    matches.get(match_id).is_some_and(|handle| !handle.is_closed())
}

impl Default for MatchDirectory {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}
