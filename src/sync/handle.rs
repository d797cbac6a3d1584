//! # Sync Handle
//!
//! The caller-facing half of a manager pair. Cheap to clone, shareable
//! across tasks; commands travel over an mpsc channel, snapshots come back
//! over a watch channel so every observer sees each replacement exactly
//! once and none can mutate shared state.

use crate::sync::error::SyncError;
use crate::sync::manager::Command;
use crate::sync::query::RawQuery;
use crate::sync::snapshot::Snapshot;
use crate::sync::source::SyncItem;
use tokio::sync::{mpsc, watch};

/// Handle for querying and observing one collection resource.
#[derive(Clone)]
pub struct SyncHandle<T: SyncItem> {
    commands: mpsc::Sender<Command>,
    snapshot: watch::Receiver<Snapshot<T>>,
}

impl<T: SyncItem> SyncHandle<T> {
    pub(crate) fn new(
        commands: mpsc::Sender<Command>,
        snapshot: watch::Receiver<Snapshot<T>>,
    ) -> Self {
        Self { commands, snapshot }
    }

    /// Reconciles the resource against new caller parameters.
    ///
    /// Safe to call on every re-render: parameters that normalize to the
    /// current descriptor are deduplicated by the manager.
    pub async fn query(&self, params: RawQuery) -> Result<(), SyncError> {
        self.send(Command::Query {
            params: Some(params),
        })
        .await
    }

    /// Disables fetching and clears the published data.
    pub async fn disable(&self) -> Result<(), SyncError> {
        self.send(Command::Query { params: None }).await
    }

    /// Forces a re-dispatch of the current parameters, bypassing the
    /// deduper. Used after a mutation elsewhere invalidated cached data.
    pub async fn refetch(&self) -> Result<(), SyncError> {
        self.send(Command::Refetch).await
    }

    /// A point-in-time copy of the current snapshot.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.snapshot.borrow().clone()
    }

    /// A watch receiver for observing snapshot replacements.
    pub fn watch(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot.clone()
    }

    async fn send(&self, command: Command) -> Result<(), SyncError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SyncError::ManagerClosed)
    }
}
