//! # Single-Entity Synchronization
//!
//! The `fetch_one` variant of the manager, backing detail views. The
//! pipeline is shorter — no pager, no fallback chain — but the staleness
//! rules are identical, keyed by entity id instead of a filter descriptor:
//! opening land A, then quickly opening land B, must never show A's late
//! response in B's view.

use crate::sync::dedupe::{Decision, DedupeState};
use crate::sync::error::{FetchError, SyncError};
use crate::sync::guard::{RequestToken, StaleGuard, Verdict};
use crate::sync::snapshot::EntitySnapshot;
use crate::sync::source::{EntitySource, SyncItem};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Tuning knobs for one entity manager. Paging knobs do not apply here.
#[derive(Debug, Clone)]
pub struct EntityOptions {
    /// Resource label used in logs.
    pub kind: &'static str,
    /// When false the manager treats every load as the cleared sentinel.
    pub enabled: bool,
    /// Re-dispatch the current id on a timer, bypassing the deduper.
    pub auto_refresh: bool,
    /// Cadence for `auto_refresh`.
    pub refresh_interval: Duration,
    /// Command channel capacity.
    pub buffer_size: usize,
}

impl Default for EntityOptions {
    fn default() -> Self {
        Self {
            kind: "entity",
            enabled: true,
            auto_refresh: false,
            refresh_interval: Duration::from_secs(30),
            buffer_size: 16,
        }
    }
}

impl EntityOptions {
    /// Options for `kind` with everything else defaulted.
    pub fn for_kind(kind: &'static str) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

#[derive(Debug)]
enum EntityCommand {
    /// Load the entity with the given id; `None` clears the view.
    Load { id: Option<String> },
    /// Re-dispatch the current id past the deduper.
    Refetch,
}

struct EntityCompletion<T> {
    token: RequestToken,
    outcome: Result<Option<T>, FetchError>,
}

/// The per-detail-view synchronization actor.
pub struct EntityManager<T: SyncItem> {
    options: EntityOptions,
    source: Arc<dyn EntitySource<Item = T>>,
    commands: mpsc::Receiver<EntityCommand>,
    done_tx: mpsc::Sender<EntityCompletion<T>>,
    done_rx: mpsc::Receiver<EntityCompletion<T>>,
    guard: StaleGuard,
    dedupe: DedupeState<String>,
    publisher: watch::Sender<EntitySnapshot<T>>,
    current_id: Option<String>,
}

impl<T: SyncItem> EntityManager<T> {
    /// Creates a manager and its handle; drive the manager via
    /// [`run`](Self::run).
    pub fn new(
        options: EntityOptions,
        source: Arc<dyn EntitySource<Item = T>>,
    ) -> (Self, EntityHandle<T>) {
        let (cmd_tx, cmd_rx) = mpsc::channel(options.buffer_size);
        let (done_tx, done_rx) = mpsc::channel(options.buffer_size);
        let (snap_tx, snap_rx) = watch::channel(EntitySnapshot::default());
        let manager = Self {
            options,
            source,
            commands: cmd_rx,
            done_tx,
            done_rx,
            guard: StaleGuard::new(),
            dedupe: DedupeState::new(),
            publisher: snap_tx,
            current_id: None,
        };
        (manager, EntityHandle { commands: cmd_tx, snapshot: snap_rx })
    }

    /// Runs the manager's event loop until every handle is dropped.
    pub async fn run(mut self) {
        let kind = self.options.kind;
        info!(resource = kind, endpoint = self.source.label(), "entity manager started");

        let mut refresh = self.options.auto_refresh.then(|| {
            let mut interval = time::interval(self.options.refresh_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        loop {
            tokio::select! {
                cmd = self.commands.recv() => match cmd {
                    Some(EntityCommand::Load { id }) => self.reconcile(id),
                    Some(EntityCommand::Refetch) => self.refetch(),
                    None => break,
                },
                Some(completion) = self.done_rx.recv() => self.complete(completion),
                _ = next_tick(&mut refresh) => self.refresh_tick(),
            }
        }

        debug!(resource = kind, "entity manager stopped");
    }

    fn reconcile(&mut self, id: Option<String>) {
        let id = if self.options.enabled { id } else { None };
        let Some(id) = id else {
            self.clear();
            return;
        };
        if self.dedupe.decide(Some(&id)) != Decision::Dispatch {
            debug!(resource = self.options.kind, %id, "load deduplicated");
            return;
        }
        self.current_id = Some(id.clone());
        self.dispatch(id);
    }

    fn clear(&mut self) {
        self.guard.invalidate();
        self.dedupe.note_disabled();
        self.current_id = None;
        self.publisher.send_replace(EntitySnapshot::default());
        debug!(resource = self.options.kind, "view cleared");
    }

    fn dispatch(&mut self, id: String) {
        let token = self.guard.begin();
        self.dedupe.note_dispatch(id.clone());

        let mut snapshot = self.publisher.borrow().clone();
        snapshot.loading = true;
        self.publisher.send_replace(snapshot);

        debug!(resource = self.options.kind, %token, %id, "load dispatched");

        let source = self.source.clone();
        let done = self.done_tx.clone();
        tokio::spawn(async move {
            let outcome = source.fetch_one(&id).await;
            let _ = done.send(EntityCompletion { token, outcome }).await;
        });
    }

    fn complete(&mut self, completion: EntityCompletion<T>) {
        let EntityCompletion { token, outcome } = completion;
        if self.guard.settle(token) == Verdict::Stale {
            debug!(resource = self.options.kind, %token, "stale response discarded");
            return;
        }
        self.dedupe.note_settled();

        let previous = self.publisher.borrow().clone();
        let snapshot = match outcome {
            Ok(item) => EntitySnapshot {
                item,
                loading: false,
                error: None,
            },
            Err(e) if e.auth_expired() => {
                info!(resource = self.options.kind, "session expired, clearing view");
                EntitySnapshot::default()
            }
            Err(e) => {
                warn!(resource = self.options.kind, error = %e, "load failed");
                EntitySnapshot {
                    item: previous.item,
                    loading: false,
                    error: Some(e),
                }
            }
        };
        self.publisher.send_replace(snapshot);
    }

    fn refetch(&mut self) {
        let Some(id) = self.current_id.clone() else {
            debug!(resource = self.options.kind, "refetch ignored, nothing loaded");
            return;
        };
        self.dedupe.force();
        self.reconcile(Some(id));
    }

    fn refresh_tick(&mut self) {
        if self.current_id.is_none() || self.guard.pending() {
            return;
        }
        debug!(resource = self.options.kind, "auto refresh");
        self.dedupe.force();
        self.reconcile(self.current_id.clone());
    }
}

/// Handle for loading and observing one single-entity resource.
#[derive(Clone)]
pub struct EntityHandle<T: SyncItem> {
    commands: mpsc::Sender<EntityCommand>,
    snapshot: watch::Receiver<EntitySnapshot<T>>,
}

impl<T: SyncItem> EntityHandle<T> {
    /// Loads the entity with the given id. Loads for the id already shown
    /// or in flight are deduplicated.
    pub async fn load(&self, id: impl Into<String>) -> Result<(), SyncError> {
        self.send(EntityCommand::Load { id: Some(id.into()) }).await
    }

    /// Clears the view and invalidates any in-flight load.
    pub async fn clear(&self) -> Result<(), SyncError> {
        self.send(EntityCommand::Load { id: None }).await
    }

    /// Forces a re-dispatch of the current id, bypassing the deduper.
    pub async fn refetch(&self) -> Result<(), SyncError> {
        self.send(EntityCommand::Refetch).await
    }

    /// A point-in-time copy of the current snapshot.
    pub fn snapshot(&self) -> EntitySnapshot<T> {
        self.snapshot.borrow().clone()
    }

    /// A watch receiver for observing snapshot replacements.
    pub fn watch(&self) -> watch::Receiver<EntitySnapshot<T>> {
        self.snapshot.clone()
    }

    async fn send(&self, command: EntityCommand) -> Result<(), SyncError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SyncError::ManagerClosed)
    }
}

/// Resolves on the next refresh tick; never resolves for managers without
/// auto-refresh.
async fn next_tick(refresh: &mut Option<time::Interval>) {
    match refresh.as_mut() {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
