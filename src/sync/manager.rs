//! # Resource Synchronization Manager
//!
//! One `SyncManager` instance exists per logical collection resource. It is
//! the "server" half of the pair: it owns the token counter, the dedupe
//! state and the published snapshot, and it processes commands and fetch
//! completions **sequentially** in its own Tokio task. Fetches themselves
//! run in spawned tasks and report back through a completion channel, so
//! the manager never blocks on the network while remaining free of locks.
//!
//! **Concurrency model**: all ordering hazards funnel through this one
//! loop. A command and a completion can interleave arbitrarily in time,
//! but the loop sees them one at a time, and the
//! [`StaleGuard`](crate::sync::StaleGuard) decides which completions are
//! still allowed to mutate the snapshot. Instances share no state with
//! each other; two managers for the same logical resource issue
//! independent, duplicate network calls by design.

use crate::sync::config::SyncOptions;
use crate::sync::dedupe::{Decision, DedupeState};
use crate::sync::error::FetchError;
use crate::sync::fallback::{resolve_chain, Resolved};
use crate::sync::guard::{RequestToken, StaleGuard, Verdict};
use crate::sync::handle::SyncHandle;
use crate::sync::page::collect_pages;
use crate::sync::query::{normalize, Descriptor, RawQuery};
use crate::sync::snapshot::Snapshot;
use crate::sync::source::{PageSource, SyncItem};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Commands a handle can send to its manager.
#[derive(Debug)]
pub(crate) enum Command {
    /// Reconcile against new caller parameters; `None` disables fetching
    /// and clears the published data.
    Query { params: Option<RawQuery> },
    /// Re-dispatch the current parameters past the deduper.
    Refetch,
}

/// A finished fetch attempt, tagged with the token it was dispatched under.
struct Completion<T> {
    token: RequestToken,
    outcome: Result<Resolved<T>, FetchError>,
}

/// The per-resource synchronization actor.
pub struct SyncManager<T: SyncItem> {
    options: SyncOptions,
    sources: Vec<Arc<dyn PageSource<Item = T>>>,
    commands: mpsc::Receiver<Command>,
    done_tx: mpsc::Sender<Completion<T>>,
    done_rx: mpsc::Receiver<Completion<T>>,
    guard: StaleGuard,
    dedupe: DedupeState<Descriptor>,
    publisher: watch::Sender<Snapshot<T>>,
    /// Raw parameters behind the current descriptor, kept for refetch and
    /// auto-refresh re-dispatch.
    last_params: Option<RawQuery>,
}

impl<T: SyncItem> SyncManager<T> {
    /// Creates a manager and its handle.
    ///
    /// The manager must be driven via [`run`](Self::run), usually in a
    /// spawned task. The handle is cheap to clone; the manager shuts down
    /// when every clone is dropped.
    pub fn new(
        options: SyncOptions,
        sources: Vec<Arc<dyn PageSource<Item = T>>>,
    ) -> (Self, SyncHandle<T>) {
        let (cmd_tx, cmd_rx) = mpsc::channel(options.buffer_size);
        let (done_tx, done_rx) = mpsc::channel(options.buffer_size);
        let (snap_tx, snap_rx) = watch::channel(Snapshot::default());
        let manager = Self {
            options,
            sources,
            commands: cmd_rx,
            done_tx,
            done_rx,
            guard: StaleGuard::new(),
            dedupe: DedupeState::new(),
            publisher: snap_tx,
            last_params: None,
        };
        (manager, SyncHandle::new(cmd_tx, snap_rx))
    }

    /// Runs the manager's event loop until every handle is dropped.
    pub async fn run(mut self) {
        let kind = self.options.kind;
        info!(
            resource = kind,
            candidates = self.sources.len(),
            "sync manager started"
        );

        let mut refresh = self.options.auto_refresh.then(|| {
            let mut interval = time::interval(self.options.refresh_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        loop {
            tokio::select! {
                cmd = self.commands.recv() => match cmd {
                    Some(Command::Query { params }) => self.reconcile(params),
                    Some(Command::Refetch) => self.refetch(),
                    None => break,
                },
                Some(completion) = self.done_rx.recv() => self.complete(completion),
                _ = next_tick(&mut refresh) => self.refresh_tick(),
            }
        }

        // In-flight completions now have nowhere to land: their tokens can
        // never settle, which is exactly the teardown contract.
        debug!(resource = kind, "sync manager stopped");
    }

    /// Runs caller parameters through normalize → dedupe → dispatch.
    fn reconcile(&mut self, params: Option<RawQuery>) {
        let params = if self.options.enabled { params } else { None };
        let Some(descriptor) = normalize(params.as_ref(), self.options.defaults()) else {
            self.disable();
            return;
        };
        if self.dedupe.decide(Some(&descriptor)) != Decision::Dispatch {
            debug!(resource = self.options.kind, "query deduplicated");
            return;
        }
        self.last_params = params;
        self.dispatch(descriptor);
    }

    /// The disabled sentinel: no fetch, existing data cleared immediately.
    fn disable(&mut self) {
        self.guard.invalidate();
        self.dedupe.note_disabled();
        self.last_params = None;
        self.publisher.send_replace(Snapshot::default());
        debug!(resource = self.options.kind, "fetching disabled, data cleared");
    }

    /// Mints a token and spawns the fetch for `descriptor`.
    fn dispatch(&mut self, descriptor: Descriptor) {
        let token = self.guard.begin();
        self.dedupe.note_dispatch(descriptor.clone());

        // Loading turns on while last-known-good data stays visible.
        let mut snapshot = self.publisher.borrow().clone();
        snapshot.loading = true;
        self.publisher.send_replace(snapshot);

        debug!(
            resource = self.options.kind,
            %token,
            page = descriptor.page,
            "fetch dispatched"
        );

        let sources = self.sources.clone();
        let limits = self.options.limits();
        let done = self.done_tx.clone();
        tokio::spawn(async move {
            let outcome = if sources.len() == 1 {
                collect_pages(sources[0].as_ref(), &descriptor, limits)
                    .await
                    .map(|aggregated| Resolved {
                        adopted: Some(sources[0].label()),
                        aggregated,
                        degraded: false,
                    })
            } else {
                resolve_chain(&sources, &descriptor, limits).await
            };
            // The manager may already be gone; an undeliverable completion
            // is inert by construction.
            let _ = done.send(Completion { token, outcome }).await;
        });
    }

    /// Settles a completion against the guard and publishes the result.
    fn complete(&mut self, completion: Completion<T>) {
        let Completion { token, outcome } = completion;
        if self.guard.settle(token) == Verdict::Stale {
            debug!(resource = self.options.kind, %token, "stale response discarded");
            return;
        }
        self.dedupe.note_settled();

        let previous = self.publisher.borrow().clone();
        let snapshot = match outcome {
            Ok(resolved) => {
                debug!(
                    resource = self.options.kind,
                    %token,
                    items = resolved.aggregated.items.len(),
                    degraded = resolved.degraded,
                    truncated = resolved.aggregated.truncated,
                    "fetch accepted"
                );
                Snapshot {
                    items: resolved.aggregated.items,
                    loading: false,
                    error: None,
                    degraded: resolved.degraded,
                    truncated: resolved.aggregated.truncated,
                    total: resolved.aggregated.total,
                    stats: resolved.aggregated.extra,
                }
            }
            Err(e) if e.auth_expired() => {
                // The cached data belongs to a dead identity. Clear it but
                // surface no error; the outer auth layer redirects.
                info!(resource = self.options.kind, "session expired, clearing data");
                Snapshot::default()
            }
            Err(e) => {
                warn!(resource = self.options.kind, error = %e, "fetch failed");
                Snapshot {
                    items: previous.items,
                    loading: false,
                    error: Some(e),
                    degraded: false,
                    truncated: previous.truncated,
                    total: previous.total,
                    stats: previous.stats,
                }
            }
        };
        self.publisher.send_replace(snapshot);
    }

    /// Forces a re-dispatch of the current parameters. No-op while
    /// disabled; calling it repeatedly is safe, the newest dispatch wins.
    fn refetch(&mut self) {
        let Some(params) = self.last_params.clone() else {
            debug!(resource = self.options.kind, "refetch ignored, no active query");
            return;
        };
        self.dedupe.force();
        self.reconcile(Some(params));
    }

    /// Timer-driven variant of refetch. Skipped while a cycle is already
    /// pending so a slow backend is not piled onto.
    fn refresh_tick(&mut self) {
        if self.last_params.is_none() || self.guard.pending() {
            return;
        }
        debug!(resource = self.options.kind, "auto refresh");
        self.dedupe.force();
        self.reconcile(self.last_params.clone());
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
