//! # Mock Sources & Testing Guide
//!
//! Scripted in-memory implementations of [`PageSource`] and
//! [`EntitySource`] for driving a manager deterministically in tests,
//! without any real backend.
//!
//! Two capabilities matter for this engine:
//!
//! - **Queued replies** — each call pops the next scripted reply, so a test
//!   states exactly what the backend does, in order, and `verify()` checks
//!   that every scripted reply was consumed.
//! - **Gated replies** — a reply can be held back until the test releases
//!   its [`Gate`]. This is how out-of-order arrival is produced on demand:
//!   dispatch A (gated), dispatch B (gated), release B, then release A, and
//!   assert that A's late response changed nothing.
//!
//! A mock that receives a call with nothing scripted panics, like an
//! unexpected-request assertion would.

use crate::sync::error::FetchError;
use crate::sync::query::Descriptor;
use crate::sync::source::{EntitySource, Page, PageSource, SyncItem};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

/// Releases one gated reply when the test decides the "network" is done.
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    /// Lets the gated reply return to its caller.
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

enum Reply<R> {
    Ready(R),
    Gated(oneshot::Receiver<()>, R),
}

fn pop_reply<R>(queue: &Mutex<VecDeque<Reply<R>>>, label: &str) -> Reply<R> {
    queue
        .lock()
        .expect("mock reply queue poisoned")
        .pop_front()
        .unwrap_or_else(|| panic!("mock source '{label}': fetch with nothing scripted"))
}

async fn resolve<R>(reply: Reply<R>) -> R {
    match reply {
        Reply::Ready(r) => r,
        Reply::Gated(gate, r) => {
            // A dropped gate counts as released; tests that tear down
            // early must not deadlock the fetch task.
            let _ = gate.await;
            r
        }
    }
}

/// Scripted [`PageSource`] recording every descriptor it was called with.
pub struct MockPageSource<T> {
    label: &'static str,
    replies: Mutex<VecDeque<Reply<Result<Page<T>, FetchError>>>>,
    calls: Mutex<Vec<Descriptor>>,
}

impl<T: SyncItem> MockPageSource<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Scripts one page reply.
    pub fn push_page(&self, page: Page<T>) {
        self.push(Reply::Ready(Ok(page)));
    }

    /// Scripts a terminal page holding `items`.
    pub fn push_items(&self, items: Vec<T>) {
        self.push_page(Page::last(items));
    }

    /// Scripts one failing reply.
    pub fn push_error(&self, error: FetchError) {
        self.push(Reply::Ready(Err(error)));
    }

    /// Scripts a page reply held back until the returned gate is released.
    pub fn push_gated_page(&self, page: Page<T>) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.push(Reply::Gated(rx, Ok(page)));
        Gate(tx)
    }

    /// Scripts a failing reply held back until the returned gate is
    /// released.
    pub fn push_gated_error(&self, error: FetchError) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.push(Reply::Gated(rx, Err(error)));
        Gate(tx)
    }

    /// Every descriptor this source was called with, in order.
    pub fn calls(&self) -> Vec<Descriptor> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock call log poisoned").len()
    }

    /// Panics unless every scripted reply was consumed.
    pub fn verify(&self) {
        let remaining = self.replies.lock().expect("mock reply queue poisoned").len();
        assert!(
            remaining == 0,
            "mock source '{}': {remaining} scripted replies never consumed",
            self.label
        );
    }

    fn push(&self, reply: Reply<Result<Page<T>, FetchError>>) {
        self.replies
            .lock()
            .expect("mock reply queue poisoned")
            .push_back(reply);
    }
}

#[async_trait::async_trait]
impl<T: SyncItem> PageSource for MockPageSource<T> {
    type Item = T;

    fn label(&self) -> &'static str {
        self.label
    }

    async fn fetch_page(&self, query: &Descriptor) -> Result<Page<T>, FetchError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(query.clone());
        let reply = pop_reply(&self.replies, self.label);
        resolve(reply).await
    }
}

/// Scripted [`EntitySource`] recording every id it was called with.
pub struct MockEntitySource<T> {
    label: &'static str,
    replies: Mutex<VecDeque<Reply<Result<Option<T>, FetchError>>>>,
    calls: Mutex<Vec<String>>,
}

impl<T: SyncItem> MockEntitySource<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Scripts one entity reply.
    pub fn push_item(&self, item: Option<T>) {
        self.push(Reply::Ready(Ok(item)));
    }

    /// Scripts one failing reply.
    pub fn push_error(&self, error: FetchError) {
        self.push(Reply::Ready(Err(error)));
    }

    /// Scripts an entity reply held back until the returned gate is
    /// released.
    pub fn push_gated_item(&self, item: Option<T>) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.push(Reply::Gated(rx, Ok(item)));
        Gate(tx)
    }

    /// Every id this source was called with, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    /// Panics unless every scripted reply was consumed.
    pub fn verify(&self) {
        let remaining = self.replies.lock().expect("mock reply queue poisoned").len();
        assert!(
            remaining == 0,
            "mock source '{}': {remaining} scripted replies never consumed",
            self.label
        );
    }

    fn push(&self, reply: Reply<Result<Option<T>, FetchError>>) {
        self.replies
            .lock()
            .expect("mock reply queue poisoned")
            .push_back(reply);
    }
}

#[async_trait::async_trait]
impl<T: SyncItem> EntitySource for MockEntitySource<T> {
    type Item = T;

    fn label(&self) -> &'static str {
        self.label
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<T>, FetchError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(id.to_string());
        let reply = pop_reply(&self.replies, self.label);
        resolve(reply).await
    }
}
