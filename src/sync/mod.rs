//! # Resource Synchronization Engine
//!
//! The generic machinery shared by every resource: parameter
//! normalization, request deduplication, stale-response guarding, bounded
//! page aggregation, endpoint fallback chains, and the published snapshot
//! slot. The per-resource modules instantiate this engine; nothing in here
//! knows about lands or mining.
//!
//! Control flow per instance: caller parameters → [`normalize`] produces a
//! stable [`Descriptor`] → [`DedupeState`] decides whether a fetch is
//! warranted → the [`SyncManager`] mints a [`RequestToken`] and dispatches
//! → [`collect_pages`] expands the fetch into bounded page round-trips →
//! [`resolve_chain`] walks the endpoint candidates → the [`StaleGuard`]
//! accepts or discards the completion → the [`Snapshot`] is replaced and
//! observers wake up.

pub mod config;
pub mod dedupe;
pub mod entity;
pub mod error;
pub mod fallback;
pub mod guard;
pub mod handle;
pub mod manager;
pub mod mock;
pub mod page;
pub mod query;
pub mod snapshot;
pub mod source;

pub use config::SyncOptions;
pub use dedupe::{Decision, DedupeState};
pub use entity::{EntityHandle, EntityManager, EntityOptions};
pub use error::{FetchError, SyncError};
pub use fallback::{resolve_chain, Resolved};
pub use guard::{RequestToken, StaleGuard, Verdict};
pub use handle::SyncHandle;
pub use manager::SyncManager;
pub use mock::{Gate, MockEntitySource, MockPageSource};
pub use page::{collect_pages, Aggregated, PageLimits};
pub use query::{normalize, Descriptor, QueryDefaults, RawQuery};
pub use snapshot::{EntitySnapshot, Snapshot};
pub use source::{EntitySource, Page, PageSource, SyncItem};
