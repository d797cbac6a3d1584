//! # landsync
//!
//! Client-side resource synchronization for a land-platform frontend.
//!
//! The UI above this crate renders land catalogs, token balances and a
//! mining mini-game; this crate owns the one genuinely hard part of that
//! app: keeping per-resource request lifecycles coherent against an opaque
//! paginated REST backend. Re-renders re-issue identical queries, filter
//! changes overtake slow responses, the remote caps page sizes below what
//! the UI needs, and some resources are reachable through several partly
//! deployed endpoints. Each of those hazards has a dedicated mechanism
//! here.
//!
//! ## Architecture
//!
//! One [`SyncManager`](sync::SyncManager) instance exists per logical
//! resource. Each is an isolated actor: it owns its token counter, dedupe
//! state and published snapshot, processes commands sequentially in its
//! own task, and shares nothing with other instances. The pipeline inside
//! a manager:
//!
//! 1. **Normalize** ([`sync::query`]) - untrusted caller parameters become
//!    a canonical, value-comparable descriptor; `None` is the "disabled"
//!    sentinel.
//! 2. **Dedupe** ([`sync::dedupe`]) - structurally identical descriptors
//!    with a result present or in flight never re-fetch.
//! 3. **Guard** ([`sync::guard`]) - every dispatch is tagged with a
//!    monotonic token; only the newest token's completion may mutate the
//!    snapshot. Last dispatched wins.
//! 4. **Aggregate** ([`sync::page`]) - capped remote pages are walked and
//!    concatenated under an item ceiling and a round-trip cap, with a
//!    truncation flag distinct from "fully loaded".
//! 5. **Fall back** ([`sync::fallback`]) - endpoint candidates are tried
//!    in priority order; an exhausted chain degrades to a default value
//!    instead of dead-ending.
//! 6. **Publish** ([`sync::snapshot`]) - the observable
//!    `{data, loading, error}` slot, replaced wholesale, watched by the
//!    UI.
//!
//! Failures never propagate as exceptions out of the public surface:
//! consumers branch on snapshot flags, they do not catch.
//!
//! ## Layers
//!
//! - [`sync`] - the generic engine described above.
//! - [`model`] - the payloads the engine transports.
//! - [`api`] - the abstract backend boundary ([`PlatformApi`]).
//! - [`lands`] / [`mining`] - per-resource endpoint adapters and tuning.
//! - [`clients`] - domain-typed facades over the raw handles.
//! - [`runtime`] - [`PlatformSync`](runtime::PlatformSync) wiring plus
//!   tracing setup.
//!
//! ## Quick start
//!
//! ```ignore
//! use landsync::clients::LandFilter;
//! use landsync::runtime::PlatformSync;
//!
//! let sync = PlatformSync::new(api);
//!
//! // Reconcile on every UI update; duplicates are suppressed downstream.
//! sync.lands.browse(LandFilter { search: Some("mesa".into()), ..Default::default() }).await?;
//!
//! // Observe.
//! let mut watch = sync.lands.catalog().watch();
//! watch.wait_for(|s| !s.loading).await?;
//! let snapshot = sync.lands.catalog().snapshot();
//!
//! sync.shutdown().await?;
//! ```

pub mod api;
pub mod clients;
pub mod lands;
pub mod mining;
pub mod model;
pub mod runtime;
pub mod sync;

pub use api::PlatformApi;
pub use runtime::PlatformSync;
pub use sync::{
    EntityHandle, EntitySnapshot, FetchError, Page, RawQuery, Snapshot, SyncError, SyncHandle,
};
