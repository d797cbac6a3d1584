//! # Platform API Boundary
//!
//! The abstract paginated fetch interface the sync layer consumes. The
//! real implementation (HTTP client, auth headers, retries at the
//! transport level) lives outside this crate; tests implement it
//! in-memory. Every method corresponds to one remote route, which is why
//! the "owned lands" resource appears twice: the current route and the
//! legacy one it superseded both still exist server-side, and the fallback
//! chain decides which answer to adopt.

use crate::model::{Land, MiningSession, ProductionSummary, ResourceBalance, Tool};
use crate::sync::{Descriptor, FetchError, Page};
use async_trait::async_trait;

/// The remote platform as seen by the sync layer.
#[async_trait]
pub trait PlatformApi: Send + Sync + 'static {
    /// Marketplace land catalog.
    async fn lands(&self, query: &Descriptor) -> Result<Page<Land>, FetchError>;

    /// One land plot by id; `Ok(None)` when the plot does not exist.
    async fn land(&self, id: &str) -> Result<Option<Land>, FetchError>;

    /// The signed-in player's lands (current route).
    async fn owned_lands(&self, query: &Descriptor) -> Result<Page<Land>, FetchError>;

    /// The signed-in player's lands (legacy assets route, kept until every
    /// deployment serves the current one).
    async fn owned_assets(&self, query: &Descriptor) -> Result<Page<Land>, FetchError>;

    /// The player's tool inventory.
    async fn tools(&self, query: &Descriptor) -> Result<Page<Tool>, FetchError>;

    /// The player's resource balances.
    async fn balances(&self, query: &Descriptor) -> Result<Page<ResourceBalance>, FetchError>;

    /// Mining sessions (current route); filter by land via
    /// `query.parent`.
    async fn mining_sessions(&self, query: &Descriptor) -> Result<Page<MiningSession>, FetchError>;

    /// Mining sessions (legacy route).
    async fn mining_sessions_legacy(
        &self,
        query: &Descriptor,
    ) -> Result<Page<MiningSession>, FetchError>;

    /// Aggregate production summary for the signed-in player.
    async fn production_summary(&self) -> Result<Option<ProductionSummary>, FetchError>;
}
