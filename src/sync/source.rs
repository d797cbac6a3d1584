//! # Data Source Seams
//!
//! Traits describing the abstract fetch interface the sync layer consumes.
//! The remote HTTP API is out of scope; everything the engine knows about
//! it goes through these seams, which is also what makes the engine fully
//! testable with scripted in-memory sources.

use crate::sync::error::FetchError;
use crate::sync::query::Descriptor;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Marker for item types the sync layer can carry.
pub trait SyncItem: Clone + Send + Sync + std::fmt::Debug + 'static {}
impl<T: Clone + Send + Sync + std::fmt::Debug + 'static> SyncItem for T {}

/// One page as returned by the remote fetch interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in server order.
    pub items: Vec<T>,
    /// Server-reported total across all pages.
    pub count: u64,
    /// Whether the server claims further pages exist.
    pub next: bool,
    /// Endpoint-specific statistics riding along with the page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

impl<T> Page<T> {
    /// A page carrying `items` with no further pages behind it.
    pub fn last(items: Vec<T>) -> Self {
        let count = items.len() as u64;
        Self {
            items,
            count,
            next: false,
            extra: None,
        }
    }
}

/// One candidate endpoint serving pages of a logical collection resource.
///
/// A resource may be reachable through several of these (current route,
/// legacy route, ...); the fallback chain tries them in priority order.
#[async_trait]
pub trait PageSource: Send + Sync + 'static {
    /// Item type this endpoint yields.
    type Item: SyncItem;

    /// Endpoint label used in logs.
    fn label(&self) -> &'static str;

    /// Fetches the page selected by `query.page`.
    async fn fetch_page(&self, query: &Descriptor) -> Result<Page<Self::Item>, FetchError>;
}

/// A single-entity endpoint backing a detail view.
///
/// `Ok(None)` means the endpoint answered but knows no such entity;
/// transport-level failures come back as `Err`.
#[async_trait]
pub trait EntitySource: Send + Sync + 'static {
    /// Entity type this endpoint yields.
    type Item: SyncItem;

    /// Endpoint label used in logs.
    fn label(&self) -> &'static str;

    /// Fetches one entity by id.
    async fn fetch_one(&self, id: &str) -> Result<Option<Self::Item>, FetchError>;
}
