//! # Result Cache Slot
//!
//! The externally observable state of a sync manager. A snapshot is
//! replaced wholesale on every accepted completion and never patched in
//! place, so observers can never see a partially applied update. Errors
//! live in a field rather than being thrown: consumers branch on flags,
//! they do not catch.

use crate::sync::error::FetchError;

/// Last-known-good view of a collection resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    /// The adopted items. On a transient error this keeps its previous
    /// value so the UI can keep showing stale-but-valid content.
    pub items: Vec<T>,
    /// True from dispatch until the owning request settles.
    pub loading: bool,
    /// The failure recorded for the current data, if any.
    pub error: Option<FetchError>,
    /// True when every candidate endpoint failed and the static default
    /// was adopted. Non-fatal: the UI may show a soft warning.
    pub degraded: bool,
    /// True when more data exists server-side than the configured ceiling
    /// allowed to load.
    pub truncated: bool,
    /// Server-reported total across all pages, when known.
    pub total: Option<u64>,
    /// Endpoint statistics that rode along with the adopted pages.
    pub stats: Option<serde_json::Value>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            degraded: false,
            truncated: false,
            total: None,
            stats: None,
        }
    }
}

impl<T> Snapshot<T> {
    /// Whether the snapshot currently holds usable data.
    pub fn ready(&self) -> bool {
        !self.loading && self.error.is_none()
    }
}

/// Last-known-good view of a single-entity resource.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot<T> {
    /// The entity, if the endpoint knew it.
    pub item: Option<T>,
    /// True from dispatch until the owning request settles.
    pub loading: bool,
    /// The failure recorded for the current data, if any.
    pub error: Option<FetchError>,
}

impl<T> Default for EntitySnapshot<T> {
    fn default() -> Self {
        Self {
            item: None,
            loading: false,
            error: None,
        }
    }
}
