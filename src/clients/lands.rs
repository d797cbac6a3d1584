//! Client for the land resources.

use crate::model::Land;
use crate::sync::{EntityHandle, RawQuery, SyncError, SyncHandle};

/// Domain-typed filter for browsing the marketplace catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandFilter {
    /// 1-based page.
    pub page: Option<u32>,
    /// Free-text search over plot names.
    pub search: Option<String>,
    /// Region filter.
    pub region: Option<String>,
    /// Price floor in tokens.
    pub min_price: Option<u64>,
    /// Price cap in tokens.
    pub max_price: Option<u64>,
    /// Sort key; the resource default applies when absent.
    pub sort: Option<String>,
}

impl From<LandFilter> for RawQuery {
    fn from(filter: LandFilter) -> Self {
        RawQuery {
            page: filter.page,
            sort: filter.sort,
            search: filter.search,
            category: filter.region,
            min_value: filter.min_price,
            max_value: filter.max_price,
            ..RawQuery::default()
        }
    }
}

/// Client over the catalog, owned-lands and detail managers.
#[derive(Clone)]
pub struct LandsClient {
    catalog: SyncHandle<Land>,
    owned: SyncHandle<Land>,
    detail: EntityHandle<Land>,
}

impl LandsClient {
    pub(crate) fn new(
        catalog: SyncHandle<Land>,
        owned: SyncHandle<Land>,
        detail: EntityHandle<Land>,
    ) -> Self {
        Self {
            catalog,
            owned,
            detail,
        }
    }

    /// Reconciles the catalog against a new filter. Safe to call on every
    /// UI update; identical filters are deduplicated downstream.
    pub async fn browse(&self, filter: LandFilter) -> Result<(), SyncError> {
        self.catalog.query(filter.into()).await
    }

    /// Loads the signed-in player's holdings.
    pub async fn browse_owned(&self) -> Result<(), SyncError> {
        self.owned.query(RawQuery::default()).await
    }

    /// Opens the detail view for one plot.
    pub async fn open(&self, id: impl Into<String>) -> Result<(), SyncError> {
        self.detail.load(id).await
    }

    /// Closes the detail view; a late response for it can no longer land.
    pub async fn close(&self) -> Result<(), SyncError> {
        self.detail.clear().await
    }

    /// Forces holdings to reload, e.g. right after a purchase settled.
    pub async fn refresh_owned(&self) -> Result<(), SyncError> {
        self.owned.refetch().await
    }

    /// The catalog handle, for snapshots and watching.
    pub fn catalog(&self) -> &SyncHandle<Land> {
        &self.catalog
    }

    /// The owned-lands handle.
    pub fn owned(&self) -> &SyncHandle<Land> {
        &self.owned
    }

    /// The detail handle.
    pub fn detail(&self) -> &EntityHandle<Land> {
        &self.detail
    }
}
