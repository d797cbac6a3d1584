//! # Land Resources
//!
//! Sync configuration for the three land-shaped resources: the marketplace
//! catalog, the signed-in player's holdings, and the single-plot detail
//! view. The owned-lands resource is the one with real endpoint history:
//! the current route coexists with a legacy assets route, so it carries a
//! two-candidate fallback chain with `[]` as the static default.

mod sources;

pub use sources::{CatalogSource, LandDetailSource, OwnedAssetsSource, OwnedLandsSource};

use crate::api::PlatformApi;
use crate::model::Land;
use crate::sync::{EntityOptions, EntitySource, PageSource, SyncOptions};
use std::sync::Arc;

/// Marketplace catalog tuning. The catalog is the biggest collection the
/// UI pages through, hence the widest ceiling.
pub fn catalog_options() -> SyncOptions {
    SyncOptions {
        kind: "lands",
        page_size: 24,
        default_sort: "newest",
        item_ceiling: 240,
        max_round_trips: 12,
        ..SyncOptions::default()
    }
}

/// Owned-lands tuning. Holdings are shown unpaged in the UI, so the
/// remote's capped pages get aggregated up to the ceiling.
pub fn owned_options() -> SyncOptions {
    SyncOptions {
        kind: "my-lands",
        page_size: 50,
        default_sort: "name",
        item_ceiling: 200,
        max_round_trips: 8,
        ..SyncOptions::default()
    }
}

/// Detail-view tuning.
pub fn detail_options() -> EntityOptions {
    EntityOptions::for_kind("land-detail")
}

/// The catalog's single-candidate source list.
pub fn catalog_sources(api: &Arc<dyn PlatformApi>) -> Vec<Arc<dyn PageSource<Item = Land>>> {
    vec![Arc::new(CatalogSource::new(api.clone()))]
}

/// The owned-lands candidate chain, in priority order.
pub fn owned_sources(api: &Arc<dyn PlatformApi>) -> Vec<Arc<dyn PageSource<Item = Land>>> {
    vec![
        Arc::new(OwnedLandsSource::new(api.clone())),
        Arc::new(OwnedAssetsSource::new(api.clone())),
    ]
}

/// The detail-view source.
pub fn detail_source(api: &Arc<dyn PlatformApi>) -> Arc<dyn EntitySource<Item = Land>> {
    Arc::new(LandDetailSource::new(api.clone()))
}
