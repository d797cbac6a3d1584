//! # Mining Resources
//!
//! Sync configuration for the mining mini-game family: tool inventory,
//! resource balances, mining sessions and the aggregate production
//! summary. Balances and sessions are the live views of the game, so they
//! carry auto-refresh; sessions, like owned lands, still have a legacy
//! route behind the current one.

mod sources;

pub use sources::{
    BalancesSource, SessionsLegacySource, SessionsSource, SummarySource, ToolsSource,
};

use crate::api::PlatformApi;
use crate::model::{MiningSession, ProductionSummary, ResourceBalance, Tool};
use crate::sync::{EntityOptions, EntitySource, PageSource, SyncOptions};
use std::sync::Arc;
use std::time::Duration;

/// Tool inventory tuning.
pub fn tools_options() -> SyncOptions {
    SyncOptions {
        kind: "tools",
        page_size: 50,
        default_sort: "tier",
        item_ceiling: 150,
        max_round_trips: 6,
        ..SyncOptions::default()
    }
}

/// Balance tuning; balances move while mining runs, so they refresh on a
/// timer.
pub fn balances_options() -> SyncOptions {
    SyncOptions {
        kind: "balances",
        page_size: 50,
        default_sort: "name",
        item_ceiling: 100,
        max_round_trips: 4,
        auto_refresh: true,
        refresh_interval: Duration::from_secs(30),
        ..SyncOptions::default()
    }
}

/// Session tuning; the fastest-moving resource in the game.
pub fn sessions_options() -> SyncOptions {
    SyncOptions {
        kind: "sessions",
        page_size: 25,
        default_sort: "newest",
        item_ceiling: 100,
        max_round_trips: 6,
        auto_refresh: true,
        refresh_interval: Duration::from_secs(10),
        ..SyncOptions::default()
    }
}

/// Production summary tuning.
pub fn summary_options() -> EntityOptions {
    EntityOptions {
        auto_refresh: true,
        refresh_interval: Duration::from_secs(30),
        ..EntityOptions::for_kind("production")
    }
}

/// The tool inventory's single-candidate source list.
pub fn tools_sources(api: &Arc<dyn PlatformApi>) -> Vec<Arc<dyn PageSource<Item = Tool>>> {
    vec![Arc::new(ToolsSource::new(api.clone()))]
}

/// The balances' single-candidate source list.
pub fn balances_sources(
    api: &Arc<dyn PlatformApi>,
) -> Vec<Arc<dyn PageSource<Item = ResourceBalance>>> {
    vec![Arc::new(BalancesSource::new(api.clone()))]
}

/// The session candidate chain, in priority order.
pub fn sessions_sources(
    api: &Arc<dyn PlatformApi>,
) -> Vec<Arc<dyn PageSource<Item = MiningSession>>> {
    vec![
        Arc::new(SessionsSource::new(api.clone())),
        Arc::new(SessionsLegacySource::new(api.clone())),
    ]
}

/// The production summary source.
pub fn summary_source(api: &Arc<dyn PlatformApi>) -> Arc<dyn EntitySource<Item = ProductionSummary>> {
    Arc::new(SummarySource::new(api.clone()))
}
