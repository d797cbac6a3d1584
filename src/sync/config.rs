//! Per-resource configuration consumed by each manager instance.

use crate::sync::page::PageLimits;
use crate::sync::query::QueryDefaults;
use std::time::Duration;

/// Tuning knobs for one sync manager.
///
/// Every resource documents its own values (see the resource modules);
/// there is no global registry. `Default` gives conservative settings
/// suitable for a medium-sized catalog resource.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Resource label used in logs.
    pub kind: &'static str,
    /// When false the manager treats every query as the disabled sentinel.
    pub enabled: bool,
    /// Re-dispatch the current descriptor on a timer, bypassing the deduper.
    pub auto_refresh: bool,
    /// Cadence for `auto_refresh`.
    pub refresh_interval: Duration,
    /// Default page size substituted for missing/zero caller values.
    pub page_size: u32,
    /// Default sort key substituted for missing caller values.
    pub default_sort: &'static str,
    /// Accumulated items per resolution never exceed this.
    pub item_ceiling: usize,
    /// Page round-trips per resolution never exceed this.
    pub max_round_trips: u32,
    /// Command channel capacity.
    pub buffer_size: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            kind: "resource",
            enabled: true,
            auto_refresh: false,
            refresh_interval: Duration::from_secs(30),
            page_size: 24,
            default_sort: "newest",
            item_ceiling: 240,
            max_round_trips: 12,
            buffer_size: 32,
        }
    }
}

impl SyncOptions {
    /// Options for `kind` with everything else defaulted.
    pub fn for_kind(kind: &'static str) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub(crate) fn defaults(&self) -> QueryDefaults {
        QueryDefaults {
            page_size: self.page_size,
            sort: self.default_sort,
        }
    }

    pub(crate) fn limits(&self) -> PageLimits {
        PageLimits {
            item_ceiling: self.item_ceiling,
            max_round_trips: self.max_round_trips,
        }
    }
}
