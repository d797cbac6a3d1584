//! # Pager Aggregator
//!
//! Some endpoints cap their page size below what the UI needs, so one
//! logical query expands into several page round-trips whose items are
//! concatenated client-side. Both the accumulated item count and the number
//! of round-trips are bounded; hitting either bound before the server
//! reports exhaustion surfaces a truncation flag distinct from "fully
//! loaded", and the round-trip cap also protects against a misbehaving
//! server that claims more pages forever.

use crate::sync::error::FetchError;
use crate::sync::query::Descriptor;
use crate::sync::source::{PageSource, SyncItem};
use tracing::debug;

/// Hard bounds on one aggregation run.
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    /// Accumulated items never exceed this, whatever the server claims.
    pub item_ceiling: usize,
    /// Page round-trips never exceed this.
    pub max_round_trips: u32,
}

/// The request-scoped accumulation produced by [`collect_pages`].
#[derive(Debug, Clone)]
pub struct Aggregated<T> {
    /// Concatenated items, server order preserved, at most the ceiling.
    pub items: Vec<T>,
    /// True when a bound fired before the server reported exhaustion:
    /// more data exists but was not loaded.
    pub truncated: bool,
    /// Page round-trips actually performed.
    pub pages: u32,
    /// Server-reported total, from the last page seen.
    pub total: Option<u64>,
    /// Last endpoint statistics payload seen, if any.
    pub extra: Option<serde_json::Value>,
}

impl<T> Aggregated<T> {
    /// An empty aggregation, used as the static default on degraded
    /// resolutions.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            truncated: false,
            pages: 0,
            total: None,
            extra: None,
        }
    }
}

/// Walks pages starting at `query.page` and concatenates the results.
///
/// Stops when the server reports no further pages, when the item ceiling
/// is reached (the overflowing page is truncated to land exactly on the
/// ceiling), or when the round-trip cap fires. Any page error aborts the
/// whole aggregation with that error.
pub async fn collect_pages<T: SyncItem>(
    source: &dyn PageSource<Item = T>,
    query: &Descriptor,
    limits: PageLimits,
) -> Result<Aggregated<T>, FetchError> {
    let mut acc = Aggregated::empty();
    let mut cursor = query.page;

    loop {
        let page = source.fetch_page(&query.with_page(cursor)).await?;
        acc.pages += 1;
        acc.total = Some(page.count);
        if page.extra.is_some() {
            acc.extra = page.extra;
        }
        acc.items.extend(page.items);

        if acc.items.len() >= limits.item_ceiling {
            // Once the ceiling is hit, "has more" is forced false no
            // matter what the server signalled.
            acc.truncated = acc.items.len() > limits.item_ceiling || page.next;
            acc.items.truncate(limits.item_ceiling);
            break;
        }
        if !page.next {
            break;
        }
        if acc.pages >= limits.max_round_trips {
            debug!(
                endpoint = source.label(),
                pages = acc.pages,
                "round-trip cap reached with pages remaining"
            );
            acc.truncated = true;
            break;
        }
        cursor += 1;
    }

    Ok(acc)
}
