//! # Parameter Normalizer
//!
//! Callers hand the sync layer whatever filter state their UI happens to
//! hold: partially filled, freshly re-built on every re-render, and never
//! validated. This module turns that untrusted input into a [`Descriptor`],
//! a canonical value type with every field defaulted, so that two requests
//! for the same logical data compare equal no matter how the caller built
//! their filter object.
//!
//! `None` input is a distinguished sentinel meaning "fetching is disabled
//! for this resource right now". It normalizes to `None`, never to a
//! default-filled descriptor, so a disabled resource can never accidentally
//! dispatch a request.

use serde::{Deserialize, Serialize};

/// Caller-supplied filter state, straight from the UI.
///
/// Every field is optional; missing or malformed values are coerced to
/// defaults during normalization rather than rejected, because the caller
/// is untrusted UI state and has nowhere sensible to surface a validation
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuery {
    /// 1-based page cursor.
    pub page: Option<u32>,
    /// Requested page size; the remote may silently cap it lower.
    pub page_size: Option<u32>,
    /// Sort key understood by the endpoint.
    pub sort: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
    /// Categorical filter (region, tool tier, resource kind, ...).
    pub category: Option<String>,
    /// Lower bound of the numeric range filter (e.g. price floor).
    pub min_value: Option<u64>,
    /// Upper bound of the numeric range filter.
    pub max_value: Option<u64>,
    /// Parent resource id (e.g. the land a session list belongs to).
    pub parent: Option<String>,
}

impl RawQuery {
    /// A query selecting the given page with everything else defaulted.
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }
}

/// Canonical, value-comparable form of a [`RawQuery`].
///
/// Two descriptors are equal iff every field is equal by value; equality is
/// what the [`DedupeState`](crate::sync::DedupeState) uses to suppress
/// redundant fetches, so reference identity plays no role anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Descriptor {
    pub page: u32,
    pub page_size: u32,
    pub sort: String,
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_value: Option<u64>,
    pub max_value: Option<u64>,
    pub parent: Option<String>,
}

impl Descriptor {
    /// The same descriptor pointing at a different page.
    ///
    /// Used by the pager when walking follow-up pages of one logical query.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// Resource-specific defaults substituted for missing fields.
#[derive(Debug, Clone, Copy)]
pub struct QueryDefaults {
    pub page_size: u32,
    pub sort: &'static str,
}

/// Normalizes caller input into a canonical descriptor.
///
/// Pure function; never fails. Coercions applied:
/// - missing or zero page → 1
/// - missing or zero page size → the resource default
/// - missing sort → the resource default
/// - search/category trimmed; empty after trimming → absent
/// - inverted numeric range (min > max) → both bounds dropped
///
/// `None` input means fetching is disabled and yields `None`.
pub fn normalize(raw: Option<&RawQuery>, defaults: QueryDefaults) -> Option<Descriptor> {
    let raw = raw?;

    let page = match raw.page {
        Some(p) if p >= 1 => p,
        _ => 1,
    };
    let page_size = match raw.page_size {
        Some(s) if s >= 1 => s,
        _ => defaults.page_size,
    };
    let sort = raw
        .sort
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(defaults.sort)
        .to_string();

    let (min_value, max_value) = match (raw.min_value, raw.max_value) {
        (Some(lo), Some(hi)) if lo > hi => (None, None),
        bounds => bounds,
    };

    Some(Descriptor {
        page,
        page_size,
        sort,
        search: clean(raw.search.as_deref()),
        category: clean(raw.category.as_deref()),
        min_value,
        max_value,
        parent: clean(raw.parent.as_deref()),
    })
}

fn clean(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: QueryDefaults = QueryDefaults {
        page_size: 24,
        sort: "newest",
    };

    #[test]
    fn none_input_stays_none() {
        assert_eq!(normalize(None, DEFAULTS), None);
    }

    #[test]
    fn empty_query_gets_defaults() {
        let d = normalize(Some(&RawQuery::default()), DEFAULTS).unwrap();
        assert_eq!(d.page, 1);
        assert_eq!(d.page_size, 24);
        assert_eq!(d.sort, "newest");
        assert_eq!(d.search, None);
    }

    #[test]
    fn zero_page_and_size_are_coerced() {
        let raw = RawQuery {
            page: Some(0),
            page_size: Some(0),
            ..RawQuery::default()
        };
        let d = normalize(Some(&raw), DEFAULTS).unwrap();
        assert_eq!(d.page, 1);
        assert_eq!(d.page_size, 24);
    }

    #[test]
    fn whitespace_search_is_absent() {
        let raw = RawQuery {
            search: Some("   ".to_string()),
            ..RawQuery::default()
        };
        let d = normalize(Some(&raw), DEFAULTS).unwrap();
        assert_eq!(d.search, None);
    }

    #[test]
    fn inverted_range_becomes_unbounded() {
        let raw = RawQuery {
            min_value: Some(500),
            max_value: Some(100),
            ..RawQuery::default()
        };
        let d = normalize(Some(&raw), DEFAULTS).unwrap();
        assert_eq!(d.min_value, None);
        assert_eq!(d.max_value, None);
    }

    #[test]
    fn field_identical_queries_normalize_equal() {
        let a = RawQuery {
            search: Some("mesa".to_string()),
            page: Some(2),
            ..RawQuery::default()
        };
        // Rebuilt from scratch, as a re-render would.
        let b = RawQuery {
            search: Some("mesa".to_string()),
            page: Some(2),
            ..RawQuery::default()
        };
        assert_eq!(
            normalize(Some(&a), DEFAULTS),
            normalize(Some(&b), DEFAULTS)
        );
    }
}
