//! # Fallback Chain Executor
//!
//! Some logical resources are reachable through more than one endpoint:
//! the current route, a legacy route that predates it, sometimes a generic
//! route with a filter. The chain tries the candidates in priority order
//! and adopts the first one that answers with a non-empty result. A failing
//! candidate is logged and skipped; an exhausted chain degrades to the
//! static default instead of dead-ending the resource in a permanently
//! loading or error state.
//!
//! The one exception is an expired session: no candidate can do better, so
//! the chain aborts immediately and lets the manager clear its data.

use crate::sync::error::FetchError;
use crate::sync::page::{collect_pages, Aggregated, PageLimits};
use crate::sync::query::Descriptor;
use crate::sync::source::{PageSource, SyncItem};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of one resolution cycle over a candidate chain.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    /// The adopted aggregation, or the static default when degraded.
    pub aggregated: Aggregated<T>,
    /// True when every candidate failed or came back empty and the static
    /// default was adopted instead of real data.
    pub degraded: bool,
    /// Label of the candidate that produced the adopted result.
    pub adopted: Option<&'static str>,
}

/// Tries `sources` in order and adopts the first non-empty success.
///
/// Exactly one candidate is active per completed resolution: candidates
/// after the adopted one are never invoked. Failures are logged and the
/// next candidate is tried; only an authentication-expired failure aborts
/// the chain, because it invalidates every candidate at once.
pub async fn resolve_chain<T: SyncItem>(
    sources: &[Arc<dyn PageSource<Item = T>>],
    query: &Descriptor,
    limits: PageLimits,
) -> Result<Resolved<T>, FetchError> {
    for source in sources {
        match collect_pages(source.as_ref(), query, limits).await {
            Ok(aggregated) if !aggregated.items.is_empty() => {
                debug!(endpoint = source.label(), items = aggregated.items.len(), "candidate adopted");
                return Ok(Resolved {
                    aggregated,
                    degraded: false,
                    adopted: Some(source.label()),
                });
            }
            Ok(_) => {
                debug!(endpoint = source.label(), "candidate empty, trying next");
            }
            Err(e) if e.auth_expired() => return Err(e),
            Err(e) => {
                warn!(endpoint = source.label(), error = %e, "candidate failed, trying next");
            }
        }
    }

    Ok(Resolved {
        aggregated: Aggregated::empty(),
        degraded: true,
        adopted: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::query::{normalize, QueryDefaults, RawQuery};
    use crate::sync::source::Page;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Canned {
        label: &'static str,
        reply: Result<Vec<&'static str>, FetchError>,
        calls: AtomicUsize,
    }

    impl Canned {
        fn new(label: &'static str, reply: Result<Vec<&'static str>, FetchError>) -> Arc<Self> {
            Arc::new(Self {
                label,
                reply,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageSource for Canned {
        type Item = &'static str;

        fn label(&self) -> &'static str {
            self.label
        }

        async fn fetch_page(&self, _query: &Descriptor) -> Result<Page<&'static str>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().map(Page::last)
        }
    }

    fn query() -> Descriptor {
        normalize(
            Some(&RawQuery::default()),
            QueryDefaults {
                page_size: 20,
                sort: "newest",
            },
        )
        .unwrap()
    }

    const LIMITS: PageLimits = PageLimits {
        item_ceiling: 100,
        max_round_trips: 5,
    };

    #[tokio::test]
    async fn adopts_first_non_empty_candidate() {
        let primary = Canned::new("primary", Err(FetchError::Status(404)));
        let secondary = Canned::new("secondary", Ok(vec![]));
        let tertiary = Canned::new("tertiary", Ok(vec!["x", "y"]));
        let chain: Vec<Arc<dyn PageSource<Item = &'static str>>> =
            vec![primary.clone(), secondary.clone(), tertiary.clone()];

        let resolved = resolve_chain(&chain, &query(), LIMITS).await.unwrap();
        assert_eq!(resolved.aggregated.items, vec!["x", "y"]);
        assert!(!resolved.degraded);
        assert_eq!(resolved.adopted, Some("tertiary"));
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
        assert_eq!(tertiary.calls(), 1);
    }

    #[tokio::test]
    async fn candidates_after_a_success_are_never_invoked() {
        let primary = Canned::new("primary", Ok(vec!["a"]));
        let secondary = Canned::new("secondary", Ok(vec!["b"]));
        let chain: Vec<Arc<dyn PageSource<Item = &'static str>>> =
            vec![primary.clone(), secondary.clone()];

        let resolved = resolve_chain(&chain, &query(), LIMITS).await.unwrap();
        assert_eq!(resolved.adopted, Some("primary"));
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn exhausted_chain_degrades_to_default() {
        let primary = Canned::new("primary", Err(FetchError::Status(500)));
        let secondary = Canned::new("secondary", Err(FetchError::Transport("reset".into())));
        let chain: Vec<Arc<dyn PageSource<Item = &'static str>>> =
            vec![primary.clone(), secondary.clone()];

        let resolved = resolve_chain(&chain, &query(), LIMITS).await.unwrap();
        assert!(resolved.aggregated.items.is_empty());
        assert!(resolved.degraded);
        assert_eq!(resolved.adopted, None);
    }

    #[tokio::test]
    async fn expired_session_aborts_the_chain() {
        let primary = Canned::new("primary", Err(FetchError::Status(401)));
        let secondary = Canned::new("secondary", Ok(vec!["a"]));
        let chain: Vec<Arc<dyn PageSource<Item = &'static str>>> =
            vec![primary.clone(), secondary.clone()];

        let err = resolve_chain(&chain, &query(), LIMITS).await.unwrap_err();
        assert!(err.auth_expired());
        assert_eq!(secondary.calls(), 0);
    }
}
