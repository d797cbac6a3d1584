//! Full end-to-end test with every manager running over an in-memory
//! platform backend, including the legacy-route fallback and session
//! expiry handling.

use async_trait::async_trait;
use landsync::api::PlatformApi;
use landsync::clients::{LandFilter, SessionFilter};
use landsync::model::{Land, MiningSession, ProductionSummary, ResourceBalance, Tool};
use landsync::runtime::PlatformSync;
use landsync::sync::{Descriptor, FetchError, Page};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Canned backend with just enough behavior to exercise the managers:
/// real pagination, real filtering, a dead primary route for owned lands,
/// and a switch that expires the session.
struct FakePlatform {
    lands: Vec<Land>,
    owned: Vec<Land>,
    tools: Vec<Tool>,
    sessions: Vec<MiningSession>,
    summary: ProductionSummary,
    /// The current owned-lands route 404s on this deployment.
    owned_route_dead: bool,
    expired: AtomicBool,
    ore: Mutex<f64>,
}

impl FakePlatform {
    fn new(owned_route_dead: bool) -> Arc<Self> {
        let lands = (0..60)
            .map(|i| {
                let region = if i % 2 == 0 { "mesa" } else { "tundra" };
                let mut land = Land::new(&format!("plot-{i}"), &format!("Plot {i}"), region);
                land.price = 100 + i as u64;
                land.listed = true;
                land
            })
            .collect();
        let owned = (0..3)
            .map(|i| {
                let mut land = Land::new(&format!("own-{i}"), &format!("Homestead {i}"), "mesa");
                land.owner = Some("me".to_string());
                land
            })
            .collect();
        let tools = vec![
            Tool {
                id: "pick-1".into(),
                name: "Iron Pick".into(),
                tier: "iron".into(),
                durability: 80,
                power: 1.5,
            },
            Tool {
                id: "drill-1".into(),
                name: "Crystal Drill".into(),
                tier: "mythic".into(),
                durability: 100,
                power: 4.0,
            },
        ];
        let sessions = vec![
            MiningSession {
                id: "sess-1".into(),
                land_id: "own-1".into(),
                tool_id: "pick-1".into(),
                started_at: 1_700_000_000,
                hourly_yield: 1.5,
                active: true,
            },
            MiningSession {
                id: "sess-2".into(),
                land_id: "own-2".into(),
                tool_id: "drill-1".into(),
                started_at: 1_700_000_100,
                hourly_yield: 4.0,
                active: true,
            },
        ];
        Arc::new(Self {
            lands,
            owned,
            tools,
            sessions,
            summary: ProductionSummary {
                active_sessions: 2,
                tools_in_use: 2,
                hourly_rate: 5.5,
                total_mined: 1234.5,
            },
            owned_route_dead,
            expired: AtomicBool::new(false),
            ore: Mutex::new(42.0),
        })
    }

    fn expire_session(&self) {
        self.expired.store(true, Ordering::SeqCst);
    }

    fn set_ore(&self, amount: f64) {
        *self.ore.lock().unwrap() = amount;
    }

    fn check_session(&self) -> Result<(), FetchError> {
        if self.expired.load(Ordering::SeqCst) {
            Err(FetchError::Status(401))
        } else {
            Ok(())
        }
    }
}

fn paginate<T: Clone>(all: &[T], query: &Descriptor) -> Page<T> {
    let size = query.page_size as usize;
    let start = (query.page as usize - 1) * size;
    let end = (start + size).min(all.len());
    let items = if start >= all.len() {
        Vec::new()
    } else {
        all[start..end].to_vec()
    };
    Page {
        items,
        count: all.len() as u64,
        next: end < all.len(),
        extra: None,
    }
}

#[async_trait]
impl PlatformApi for FakePlatform {
    async fn lands(&self, query: &Descriptor) -> Result<Page<Land>, FetchError> {
        let filtered: Vec<Land> = self
            .lands
            .iter()
            .filter(|l| {
                query
                    .search
                    .as_ref()
                    .is_none_or(|s| l.name.to_lowercase().contains(&s.to_lowercase()))
            })
            .filter(|l| query.category.as_ref().is_none_or(|r| &l.region == r))
            .filter(|l| query.min_value.is_none_or(|lo| l.price >= lo))
            .filter(|l| query.max_value.is_none_or(|hi| l.price <= hi))
            .cloned()
            .collect();
        Ok(paginate(&filtered, query))
    }

    async fn land(&self, id: &str) -> Result<Option<Land>, FetchError> {
        Ok(self
            .lands
            .iter()
            .chain(self.owned.iter())
            .find(|l| l.id == id)
            .cloned())
    }

    async fn owned_lands(&self, query: &Descriptor) -> Result<Page<Land>, FetchError> {
        self.check_session()?;
        if self.owned_route_dead {
            return Err(FetchError::Status(404));
        }
        Ok(paginate(&self.owned, query))
    }

    async fn owned_assets(&self, query: &Descriptor) -> Result<Page<Land>, FetchError> {
        self.check_session()?;
        Ok(paginate(&self.owned, query))
    }

    async fn tools(&self, query: &Descriptor) -> Result<Page<Tool>, FetchError> {
        let filtered: Vec<Tool> = self
            .tools
            .iter()
            .filter(|t| query.category.as_ref().is_none_or(|tier| &t.tier == tier))
            .cloned()
            .collect();
        Ok(paginate(&filtered, query))
    }

    async fn balances(&self, query: &Descriptor) -> Result<Page<ResourceBalance>, FetchError> {
        let balances = vec![
            ResourceBalance {
                resource: "ore".into(),
                amount: *self.ore.lock().unwrap(),
            },
            ResourceBalance {
                resource: "crystal".into(),
                amount: 7.0,
            },
        ];
        Ok(paginate(&balances, query))
    }

    async fn mining_sessions(&self, query: &Descriptor) -> Result<Page<MiningSession>, FetchError> {
        let filtered: Vec<MiningSession> = self
            .sessions
            .iter()
            .filter(|s| query.parent.as_ref().is_none_or(|land| &s.land_id == land))
            .filter(|s| query.category.as_deref() != Some("active") || s.active)
            .cloned()
            .collect();
        Ok(paginate(&filtered, query))
    }

    async fn mining_sessions_legacy(
        &self,
        query: &Descriptor,
    ) -> Result<Page<MiningSession>, FetchError> {
        self.mining_sessions(query).await
    }

    async fn production_summary(&self) -> Result<Option<ProductionSummary>, FetchError> {
        Ok(Some(self.summary.clone()))
    }
}

#[tokio::test]
async fn full_platform_sync_round_trip() {
    let fake = FakePlatform::new(true);
    let sync = PlatformSync::new(fake.clone());

    // Catalog, filtered to one region: the aggregator walks the capped
    // pages and delivers every matching plot in one snapshot.
    sync.lands
        .browse(LandFilter {
            region: Some("mesa".to_string()),
            ..LandFilter::default()
        })
        .await
        .expect("catalog query failed");
    let mut catalog = sync.lands.catalog().watch();
    catalog
        .wait_for(|s| !s.loading && !s.items.is_empty())
        .await
        .expect("catalog never settled");
    let snapshot = sync.lands.catalog().snapshot();
    assert_eq!(snapshot.items.len(), 30);
    assert!(snapshot.items.iter().all(|l| l.region == "mesa"));
    assert_eq!(snapshot.total, Some(30));
    assert!(!snapshot.truncated);

    // Owned lands: the current route 404s on this deployment, the legacy
    // assets route answers, the chain adopts it transparently.
    sync.lands.browse_owned().await.expect("owned query failed");
    let mut owned = sync.lands.owned().watch();
    owned
        .wait_for(|s| !s.loading && !s.items.is_empty())
        .await
        .expect("owned never settled");
    let snapshot = sync.lands.owned().snapshot();
    assert_eq!(snapshot.items.len(), 3);
    assert!(!snapshot.degraded);

    // Detail view.
    sync.lands.open("plot-7").await.expect("open failed");
    let mut detail = sync.lands.detail().watch();
    detail
        .wait_for(|s| !s.loading && s.item.is_some())
        .await
        .expect("detail never settled");
    assert_eq!(sync.lands.detail().snapshot().item.unwrap().name, "Plot 7");
    sync.lands.close().await.expect("close failed");
    detail
        .wait_for(|s| s.item.is_none())
        .await
        .expect("detail never cleared");

    // The production family.
    sync.mining.load_tools(None).await.expect("tools query failed");
    sync.mining.load_balances().await.expect("balances query failed");
    sync.mining
        .load_sessions(SessionFilter {
            land_id: Some("own-1".to_string()),
            active_only: true,
        })
        .await
        .expect("sessions query failed");
    sync.mining.load_summary().await.expect("summary query failed");

    let mut tools = sync.mining.tools().watch();
    tools
        .wait_for(|s| !s.loading && s.items.len() == 2)
        .await
        .expect("tools never settled");

    let mut sessions = sync.mining.sessions().watch();
    sessions
        .wait_for(|s| !s.loading && !s.items.is_empty())
        .await
        .expect("sessions never settled");
    let snapshot = sync.mining.sessions().snapshot();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].land_id, "own-1");

    let mut summary = sync.mining.summary().watch();
    summary
        .wait_for(|s| !s.loading && s.item.is_some())
        .await
        .expect("summary never settled");
    assert_eq!(sync.mining.summary().snapshot().item.unwrap().hourly_rate, 5.5);

    // A mining payout landed elsewhere in the app: force the production
    // family to reload and observe the fresh balance.
    fake.set_ore(99.5);
    sync.mining
        .refresh_production()
        .await
        .expect("refresh failed");
    let mut balances = sync.mining.balances().watch();
    balances
        .wait_for(|s| {
            !s.loading
                && s.items
                    .iter()
                    .any(|b| b.resource == "ore" && b.amount == 99.5)
        })
        .await
        .expect("balances never refreshed");

    sync.shutdown().await.expect("shutdown failed");
}

#[tokio::test]
async fn expired_session_clears_owned_lands_quietly() {
    let fake = FakePlatform::new(false);
    let sync = PlatformSync::new(fake.clone());

    sync.lands.browse_owned().await.expect("owned query failed");
    let mut owned = sync.lands.owned().watch();
    owned
        .wait_for(|s| !s.loading && !s.items.is_empty())
        .await
        .expect("owned never settled");

    fake.expire_session();
    sync.lands.refresh_owned().await.expect("refetch failed");
    owned
        .wait_for(|s| !s.loading && s.items.is_empty())
        .await
        .expect("owned never cleared");

    // Cleared, but no error surfaced: the outer auth layer owns redirect.
    let snapshot = sync.lands.owned().snapshot();
    assert_eq!(snapshot.error, None);
    assert!(!snapshot.degraded);

    sync.shutdown().await.expect("shutdown failed");
}
