//! Client for the mining-game resources.

use crate::model::{MiningSession, ProductionSummary, ResourceBalance, Tool};
use crate::sync::{EntityHandle, RawQuery, SyncError, SyncHandle};

/// Id under which the singleton production summary is keyed.
const SUMMARY_KEY: &str = "me";

/// Domain-typed filter for the session list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionFilter {
    /// Restrict to sessions on one land plot.
    pub land_id: Option<String>,
    /// Restrict to active sessions only, via the categorical filter.
    pub active_only: bool,
}

impl From<SessionFilter> for RawQuery {
    fn from(filter: SessionFilter) -> Self {
        RawQuery {
            parent: filter.land_id,
            category: filter.active_only.then(|| "active".to_string()),
            ..RawQuery::default()
        }
    }
}

/// Client over the tool, balance, session and summary managers.
#[derive(Clone)]
pub struct MiningClient {
    tools: SyncHandle<Tool>,
    balances: SyncHandle<ResourceBalance>,
    sessions: SyncHandle<MiningSession>,
    summary: EntityHandle<ProductionSummary>,
}

impl MiningClient {
    pub(crate) fn new(
        tools: SyncHandle<Tool>,
        balances: SyncHandle<ResourceBalance>,
        sessions: SyncHandle<MiningSession>,
        summary: EntityHandle<ProductionSummary>,
    ) -> Self {
        Self {
            tools,
            balances,
            sessions,
            summary,
        }
    }

    /// Loads the tool inventory, optionally filtered to one tier.
    pub async fn load_tools(&self, tier: Option<String>) -> Result<(), SyncError> {
        self.tools
            .query(RawQuery {
                category: tier,
                ..RawQuery::default()
            })
            .await
    }

    /// Loads the player's resource balances.
    pub async fn load_balances(&self) -> Result<(), SyncError> {
        self.balances.query(RawQuery::default()).await
    }

    /// Reconciles the session list against a new filter.
    pub async fn load_sessions(&self, filter: SessionFilter) -> Result<(), SyncError> {
        self.sessions.query(filter.into()).await
    }

    /// Loads the production summary.
    pub async fn load_summary(&self) -> Result<(), SyncError> {
        self.summary.load(SUMMARY_KEY).await
    }

    /// Forces the whole production family to reload, e.g. after starting
    /// or stopping a mining session elsewhere in the app.
    pub async fn refresh_production(&self) -> Result<(), SyncError> {
        self.sessions.refetch().await?;
        self.balances.refetch().await?;
        self.summary.refetch().await
    }

    /// The tool inventory handle, for snapshots and watching.
    pub fn tools(&self) -> &SyncHandle<Tool> {
        &self.tools
    }

    /// The balances handle.
    pub fn balances(&self) -> &SyncHandle<ResourceBalance> {
        &self.balances
    }

    /// The sessions handle.
    pub fn sessions(&self) -> &SyncHandle<MiningSession> {
        &self.sessions
    }

    /// The summary handle.
    pub fn summary(&self) -> &EntityHandle<ProductionSummary> {
        &self.summary
    }
}
