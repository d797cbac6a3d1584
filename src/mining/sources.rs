//! Endpoint adapters for the mining resources.

use crate::api::PlatformApi;
use crate::model::{MiningSession, ProductionSummary, ResourceBalance, Tool};
use crate::sync::{Descriptor, EntitySource, FetchError, Page, PageSource};
use async_trait::async_trait;
use std::sync::Arc;

/// Tool inventory route.
pub struct ToolsSource {
    api: Arc<dyn PlatformApi>,
}

impl ToolsSource {
    pub fn new(api: Arc<dyn PlatformApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PageSource for ToolsSource {
    type Item = Tool;

    fn label(&self) -> &'static str {
        "tools"
    }

    async fn fetch_page(&self, query: &Descriptor) -> Result<Page<Tool>, FetchError> {
        self.api.tools(query).await
    }
}

/// Resource balances route.
pub struct BalancesSource {
    api: Arc<dyn PlatformApi>,
}

impl BalancesSource {
    pub fn new(api: Arc<dyn PlatformApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PageSource for BalancesSource {
    type Item = ResourceBalance;

    fn label(&self) -> &'static str {
        "balances"
    }

    async fn fetch_page(&self, query: &Descriptor) -> Result<Page<ResourceBalance>, FetchError> {
        self.api.balances(query).await
    }
}

/// Current mining sessions route.
pub struct SessionsSource {
    api: Arc<dyn PlatformApi>,
}

impl SessionsSource {
    pub fn new(api: Arc<dyn PlatformApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PageSource for SessionsSource {
    type Item = MiningSession;

    fn label(&self) -> &'static str {
        "sessions"
    }

    async fn fetch_page(&self, query: &Descriptor) -> Result<Page<MiningSession>, FetchError> {
        self.api.mining_sessions(query).await
    }
}

/// Legacy mining sessions route.
pub struct SessionsLegacySource {
    api: Arc<dyn PlatformApi>,
}

impl SessionsLegacySource {
    pub fn new(api: Arc<dyn PlatformApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PageSource for SessionsLegacySource {
    type Item = MiningSession;

    fn label(&self) -> &'static str {
        "sessions-legacy"
    }

    async fn fetch_page(&self, query: &Descriptor) -> Result<Page<MiningSession>, FetchError> {
        self.api.mining_sessions_legacy(query).await
    }
}

/// Production summary route. The summary is a singleton, so the entity id
/// is ignored by the remote; the manager still keys staleness by it.
pub struct SummarySource {
    api: Arc<dyn PlatformApi>,
}

impl SummarySource {
    pub fn new(api: Arc<dyn PlatformApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EntitySource for SummarySource {
    type Item = ProductionSummary;

    fn label(&self) -> &'static str {
        "production"
    }

    async fn fetch_one(&self, _id: &str) -> Result<Option<ProductionSummary>, FetchError> {
        self.api.production_summary().await
    }
}
