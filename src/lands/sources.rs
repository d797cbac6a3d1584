//! Endpoint adapters for the land resources.

use crate::api::PlatformApi;
use crate::model::Land;
use crate::sync::{Descriptor, EntitySource, FetchError, Page, PageSource};
use async_trait::async_trait;
use std::sync::Arc;

/// Marketplace catalog route.
pub struct CatalogSource {
    api: Arc<dyn PlatformApi>,
}

impl CatalogSource {
    pub fn new(api: Arc<dyn PlatformApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PageSource for CatalogSource {
    type Item = Land;

    fn label(&self) -> &'static str {
        "lands"
    }

    async fn fetch_page(&self, query: &Descriptor) -> Result<Page<Land>, FetchError> {
        self.api.lands(query).await
    }
}

/// Current owned-lands route.
pub struct OwnedLandsSource {
    api: Arc<dyn PlatformApi>,
}

impl OwnedLandsSource {
    pub fn new(api: Arc<dyn PlatformApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PageSource for OwnedLandsSource {
    type Item = Land;

    fn label(&self) -> &'static str {
        "my-lands"
    }

    async fn fetch_page(&self, query: &Descriptor) -> Result<Page<Land>, FetchError> {
        self.api.owned_lands(query).await
    }
}

/// Legacy assets route; still the only one answering on older deployments.
pub struct OwnedAssetsSource {
    api: Arc<dyn PlatformApi>,
}

impl OwnedAssetsSource {
    pub fn new(api: Arc<dyn PlatformApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PageSource for OwnedAssetsSource {
    type Item = Land;

    fn label(&self) -> &'static str {
        "my-assets"
    }

    async fn fetch_page(&self, query: &Descriptor) -> Result<Page<Land>, FetchError> {
        self.api.owned_assets(query).await
    }
}

/// Single-plot detail route.
pub struct LandDetailSource {
    api: Arc<dyn PlatformApi>,
}

impl LandDetailSource {
    pub fn new(api: Arc<dyn PlatformApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EntitySource for LandDetailSource {
    type Item = Land;

    fn label(&self) -> &'static str {
        "land-detail"
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<Land>, FetchError> {
        self.api.land(id).await
    }
}
