//! Land plot payloads.

use serde::{Deserialize, Serialize};

/// One land plot as served by the platform API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Land {
    pub id: String,
    pub name: String,
    /// Region the plot sits in (categorical filter key).
    pub region: String,
    /// Plot size in tiles.
    pub size: u32,
    /// Listed price in platform tokens; zero when not for sale.
    pub price: u64,
    /// Current owner, if any.
    pub owner: Option<String>,
    /// Whether the plot is currently listed on the marketplace.
    pub listed: bool,
    /// Base mining yield per hour for this plot.
    pub yield_rate: f64,
}

impl Land {
    /// Convenience constructor used by tests and fixtures.
    pub fn new(id: &str, name: &str, region: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            region: region.to_string(),
            size: 1,
            price: 0,
            owner: None,
            listed: false,
            yield_rate: 0.0,
        }
    }
}
