//! Mining-game payloads: tools, balances, sessions and the production
//! summary.

use serde::{Deserialize, Serialize};

/// A mining tool in the player's inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    /// Tier (categorical filter key), e.g. "stone", "iron", "mythic".
    pub tier: String,
    /// Remaining durability, 0..=100.
    pub durability: u32,
    /// Yield multiplier applied to the land's base rate.
    pub power: f64,
}

/// Balance of one in-game resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceBalance {
    /// Resource name, e.g. "ore", "crystal", "token".
    pub resource: String,
    pub amount: f64,
}

/// One running or finished mining session on a land plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningSession {
    pub id: String,
    pub land_id: String,
    pub tool_id: String,
    /// Unix epoch seconds.
    pub started_at: u64,
    /// Yield per hour at session start.
    pub hourly_yield: f64,
    pub active: bool,
}

/// Aggregate production figures across the player's holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionSummary {
    pub active_sessions: u32,
    pub tools_in_use: u32,
    /// Combined yield per hour across active sessions.
    pub hourly_rate: f64,
    /// Lifetime mined total.
    pub total_mined: f64,
}
