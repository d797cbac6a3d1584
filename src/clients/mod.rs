//! Typed facades over the raw sync handles.
//!
//! The handles speak `RawQuery`; these clients speak the domain (regions,
//! price ranges, tool tiers) and translate at the edge, which keeps every
//! call site honest about what a filter means for its resource.

pub mod lands;
pub mod mining;

pub use lands::{LandFilter, LandsClient};
pub use mining::{MiningClient, SessionFilter};
