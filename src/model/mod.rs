//! Pure data structures carried by the sync layer.
//!
//! These mirror the remote API's payloads one-to-one; the engine only
//! transports them.

pub mod land;
pub mod mining;

pub use land::*;
pub use mining::*;
