//! Runtime orchestration and lifecycle management.
//!
//! This module contains the infrastructure around the sync managers:
//!
//! - **Manager lifecycle**: constructing, spawning, and shutting down the
//!   per-resource manager tasks
//! - **Wiring**: connecting every manager to the one shared backend
//! - **Observability setup**: initializing tracing and logging
//!
//! # Main Components
//!
//! - [`PlatformSync`] - the orchestrator owning every manager task
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod platform;
pub mod tracing;

pub use platform::*;
pub use tracing::*;
