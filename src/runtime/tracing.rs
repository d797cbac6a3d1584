/// Initializes the tracing/logging infrastructure for the host app.
///
/// Structured logging via the `tracing` crate with environment-based
/// filtering. Every manager logs under its resource label, so one
/// resource can be singled out while the rest stay quiet:
///
/// - `RUST_LOG=landsync=debug` - dispatches, acceptances and discarded
///   stale responses for every manager
/// - `RUST_LOG=info` - lifecycle events only
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("app started");
/// ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
