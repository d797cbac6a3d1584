//! The per-session orchestrator wiring every sync manager to the backend.

use crate::api::PlatformApi;
use crate::clients::{LandsClient, MiningClient};
use crate::sync::{EntityManager, SyncManager};
use crate::{lands, mining};
use std::sync::Arc;
use tracing::{error, info};

/// The full set of sync managers for one signed-in session.
///
/// `PlatformSync` is responsible for:
/// - **Lifecycle management**: spawning every manager in its own task and
///   shutting them down together
/// - **Wiring**: handing every endpoint adapter the one shared
///   [`PlatformApi`]
///
/// Each manager stays fully independent at runtime; the orchestrator only
/// owns construction and teardown.
///
/// # Example
///
/// ```ignore
/// let sync = PlatformSync::new(api);
///
/// sync.lands.browse(LandFilter::default()).await?;
/// let snapshot = sync.lands.catalog().snapshot();
///
/// sync.shutdown().await?;
/// ```
pub struct PlatformSync {
    /// Client for the land resources.
    pub lands: LandsClient,

    /// Client for the mining resources.
    pub mining: MiningClient,

    /// Task handles for all running managers (used for graceful shutdown).
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PlatformSync {
    /// Creates and spawns every manager over the given backend.
    pub fn new(api: Arc<dyn PlatformApi>) -> Self {
        let mut handles = Vec::new();

        // Land resources.
        let (catalog, catalog_handle) =
            SyncManager::new(lands::catalog_options(), lands::catalog_sources(&api));
        handles.push(tokio::spawn(catalog.run()));

        let (owned, owned_handle) =
            SyncManager::new(lands::owned_options(), lands::owned_sources(&api));
        handles.push(tokio::spawn(owned.run()));

        let (detail, detail_handle) =
            EntityManager::new(lands::detail_options(), lands::detail_source(&api));
        handles.push(tokio::spawn(detail.run()));

        let lands = LandsClient::new(catalog_handle, owned_handle, detail_handle);

        // Mining resources.
        let (tools, tools_handle) =
            SyncManager::new(mining::tools_options(), mining::tools_sources(&api));
        handles.push(tokio::spawn(tools.run()));

        let (balances, balances_handle) =
            SyncManager::new(mining::balances_options(), mining::balances_sources(&api));
        handles.push(tokio::spawn(balances.run()));

        let (sessions, sessions_handle) =
            SyncManager::new(mining::sessions_options(), mining::sessions_sources(&api));
        handles.push(tokio::spawn(sessions.run()));

        let (summary, summary_handle) =
            EntityManager::new(mining::summary_options(), mining::summary_source(&api));
        handles.push(tokio::spawn(summary.run()));

        let mining = MiningClient::new(tools_handle, balances_handle, sessions_handle, summary_handle);

        info!(managers = handles.len(), "platform sync started");

        Self {
            lands,
            mining,
            handles,
        }
    }

    /// Gracefully shuts down every manager.
    ///
    /// Dropping the clients closes their command channels; each manager
    /// detects the closed channel and exits its event loop. In-flight
    /// fetches complete into a void and mutate nothing.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("shutting down platform sync");

        drop(self.lands);
        drop(self.mining);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("manager task failed: {e:?}");
                return Err(format!("manager task failed: {e:?}"));
            }
        }

        info!("platform sync shutdown complete");
        Ok(())
    }
}
