//! Convergence coordination: drive the proxy from edited to applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::client::GatewayClient;
use crate::error::ReloadError;
use crate::monitor::HealthMonitor;
use crate::store::RouteStore;

/// Default grace period between the gateway accepting a reload and the
/// state refresh.
///
/// The gateway applies configuration asynchronously and exposes no
/// generation id to poll against, so a fixed delay is the best
/// available approximation of "the applied view has settled."
pub const RELOAD_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Reload coordinator configuration.
#[derive(Debug, Clone)]
pub struct ReloaderConfig {
    /// Grace period before refreshing state after an accepted reload.
    pub settle_delay: Duration,
}

impl Default for ReloaderConfig {
    fn default() -> Self {
        Self {
            settle_delay: RELOAD_SETTLE_DELAY,
        }
    }
}

/// Coordinates the reload sequence against the gateway.
///
/// Exactly one sequence may run at a time; the in-flight guard rejects
/// a second invocation before anything reaches the gateway.
pub struct Reloader {
    client: GatewayClient,
    store: Arc<RouteStore>,
    monitor: HealthMonitor,
    config: ReloaderConfig,
    in_flight: AtomicBool,
}

impl Reloader {
    /// Create a coordinator over the shared store.
    pub fn new(
        client: GatewayClient,
        store: Arc<RouteStore>,
        monitor: HealthMonitor,
        config: ReloaderConfig,
    ) -> Self {
        Self {
            client,
            store,
            monitor,
            config,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a reload sequence is currently running.
    #[must_use]
    pub fn is_reloading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Run the reload sequence: trigger the gateway reload, wait out
    /// the settle delay, refresh the applied and desired views, and
    /// take one health poll.
    ///
    /// Returns the gateway's acknowledgement message on success.
    pub async fn reload(&self) -> Result<String, ReloadError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ReloadError::InProgress);
        }

        let outcome = self.run_sequence().await;
        self.in_flight.store(false, Ordering::SeqCst);

        outcome
    }

    async fn run_sequence(&self) -> Result<String, ReloadError> {
        // A rejected or unreachable reload is terminal for this
        // invocation; the operator retries by re-issuing the action.
        let ack = self.client.reload().await?;

        if let Some(warning) = &ack.warning {
            warn!(warning = %warning, "gateway accepted reload with a warning");
        }

        tokio::time::sleep(self.config.settle_delay).await;

        // Best-effort refresh: stale-but-visible state beats no state.
        if let Err(e) = self.refresh_applied().await {
            warn!(error = %e, "failed to refresh applied state after reload");
        }
        if let Err(e) = self.refresh_routes().await {
            warn!(error = %e, "failed to refresh routes after reload");
        }
        self.monitor.poll_once().await;

        info!(message = %ack.message, "proxy reloaded");
        Ok(ack.message)
    }

    async fn refresh_applied(&self) -> Result<(), crate::error::GatewayError> {
        let applied = self.client.fetch_applied().await?;
        self.store.replace_applied(applied).await;
        Ok(())
    }

    async fn refresh_routes(&self) -> Result<(), crate::error::GatewayError> {
        let routes = self.client.list_routes().await?;
        self.store.replace_routes(routes).await;
        Ok(())
    }
}
