//! Periodic health polling with an explicit start/stop lifecycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::GatewayClient;
use crate::store::RouteStore;

/// Default interval between periodic health fetches.
pub const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Health monitor configuration.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Interval between periodic health fetches.
    pub poll_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: HEALTH_POLL_INTERVAL,
        }
    }
}

/// Periodic poller keeping the store's health map bounded-stale.
///
/// The stored task handle gates `start`: a second call while the poller
/// task is alive does nothing. `stop` aborts the task; a fetch that is
/// in flight at cancellation time is discarded before it can write back,
/// since the write-back sits behind an await the abort lands on.
#[derive(Clone)]
pub struct HealthMonitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    client: GatewayClient,
    store: Arc<RouteStore>,
    config: MonitorConfig,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl HealthMonitor {
    /// Create a monitor over the given store.
    pub fn new(client: GatewayClient, store: Arc<RouteStore>, config: MonitorConfig) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                client,
                store,
                config,
                task: Mutex::new(None),
            }),
        }
    }

    /// Begin polling: one immediate fetch, then one per interval.
    ///
    /// No-op when the poller is already running.
    pub async fn start(&self) {
        let mut task = self.inner.task.lock().await;

        if let Some(handle) = task.as_ref() {
            if !handle.is_finished() {
                debug!("health poller already running");
                return;
            }
        }

        let interval_secs = self.inner.config.poll_interval.as_secs_f64();
        debug!(interval_secs, "starting health poller");

        let monitor = self.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(monitor.inner.config.poll_interval);
            loop {
                // First tick completes immediately.
                interval.tick().await;
                monitor.poll_once().await;
            }
        });

        *task = Some(handle);
    }

    /// Cancel the poller task. No-op when already stopped.
    pub async fn stop(&self) {
        let mut task = self.inner.task.lock().await;

        if let Some(handle) = task.take() {
            handle.abort();
            debug!("health poller stopped");
        }
    }

    /// Whether a poller task is currently alive.
    pub async fn is_running(&self) -> bool {
        self.inner
            .task
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// One health fetch: replace the map wholesale on success, keep the
    /// previous map on failure so the display degrades to last-known.
    pub async fn poll_once(&self) {
        match self.inner.client.fetch_health().await {
            Ok(statuses) => {
                debug!(count = statuses.len(), "health refreshed");
                self.inner.store.replace_health(statuses).await;
            }
            Err(e) => {
                warn!(error = %e, "health fetch failed, keeping last known reports");
            }
        }
    }
}
