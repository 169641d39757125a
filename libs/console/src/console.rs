//! Operator-facing facade over the gateway and the shared store.

use std::sync::Arc;

use tracing::debug;
use vane_model::{Route, RouteDraft, RouteId};

use crate::client::{GatewayClient, GatewayMessage};
use crate::error::{GatewayError, ReloadError};
use crate::monitor::{HealthMonitor, MonitorConfig};
use crate::reload::{Reloader, ReloaderConfig};
use crate::store::RouteStore;

/// The assembled control surface: client, store, health monitor, and
/// reload coordinator wired over one shared [`RouteStore`].
///
/// Every mutation re-synchronises the desired view from the gateway
/// listing once the mutating call has succeeded, so the local store
/// always reflects the gateway's latest desired state. A failed
/// mutation leaves local state untouched.
pub struct Console {
    client: GatewayClient,
    store: Arc<RouteStore>,
    monitor: HealthMonitor,
    reloader: Reloader,
}

impl Console {
    /// Assemble a console with default timings.
    pub fn new(client: GatewayClient) -> Self {
        Self::with_config(client, ReloaderConfig::default(), MonitorConfig::default())
    }

    /// Assemble a console with explicit reload and polling timings.
    pub fn with_config(
        client: GatewayClient,
        reloader_config: ReloaderConfig,
        monitor_config: MonitorConfig,
    ) -> Self {
        let store = RouteStore::new();
        let monitor = HealthMonitor::new(client.clone(), store.clone(), monitor_config);
        let reloader = Reloader::new(
            client.clone(),
            store.clone(),
            monitor.clone(),
            reloader_config,
        );

        Self {
            client,
            store,
            monitor,
            reloader,
        }
    }

    /// The shared state container.
    #[must_use]
    pub fn store(&self) -> Arc<RouteStore> {
        self.store.clone()
    }

    /// The underlying gateway client.
    #[must_use]
    pub fn client(&self) -> &GatewayClient {
        &self.client
    }

    /// The health monitor.
    #[must_use]
    pub fn monitor(&self) -> &HealthMonitor {
        &self.monitor
    }

    /// Re-synchronise the desired view from the gateway.
    pub async fn refresh_routes(&self) -> Result<(), GatewayError> {
        let routes = self.client.list_routes().await?;
        debug!(count = routes.len(), "desired routes refreshed");
        self.store.replace_routes(routes).await;
        Ok(())
    }

    /// Re-fetch the applied snapshot.
    pub async fn refresh_applied(&self) -> Result<(), GatewayError> {
        let applied = self.client.fetch_applied().await?;
        debug!(count = applied.len(), "applied snapshot refreshed");
        self.store.replace_applied(applied).await;
        Ok(())
    }

    /// Refresh both views, desired first.
    pub async fn refresh_all(&self) -> Result<(), GatewayError> {
        self.refresh_routes().await?;
        self.refresh_applied().await
    }

    /// Create a route, then re-sync the desired view.
    pub async fn create_route(&self, draft: &RouteDraft) -> Result<Route, GatewayError> {
        let route = self.client.create_route(draft).await?;
        self.refresh_routes().await?;
        Ok(route)
    }

    /// Update a route, then re-sync the desired view.
    pub async fn update_route(
        &self,
        id: RouteId,
        draft: &RouteDraft,
    ) -> Result<Route, GatewayError> {
        let route = self.client.update_route(id, draft).await?;
        self.refresh_routes().await?;
        Ok(route)
    }

    /// Delete a route, then re-sync the desired view.
    pub async fn delete_route(&self, id: RouteId) -> Result<(), GatewayError> {
        self.client.delete_route(id).await?;
        self.refresh_routes().await
    }

    /// Flip a route's enabled flag, then re-sync the desired view.
    pub async fn toggle_route(&self, id: RouteId) -> Result<Route, GatewayError> {
        let route = self.client.toggle_route(id).await?;
        self.refresh_routes().await?;
        Ok(route)
    }

    /// Import route drafts, then re-sync the desired view.
    pub async fn import_routes(
        &self,
        drafts: &[RouteDraft],
    ) -> Result<GatewayMessage, GatewayError> {
        let ack = self.client.import_routes(drafts).await?;
        self.refresh_routes().await?;
        Ok(ack)
    }

    /// Export the gateway's config document.
    pub async fn export_config(&self) -> Result<serde_json::Value, GatewayError> {
        self.client.export_config().await
    }

    /// Run the convergence sequence; see [`Reloader::reload`].
    pub async fn reload(&self) -> Result<String, ReloadError> {
        self.reloader.reload().await
    }

    /// Whether a reload sequence is currently running.
    #[must_use]
    pub fn is_reloading(&self) -> bool {
        self.reloader.is_reloading()
    }
}
