//! Shared state container for the desired, applied, and health views.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;
use vane_model::{AppliedRoute, HealthIndicator, HealthStatus, Route, RouteId};
use vane_reconcile::{compute_change_set, diff_routes, ChangeKind, ChangeSet};

/// One session's view of the gateway: desired routes, the applied
/// snapshot, and the health map.
///
/// Created once and passed to each component at construction; every
/// refresh path replaces its view wholesale, and the sync queries
/// recompute from current contents on every call.
#[derive(Debug, Default)]
pub struct RouteStore {
    desired: RwLock<Vec<Route>>,
    applied: RwLock<Vec<AppliedRoute>>,
    health: RwLock<HashMap<RouteId, HealthStatus>>,
}

impl RouteStore {
    /// Create an empty store ready to share across components.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of the desired routes.
    pub async fn routes(&self) -> Vec<Route> {
        self.desired.read().await.clone()
    }

    /// Look up a single desired route.
    pub async fn route(&self, id: RouteId) -> Option<Route> {
        self.desired
            .read()
            .await
            .iter()
            .find(|route| route.id == id)
            .cloned()
    }

    /// Snapshot of what the proxy is enforcing.
    pub async fn applied(&self) -> Vec<AppliedRoute> {
        self.applied.read().await.clone()
    }

    /// Replace the desired view with a fresh gateway listing.
    pub async fn replace_routes(&self, routes: Vec<Route>) {
        *self.desired.write().await = routes;
    }

    /// Replace the applied snapshot. No partial merges.
    pub async fn replace_applied(&self, applied: Vec<AppliedRoute>) {
        *self.applied.write().await = applied;
    }

    /// Replace the health map with a fresh poll result. Routes absent
    /// from the new result are dropped, not retained stale.
    pub async fn replace_health(&self, statuses: Vec<HealthStatus>) {
        let map = statuses
            .into_iter()
            .map(|status| (status.route_id, status))
            .collect();
        *self.health.write().await = map;
    }

    /// Last known health report for a route, if any poll has covered it.
    pub async fn health(&self, id: RouteId) -> Option<HealthStatus> {
        self.health.read().await.get(&id).cloned()
    }

    /// Display classification for a route's health.
    pub async fn health_indicator(&self, id: RouteId) -> HealthIndicator {
        HealthIndicator::from_status(self.health.read().await.get(&id))
    }

    /// One-line health detail: latency when healthy, the error type
    /// when not, a pending hint before the first report.
    pub async fn health_detail(&self, id: RouteId) -> String {
        match self.health.read().await.get(&id) {
            Some(status) => status.detail(),
            None => "waiting for first check".to_string(),
        }
    }

    /// Ids that differ between the desired and applied views.
    pub async fn change_set(&self) -> ChangeSet {
        let desired = self.desired.read().await;
        let applied = self.applied.read().await;
        compute_change_set(&desired, &applied)
    }

    /// Per-route classification of the pending changes.
    pub async fn diff(&self) -> BTreeMap<RouteId, ChangeKind> {
        let desired = self.desired.read().await;
        let applied = self.applied.read().await;
        diff_routes(&desired, &applied)
    }

    /// Whether a reload would change anything.
    pub async fn has_unapplied_changes(&self) -> bool {
        !self.change_set().await.is_empty()
    }

    /// Whether this route is out of sync.
    pub async fn is_changed(&self, id: RouteId) -> bool {
        self.change_set().await.contains(id)
    }
}
