//! Desired/applied route diffing.
//!
//! This library computes which routes differ between the operator's
//! desired configuration and the snapshot the proxy is actually
//! enforcing. Key concepts:
//!
//! - **Desired state**: What the operator has edited (the gateway's
//!   editable store).
//! - **Applied state**: What the proxy is currently enforcing.
//! - **Change set**: The route ids a reload would affect.
//!
//! # Invariants
//!
//! - Diffing is a pure function of its two inputs
//! - Comparison is structural over the comparable fields (name, domain,
//!   target, enabled), never by identity
//! - The change set is a subset of the union of desired and applied ids

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use vane_model::{AppliedRoute, Route, RouteId};

/// Why a route is out of sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Present in desired only; a reload would add it.
    Added,

    /// Present in both with at least one differing comparable field.
    Modified,

    /// Present in applied only; a reload would remove it.
    Removed,
}

impl ChangeKind {
    /// Short label for display.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set of route ids that differ between desired and applied state.
///
/// Derived, never stored: recompute whenever either input changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    ids: BTreeSet<RouteId>,
}

impl ChangeSet {
    /// True when desired and applied state converge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of out-of-sync routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Membership test for a single route.
    #[must_use]
    pub fn contains(&self, id: RouteId) -> bool {
        self.ids.contains(&id)
    }

    /// Iterate the out-of-sync ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = RouteId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<RouteId> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = RouteId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Classify every out-of-sync route.
///
/// Two passes: desired routes missing from applied (or differing on a
/// comparable field) are added/modified; applied routes missing from
/// desired are removed. A route id cannot be flagged by both passes.
#[must_use]
pub fn diff_routes(
    desired: &[Route],
    applied: &[AppliedRoute],
) -> BTreeMap<RouteId, ChangeKind> {
    let applied_by_id: HashMap<RouteId, &AppliedRoute> =
        applied.iter().map(|route| (route.id, route)).collect();

    let mut changes = BTreeMap::new();

    for route in desired {
        match applied_by_id.get(&route.id) {
            None => {
                changes.insert(route.id, ChangeKind::Added);
            }
            Some(existing) if !route.matches_applied(existing) => {
                changes.insert(route.id, ChangeKind::Modified);
            }
            Some(_) => {}
        }
    }

    let desired_ids: BTreeSet<RouteId> = desired.iter().map(|route| route.id).collect();
    for route in applied {
        if !desired_ids.contains(&route.id) {
            changes.insert(route.id, ChangeKind::Removed);
        }
    }

    changes
}

/// Compute the set of out-of-sync route ids.
///
/// Cheap enough to call on every read; inputs are bounded by the
/// operator-managed route count.
#[must_use]
pub fn compute_change_set(desired: &[Route], applied: &[AppliedRoute]) -> ChangeSet {
    diff_routes(desired, applied).into_keys().collect()
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn route_from(id: i64, name: String, enabled: bool) -> Route {
        let now = Utc::now();
        Route {
            id: RouteId::new(id),
            domain: format!("{name}.test"),
            target: format!("http://{name}:8080"),
            name,
            enabled,
            created_at: now,
            updated_at: now,
        }
    }

    // Keyed by id so generated stores respect id uniqueness.
    fn arb_routes() -> impl Strategy<Value = Vec<Route>> {
        prop::collection::btree_map(0i64..8, ("[a-d]{1,4}", any::<bool>()), 0..6).prop_map(
            |entries| {
                entries
                    .into_iter()
                    .map(|(id, (name, enabled))| route_from(id, name, enabled))
                    .collect()
            },
        )
    }

    fn mirror(routes: &[Route]) -> Vec<AppliedRoute> {
        routes
            .iter()
            .map(|route| AppliedRoute {
                id: route.id,
                name: route.name.clone(),
                domain: route.domain.clone(),
                target: route.target.clone(),
                enabled: route.enabled,
            })
            .collect()
    }

    proptest! {
        #[test]
        fn mirrored_state_always_converges(desired in arb_routes()) {
            let applied = mirror(&desired);
            prop_assert!(compute_change_set(&desired, &applied).is_empty());
        }

        #[test]
        fn change_set_is_subset_of_id_union(
            desired in arb_routes(),
            applied_src in arb_routes(),
        ) {
            let applied = mirror(&applied_src);
            let union: std::collections::BTreeSet<RouteId> = desired
                .iter()
                .map(|r| r.id)
                .chain(applied.iter().map(|r| r.id))
                .collect();

            for id in compute_change_set(&desired, &applied).iter() {
                prop_assert!(union.contains(&id));
            }
        }

        #[test]
        fn unpaired_ids_are_always_flagged(
            desired in arb_routes(),
            applied_src in arb_routes(),
        ) {
            let applied = mirror(&applied_src);
            let changes = compute_change_set(&desired, &applied);

            for route in &desired {
                if !applied.iter().any(|a| a.id == route.id) {
                    prop_assert!(changes.contains(route.id));
                }
            }
            for route in &applied {
                if !desired.iter().any(|d| d.id == route.id) {
                    prop_assert!(changes.contains(route.id));
                }
            }
        }

        #[test]
        fn recomputation_is_idempotent(
            desired in arb_routes(),
            applied_src in arb_routes(),
        ) {
            let applied = mirror(&applied_src);
            prop_assert_eq!(
                compute_change_set(&desired, &applied),
                compute_change_set(&desired, &applied)
            );
        }
    }
}
