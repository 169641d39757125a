//! Route definitions: desired routes, applied routes, and drafts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Route ID is a gateway-assigned integer, treated as opaque by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteId(i64);

impl RouteId {
    /// Creates a new RouteId from an i64.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying i64 value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RouteId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<RouteId> for i64 {
    fn from(id: RouteId) -> Self {
        id.0
    }
}

/// Error returned when a route ID cannot be parsed from a string.
#[derive(Debug, Error)]
#[error("invalid route id: {0}")]
pub struct ParseRouteIdError(String);

impl std::str::FromStr for RouteId {
    type Err = ParseRouteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ParseRouteIdError(s.to_string()))
    }
}

impl serde::Serialize for RouteId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for RouteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i64::deserialize(deserializer)?;
        Ok(Self(id))
    }
}

/// A desired routing rule as held by the gateway's editable store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub domain: String,
    pub target: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Route {
    /// Whether this route matches an applied route on the comparable
    /// fields (name, domain, target, enabled).
    ///
    /// Timestamps are gateway bookkeeping and never participate.
    #[must_use]
    pub fn matches_applied(&self, applied: &AppliedRoute) -> bool {
        self.name == applied.name
            && self.domain == applied.domain
            && self.target == applied.target
            && self.enabled == applied.enabled
    }
}

/// A route as the proxy is currently enforcing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRoute {
    pub id: RouteId,
    pub name: String,
    pub domain: String,
    pub target: String,
    pub enabled: bool,
}

/// Payload for creating, updating, or importing a route.
///
/// The gateway replaces the full record on update, so the draft always
/// carries all four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDraft {
    pub name: String,
    pub domain: String,
    pub target: String,
    pub enabled: bool,
}

impl From<&Route> for RouteDraft {
    fn from(route: &Route) -> Self {
        Self {
            name: route.name.clone(),
            domain: route.domain.clone(),
            target: route.target.clone(),
            enabled: route.enabled,
        }
    }
}
