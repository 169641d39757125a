//! Per-route health reports and their display classification.

use serde::{Deserialize, Serialize};

use crate::RouteId;

/// Health check result for a single route, as reported by the gateway.
///
/// `response_time_ms` is present only on healthy reports, `error_type`
/// only on unhealthy ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub route_id: RouteId,
    pub healthy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check: Option<String>,
}

/// Display classification of a route's health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthIndicator {
    /// Last report was healthy.
    Healthy,
    /// Last report was unhealthy.
    Unhealthy,
    /// No report has been received for this route yet.
    Unknown,
}

impl HealthIndicator {
    /// Classify from an optional report (absent report = unknown).
    #[must_use]
    pub fn from_status(status: Option<&HealthStatus>) -> Self {
        match status {
            Some(s) if s.healthy => Self::Healthy,
            Some(_) => Self::Unhealthy,
            None => Self::Unknown,
        }
    }

    /// Short status line for display.
    #[must_use]
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Unhealthy => "Unhealthy",
            Self::Unknown => "Checking...",
        }
    }
}

impl std::fmt::Display for HealthIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}

impl HealthStatus {
    /// One-line detail combining latency or error information.
    #[must_use]
    pub fn detail(&self) -> String {
        if self.healthy {
            match self.response_time_ms {
                Some(ms) => format!("OK - {}ms", ms),
                None => "OK".to_string(),
            }
        } else {
            self.error_type
                .clone()
                .unwrap_or_else(|| "unknown error".to_string())
        }
    }
}
