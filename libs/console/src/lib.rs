//! # vane-console
//!
//! Control surface for a reverse-proxy configuration gateway.
//!
//! The gateway holds two views of the routing table: the editable
//! desired state and the snapshot the proxy is actually enforcing.
//! This crate keeps local copies of both, diffs them on demand, drives
//! the reload that converges them, and maintains a bounded-staleness
//! health view per route.
//!
//! ## Components
//!
//! - [`GatewayClient`]: typed HTTP client for the gateway API
//! - [`RouteStore`]: shared container for the desired, applied, and
//!   health views; one per session, passed to each component at
//!   construction
//! - [`Console`]: operator-facing facade (CRUD, import/export, reload)
//! - [`Reloader`]: the convergence sequence with its in-flight guard
//! - [`HealthMonitor`]: periodic health polling with explicit
//!   start/stop lifecycle

mod client;
mod console;
mod error;
mod monitor;
mod reload;
mod store;

pub use client::{GatewayClient, GatewayMessage};
pub use console::Console;
pub use error::{GatewayError, ReloadError};
pub use monitor::{HealthMonitor, MonitorConfig, HEALTH_POLL_INTERVAL};
pub use reload::{Reloader, ReloaderConfig, RELOAD_SETTLE_DELAY};
pub use store::RouteStore;
