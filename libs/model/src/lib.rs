//! # vane-model
//!
//! Shared data model for the vane console.
//!
//! ## Design Principles
//!
//! - Route identifiers are assigned by the gateway and treated as opaque
//! - Desired routes (`Route`) and enforced routes (`AppliedRoute`) are
//!   distinct types; only the four comparable fields participate in
//!   sync comparisons
//! - Health reports are owned by the gateway and replaced wholesale,
//!   never merged

mod health;
mod route;

pub use health::*;
pub use route::*;
