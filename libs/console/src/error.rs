//! Error types for gateway communication and convergence.

use thiserror::Error;

/// Errors from talking to the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network-level failure; the gateway was unreachable.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A success response carried a body that could not be decoded.
    #[error("failed to parse gateway response: {0}")]
    Parse(#[source] reqwest::Error),
}

impl GatewayError {
    /// The HTTP status of a rejection, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from the reload coordinator.
#[derive(Debug, Error)]
pub enum ReloadError {
    /// A convergence sequence is already running; the call was refused
    /// before anything reached the gateway.
    #[error("a reload is already in progress")]
    InProgress,

    /// The reload call itself failed; state refresh was not attempted.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
