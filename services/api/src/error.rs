//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service, and the mapping from
//! core errors to HTTP responses used by the handlers.

use axum::http::StatusCode;
use guesthouse_core::ports::PortError;
use tracing::error;

use crate::config::ConfigError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the outbound HTTP client.
    #[error("Backend HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// The error shape every handler returns.
pub type HandlerError = (StatusCode, String);

/// Maps a backend failure to a response, logging the cause.
///
/// `what` names the snapshot being fetched, e.g. "bookings".
pub fn port_failure(what: &str, e: PortError) -> HandlerError {
    match e {
        PortError::NotFound(item) => (StatusCode::NOT_FOUND, format!("Not found: {}", item)),
        PortError::Unauthorized => {
            error!("Backend refused credentials while fetching {}", what);
            (
                StatusCode::BAD_GATEWAY,
                "Booking backend rejected the service credentials".to_string(),
            )
        }
        PortError::Unexpected(msg) => {
            error!("Failed to fetch {}: {}", what, msg);
            (
                StatusCode::BAD_GATEWAY,
                format!("Failed to fetch {} from the booking backend", what),
            )
        }
    }
}

/// A request the core refused to compute.
pub fn bad_request(e: impl std::fmt::Display) -> HandlerError {
    (StatusCode::BAD_REQUEST, e.to_string())
}

/// A fault in the service's own setup rather than in the request.
pub fn server_fault(what: &str, e: impl std::fmt::Display) -> HandlerError {
    error!("Cannot compute {}: {}", what, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Cannot compute {}", what),
    )
}
