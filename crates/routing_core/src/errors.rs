//! Routing error taxonomy
//!
//! Every error is terminal for the call that produced it: this layer never
//! retries. Recovery (retry, fallback provider, relaxed restrictions) is the
//! caller's responsibility, guided by [`RoutingError::is_retryable`].

use thiserror::Error;

/// Errors that can occur while requesting routes from a provider
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Connection to the routing service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the routing service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request timed out before the service answered
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Failed to parse the provider response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Provider returned zero routes
    #[error("No routes found ({kind}): {details}")]
    NoRoutes {
        /// Provider-reported error type
        kind: String,
        /// Provider-reported detail message
        details: String,
    },

    /// Notices at an error-triggering severity were found in the response
    #[error("Route rejected by provider notices: {titles}")]
    CriticalNotice {
        /// All offending notice titles, joined with ";"
        titles: String,
    },

    /// Fewer than two waypoints were supplied
    #[error("Invalid waypoints: {0}")]
    InvalidWaypoints(String),

    /// Adapter configuration is invalid
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RoutingError {
    /// Returns true if retrying the same call could plausibly succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }
}
