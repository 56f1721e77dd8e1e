//! Routing provider trait

use async_trait::async_trait;

use crate::errors::RoutingError;
use crate::route::Route;
use crate::waypoint::Waypoint;

/// Trait for remote routing providers
///
/// Implementations call a routing web service and reshape its answer into
/// the normalized [`Route`] list; they never compute routes themselves.
///
/// A call either resolves with the ordered route list (index 0 is the
/// primary route, the rest alternatives) or with exactly one terminal
/// [`RoutingError`]. Concurrent calls are independent; no state is shared
/// between them.
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Request routes through the given waypoints, in order
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two waypoints are supplied, the
    /// transport fails or times out, or the provider rejects the request.
    async fn route(&self, waypoints: &[Waypoint]) -> Result<Vec<Route>, RoutingError>;

    /// Check if the routing service is reachable
    async fn is_healthy(&self) -> bool;
}
