//! HERE routing client
//!
//! HTTP client for the [HERE Routing API v8](https://router.hereapi.com/v8/routes),
//! implementing the provider-agnostic [`RoutingProvider`] trait.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use routing_core::{Route, RoutingError, RoutingProvider, Waypoint};
use tracing::{debug, instrument};

use crate::config::HereConfig;
use crate::normalize::normalize_response;
use crate::request::build_route_url;

/// Routing client for the HERE Routing API v8
///
/// One outstanding HTTP call per [`route`](RoutingProvider::route)
/// invocation; no retries at this layer. The configured timeout races the
/// response inside the HTTP client, so a call resolves exactly once with
/// either the normalized routes or one terminal error.
#[derive(Debug)]
pub struct HereRoutingClient {
    client: Client,
    config: HereConfig,
}

impl HereRoutingClient {
    /// Create a new HERE routing client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &HereConfig) -> Result<Self, RoutingError> {
        config.validate().map_err(RoutingError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("routing-adapters/0.1")
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl RoutingProvider for HereRoutingClient {
    #[instrument(skip(self, waypoints), fields(waypoints = waypoints.len()))]
    async fn route(&self, waypoints: &[Waypoint]) -> Result<Vec<Route>, RoutingError> {
        if waypoints.len() < 2 {
            return Err(RoutingError::InvalidWaypoints(
                "at least an origin and a destination are required".to_string(),
            ));
        }

        let url = build_route_url(&self.config, waypoints)?;

        debug!(alternatives = self.config.alternatives, "Requesting routes");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                RoutingError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                RoutingError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RoutingError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;

        let routes = normalize_response(
            &body,
            waypoints,
            &self.config.notice_severities_as_error,
        )?;

        debug!(count = routes.len(), "Routes normalized");
        Ok(routes)
    }

    async fn is_healthy(&self) -> bool {
        self.client.get(&self.config.base_url).send().await.is_ok()
    }
}
