//! HERE routing integration
//!
//! Adapts the [HERE Routing API v8](https://router.hereapi.com/v8/routes) to
//! the provider-agnostic `routing_core` interface: builds the request URL
//! from ordered waypoints and routing options, decodes the compact polyline
//! and maneuver format, and normalizes the answer into flat routes with
//! turn-by-turn instructions and deduplicated road-name labels.
//!
//! # Architecture
//!
//! [`HereRoutingClient`] implements `routing_core::RoutingProvider`.
//! Configuration is an explicit, validated [`HereConfig`] struct; request
//! assembly, wire models, normalization, and label disambiguation live in
//! private modules behind the client.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_here::{HereConfig, HereRoutingClient};
//! use routing_core::{LatLng, RoutingProvider, Waypoint};
//!
//! let config = HereConfig { api_key: "...".into(), ..HereConfig::default() };
//! let client = HereRoutingClient::new(&config)?;
//!
//! let routes = client.route(&[
//!     Waypoint::new(LatLng::new(49.94652, 18.85274)?),
//!     Waypoint::new(LatLng::new(50.04746, 18.69581)?),
//! ]).await?;
//! ```

mod client;
mod config;
mod labels;
mod models;
mod normalize;
mod request;

pub use client::HereRoutingClient;
pub use config::{HereConfig, RouteRestriction, RoutingMode, TransportMode, TruckRestriction};
