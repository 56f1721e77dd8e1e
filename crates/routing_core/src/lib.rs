//! Provider-agnostic routing interface
//!
//! Defines the contract between a map-UI routing plugin and a remote routing
//! provider: geographic value objects ([`LatLng`], [`Waypoint`]), the
//! normalized output shape ([`Route`], [`Instruction`], [`RouteSummary`]),
//! the [`RoutingProvider`] trait, and the [`RoutingError`] taxonomy.
//!
//! This crate carries no HTTP and no provider-specific knowledge; adapters
//! such as `integration_here` implement [`RoutingProvider`] against it.

mod errors;
mod provider;
mod route;
mod waypoint;

pub use errors::RoutingError;
pub use provider::RoutingProvider;
pub use route::{Instruction, Route, RouteSummary};
pub use waypoint::{InvalidCoordinates, LatLng, Waypoint};
