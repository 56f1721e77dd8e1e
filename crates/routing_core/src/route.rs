//! Normalized route models
//!
//! The provider-agnostic shape a routing adapter hands back to the map UI:
//! a flat coordinate sequence, turn-by-turn instructions tagged with absolute
//! coordinate offsets, an aggregate summary, and boundary waypoints.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::waypoint::{LatLng, Waypoint};

/// One turn-by-turn step within a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Display text (action plus direction, e.g. "turn left")
    pub text: String,
    /// Length of this step in meters
    pub distance: u32,
    /// Duration of this step in seconds
    pub time: u32,
    /// Absolute offset into the route's coordinate sequence
    pub index: usize,
    /// The raw action kind (e.g. "depart", "turn", "arrive")
    pub kind: String,
}

/// Aggregate distance and travel time for a route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Total length in meters, summed across sections
    pub total_distance: u32,
    /// Total travel time in seconds, summed across sections
    pub total_time: u32,
}

/// A normalized route returned by a [`crate::RoutingProvider`]
///
/// Constructed once per provider route per call; owned by the caller after
/// return. `raw` carries the untouched provider route for advanced callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Display name: comma-joined dominant road labels
    pub name: String,
    /// Coordinate sequence concatenated across all sections
    pub coordinates: Vec<LatLng>,
    /// Flattened instruction list, offsets absolute within `coordinates`
    pub instructions: Vec<Instruction>,
    /// Aggregate distance/time summary
    pub summary: RouteSummary,
    /// Boundary waypoints extracted from section transitions
    pub waypoints: Vec<LatLng>,
    /// The waypoints the caller asked to route through
    pub input_waypoints: Vec<Waypoint>,
    /// Untouched provider route object
    pub raw: serde_json::Value,
}

impl Route {
    /// Create an empty route shell for the given input waypoints
    #[must_use]
    pub fn empty(input_waypoints: Vec<Waypoint>, raw: serde_json::Value) -> Self {
        Self {
            name: String::new(),
            coordinates: Vec::new(),
            instructions: Vec::new(),
            summary: RouteSummary::default(),
            waypoints: Vec::new(),
            input_waypoints,
            raw,
        }
    }

    /// Format as a compact one-line summary
    #[must_use]
    pub fn format_summary(&self) -> String {
        let km = f64::from(self.summary.total_distance) / 1000.0;
        let mins = self.summary.total_time / 60;
        if self.name.is_empty() {
            format!("{km:.1}km, {mins}min")
        } else {
            format!("{} ({km:.1}km, {mins}min)", self.name)
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_route() -> Route {
        let mut route = Route::empty(
            vec![
                Waypoint::new(LatLng::new_unchecked(49.94652, 18.85274)),
                Waypoint::new(LatLng::new_unchecked(50.04746, 18.69581)),
            ],
            serde_json::json!({}),
        );
        route.name = "A4, S1".to_string();
        route.summary = RouteSummary {
            total_distance: 24_500,
            total_time: 1_800,
        };
        route
    }

    #[test]
    fn test_empty_route() {
        let route = Route::empty(Vec::new(), serde_json::Value::Null);
        assert!(route.name.is_empty());
        assert!(route.coordinates.is_empty());
        assert!(route.instructions.is_empty());
        assert_eq!(route.summary, RouteSummary::default());
    }

    #[test]
    fn test_format_summary_with_name() {
        let route = sample_route();
        let summary = route.format_summary();
        assert!(summary.contains("A4, S1"));
        assert!(summary.contains("24.5km"));
        assert!(summary.contains("30min"));
    }

    #[test]
    fn test_format_summary_without_name() {
        let mut route = sample_route();
        route.name.clear();
        assert_eq!(route.format_summary(), "24.5km, 30min");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let route = sample_route();
        let json = serde_json::to_string(&route).expect("serialize");
        let back: Route = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(route, back);
    }
}
