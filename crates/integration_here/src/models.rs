//! Raw HERE Routing API v8 wire models
//!
//! Deserialize-only mirrors of the JSON response. Optional lists default to
//! empty so partially filled responses degrade instead of failing.

use serde::Deserialize;

/// Top-level routing response
///
/// Error bodies carry `type`/`details` instead of routes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawResponse {
    #[serde(default)]
    pub routes: Vec<RawRoute>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub details: Option<String>,
}

/// One candidate route
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRoute {
    #[serde(default)]
    pub sections: Vec<RawSection>,
}

/// One contiguous leg of a route between two stop/via points
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSection {
    /// Flexible-polyline encoded path
    #[serde(default)]
    pub polyline: String,
    #[serde(default)]
    pub summary: RawSummary,
    pub arrival: RawEndpoint,
    pub departure: RawEndpoint,
    #[serde(default)]
    pub turn_by_turn_actions: Vec<RawAction>,
    #[serde(default)]
    pub notices: Vec<RawNotice>,
}

/// Section distance/duration summary
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSummary {
    /// Length in meters
    #[serde(default)]
    pub length: u32,
    /// Duration in seconds
    #[serde(default)]
    pub duration: u32,
}

/// Arrival/departure endpoint of a section
#[derive(Debug, Deserialize)]
pub(crate) struct RawEndpoint {
    pub place: RawPlace,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPlace {
    pub location: RawLocation,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLocation {
    pub lat: f64,
    pub lng: f64,
}

/// One turn-by-turn maneuver within a section
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawAction {
    /// Action kind, e.g. "depart", "turn", "arrive"
    #[serde(default)]
    pub action: String,
    pub direction: Option<String>,
    /// Position within the section's coordinate sequence
    #[serde(default)]
    pub offset: usize,
    /// Length in meters
    #[serde(default)]
    pub length: u32,
    /// Duration in seconds
    #[serde(default)]
    pub duration: u32,
    pub next_road: Option<RawRoad>,
}

/// Road the maneuver leads onto
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawRoad {
    pub name: Option<Vec<RawLocalizedValue>>,
    pub number: Option<Vec<RawLocalizedValue>>,
}

/// One localized value entry of a road name/number list
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawLocalizedValue {
    #[serde(default)]
    pub value: String,
}

/// Provider warning/error annotation with a severity
#[derive(Debug, Deserialize)]
pub(crate) struct RawNotice {
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub title: String,
}
