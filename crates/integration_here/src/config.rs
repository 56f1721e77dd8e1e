//! HERE routing service configuration
//!
//! An explicit, validated configuration surface replacing loose option
//! merging: every knob is a named field with a documented default, and
//! unknown keys are rejected at deserialization time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Configuration for the HERE Routing API v8 adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HereConfig {
    /// HERE API key, sent as the `apiKey` query parameter
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the routing service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of alternative routes to request beyond the primary
    #[serde(default)]
    pub alternatives: u8,

    /// Notice severities that fail the whole call when present anywhere
    /// in the response
    #[serde(default = "default_error_severities")]
    pub notice_severities_as_error: Vec<String>,

    /// Extra query parameters passed through to the service verbatim;
    /// they win over built-in parameters on key conflict
    #[serde(default)]
    pub url_parameters: Vec<(String, String)>,

    /// Route restriction settings; `None` leaves mode/avoidance entirely
    /// at service defaults (no `avoid[features]` parameter is emitted)
    #[serde(default)]
    pub restriction: Option<RouteRestriction>,
}

/// Transport mode requested from the routing service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransportMode {
    /// Passenger car routing
    #[default]
    Car,
    /// Truck routing, honoring vehicle restrictions
    Truck,
    /// Walking
    Pedestrian,
    /// Bicycle routing
    Bicycle,
    /// Scooter routing
    Scooter,
}

impl TransportMode {
    /// Wire value for the `transportMode` query parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Truck => "truck",
            Self::Pedestrian => "pedestrian",
            Self::Bicycle => "bicycle",
            Self::Scooter => "scooter",
        }
    }
}

/// Optimization goal for route computation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoutingMode {
    /// Optimize for travel time
    #[default]
    Fast,
    /// Optimize for distance
    Short,
}

impl RoutingMode {
    /// Wire value for the `routingMode` query parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Short => "short",
        }
    }
}

/// Route restriction settings
#[allow(clippy::struct_excessive_bools)] // Avoidance flags are independent toggles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RouteRestriction {
    /// Requested transport mode; forced to truck when `truck` restrictions
    /// carry any non-empty attribute
    pub transport_mode: TransportMode,

    /// Optimization goal
    pub routing_mode: RoutingMode,

    /// Avoid controlled-access highways
    pub avoid_highways: bool,

    /// Avoid toll roads
    pub avoid_tolls: bool,

    /// Avoid ferries
    pub avoid_ferries: bool,

    /// Avoid dirt roads
    pub avoid_dirt_roads: bool,

    /// Departure time; `None` sends the literal `any`
    pub departure_time: Option<DateTime<Utc>>,

    /// Truck attribute restrictions
    pub truck: Option<TruckRestriction>,
}

impl RouteRestriction {
    /// Comma-joined `avoid[features]` value derived from the avoidance flags
    ///
    /// Empty when all flags are off; the request builder strips empty
    /// parameters before encoding.
    #[must_use]
    pub fn avoid_features(&self) -> String {
        let mut features = Vec::new();
        if self.avoid_highways {
            features.push("controlledAccessHighway");
        }
        if self.avoid_tolls {
            features.push("tollRoad");
        }
        if self.avoid_ferries {
            features.push("ferry");
        }
        if self.avoid_dirt_roads {
            features.push("dirtRoad");
        }
        features.join(",")
    }
}

/// Truck attribute restrictions, matching the HERE `vehicle` parameter
/// allow-list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TruckRestriction {
    /// Vehicle height in centimeters
    pub height: Option<u32>,
    /// Vehicle width in centimeters
    pub width: Option<u32>,
    /// Vehicle length in centimeters
    pub length: Option<u32>,
    /// Gross vehicle weight in kilograms
    pub gross_weight: Option<u32>,
    /// Weight per axle in kilograms
    pub weight_per_axle: Option<u32>,
    /// Hazardous goods classes on board, serialized comma-joined
    pub shipped_hazardous_goods: Vec<String>,
    /// Number of trailers
    pub trailer_count: Option<u32>,
}

impl TruckRestriction {
    /// True when no allow-listed attribute carries a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.height.is_none()
            && self.width.is_none()
            && self.length.is_none()
            && self.gross_weight.is_none()
            && self.weight_per_axle.is_none()
            && self.trailer_count.is_none()
            && !self
                .shipped_hazardous_goods
                .iter()
                .any(|goods| !goods.is_empty())
    }
}

fn default_base_url() -> String {
    "https://router.hereapi.com/v8/routes".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_error_severities() -> Vec<String> {
    vec!["critical".to_string()]
}

impl Default for HereConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            alternatives: 0,
            notice_severities_as_error: default_error_severities(),
            url_parameters: Vec::new(),
            restriction: Some(RouteRestriction::default()),
        }
    }
}

impl HereConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: "test-key".to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("api_key must not be empty".to_string());
        }

        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
