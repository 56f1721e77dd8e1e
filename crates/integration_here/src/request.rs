//! Route request URL assembly
//!
//! Builds the fully qualified GET URL for the HERE Routing API v8 from the
//! adapter configuration and an ordered waypoint list. Waypoint parameters
//! come first; every empty-valued parameter is stripped before encoding.

use routing_core::{RoutingError, Waypoint};
use url::Url;

use crate::config::{HereConfig, RoutingMode, TransportMode, TruckRestriction};

/// Fields always requested from the service; a caller-supplied `return`
/// passthrough value is appended to this list, not substituted for it.
const RETURN_FIELDS: &str = "polyline,summary,turnByTurnActions";

/// Vehicle type tag stamped onto every emitted vehicle object
const VEHICLE_TYPE: &str = "straightTruck";

/// Build the route request URL for the given waypoints
///
/// # Errors
///
/// Returns `RoutingError::Configuration` if the configured base URL does
/// not parse.
pub(crate) fn build_route_url(
    config: &HereConfig,
    waypoints: &[Waypoint],
) -> Result<Url, RoutingError> {
    let mut url = Url::parse(&config.base_url)
        .map_err(|e| RoutingError::Configuration(format!("invalid base_url: {e}")))?;

    let truck = config
        .restriction
        .as_ref()
        .and_then(|r| r.truck.as_ref())
        .filter(|t| !t.is_empty());

    // Any non-empty truck attribute forces truck mode, whatever was configured
    let mode = if truck.is_some() {
        TransportMode::Truck
    } else {
        config
            .restriction
            .as_ref()
            .map_or(TransportMode::Car, |r| r.transport_mode)
    };

    let mut params: Vec<(String, String)> = Vec::new();
    params.push(("transportMode".to_string(), mode.as_str().to_string()));
    params.push((
        "routingMode".to_string(),
        config
            .restriction
            .as_ref()
            .map_or(RoutingMode::Fast, |r| r.routing_mode)
            .as_str()
            .to_string(),
    ));
    params.push((
        "departureTime".to_string(),
        config
            .restriction
            .as_ref()
            .and_then(|r| r.departure_time)
            .map_or_else(|| "any".to_string(), |t| t.to_rfc3339()),
    ));

    if let Some(restriction) = &config.restriction {
        params.push(("avoid[features]".to_string(), restriction.avoid_features()));
    }

    params.push(("alternatives".to_string(), config.alternatives.to_string()));

    if let Some(truck) = truck {
        params.extend(vehicle_params(truck));
    }

    let mut return_fields = vec![RETURN_FIELDS.to_string()];
    for (key, value) in &config.url_parameters {
        if key == "return" {
            if !value.is_empty() {
                return_fields.push(value.clone());
            }
            continue;
        }
        // Passthrough wins on conflict
        params.retain(|(existing, _)| existing != key);
        params.push((key.clone(), value.clone()));
    }
    params.push(("return".to_string(), return_fields.join(",")));
    params.push(("apiKey".to_string(), config.api_key.clone()));

    {
        let mut pairs = url.query_pairs_mut();
        for (i, waypoint) in waypoints.iter().enumerate() {
            let name = if i == 0 {
                "origin"
            } else if i == waypoints.len() - 1 {
                "destination"
            } else {
                "via"
            };
            pairs.append_pair(name, &waypoint.location.to_string());
        }
        for (key, value) in params.iter().filter(|(_, v)| !v.is_empty()) {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

/// Allow-listed vehicle attributes, in wire order, skipping absent values
fn vehicle_params(truck: &TruckRestriction) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let numeric = [
        ("vehicle[height]", truck.height),
        ("vehicle[width]", truck.width),
        ("vehicle[length]", truck.length),
        ("vehicle[grossWeight]", truck.gross_weight),
        ("vehicle[weightPerAxle]", truck.weight_per_axle),
        ("vehicle[trailerCount]", truck.trailer_count),
    ];
    for (key, value) in numeric {
        if let Some(value) = value {
            params.push((key.to_string(), value.to_string()));
        }
    }

    let goods: Vec<&str> = truck
        .shipped_hazardous_goods
        .iter()
        .filter(|g| !g.is_empty())
        .map(String::as_str)
        .collect();
    if !goods.is_empty() {
        params.push((
            "vehicle[shippedHazardousGoods]".to_string(),
            goods.join(","),
        ));
    }

    params.push(("vehicle[type]".to_string(), VEHICLE_TYPE.to_string()));
    params
}
