//! Response normalization
//!
//! Validates a raw HERE routing response and converts each accepted route
//! into the provider-agnostic [`Route`] shape: concatenated section
//! polylines, accumulated distance/time, boundary waypoints, flattened
//! instructions, and disambiguated road-name labels.

use flexpolyline::Polyline;
use routing_core::{LatLng, Route, RoutingError, Waypoint};
use serde_json::Value;
use tracing::warn;

use crate::labels::parse_actions;
use crate::models::{RawResponse, RawRoute};

/// Normalize a raw response body into the ordered route list
///
/// Provider route order is preserved: index 0 is the primary route, the rest
/// alternatives. Validation failures abort the whole call; per-route
/// normalization itself never fails — malformed route data degrades to empty
/// coordinates or labels.
///
/// # Errors
///
/// - `ParseError` if the body is not valid JSON for the expected shape
/// - `NoRoutes` if the response carries no routes
/// - `CriticalNotice` if any section notice matches `error_severities`
pub(crate) fn normalize_response(
    body: &str,
    input_waypoints: &[Waypoint],
    error_severities: &[String],
) -> Result<Vec<Route>, RoutingError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))?;
    let raw: RawResponse =
        serde_json::from_value(value.clone()).map_err(|e| RoutingError::ParseError(e.to_string()))?;

    if raw.routes.is_empty() {
        return Err(RoutingError::NoRoutes {
            kind: raw.error_type.unwrap_or_default(),
            details: raw.details.unwrap_or_default(),
        });
    }

    // Any matching notice anywhere rejects the entire response, not just the
    // offending route
    let offending: Vec<&str> = raw
        .routes
        .iter()
        .flat_map(|route| &route.sections)
        .flat_map(|section| &section.notices)
        .filter(|notice| error_severities.iter().any(|s| *s == notice.severity))
        .map(|notice| notice.title.as_str())
        .collect();
    if !offending.is_empty() {
        return Err(RoutingError::CriticalNotice {
            titles: offending.join(";"),
        });
    }

    let raw_route_values = value
        .get("routes")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    // Label groups committed so far, shared across every route of this
    // response and threaded explicitly; local to this call only
    let mut used_labels: Vec<Vec<String>> = Vec::new();

    Ok(raw
        .routes
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let raw_value = raw_route_values.get(i).cloned().unwrap_or(Value::Null);
            normalize_route(route, input_waypoints, raw_value, &mut used_labels)
        })
        .collect())
}

/// Fold one raw route's sections into a normalized route
fn normalize_route(
    raw: &RawRoute,
    input_waypoints: &[Waypoint],
    raw_value: Value,
    used_labels: &mut Vec<Vec<String>>,
) -> Route {
    let mut route = Route::empty(input_waypoints.to_vec(), raw_value);
    let last = raw.sections.len().saturating_sub(1);

    for (index, section) in raw.sections.iter().enumerate() {
        let offset_padding = route.coordinates.len();
        route
            .coordinates
            .extend(decode_polyline(&section.polyline));
        route.summary.total_distance = route
            .summary
            .total_distance
            .saturating_add(section.summary.length);
        route.summary.total_time = route
            .summary
            .total_time
            .saturating_add(section.summary.duration);

        // Boundary waypoints: first section contributes its arrival point,
        // then the departure point of the first-if-only section and of every
        // later section marks a transition
        if index == 0 {
            let loc = &section.arrival.place.location;
            route.waypoints.push(LatLng::new_unchecked(loc.lat, loc.lng));
        }
        if index == last || index != 0 {
            let loc = &section.departure.place.location;
            route.waypoints.push(LatLng::new_unchecked(loc.lat, loc.lng));
        }

        let parsed = parse_actions(&section.turn_by_turn_actions, offset_padding, used_labels);
        route.instructions.extend(parsed.instructions);

        let texts: Vec<String> = parsed
            .road_labels
            .iter()
            .map(|label| label.text.clone())
            .collect();
        // Each section overwrites the name; the last section wins
        route.name = texts.join(", ");
        used_labels.push(texts);
    }

    route
}

/// Decode a flexible-polyline string, dropping any third dimension
///
/// An undecodable polyline yields no coordinates instead of failing the
/// route.
fn decode_polyline(encoded: &str) -> Vec<LatLng> {
    match Polyline::decode(encoded) {
        Ok(Polyline::Data2d { coordinates, .. }) => coordinates
            .into_iter()
            .map(|(lat, lng)| LatLng::new_unchecked(lat, lng))
            .collect(),
        Ok(Polyline::Data3d { coordinates, .. }) => coordinates
            .into_iter()
            .map(|(lat, lng, _)| LatLng::new_unchecked(lat, lng))
            .collect(),
        Err(error) => {
            warn!(%error, "Skipping undecodable section polyline");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use flexpolyline::Precision;
    use routing_core::LatLng;
    use serde_json::json;

    use super::*;

    fn encode(points: &[(f64, f64)]) -> String {
        Polyline::Data2d {
            coordinates: points.to_vec(),
            precision2d: Precision::Digits5,
        }
        .encode()
        .expect("encode")
    }

    fn input_waypoints() -> Vec<Waypoint> {
        vec![
            Waypoint::new(LatLng::new_unchecked(49.94652, 18.85274)),
            Waypoint::new(LatLng::new_unchecked(50.04746, 18.69581)),
        ]
    }

    fn critical() -> Vec<String> {
        vec!["critical".to_string()]
    }

    fn named_road(value: &str) -> Value {
        json!({ "name": [{ "value": value }] })
    }

    fn section(
        polyline_points: &[(f64, f64)],
        length: u32,
        duration: u32,
        actions: Value,
    ) -> Value {
        json!({
            "polyline": encode(polyline_points),
            "summary": { "length": length, "duration": duration },
            "departure": { "place": { "location": { "lat": polyline_points[0].0, "lng": polyline_points[0].1 } } },
            "arrival": {
                "place": { "location": {
                    "lat": polyline_points[polyline_points.len() - 1].0,
                    "lng": polyline_points[polyline_points.len() - 1].1
                } }
            },
            "turnByTurnActions": actions
        })
    }

    #[test]
    fn test_missing_routes_is_no_routes_error() {
        let body = json!({ "type": "noRouteFound", "details": "no road" }).to_string();
        let err = normalize_response(&body, &input_waypoints(), &critical()).expect_err("error");
        match err {
            RoutingError::NoRoutes { kind, details } => {
                assert_eq!(kind, "noRouteFound");
                assert_eq!(details, "no road");
            }
            other => panic!("expected NoRoutes, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_routes_is_no_routes_error() {
        let body = json!({ "routes": [] }).to_string();
        let err = normalize_response(&body, &input_waypoints(), &critical()).expect_err("error");
        assert!(matches!(err, RoutingError::NoRoutes { .. }));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err =
            normalize_response("not json", &input_waypoints(), &critical()).expect_err("error");
        assert!(matches!(err, RoutingError::ParseError(_)));
    }

    #[test]
    fn test_critical_notice_aborts_all_routes() {
        let clean = section(&[(50.0, 8.0), (50.001, 8.001)], 100, 10, json!([]));
        let mut noticed = section(&[(50.0, 8.0), (50.001, 8.001)], 100, 10, json!([]));
        noticed["notices"] = json!([
            { "severity": "critical", "title": "violatedBlockedRoad" },
            { "severity": "info", "title": "tollsDataUnavailable" }
        ]);
        let mut second = section(&[(50.0, 8.0), (50.001, 8.001)], 100, 10, json!([]));
        second["notices"] = json!([{ "severity": "critical", "title": "violatedVehicleRestriction" }]);

        let body = json!({ "routes": [
            { "sections": [clean] },
            { "sections": [noticed, second] }
        ] })
        .to_string();

        let err = normalize_response(&body, &input_waypoints(), &critical()).expect_err("error");
        match err {
            RoutingError::CriticalNotice { titles } => {
                assert_eq!(titles, "violatedBlockedRoad;violatedVehicleRestriction");
            }
            other => panic!("expected CriticalNotice, got {other:?}"),
        }
    }

    #[test]
    fn test_non_matching_severities_pass() {
        let mut sec = section(&[(50.0, 8.0), (50.001, 8.001)], 100, 10, json!([]));
        sec["notices"] = json!([{ "severity": "info", "title": "tollsDataUnavailable" }]);
        let body = json!({ "routes": [{ "sections": [sec] }] }).to_string();

        let routes = normalize_response(&body, &input_waypoints(), &critical()).expect("routes");
        assert_eq!(routes.len(), 1);
    }

    #[test]
    fn test_configured_severity_set_is_honored() {
        let mut sec = section(&[(50.0, 8.0), (50.001, 8.001)], 100, 10, json!([]));
        sec["notices"] = json!([{ "severity": "info", "title": "tollsDataUnavailable" }]);
        let body = json!({ "routes": [{ "sections": [sec] }] }).to_string();

        let severities = vec!["critical".to_string(), "info".to_string()];
        let err = normalize_response(&body, &input_waypoints(), &severities).expect_err("error");
        assert!(matches!(err, RoutingError::CriticalNotice { .. }));
    }

    #[test]
    fn test_coordinate_continuity_across_sections() {
        let first_points = [(50.0, 8.0), (50.001, 8.001), (50.002, 8.002)];
        let second_points = [(50.002, 8.002), (50.003, 8.003)];
        let actions_first = json!([
            { "action": "depart", "offset": 0, "length": 120, "duration": 30 },
            { "action": "turn", "direction": "right", "offset": 2, "length": 80, "duration": 20 }
        ]);
        let actions_second = json!([
            { "action": "arrive", "offset": 1, "length": 0, "duration": 0 }
        ]);

        let body = json!({ "routes": [{ "sections": [
            section(&first_points, 200, 50, actions_first),
            section(&second_points, 150, 40, actions_second)
        ] }] })
        .to_string();

        let routes = normalize_response(&body, &input_waypoints(), &critical()).expect("routes");
        let route = &routes[0];

        assert_eq!(route.coordinates.len(), 5);
        assert_eq!(route.summary.total_distance, 350);
        assert_eq!(route.summary.total_time, 90);

        // Offsets are absolute: the second section is padded by the first
        // section's coordinate count
        assert_eq!(route.instructions.len(), 3);
        assert_eq!(route.instructions[0].index, 0);
        assert_eq!(route.instructions[1].index, 2);
        assert_eq!(route.instructions[2].index, 4);
        assert_eq!(route.instructions[1].text, "turn right");

        let mut previous = 0;
        for instruction in &route.instructions {
            assert!(instruction.index >= previous);
            previous = instruction.index;
        }
    }

    #[test]
    fn test_boundary_waypoints_single_section() {
        let points = [(50.0, 8.0), (50.001, 8.001)];
        let body =
            json!({ "routes": [{ "sections": [section(&points, 100, 10, json!([]))] }] })
                .to_string();

        let routes = normalize_response(&body, &input_waypoints(), &critical()).expect("routes");
        let waypoints = &routes[0].waypoints;

        // A single section contributes its arrival point first, then its
        // departure point
        assert_eq!(waypoints.len(), 2);
        assert!((waypoints[0].latitude() - 50.001).abs() < 1e-9);
        assert!((waypoints[1].latitude() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_waypoints_multi_section() {
        let first = [(50.0, 8.0), (50.01, 8.01)];
        let second = [(50.01, 8.01), (50.02, 8.02)];
        let third = [(50.02, 8.02), (50.03, 8.03)];
        let body = json!({ "routes": [{ "sections": [
            section(&first, 100, 10, json!([])),
            section(&second, 100, 10, json!([])),
            section(&third, 100, 10, json!([]))
        ] }] })
        .to_string();

        let routes = normalize_response(&body, &input_waypoints(), &critical()).expect("routes");
        let waypoints = &routes[0].waypoints;

        // First section's arrival, then each later section's departure
        assert_eq!(waypoints.len(), 3);
        assert!((waypoints[0].latitude() - 50.01).abs() < 1e-9);
        assert!((waypoints[1].latitude() - 50.01).abs() < 1e-9);
        assert!((waypoints[2].latitude() - 50.02).abs() < 1e-9);
    }

    #[test]
    fn test_name_from_labels_and_last_section_wins() {
        let points = [(50.0, 8.0), (50.001, 8.001)];
        let first_actions = json!([
            { "action": "depart", "offset": 0, "length": 500, "duration": 60,
              "nextRoad": named_road("A4") },
            { "action": "turn", "direction": "left", "offset": 1, "length": 300, "duration": 40,
              "nextRoad": named_road("S1") }
        ]);
        let second_actions = json!([
            { "action": "continue", "offset": 0, "length": 700, "duration": 80,
              "nextRoad": named_road("DK81") }
        ]);

        let body = json!({ "routes": [{ "sections": [
            section(&points, 800, 100, first_actions),
            section(&points, 700, 80, second_actions)
        ] }] })
        .to_string();

        let routes = normalize_response(&body, &input_waypoints(), &critical()).expect("routes");
        // Intermediate section names are overwritten, not merged
        assert_eq!(routes[0].name, "DK81");
    }

    #[test]
    fn test_alternative_route_avoids_used_label_pair() {
        let points = [(50.0, 8.0), (50.001, 8.001)];
        let primary_actions = json!([
            { "action": "depart", "offset": 0, "length": 500, "duration": 60,
              "nextRoad": named_road("A4") },
            { "action": "turn", "offset": 1, "length": 300, "duration": 40,
              "nextRoad": named_road("S1") }
        ]);
        let alternative_actions = json!([
            { "action": "depart", "offset": 0, "length": 500, "duration": 60,
              "nextRoad": named_road("A4") },
            { "action": "turn", "offset": 1, "length": 300, "duration": 40,
              "nextRoad": named_road("S1") },
            { "action": "turn", "offset": 2, "length": 200, "duration": 30,
              "nextRoad": named_road("DK81") }
        ]);

        let body = json!({ "routes": [
            { "sections": [section(&points, 800, 100, primary_actions)] },
            { "sections": [section(&points, 900, 120, alternative_actions)] }
        ] })
        .to_string();

        let routes = normalize_response(&body, &input_waypoints(), &critical()).expect("routes");
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].name, "A4, S1");
        // The pair {A4, S1} is taken; the alternative falls back to DK81
        assert_eq!(routes[1].name, "A4, DK81");
    }

    #[test]
    fn test_route_order_and_metadata_preserved() {
        let points = [(50.0, 8.0), (50.001, 8.001)];
        let body = json!({ "routes": [
            { "id": "r0", "sections": [section(&points, 100, 10, json!([]))] },
            { "id": "r1", "sections": [section(&points, 200, 20, json!([]))] }
        ] })
        .to_string();

        let inputs = input_waypoints();
        let routes = normalize_response(&body, &inputs, &critical()).expect("routes");

        assert_eq!(routes[0].summary.total_distance, 100);
        assert_eq!(routes[1].summary.total_distance, 200);
        assert_eq!(routes[0].raw["id"], "r0");
        assert_eq!(routes[1].raw["id"], "r1");
        assert_eq!(routes[0].input_waypoints, inputs);
    }

    #[test]
    fn test_undecodable_polyline_degrades_to_empty() {
        let body = json!({ "routes": [{ "sections": [{
            "polyline": "???not-a-polyline???",
            "summary": { "length": 100, "duration": 10 },
            "departure": { "place": { "location": { "lat": 50.0, "lng": 8.0 } } },
            "arrival": { "place": { "location": { "lat": 50.001, "lng": 8.001 } } }
        }] }] })
        .to_string();

        let routes = normalize_response(&body, &input_waypoints(), &critical()).expect("routes");
        assert!(routes[0].coordinates.is_empty());
        assert_eq!(routes[0].summary.total_distance, 100);
    }

    #[test]
    fn test_decoded_coordinates_match_fixture() {
        let points = [(50.1022829, 8.6982122), (50.1020076, 8.6956695)];
        let body =
            json!({ "routes": [{ "sections": [section(&points, 200, 30, json!([]))] }] })
                .to_string();

        let routes = normalize_response(&body, &input_waypoints(), &critical()).expect("routes");
        let coords = &routes[0].coordinates;
        assert_eq!(coords.len(), 2);
        assert!((coords[0].latitude() - 50.10228).abs() < 1e-4);
        assert!((coords[0].longitude() - 8.69821).abs() < 1e-4);
    }
}
