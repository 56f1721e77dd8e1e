//! Maneuver parsing and road-label disambiguation
//!
//! Walks a section's maneuvers once, emitting an instruction per maneuver
//! and picking at most two road-name labels that characterize the section.
//! Labels already committed by earlier sections/routes in the same response
//! are avoided so alternative routes don't end up with identical names.

use routing_core::Instruction;

use crate::models::RawAction;

/// A candidate road-name label derived from one maneuver
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RoadLabel {
    /// Absolute offset into the route's coordinate sequence
    pub index: usize,
    /// Length of the maneuver in meters; longer roads displace shorter ones
    pub length: u32,
    /// Display text: route number if present, else road name
    pub text: String,
}

/// Result of parsing one section's maneuvers
#[derive(Debug, Default)]
pub(crate) struct ParsedSection {
    pub instructions: Vec<Instruction>,
    /// At most two labels, ordered by coordinate index
    pub road_labels: Vec<RoadLabel>,
}

/// Parse a section's maneuvers into instructions and road labels
///
/// Pure in its inputs: `offset_padding` is the coordinate count preceding
/// this section, `history` the label groups committed so far across the
/// whole response.
pub(crate) fn parse_actions(
    actions: &[RawAction],
    offset_padding: usize,
    history: &[Vec<String>],
) -> ParsedSection {
    let mut parsed = ParsedSection::default();

    for action in actions {
        let has_road = action
            .next_road
            .as_ref()
            .is_some_and(|road| road.name.is_some() || road.number.is_some());

        if has_road {
            let candidate = RoadLabel {
                index: offset_padding + action.offset,
                length: action.length,
                text: road_label_text(action),
            };
            consider_label(&mut parsed.road_labels, candidate, history);
        }

        let text = action.direction.as_ref().map_or_else(
            || action.action.clone(),
            |direction| format!("{} {direction}", action.action),
        );
        parsed.instructions.push(Instruction {
            text,
            distance: action.length,
            time: action.duration,
            index: offset_padding + action.offset,
            kind: action.action.clone(),
        });
    }

    parsed
}

/// Greedy label selection with collision avoidance against `history`
fn consider_label(held: &mut Vec<RoadLabel>, candidate: RoadLabel, history: &[Vec<String>]) {
    // No duplicate label texts within one section
    if held.iter().any(|label| label.text == candidate.text) {
        return;
    }

    if held.len() < 2 {
        let blocked = held.first().is_some_and(|first| {
            combination_exists(history, &[first.text.clone(), candidate.text.clone()])
        });
        if !blocked {
            held.push(candidate);
        }
        return;
    }

    // Holding two: displace the earliest-held label with a strictly smaller
    // maneuver length, unless the resulting pair was already used
    let Some(pos) = held.iter().position(|label| label.length < candidate.length) else {
        return;
    };
    let replacement: Vec<String> = held
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != pos)
        .map(|(_, label)| label.text.clone())
        .chain(std::iter::once(candidate.text.clone()))
        .collect();
    if !combination_exists(history, &replacement) {
        held[pos] = candidate;
        held.sort_by_key(|label| label.index);
    }
}

/// Display text for a maneuver's next road: first route-number value if the
/// field is present, else first name value, else empty
fn road_label_text(action: &RawAction) -> String {
    let Some(road) = action.next_road.as_ref() else {
        return String::new();
    };
    road.number
        .as_ref()
        .or(road.name.as_ref())
        .and_then(|values| values.first())
        .map(|value| value.value.clone())
        .unwrap_or_default()
}

/// True if some recorded group has every one of its entries in `candidate`
/// (subset containment, not exact equality)
pub(crate) fn combination_exists(history: &[Vec<String>], candidate: &[String]) -> bool {
    history
        .iter()
        .any(|group| group.iter().all(|text| candidate.contains(text)))
}
