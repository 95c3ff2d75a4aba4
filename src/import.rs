use log::debug;
use serde::{Deserialize, Serialize};

use crate::parser::RawSchedule;
use crate::schedule::FOUNDATIONS;

/// A calendar event as fetched by an outside importer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub location: Option<serde_json::Value>,
}

/// Reads a class name and period out of an event title.
///
/// `"Graphic Design - 6 Block 6"` gives `("Graphic Design", "6")`. Details
/// starting with a digit and `*` mark a Foundations section:
/// `"US History - 7* Block 7"` gives `("Foundations", "7")`.
pub fn parse_event_summary(summary: &str) -> Option<(String, String)> {
    let (class_name, details) = summary.split_once(" - ")?;
    let class_name = class_name.trim();
    let details = details.trim();

    // ASCII folding keeps byte offsets shared with `details`
    let lower = details.to_ascii_lowercase();
    let start = lower.find("block ")? + "block ".len();
    let period = details.get(start..)?.split_whitespace().next()?;
    if !period.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut chars = details.chars();
    let foundations = matches!(
        (chars.next(), chars.next()),
        (Some(first), Some('*')) if first.is_ascii_digit()
    );
    let name = if foundations { FOUNDATIONS } else { class_name };

    Some((name.to_string(), period.to_string()))
}

/// Three-digit rooms are in the USQuad, two-digit rooms in VASC
pub fn format_room_name(location: &str) -> String {
    let location = location.trim();
    if !location.is_empty() && location.chars().all(|c| c.is_ascii_digit()) {
        match location.len() {
            3 => return format!("USQuad {}", location),
            2 => return format!("VASC {}", location),
            _ => {}
        }
    }
    location.to_string()
}

fn location_text(location: Option<&serde_json::Value>) -> String {
    match location {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Turns a day's calendar events into period data.
///
/// Returns the schedule and the titles that could not be read, in order.
/// Events without a title are skipped.
pub fn format_schedule_for_events(events: &[CalendarEvent]) -> (RawSchedule, Vec<String>) {
    let mut schedule = RawSchedule::new();
    let mut unrecognized = Vec::new();

    for event in events {
        let Some(summary) = event.summary.as_deref().filter(|s| !s.is_empty()) else {
            continue;
        };
        match parse_event_summary(summary) {
            Some((name, period)) => {
                let room = format_room_name(&location_text(event.location.as_ref()));
                schedule.push_entry(&period, &name, &room, "");
            }
            None => unrecognized.push(summary.to_string()),
        }
    }

    debug!(
        "Formatted {} events into {} periods ({} unrecognized)",
        events.len(),
        schedule.len(),
        unrecognized.len()
    );
    (schedule, unrecognized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(summary: &str, location: &str) -> CalendarEvent {
        CalendarEvent {
            summary: Some(summary.to_string()),
            location: Some(json!(location)),
        }
    }

    #[test]
    fn parses_class_and_period() {
        assert_eq!(
            parse_event_summary("Graphic Design - 6 Block 6"),
            Some(("Graphic Design".to_string(), "6".to_string()))
        );
    }

    #[test]
    fn starred_section_is_foundations() {
        assert_eq!(
            parse_event_summary("US History - 7* Block 7"),
            Some(("Foundations".to_string(), "7".to_string()))
        );
    }

    #[test]
    fn block_keyword_is_case_insensitive() {
        assert_eq!(
            parse_event_summary("Chemistry - BLOCK 3"),
            Some(("Chemistry".to_string(), "3".to_string()))
        );
    }

    #[test]
    fn non_ascii_details_keep_their_offsets() {
        assert_eq!(
            parse_event_summary("Türkçe - İ Block 5"),
            Some(("Türkçe".to_string(), "5".to_string()))
        );
        assert_eq!(
            parse_event_summary("Deutsch - ẞ ẞ Block 12"),
            Some(("Deutsch".to_string(), "12".to_string()))
        );
    }

    #[test]
    fn rejects_unparsable_summaries() {
        assert_eq!(parse_event_summary("Assembly"), None);
        assert_eq!(parse_event_summary("Chess Club - Room 4"), None);
        assert_eq!(parse_event_summary("Chess Club - Block"), None);
        assert_eq!(parse_event_summary("Chess Club - Block A"), None);
    }

    #[test]
    fn formats_room_numbers() {
        assert_eq!(format_room_name("102"), "USQuad 102");
        assert_eq!(format_room_name(" 20 "), "VASC 20");
        assert_eq!(format_room_name("1024"), "1024");
        assert_eq!(format_room_name("Gym"), "Gym");
        assert_eq!(format_room_name(""), "");
    }

    #[test]
    fn groups_events_by_period() {
        let events = vec![
            event("US History - 5* Block 5", "20"),
            event("Study Hall - 5 Block 5", "102"),
            event("Advisory", ""),
            CalendarEvent::default(),
            CalendarEvent {
                summary: Some("Latin - 2 Block 2".to_string()),
                location: Some(json!(214)),
            },
        ];

        let (schedule, unrecognized) = format_schedule_for_events(&events);
        assert_eq!(unrecognized, vec!["Advisory".to_string()]);

        let periods: std::collections::BTreeMap<&str, &serde_json::Value> = schedule.iter().collect();
        assert_eq!(periods["5"]["name"], json!(["Foundations", "Study Hall"]));
        assert_eq!(periods["5"]["room"], json!(["VASC 20", "USQuad 102"]));
        assert_eq!(periods["5"]["teacher"], json!(["", ""]));
        assert_eq!(periods["2"]["room"], json!(["USQuad 214"]));
    }
}
