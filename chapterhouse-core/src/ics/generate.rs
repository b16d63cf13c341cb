//! ICS generation.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike};

use crate::error::{CalendarError, CalendarResult};
use crate::event::Event;

const PRODID: &str = "-//chapterhouse//calendar export//EN";

/// Generate a VCALENDAR holding one VEVENT per event.
pub fn export_ics(events: &[&Event], calendar_name: &str) -> CalendarResult<String> {
    let mut cal = Calendar::new();
    cal.name(calendar_name);

    let dtstamp = format_utc(&Utc::now());

    for event in events {
        if event.title.trim().is_empty() {
            return Err(CalendarError::IcsGenerate(format!(
                "Event '{}' has no title",
                event.id
            )));
        }

        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}@chapterhouse", event.id));
        ics_event.summary(&event.title);
        ics_event.add_property("DTSTAMP", &dtstamp);
        ics_event.add_property("DTSTART", format_utc(&event.starts_at));

        // Optional fields
        if !event.description.is_empty() {
            ics_event.description(&event.description);
        }
        if !event.location.is_empty() {
            ics_event.location(&event.location);
        }

        ics_event.add_property("CATEGORIES", event.category.as_ics_str());

        cal.push(ics_event.done());
    }

    let cal = cal.done();
    log::debug!("Exported {} events to ICS", events.len());

    Ok(strip_ics_bloat(&cal.to_string()))
}

fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with ours
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
