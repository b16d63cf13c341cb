//! Organization event types.
//!
//! An [`Event`] is one scheduled chapter activity: a meeting, a social, a
//! service project, a fundraiser. Events are loaded once from an
//! [`EventSource`](crate::source::EventSource) and never mutated afterwards.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Opaque event identifier, unique within a loaded collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        EventId(id.into())
    }

    /// A fresh random id, for events that arrive without one.
    pub fn generate() -> Self {
        EventId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        EventId(s)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId::new(s)
    }
}

/// Kind of chapter activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Meeting,
    Social,
    Service,
    Fundraiser,
    #[default]
    Other,
}

impl EventCategory {
    pub const ALL: [EventCategory; 5] = [
        EventCategory::Meeting,
        EventCategory::Social,
        EventCategory::Service,
        EventCategory::Fundraiser,
        EventCategory::Other,
    ];

    /// Human-readable label shown next to an event.
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "Meeting",
            EventCategory::Social => "Social",
            EventCategory::Service => "Service",
            EventCategory::Fundraiser => "Fundraiser",
            EventCategory::Other => "Other",
        }
    }

    /// Value used for the ICS CATEGORIES property.
    pub fn as_ics_str(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "MEETING",
            EventCategory::Social => "SOCIAL",
            EventCategory::Service => "SERVICE",
            EventCategory::Fundraiser => "FUNDRAISER",
            EventCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A scheduled organization activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Absolute start instant.
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: EventCategory,
}

impl Event {
    pub fn new(
        id: impl Into<EventId>,
        title: impl Into<String>,
        starts_at: DateTime<Utc>,
        category: EventCategory,
    ) -> Self {
        Event {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            starts_at,
            location: String::new(),
            category,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// The calendar day this event falls on, as seen from `tz`.
    pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.starts_at.with_timezone(tz).date_naive()
    }

    /// Whether this event falls on `day` in `tz`; time of day is ignored.
    pub fn is_on<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> bool {
        self.day_in(tz) == day
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn event_at(y: i32, m: u32, d: u32, h: u32) -> Event {
        Event::new(
            "e1",
            "Chapter Meeting",
            Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
            EventCategory::Meeting,
        )
    }

    #[test]
    fn is_on_ignores_time_of_day() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert!(event_at(2026, 10, 15, 0).is_on(day, &Utc));
        assert!(event_at(2026, 10, 15, 23).is_on(day, &Utc));
        assert!(!event_at(2026, 10, 16, 0).is_on(day, &Utc));
    }

    #[test]
    fn day_depends_on_time_zone() {
        // 02:00 UTC is still the previous evening in New York (UTC-4 in October)
        let event = event_at(2026, 10, 16, 2);
        let new_york = FixedOffset::west_opt(4 * 3600).unwrap();
        assert_eq!(event.day_in(&Utc), NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        assert_eq!(event.day_in(&new_york), NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
    }

    #[test]
    fn category_uses_lowercase_names() {
        #[derive(Deserialize)]
        struct Row {
            category: EventCategory,
        }
        let row: Row = toml::from_str("category = \"fundraiser\"").unwrap();
        assert_eq!(row.category, EventCategory::Fundraiser);
        assert_eq!(EventCategory::default(), EventCategory::Other);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(EventId::generate(), EventId::generate());
    }
}
