//! Where calendar events come from.
//!
//! The calendar loads its collection once through [`EventSource`]. Two sources
//! exist: the built-in seed list and a TOML events file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use serde::Deserialize;

use crate::date_range::DateRange;
use crate::error::{CalendarError, CalendarResult};
use crate::event::{Event, EventCategory, EventId};
use crate::month::YearMonth;

/// Supplies events for a time range.
pub trait EventSource {
    /// Events starting inside the half-open `range`, in source order.
    fn events_in_range(&self, range: &DateRange) -> CalendarResult<Vec<Event>>;
}

/// A fixed in-memory list of events.
#[derive(Debug, Clone, Default)]
pub struct StaticEventSource {
    events: Vec<Event>,
}

impl StaticEventSource {
    pub fn new(events: Vec<Event>) -> Self {
        StaticEventSource { events }
    }

    /// The demo chapter schedule: four events on the 15th, 18th, 20th and 25th of `month`,
    /// at local evening/morning times in `tz`.
    pub fn seeded<Tz: TimeZone>(month: YearMonth, tz: &Tz) -> Self {
        let seeds = [
            (
                "1",
                "Weekly Chapter Meeting",
                "Regular chapter business meeting. Attendance is mandatory for all active members.",
                15,
                (19, 0),
                "Chapter House, Main Room",
                EventCategory::Meeting,
            ),
            (
                "2",
                "Fall Formal",
                "Annual formal dinner and dance. Dates welcome.",
                18,
                (20, 0),
                "Grand Ballroom, Downtown Hotel",
                EventCategory::Social,
            ),
            (
                "3",
                "Campus Cleanup",
                "Service hours for the semester. Gloves and bags provided.",
                20,
                (9, 0),
                "Student Union Lawn",
                EventCategory::Service,
            ),
            (
                "4",
                "Philanthropy Gala",
                "Silent auction and dinner benefiting our national philanthropy.",
                25,
                (18, 0),
                "University Conference Center",
                EventCategory::Fundraiser,
            ),
        ];

        let events = seeds
            .into_iter()
            .filter_map(|(id, title, description, day, (hour, minute), location, category)| {
                let starts_at = local_instant(month, day, hour, minute, tz)?;
                Some(
                    Event::new(id, title, starts_at, category)
                        .with_description(description)
                        .with_location(location),
                )
            })
            .collect();

        StaticEventSource { events }
    }
}

impl EventSource for StaticEventSource {
    fn events_in_range(&self, range: &DateRange) -> CalendarResult<Vec<Event>> {
        Ok(self
            .events
            .iter()
            .filter(|e| range.contains(&e.starts_at))
            .cloned()
            .collect())
    }
}

fn local_instant<Tz: TimeZone>(
    month: YearMonth,
    day: u32,
    hour: u32,
    minute: u32,
    tz: &Tz,
) -> Option<DateTime<Utc>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    let local = month.day(day)?.and_time(time);
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Events read from a TOML file:
///
/// ```toml
/// [[events]]
/// id = "chapter-2026-10-15"
/// title = "Weekly Chapter Meeting"
/// starts_at = "2026-10-15T19:00:00-04:00"
/// location = "Chapter House"
/// category = "meeting"
/// ```
///
/// `id` is optional; events without one get a random id when the file is opened.
#[derive(Debug, Clone)]
pub struct FileEventSource {
    path: PathBuf,
    events: Vec<Event>,
}

#[derive(Deserialize)]
struct EventsFile {
    #[serde(default)]
    events: Vec<EventRecord>,
}

#[derive(Deserialize)]
struct EventRecord {
    id: Option<String>,
    title: String,
    #[serde(default)]
    description: String,
    starts_at: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    category: EventCategory,
}

impl EventRecord {
    fn into_event(self) -> CalendarResult<Event> {
        let starts_at = DateTime::parse_from_rfc3339(&self.starts_at)
            .map_err(|e| {
                CalendarError::EventsFile(format!(
                    "Invalid starts_at '{}' for '{}': {e}",
                    self.starts_at, self.title
                ))
            })?
            .with_timezone(&Utc);

        let id = self.id.map(EventId::new).unwrap_or_else(EventId::generate);

        Ok(Event {
            id,
            title: self.title,
            description: self.description,
            starts_at,
            location: self.location,
            category: self.category,
        })
    }
}

impl FileEventSource {
    /// Read and validate an events file.
    pub fn open(path: impl AsRef<Path>) -> CalendarResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut source = Self::parse(&content)?;
        source.path = path.to_path_buf();
        log::debug!("Loaded {} events from {}", source.events.len(), path.display());
        Ok(source)
    }

    /// Parse events file contents.
    pub fn parse(content: &str) -> CalendarResult<Self> {
        let file: EventsFile =
            toml::from_str(content).map_err(|e| CalendarError::EventsFile(e.to_string()))?;

        let events = file
            .events
            .into_iter()
            .map(EventRecord::into_event)
            .collect::<CalendarResult<Vec<_>>>()?;

        Ok(FileEventSource {
            path: PathBuf::new(),
            events,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for FileEventSource {
    fn events_in_range(&self, range: &DateRange) -> CalendarResult<Vec<Event>> {
        Ok(self
            .events
            .iter()
            .filter(|e| range.contains(&e.starts_at))
            .cloned()
            .collect())
    }
}
