//! Event calendar core for chapterhouse.
//!
//! - [`EventCalendar`]: the calendar view model (displayed month, selected day,
//!   derived event-day markers and day lists, activation callback)
//! - [`YearMonth`]: month values with rollover arithmetic
//! - [`EventSource`]: where events come from (built-in schedule or a TOML file)
//! - [`MonthGrid`]: week-by-week layout of a month for rendering
//! - [`ics`]: simulated export to RFC 5545 text

pub mod calendar;
pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod grid;
pub mod ics;
pub mod month;
pub mod source;

pub use calendar::{ActivationHandler, EventCalendar, ViewState};
pub use config::CalendarConfig;
pub use date_range::DateRange;
pub use error::{CalendarError, CalendarResult};
pub use event::{Event, EventCategory, EventId};
pub use grid::{DayCell, MonthGrid, WeekStart};
pub use month::YearMonth;
pub use source::{EventSource, FileEventSource, StaticEventSource};
