//! Error types for chapterhouse.

use thiserror::Error;

/// Errors that can occur at the edges of the calendar (config, event files, export).
///
/// The calendar view operations themselves never fail.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Events file error: {0}")]
    EventsFile(String),

    #[error("Duplicate event id: {0}")]
    DuplicateEventId(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),
}

/// Result type alias for chapterhouse operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
