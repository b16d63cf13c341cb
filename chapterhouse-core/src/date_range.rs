//! Date range for filtering events.

use chrono::{DateTime, Utc};

/// Half-open instant range `[from, to)` for filtering events.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// The range covering everything.
    pub fn unbounded() -> Self {
        DateRange::default()
    }

    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        DateRange {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| *instant >= from) && self.to.is_none_or(|to| *instant < to)
    }
}
