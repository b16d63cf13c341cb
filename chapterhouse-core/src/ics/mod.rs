//! Simulated calendar export.
//!
//! Builds RFC 5545 text for a set of events. Nothing is sent to a calendar
//! provider; callers decide where the text goes.

mod generate;

pub use generate::export_ics;
