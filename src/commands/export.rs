use std::path::Path;

use anyhow::{Context as _, Result};
use chapterhouse_core::ics::export_ics;
use chapterhouse_core::{EventCalendar, YearMonth};
use chrono::TimeZone;
use owo_colors::OwoColorize;

use crate::context::Context;

/// Export the month's events. Nothing leaves the machine: the text goes to a file or stdout.
pub fn run(ctx: &Context, month: Option<&str>, output: Option<&Path>) -> Result<()> {
    let mut calendar = ctx.calendar()?;
    let (count, ics) = export_month(&mut calendar, month, &ctx.config.chapter_name)?;

    match output {
        Some(path) => {
            std::fs::write(path, &ics)
                .with_context(|| format!("Could not write {}", path.display()))?;
            eprintln!(
                "{} {} events from {} to {}",
                "Exported".green(),
                count,
                calendar.displayed_month(),
                path.display()
            );
        }
        None => print!("{ics}"),
    }

    Ok(())
}

/// Show `month` (or keep the current one) and render its events. Returns the event count and
/// the ICS text.
fn export_month<Tz: TimeZone>(
    calendar: &mut EventCalendar<Tz>,
    month: Option<&str>,
    calendar_name: &str,
) -> Result<(usize, String)> {
    if let Some(month) = month {
        calendar.go_to_month(month.parse::<YearMonth>()?);
    }

    let events = calendar.events_in_month();
    let ics = export_ics(&events, calendar_name)?;
    Ok((events.len(), ics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chapterhouse_core::StaticEventSource;
    use chrono::{NaiveDate, Utc};

    fn calendar() -> EventCalendar<Utc> {
        let source = StaticEventSource::seeded(YearMonth::new(2026, 10).unwrap(), &Utc);
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        EventCalendar::from_source(&source, today, Utc).unwrap()
    }

    fn vevents(ics: &str) -> usize {
        ics.lines().filter(|l| *l == "BEGIN:VEVENT").count()
    }

    #[test]
    fn exports_current_month_by_default() {
        let mut cal = calendar();
        let (count, ics) = export_month(&mut cal, None, "Alpha Chapter").unwrap();
        assert_eq!(count, 4);
        assert_eq!(vevents(&ics), 4);
        assert!(ics.contains("SUMMARY:Weekly Chapter Meeting"));
    }

    #[test]
    fn month_flag_picks_exported_month() {
        let mut cal = calendar();
        let (count, ics) = export_month(&mut cal, Some("2026-11"), "Alpha Chapter").unwrap();
        assert_eq!(count, 0);
        assert_eq!(vevents(&ics), 0);
        assert_eq!(cal.displayed_month(), YearMonth::new(2026, 11).unwrap());
    }

    #[test]
    fn bad_month_flag_is_an_error() {
        let mut cal = calendar();
        assert!(export_month(&mut cal, Some("November"), "Alpha Chapter").is_err());
    }
}
