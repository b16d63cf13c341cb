//! Month grid layout for rendering.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::month::YearMonth;

/// First column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Column index (0..7) of `date` in a grid starting on this weekday.
    fn column(&self, date: NaiveDate) -> u32 {
        match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        }
    }

    /// Two-letter weekday headers in column order.
    pub fn headers(&self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            WeekStart::Monday => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => f.write_str("sunday"),
            WeekStart::Monday => f.write_str("monday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            other => Err(CalendarError::Config(format!(
                "Invalid week start '{other}'. Expected 'sunday' or 'monday'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from neighbouring months.
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub has_events: bool,
}

/// Whole weeks covering one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub week_start: WeekStart,
    pub weeks: Vec<[DayCell; 7]>,
}

impl MonthGrid {
    pub fn build(
        month: YearMonth,
        week_start: WeekStart,
        today: NaiveDate,
        selected: Option<NaiveDate>,
        has_events: impl Fn(NaiveDate) -> bool,
    ) -> Self {
        let first = month.first_day();
        let last = month.last_day();
        let lead = week_start.column(first) as i64;
        let span = lead + (last - first).num_days() + 1;
        let week_count = (span + 6) / 7;

        // Supported months keep a spare month at each end of chrono's range, so neither
        // the lead-in nor the trailing days run out of dates.
        let grid_start = first
            .checked_sub_signed(Duration::days(lead))
            .unwrap_or(first);
        let dates: Vec<NaiveDate> = grid_start.iter_days().take(week_count as usize * 7).collect();

        let cell = |date: NaiveDate| DayCell {
            date,
            in_month: month.contains(date),
            is_today: date == today,
            is_selected: selected == Some(date),
            has_events: has_events(date),
        };

        let weeks = dates
            .chunks_exact(7)
            .map(|week| std::array::from_fn(|col| cell(week[col])))
            .collect();

        MonthGrid {
            month,
            week_start,
            weeks,
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells().find(|c| c.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn build(month: YearMonth, week_start: WeekStart) -> MonthGrid {
        MonthGrid::build(month, week_start, date(2026, 10, 16), None, |_| false)
    }

    #[test]
    fn grid_starts_on_week_start() {
        // October 1st 2026 is a Thursday
        let sunday = build(ym(2026, 10), WeekStart::Sunday);
        assert_eq!(sunday.weeks[0][0].date, date(2026, 9, 27));
        assert_eq!(sunday.weeks[0][4].date, date(2026, 10, 1));

        let monday = build(ym(2026, 10), WeekStart::Monday);
        assert_eq!(monday.weeks[0][0].date, date(2026, 9, 28));
        assert_eq!(monday.weeks[0][3].date, date(2026, 10, 1));
    }

    #[test]
    fn grid_covers_every_day_in_whole_weeks() {
        for month in 1..=12 {
            for week_start in [WeekStart::Sunday, WeekStart::Monday] {
                let m = ym(2026, month);
                let grid = build(m, week_start);
                assert!((4..=6).contains(&grid.weeks.len()));

                let in_month: Vec<NaiveDate> =
                    grid.cells().filter(|c| c.in_month).map(|c| c.date).collect();
                assert_eq!(in_month, m.days().collect::<Vec<_>>());

                for week in &grid.weeks {
                    assert_eq!(week[0].date.weekday(), week_start.weekday());
                }
            }
        }
    }

    #[test]
    fn february_starting_on_sunday_fits_four_weeks() {
        // February 2015 starts on a Sunday and has 28 days
        let grid = build(ym(2015, 2), WeekStart::Sunday);
        assert_eq!(grid.weeks.len(), 4);
    }

    #[test]
    fn cells_carry_flags() {
        let selected = date(2026, 10, 20);
        let grid = MonthGrid::build(
            ym(2026, 10),
            WeekStart::Sunday,
            date(2026, 10, 16),
            Some(selected),
            |d| d.day() == 15,
        );

        let today = grid.cell(date(2026, 10, 16)).unwrap();
        assert!(today.is_today && !today.is_selected && !today.has_events);

        assert!(grid.cell(selected).unwrap().is_selected);
        assert!(grid.cell(date(2026, 10, 15)).unwrap().has_events);
        assert!(!grid.cell(date(2026, 9, 27)).unwrap().in_month);
    }

    #[test]
    fn parses_week_start() {
        assert_eq!("Monday".parse::<WeekStart>().unwrap(), WeekStart::Monday);
        assert_eq!("sun".parse::<WeekStart>().unwrap(), WeekStart::Sunday);
        assert!("friday".parse::<WeekStart>().is_err());
        assert_eq!(WeekStart::Monday.headers()[6], "Su");
    }
}
