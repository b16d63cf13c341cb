//! Year+month values and calendar-month arithmetic.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::{CalendarError, CalendarResult};

/// A calendar month of a specific year (e.g. 2026-10).
///
/// Ordering follows the calendar: every month of 2025 sorts before January 2026.
///
/// Always lies within [`YearMonth::earliest`] ..= [`YearMonth::latest`], so its days exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Build a month, rejecting anything outside 1..=12 or outside [`earliest`](Self::earliest)
    /// ..= [`latest`](Self::latest).
    pub fn new(year: i32, month: u32) -> CalendarResult<Self> {
        let candidate = YearMonth { year, month };
        if !(1..=12).contains(&month)
            || candidate < Self::earliest()
            || candidate > Self::latest()
        {
            return Err(CalendarError::InvalidMonth(format!("{year:04}-{month:02}")));
        }
        Ok(candidate)
    }

    /// The month a given day belongs to, clamped to the supported range.
    pub fn of(date: NaiveDate) -> Self {
        Self::of_unclamped(date).clamp(Self::earliest(), Self::latest())
    }

    /// First supported month. One month is kept free at each end of chrono's date range so a
    /// month's grid, which borrows days from its neighbours, always fits.
    pub fn earliest() -> Self {
        Self::from_index(Self::of_unclamped(NaiveDate::MIN).index() + 1)
    }

    /// Last supported month.
    pub fn latest() -> Self {
        Self::from_index(Self::of_unclamped(NaiveDate::MAX).index() - 1)
    }

    fn of_unclamped(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Months since year 0.
    fn index(self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    fn from_index(index: i64) -> Self {
        YearMonth {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1 = January.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following month, rolling December over into January of the next year.
    pub fn succ(self) -> Self {
        self.add_months(1)
    }

    /// The preceding month, rolling January back into December of the previous year.
    pub fn pred(self) -> Self {
        self.add_months(-1)
    }

    /// Shift by any number of months in either direction, saturating at
    /// [`earliest`](Self::earliest) and [`latest`](Self::latest).
    pub fn add_months(self, delta: i32) -> Self {
        let index = (self.index() + delta as i64)
            .clamp(Self::earliest().index(), Self::latest().index());
        Self::from_index(index)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("supported months lie inside chrono's date range")
    }

    pub fn last_day(&self) -> NaiveDate {
        let next = Self::from_index(self.index() + 1);
        next.first_day()
            .pred_opt()
            .expect("supported months lie inside chrono's date range")
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Whether `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Every day of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let first = self.first_day();
        let count = self.days_in_month() as usize;
        first.iter_days().take(count)
    }

    /// The day `day` of this month, if it exists (e.g. no February 30th).
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidMonth(s.to_string());

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        YearMonth::new(year, month).map_err(|_| invalid())
    }
}

/// Parse `YYYY-MM-DD` into a day.
pub fn parse_date(s: &str) -> CalendarResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn succ_rolls_over_december() {
        assert_eq!(ym(2025, 12).succ(), ym(2026, 1));
        assert_eq!(ym(2026, 3).succ(), ym(2026, 4));
    }

    #[test]
    fn pred_rolls_back_january() {
        assert_eq!(ym(2026, 1).pred(), ym(2025, 12));
        assert_eq!(ym(2026, 7).pred(), ym(2026, 6));
    }

    #[test]
    fn advance_then_retreat_is_identity() {
        for year in [1999, 2000, 2024, 2026] {
            for month in 1..=12 {
                let m = ym(year, month);
                assert_eq!(m.succ().pred(), m);
                assert_eq!(m.pred().succ(), m);
            }
        }
    }

    #[test]
    fn twelve_advances_is_one_year() {
        for month in 1..=12 {
            let start = ym(2026, month);
            let end = (0..12).fold(start, |m, _| m.succ());
            assert_eq!(end, ym(2027, month));
        }
    }

    #[test]
    fn add_months_handles_large_negative_deltas() {
        assert_eq!(ym(2026, 2).add_months(-14), ym(2024, 12));
        assert_eq!(ym(2026, 2).add_months(23), ym(2028, 1));
    }

    #[test]
    fn navigation_saturates_at_supported_range() {
        let latest = YearMonth::latest();
        assert_eq!(latest.succ(), latest);
        assert_eq!(latest.add_months(i32::MAX), latest);
        assert!(latest.contains(latest.first_day()));
        assert!(latest.contains(latest.last_day()));
        assert_eq!(latest.days().count() as u32, latest.days_in_month());

        let earliest = YearMonth::earliest();
        assert_eq!(earliest.pred(), earliest);
        assert_eq!(earliest.add_months(i32::MIN), earliest);
        assert!(earliest.contains(earliest.first_day()));

        assert_eq!(YearMonth::of(NaiveDate::MAX), latest);
        assert_eq!(YearMonth::of(NaiveDate::MIN), earliest);
        assert!(YearMonth::new(NaiveDate::MAX.year(), NaiveDate::MAX.month()).is_err());
    }

    #[test]
    fn grid_builds_at_both_ends_of_range() {
        use crate::grid::{MonthGrid, WeekStart};

        for month in [YearMonth::latest().succ(), YearMonth::earliest().pred()] {
            for week_start in [WeekStart::Sunday, WeekStart::Monday] {
                let grid = MonthGrid::build(month, week_start, month.first_day(), None, |_| false);
                let in_month = grid.cells().filter(|c| c.in_month).count() as u32;
                assert_eq!(in_month, month.days_in_month());
            }
        }
    }

    #[test]
    fn days_in_month_accounts_for_leap_years() {
        assert_eq!(ym(2024, 2).days_in_month(), 29);
        assert_eq!(ym(2026, 2).days_in_month(), 28);
        assert_eq!(ym(2026, 12).days_in_month(), 31);
        assert_eq!(ym(2026, 12).days().count(), 31);
        assert_eq!(ym(2026, 12).last_day(), NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn contains_checks_year_and_month() {
        let oct = ym(2026, 10);
        assert!(oct.contains(NaiveDate::from_ymd_opt(2026, 10, 31).unwrap()));
        assert!(!oct.contains(NaiveDate::from_ymd_opt(2025, 10, 31).unwrap()));
        assert!(!oct.contains(NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()));
    }

    #[test]
    fn parses_and_displays_year_month() {
        let m: YearMonth = "2026-03".parse().unwrap();
        assert_eq!(m, ym(2026, 3));
        assert_eq!(m.to_string(), "2026-03");
        assert_eq!("2026-3".parse::<YearMonth>().unwrap(), ym(2026, 3));
    }

    #[test]
    fn rejects_malformed_months() {
        assert!("2026-13".parse::<YearMonth>().is_err());
        assert!("2026-00".parse::<YearMonth>().is_err());
        assert!("26-01".parse::<YearMonth>().is_err());
        assert!("2026/01".parse::<YearMonth>().is_err());
        assert!(YearMonth::new(2026, 0).is_err());
    }

    #[test]
    fn parse_date_expects_iso_days() {
        assert_eq!(
            parse_date("2026-10-15").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
        );
        assert!(matches!(parse_date("10/15/2026"), Err(CalendarError::InvalidDate(_))));
    }
}
