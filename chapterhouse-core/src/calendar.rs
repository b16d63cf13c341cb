//! The event calendar view model.
//!
//! [`EventCalendar`] owns the loaded events and two pieces of view state: the
//! displayed month and the selected day. Everything a view needs (event-day
//! markers, the selected day's list, the month grid) is derived from those on
//! demand.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use chrono::{NaiveDate, TimeZone};

use crate::date_range::DateRange;
use crate::error::{CalendarError, CalendarResult};
use crate::event::Event;
use crate::grid::{MonthGrid, WeekStart};
use crate::month::YearMonth;
use crate::source::EventSource;

/// Called with the event the user activated in the day list.
pub type ActivationHandler = Box<dyn FnMut(&Event)>;

/// Component-local view state. Lives exactly as long as its calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub displayed_month: YearMonth,
    pub selected_date: Option<NaiveDate>,
}

impl ViewState {
    /// Current month displayed, current day selected.
    pub fn starting_at(today: NaiveDate) -> Self {
        ViewState {
            displayed_month: YearMonth::of(today),
            selected_date: Some(today),
        }
    }
}

pub struct EventCalendar<Tz: TimeZone> {
    events: Vec<Event>,
    tz: Tz,
    today: NaiveDate,
    state: ViewState,
    /// Indices into `events` of the entries on the selected day, in source order.
    selected: Vec<usize>,
    on_activate: Option<ActivationHandler>,
}

impl<Tz: TimeZone> EventCalendar<Tz> {
    /// Build a calendar over `events`, with `today` displayed and selected.
    ///
    /// Fails if two events share an id.
    pub fn new(events: Vec<Event>, today: NaiveDate, tz: Tz) -> CalendarResult<Self> {
        let mut seen = HashSet::with_capacity(events.len());
        for event in &events {
            if !seen.insert(&event.id) {
                return Err(CalendarError::DuplicateEventId(event.id.to_string()));
            }
        }

        log::debug!("Calendar loaded with {} events", events.len());

        let mut calendar = EventCalendar {
            events,
            tz,
            today,
            state: ViewState::starting_at(today),
            selected: Vec::new(),
            on_activate: None,
        };
        calendar.refresh_selection();
        Ok(calendar)
    }

    /// Load every event `source` has and build a calendar over them.
    pub fn from_source(source: &dyn EventSource, today: NaiveDate, tz: Tz) -> CalendarResult<Self> {
        let events = source.events_in_range(&DateRange::unbounded())?;
        Self::new(events, today, tz)
    }

    /// Set the callback fired when an entry of the day list is activated.
    pub fn with_activation_handler(mut self, handler: impl FnMut(&Event) + 'static) -> Self {
        self.on_activate = Some(Box::new(handler));
        self
    }

    pub fn set_activation_handler(&mut self, handler: Option<ActivationHandler>) {
        self.on_activate = handler;
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn displayed_month(&self) -> YearMonth {
        self.state.displayed_month
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.state.selected_date
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }

    /// The whole collection, in source order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    // --- Navigation ---

    /// Show the next month. The selection is left alone.
    pub fn advance_month(&mut self) {
        self.go_to_month(self.state.displayed_month.succ());
    }

    /// Show the previous month. The selection is left alone.
    pub fn retreat_month(&mut self) {
        self.go_to_month(self.state.displayed_month.pred());
    }

    pub fn go_to_month(&mut self, month: YearMonth) {
        log::debug!("Displaying {month}");
        self.state.displayed_month = month;
    }

    /// Back to the current month, with today selected.
    pub fn go_to_today(&mut self) {
        self.go_to_month(YearMonth::of(self.today));
        self.select_day(self.today);
    }

    // --- Selection ---

    /// Select `day`, which may lie outside the displayed month.
    pub fn select_day(&mut self, day: NaiveDate) {
        log::debug!("Selected {day}");
        self.state.selected_date = Some(day);
        self.refresh_selection();
    }

    pub fn clear_selection(&mut self) {
        self.state.selected_date = None;
        self.selected.clear();
    }

    fn refresh_selection(&mut self) {
        self.selected = match self.state.selected_date {
            Some(day) => self
                .events
                .iter()
                .enumerate()
                .filter(|(_, e)| e.is_on(day, &self.tz))
                .map(|(i, _)| i)
                .collect(),
            None => Vec::new(),
        };
    }

    /// Events on the selected day, in source order. Empty when nothing is selected.
    pub fn selected_events(&self) -> Vec<&Event> {
        self.selected.iter().map(|&i| &self.events[i]).collect()
    }

    // --- Derivations ---

    /// Events falling on `day` (time of day ignored), in source order.
    pub fn events_on(&self, day: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|e| e.is_on(day, &self.tz)).collect()
    }

    /// Whether at least one event falls on `day`.
    pub fn has_events_on(&self, day: NaiveDate) -> bool {
        self.events.iter().any(|e| e.is_on(day, &self.tz))
    }

    /// Days of the displayed month that carry at least one event.
    pub fn event_days(&self) -> BTreeSet<NaiveDate> {
        let month = self.state.displayed_month;
        self.events
            .iter()
            .map(|e| e.day_in(&self.tz))
            .filter(|day| month.contains(*day))
            .collect()
    }

    /// Events of the displayed month, in source order.
    pub fn events_in_month(&self) -> Vec<&Event> {
        let month = self.state.displayed_month;
        self.events
            .iter()
            .filter(|e| month.contains(e.day_in(&self.tz)))
            .collect()
    }

    /// The day grid for the displayed month.
    pub fn grid(&self, week_start: WeekStart) -> MonthGrid {
        let event_days = self.event_days();
        MonthGrid::build(
            self.state.displayed_month,
            week_start,
            self.today,
            self.state.selected_date,
            |day| event_days.contains(&day),
        )
    }

    // --- Activation ---

    /// Activate the `index`-th entry of the selected day's list (0-based).
    ///
    /// Returns the activated event, or `None` when there is no such entry, in which case
    /// the handler is not called.
    pub fn activate(&mut self, index: usize) -> Option<&Event> {
        let &event_index = self.selected.get(index)?;
        let event = &self.events[event_index];
        if let Some(handler) = self.on_activate.as_mut() {
            handler(event);
        }
        Some(event)
    }

    /// Activate a specific event. A no-op without a handler.
    pub fn activate_event(&mut self, event: &Event) {
        if let Some(handler) = self.on_activate.as_mut() {
            handler(event);
        }
    }
}

impl<Tz: TimeZone> fmt::Debug for EventCalendar<Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventCalendar")
            .field("events", &self.events.len())
            .field("today", &self.today)
            .field("state", &self.state)
            .field("has_handler", &self.on_activate.is_some())
            .finish()
    }
}
