//! Terminal rendering for calendar types.
//!
//! Extension traits that turn chapterhouse-core values into colored text
//! using owo_colors.

use chapterhouse_core::{DayCell, Event, EventCategory, MonthGrid};
use chrono::{Datelike, TimeZone};
use owo_colors::OwoColorize;

/// Marker drawn after a day number when the day has events.
const EVENT_MARKER: char = '•';

pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventCategory {
    fn render(&self) -> String {
        let tag = format!("[{}]", self.label());
        match self {
            EventCategory::Meeting => tag.blue().to_string(),
            EventCategory::Social => tag.magenta().to_string(),
            EventCategory::Service => tag.green().to_string(),
            EventCategory::Fundraiser => tag.yellow().to_string(),
            EventCategory::Other => tag.dimmed().to_string(),
        }
    }
}

impl Render for DayCell {
    /// Four columns: two-digit day, event marker, spacer.
    fn render(&self) -> String {
        let marker = if self.has_events { EVENT_MARKER } else { ' ' };
        let text = format!("{:>2}{}", self.date.day(), marker);

        let styled = if !self.in_month {
            text.dimmed().to_string()
        } else if self.is_selected {
            text.reversed().to_string()
        } else if self.is_today {
            text.bold().underline().to_string()
        } else if self.has_events {
            text.cyan().to_string()
        } else {
            text
        };

        format!("{styled} ")
    }
}

impl Render for MonthGrid {
    fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.weeks.len() + 2);

        let title = self.month.first_day().format("%B %Y").to_string();
        lines.push(format!("{:^28}", title).bold().to_string());
        lines.push(
            self.week_start
                .headers()
                .iter()
                .map(|h| format!("{h:>2}  "))
                .collect::<String>()
                .dimmed()
                .to_string(),
        );

        for week in &self.weeks {
            lines.push(week.iter().map(Render::render).collect());
        }

        lines.join("\n")
    }
}

/// One line per event: local time, title, category, location.
pub fn render_event_line<Tz: TimeZone>(event: &Event, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let time = event.starts_at.with_timezone(tz).format("%H:%M").to_string();
    let mut line = format!("  {} {} {}", time.dimmed(), event.title, event.category.render());
    if !event.location.is_empty() {
        line.push_str(&format!(" {}", format!("@ {}", event.location).dimmed()));
    }
    line
}

/// Full details of one event, shown when it is opened.
pub fn render_event_details<Tz: TimeZone>(event: &Event, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let when = event
        .starts_at
        .with_timezone(tz)
        .format("%A, %B %-d %Y at %H:%M")
        .to_string();

    let mut lines = vec![
        format!("{} {}", event.title.bold(), event.category.render()),
        format!("  {} {}", "When:".dimmed(), when),
    ];
    if !event.location.is_empty() {
        lines.push(format!("  {} {}", "Where:".dimmed(), event.location));
    }
    if !event.description.is_empty() {
        lines.push(String::new());
        lines.push(format!("  {}", event.description));
    }
    lines.push(format!("  {}", format!("id: {}", event.id).dimmed()));

    lines.join("\n")
}

/// Legend for the category colors.
pub fn render_legend() -> String {
    EventCategory::ALL
        .iter()
        .map(Render::render)
        .collect::<Vec<_>>()
        .join(" ")
}
