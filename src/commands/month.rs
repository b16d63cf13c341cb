use anyhow::Result;
use chapterhouse_core::month::parse_date;
use chapterhouse_core::{EventCalendar, YearMonth};
use chrono::TimeZone;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::{Render, render_event_line, render_legend};

pub fn run(
    ctx: &Context,
    month: Option<&str>,
    select: Option<&str>,
    next: u32,
    prev: u32,
) -> Result<()> {
    let mut calendar = ctx.calendar()?;
    navigate(&mut calendar, month, select, next, prev)?;

    println!("{}", ctx.config.chapter_name.bold());
    println!();
    println!("{}", calendar.grid(ctx.config.week_start).render());
    println!();
    println!("{}", render_legend());

    if let Some(day) = calendar.selected_date() {
        println!();
        println!("{}", day.format("%a %b %-d, %Y").to_string().bold());

        let events = calendar.selected_events();
        if events.is_empty() {
            println!("  {}", "No events".dimmed());
        }
        for event in events {
            println!("{}", render_event_line(event, &ctx.tz));
        }
    }

    Ok(())
}

/// Apply the month/selection flags in order: jump, shift by `next - prev` months, select.
fn navigate<Tz: TimeZone>(
    calendar: &mut EventCalendar<Tz>,
    month: Option<&str>,
    select: Option<&str>,
    next: u32,
    prev: u32,
) -> Result<()> {
    if let Some(month) = month {
        calendar.go_to_month(month.parse::<YearMonth>()?);
    }
    let steps = i64::from(next) - i64::from(prev);
    let steps = i32::try_from(steps).unwrap_or(if steps < 0 { i32::MIN } else { i32::MAX });
    calendar.go_to_month(calendar.displayed_month().add_months(steps));
    if let Some(day) = select {
        calendar.select_day(parse_date(day)?);
    }
    Ok(())
}
