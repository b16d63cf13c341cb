use anyhow::Result;
use chapterhouse_core::{Event, EventCalendar, YearMonth};
use chapterhouse_core::month::parse_date;
use chrono::TimeZone;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::{render_event_details, render_event_line};

pub fn run(ctx: &Context, date: &str, open: Option<usize>, json: bool) -> Result<()> {
    let day = parse_date(date)?;

    let mut calendar = ctx.calendar()?;
    calendar.go_to_month(YearMonth::of(day));
    calendar.select_day(day);

    let events = calendar.selected_events();

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else {
        println!("{}", day.format("%A, %B %-d %Y").to_string().bold());
        if events.is_empty() {
            println!("  {}", "No events".dimmed());
        }
        for (i, event) in events.iter().enumerate() {
            println!("{} {}", format!("{:>2}.", i + 1).dimmed(), render_event_line(event, &ctx.tz));
        }
    }

    if let Some(n) = open {
        let tz = ctx.tz;
        calendar.set_activation_handler(Some(Box::new(move |event: &Event| {
            println!();
            println!("{}", render_event_details(event, &tz));
        })));

        open_entry(&mut calendar, n)?;
    }

    Ok(())
}

/// Activate the `n`-th entry (1-based) of the selected day's list.
fn open_entry<Tz: TimeZone>(calendar: &mut EventCalendar<Tz>, n: usize) -> Result<()> {
    let activated = match n.checked_sub(1) {
        Some(index) => calendar.activate(index).is_some(),
        None => false,
    };
    if !activated {
        let count = calendar.selected_events().len();
        match calendar.selected_date() {
            Some(day) => anyhow::bail!("No event #{n} on {day} ({count} listed)"),
            None => anyhow::bail!("No event #{n}: no day selected"),
        }
    }
    Ok(())
}
