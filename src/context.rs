//! Everything a command needs: config, time zone, today, and the event source.

use std::path::Path;

use anyhow::{Context as _, Result};
use chapterhouse_core::{
    CalendarConfig, EventCalendar, EventSource, FileEventSource, StaticEventSource, YearMonth,
};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

pub struct Context {
    pub config: CalendarConfig,
    pub tz: Tz,
    pub today: NaiveDate,
    source: Box<dyn EventSource>,
}

impl Context {
    pub fn load(config_path: Option<&Path>, events: Option<&Path>, tz: Option<&str>) -> Result<Self> {
        let config = match config_path {
            Some(path) => CalendarConfig::load_from(path)
                .with_context(|| format!("Could not load config from {}", path.display()))?,
            None => CalendarConfig::load()?,
        };

        let tz = resolve_time_zone(tz, &config)?;
        let today = Utc::now().with_timezone(&tz).date_naive();
        log::debug!("Using time zone {tz}, today is {today}");

        let events_path = events.map(Path::to_path_buf).or_else(|| config.events_path());
        let source: Box<dyn EventSource> = match events_path {
            Some(path) => Box::new(
                FileEventSource::open(&path)
                    .with_context(|| format!("Could not load events from {}", path.display()))?,
            ),
            None => Box::new(StaticEventSource::seeded(YearMonth::of(today), &tz)),
        };

        Ok(Context {
            config,
            tz,
            today,
            source,
        })
    }

    /// A fresh calendar over the loaded events, showing the current month.
    pub fn calendar(&self) -> Result<EventCalendar<Tz>> {
        Ok(EventCalendar::from_source(
            self.source.as_ref(),
            self.today,
            self.tz,
        )?)
    }
}

/// `--tz` wins over the config file, which wins over the system zone. UTC if all else fails.
fn resolve_time_zone(flag: Option<&str>, config: &CalendarConfig) -> Result<Tz> {
    if let Some(name) = flag {
        return name
            .parse::<Tz>()
            .map_err(|_| anyhow::anyhow!("Unknown time zone '{name}'"));
    }

    if let Some(tz) = config.time_zone()? {
        return Ok(tz);
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => Ok(name.parse::<Tz>().unwrap_or_else(|_| {
            log::warn!("System time zone '{name}' not recognized, using UTC");
            Tz::UTC
        })),
        Err(e) => {
            log::warn!("Could not determine system time zone ({e}), using UTC");
            Ok(Tz::UTC)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_config_zone() {
        let config = CalendarConfig {
            timezone: Some("Europe/Berlin".to_string()),
            ..CalendarConfig::default()
        };
        let tz = resolve_time_zone(Some("America/Denver"), &config).unwrap();
        assert_eq!(tz, chrono_tz::America::Denver);
    }

    #[test]
    fn config_zone_used_without_flag() {
        let config = CalendarConfig {
            timezone: Some("Europe/Berlin".to_string()),
            ..CalendarConfig::default()
        };
        assert_eq!(resolve_time_zone(None, &config).unwrap(), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn unknown_flag_zone_is_an_error() {
        let err = resolve_time_zone(Some("Nowhere/Town"), &CalendarConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Nowhere/Town"));
    }
}
