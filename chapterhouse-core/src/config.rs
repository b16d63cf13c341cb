//! User configuration for chapterhouse.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::grid::WeekStart;

static DEFAULT_CHAPTER_NAME: &str = "Chapter Calendar";

fn default_chapter_name() -> String {
    DEFAULT_CHAPTER_NAME.to_string()
}

fn is_default_chapter_name(name: &String) -> bool {
    name == DEFAULT_CHAPTER_NAME
}

/// Configuration at ~/.config/chapterhouse/config.toml
///
/// Every field is optional; a missing file means all defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Shown as the calendar title and used as the exported calendar name.
    #[serde(default = "default_chapter_name", skip_serializing_if = "is_default_chapter_name")]
    pub chapter_name: String,

    #[serde(default)]
    pub week_start: WeekStart,

    /// TOML events file to load instead of the built-in schedule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,

    /// IANA zone name (e.g. "America/Chicago"). Defaults to the system zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            chapter_name: default_chapter_name(),
            week_start: WeekStart::default(),
            events_file: None,
            timezone: None,
        }
    }
}

impl CalendarConfig {
    pub fn config_path() -> CalendarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalendarError::Config("Could not determine config directory".into()))?
            .join("chapterhouse");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when the file doesn't exist.
    pub fn load() -> CalendarResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CalendarResult<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| CalendarError::Config(format!("Could not read config file: {e}")))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> CalendarResult<Self> {
        toml::from_str(content).map_err(|e| CalendarError::Config(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> CalendarResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CalendarError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalendarResult<()> {
        let contents = format!(
            "\
# chapterhouse configuration

# Calendar title, also used as the exported calendar's name:
# chapter_name = \"{}\"

# First column of the month grid (\"sunday\" or \"monday\"):
# week_start = \"sunday\"

# TOML file with [[events]] to show instead of the built-in schedule:
# events_file = \"~/chapter/events.toml\"

# Time zone for deciding which day an event falls on (defaults to the system zone):
# timezone = \"America/New_York\"
",
            DEFAULT_CHAPTER_NAME
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// `events_file` with a leading `~` expanded.
    pub fn events_path(&self) -> Option<PathBuf> {
        self.events_file
            .as_ref()
            .map(|p| PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned()))
    }

    /// Parsed `timezone`, if set.
    pub fn time_zone(&self) -> CalendarResult<Option<chrono_tz::Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<chrono_tz::Tz>()
                    .map_err(|_| CalendarError::Config(format!("Unknown time zone '{name}'")))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalendarConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, CalendarConfig::default());
        assert_eq!(config.week_start, WeekStart::Sunday);
    }

    #[test]
    fn parses_all_fields() {
        let config = CalendarConfig::parse(
            r#"
chapter_name = "Alpha Beta"
week_start = "monday"
events_file = "/tmp/events.toml"
timezone = "America/Chicago"
"#,
        )
        .unwrap();

        assert_eq!(config.chapter_name, "Alpha Beta");
        assert_eq!(config.week_start, WeekStart::Monday);
        assert_eq!(config.events_file, Some(PathBuf::from("/tmp/events.toml")));
        assert_eq!(config.time_zone().unwrap(), Some(chrono_tz::America::Chicago));
    }

    #[test]
    fn events_path_expands_home() {
        let config = CalendarConfig::parse("events_file = \"~/chapter/events.toml\"").unwrap();
        let path = config.events_path().unwrap();
        if dirs::home_dir().is_some() {
            assert!(!path.starts_with("~"));
        }
        assert!(path.ends_with("chapter/events.toml"));
    }

    #[test]
    fn rejects_unknown_time_zone() {
        let config = CalendarConfig::parse("timezone = \"Mars/Olympus\"").unwrap();
        assert!(matches!(config.time_zone(), Err(CalendarError::Config(_))));
    }

    #[test]
    fn rejects_bad_week_start() {
        assert!(CalendarConfig::parse("week_start = \"friday\"").is_err());
    }

    #[test]
    fn default_config_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        CalendarConfig::create_default_config(&path).unwrap();
        assert_eq!(CalendarConfig::load_from(&path).unwrap(), CalendarConfig::default());
    }

    #[test]
    fn save_skips_default_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = CalendarConfig {
            week_start: WeekStart::Monday,
            ..CalendarConfig::default()
        };
        config.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("chapter_name"));
        assert_eq!(CalendarConfig::load_from(&path).unwrap(), config);
    }
}
