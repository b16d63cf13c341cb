use std::path::{Path, PathBuf};

use anyhow::Result;
use chapterhouse_core::CalendarConfig;
use owo_colors::OwoColorize;

pub fn resolve_path(flag: Option<&Path>) -> Result<PathBuf> {
    match flag {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(CalendarConfig::config_path()?),
    }
}

pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}\n\n\
            Use --force to overwrite it.",
            path.display()
        );
    }

    CalendarConfig::create_default_config(path)?;
    println!("{} {}", "Created".green(), path.display());
    Ok(())
}

pub fn show_path(path: &Path) -> Result<()> {
    let note = if path.exists() { "" } else { " (not created yet)" };
    println!("{}{}", path.display(), note.dimmed());
    Ok(())
}
