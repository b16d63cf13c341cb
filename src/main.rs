mod commands;
mod context;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::context::Context;

#[derive(Parser)]
#[command(name = "chapterhouse")]
#[command(about = "Browse your chapter's event calendar")]
struct Cli {
    /// Config file (default: ~/.config/chapterhouse/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// TOML events file to use instead of the configured one
    #[arg(long, global = true)]
    events: Option<PathBuf>,

    /// Time zone used to decide which day an event falls on (e.g. "America/Chicago")
    #[arg(long, global = true)]
    tz: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid with event days marked
    Month {
        /// Month to show (YYYY-MM, default: current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Day to select (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        select: Option<String>,

        /// Move forward this many months
        #[arg(long, default_value_t = 0)]
        next: u32,

        /// Move back this many months
        #[arg(long, default_value_t = 0)]
        prev: u32,
    },
    /// List the events on one day
    Day {
        /// Day to list (YYYY-MM-DD)
        date: String,

        /// Open the N-th event of the list (1-based) and show its details
        #[arg(short, long)]
        open: Option<usize>,

        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export a month's events as an .ics calendar
    Export {
        /// Month to export (YYYY-MM, default: current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a commented default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file location
    Path,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Cli {
        config,
        events,
        tz,
        command,
    } = Cli::parse();

    let load = || Context::load(config.as_deref(), events.as_deref(), tz.as_deref());

    match command {
        Commands::Month {
            month,
            select,
            next,
            prev,
        } => commands::month::run(&load()?, month.as_deref(), select.as_deref(), next, prev),
        Commands::Day { date, open, json } => commands::day::run(&load()?, &date, open, json),
        Commands::Export { month, output } => {
            commands::export::run(&load()?, month.as_deref(), output.as_deref())
        }
        Commands::Config { action } => {
            let path = commands::config::resolve_path(config.as_deref())?;
            match action {
                ConfigAction::Init { force } => commands::config::init(&path, force),
                ConfigAction::Path => commands::config::show_path(&path),
            }
        }
    }
}
