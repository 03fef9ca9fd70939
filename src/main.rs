mod config;
mod error;
mod executor;
mod matcher;
mod model;
mod sources;
mod state;

use crate::config::{LaunchConfig, load_config};
use crate::state::AppState;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Read entries from this file (`Name=..|Exec=..|Terminal=..` per line)
    /// instead of scanning desktop files
    file: Option<PathBuf>,

    /// Search text; `?text` makes a web search
    #[arg(short, long, default_value = "")]
    query: String,

    /// Number of results to print
    #[arg(short = 'n', long, default_value_t = 10)]
    limit: usize,

    /// Parallel desktop file parsers (overrides the config)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Print results as JSON lines
    #[arg(long)]
    json: bool,

    /// Move the selection this many rows down (negative wraps from the end)
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    select: i32,

    /// Launch the selected entry
    #[arg(long)]
    launch: bool,

    /// Config file to use
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let entries = sources::load_catalog(&config, args.file, args.jobs)?;

    let mut app_state = AppState::new(config.general.clone(), entries);
    app_state.update_query(&args.query);
    app_state.move_selection(args.select);

    if args.launch {
        if let Some(entry) = app_state.get_selected() {
            executor::launch(entry, &LaunchConfig::from(&config.general))?;
        } else {
            log::warn!("Nothing matches '{}'", args.query);
        }
        return Ok(());
    }

    let mut out = io::stdout().lock();
    if args.json {
        for entry in app_state.results().take(args.limit) {
            serde_json::to_writer(&mut out, entry)?;
            writeln!(out)?;
        }
    } else {
        print_results(&mut out, &app_state, args.limit)?;
    }
    Ok(())
}

fn print_results(out: &mut impl Write, app_state: &AppState, limit: usize) -> io::Result<()> {
    if app_state.is_empty() {
        return writeln!(out, "0 results");
    }

    for (i, entry) in app_state.results().take(limit).enumerate() {
        let indicator = if i == app_state.selected_index { "> " } else { "  " };
        writeln!(out, "{}{}", indicator, entry.name())?;
    }

    let remaining = app_state.len().saturating_sub(limit);
    if remaining > 0 {
        writeln!(out, "\n ... and other {} options", remaining)?;
    }
    Ok(())
}
