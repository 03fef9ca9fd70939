use crate::config::Config;
use crate::model::{Entry, EntryType};
use anyhow::Result;
use log::{info, warn};
use regex::Regex;
use std::path::PathBuf;

pub mod compat;
pub mod desktop;
pub mod list;

use compat::DesktopFilter;
use desktop::DesktopSource;
use list::ListSource;

pub trait Source {
    fn scan(&self) -> Result<Vec<Entry>>;
}

/// Builds the catalog for one run: configured static items first, then either
/// the entry list file (when given) or desktop discovery, minus excluded
/// entries.
pub fn load_catalog(
    config: &Config,
    list_file: Option<PathBuf>,
    jobs: Option<usize>,
) -> Result<Vec<Entry>> {
    let mut entries = static_entries(config);

    let source: Box<dyn Source> = match list_file {
        Some(path) => Box::new(ListSource::new(path)),
        None => Box::new(DesktopSource::new(
            config.discovery.scan_directories(),
            jobs.unwrap_or(config.discovery.max_concurrency),
            DesktopFilter::from(&config.discovery),
        )),
    };
    entries.append(&mut source.scan()?);

    let excluded = exclusion_patterns(&config.discovery.exclude);
    if !excluded.is_empty() {
        let before = entries.len();
        entries.retain(|e| !is_excluded(e, &excluded));
        info!("Excluded {} entries", before - entries.len());
    }

    Ok(entries)
}

fn static_entries(config: &Config) -> Vec<Entry> {
    config
        .items
        .iter()
        .filter_map(|item| {
            let entry = Entry::synthetic(
                item.name.clone(),
                item.command.clone(),
                EntryType::Custom,
                item.terminal,
            );
            if entry.is_none() {
                warn!("Ignoring configured item {:?} with an empty name or command", item.name);
            }
            entry
        })
        .collect()
}

fn exclusion_patterns(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(err) => {
                warn!("Ignoring invalid exclude pattern {:?}: {}", p, err);
                None
            }
        })
        .collect()
}

fn is_excluded(entry: &Entry, patterns: &[Regex]) -> bool {
    let path = entry.source_path().to_string_lossy();
    patterns
        .iter()
        .any(|re| re.is_match(entry.name()) || re.is_match(&path))
}
