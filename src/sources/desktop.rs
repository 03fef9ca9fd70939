use crate::model::{Entry, EntryType};
use crate::sources::Source;
use crate::sources::compat::DesktopFilter;
use anyhow::Result;
use crossbeam_channel::{bounded, unbounded};
use log::{debug, info};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use walkdir::WalkDir;

const DESKTOP_SECTION: &str = "[Desktop Entry]";
const DESKTOP_SUFFIX: &str = ".desktop";

/// Scans `.desktop` files across `dirs`. Earlier directories shadow later
/// ones holding a file with the same name.
pub struct DesktopSource {
    dirs: Vec<PathBuf>,
    max_concurrency: usize,
    filter: DesktopFilter,
}

impl DesktopSource {
    pub fn new(dirs: Vec<PathBuf>, max_concurrency: usize, filter: DesktopFilter) -> Self {
        Self {
            dirs,
            max_concurrency: max_concurrency.max(1),
            filter,
        }
    }
}

impl Source for DesktopSource {
    fn scan(&self) -> Result<Vec<Entry>> {
        let (job_tx, job_rx) = bounded::<PathBuf>(self.max_concurrency);
        let (entry_tx, entry_rx) = unbounded::<Entry>();

        let entries = thread::scope(|scope| {
            for _ in 0..self.max_concurrency {
                let job_rx = job_rx.clone();
                let entry_tx = entry_tx.clone();
                let filter = &self.filter;
                scope.spawn(move || {
                    for path in job_rx {
                        if let Some(entry) = parse_desktop_file(&path, filter) {
                            // The collector only goes away after every worker is done.
                            let _ = entry_tx.send(entry);
                        }
                    }
                });
            }
            drop(job_rx);
            drop(entry_tx);

            let mut seen: HashSet<OsString> = HashSet::new();
            for dir in &self.dirs {
                for path in desktop_files(dir) {
                    let Some(file_name) = path.file_name() else {
                        continue;
                    };
                    if !seen.insert(file_name.to_os_string()) {
                        debug!("Skipping {:?}, shadowed by an earlier directory", path);
                        continue;
                    }
                    if job_tx.send(path).is_err() {
                        break;
                    }
                }
            }
            drop(job_tx);

            entry_rx.iter().collect::<Vec<_>>()
        });

        info!("DesktopSource: found {} entries", entries.len());
        Ok(entries)
    }
}

/// Regular `.desktop` files directly inside `dir`. Missing or unreadable
/// directories yield nothing.
fn desktop_files(dir: &Path) -> impl Iterator<Item = PathBuf> {
    debug!("Scanning desktop files in {:?}", dir);
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| !entry.file_type().is_dir())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(DESKTOP_SUFFIX))
        })
        .map(walkdir::DirEntry::into_path)
}

pub fn parse_desktop_file(path: &Path, filter: &DesktopFilter) -> Option<Entry> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            debug!("Cannot read {:?}: {}", path, err);
            return None;
        }
    };
    let fields = parse_desktop_entry(&content)?;
    if !filter.is_compatible(&fields.only_show_in, &fields.not_show_in) {
        debug!("{:?} is not shown on this desktop", path);
        return None;
    }

    Entry::new(
        fields.name,
        strip_field_codes(&fields.exec),
        path.to_path_buf(),
        EntryType::Desktop,
        fields.terminal,
    )
}

#[derive(Debug, Default, PartialEq)]
struct DesktopFields {
    name: String,
    exec: String,
    terminal: bool,
    only_show_in: String,
    not_show_in: String,
}

/// Reads the `[Desktop Entry]` group. Returns `None` for anything that is not
/// a visible application with a name and a command.
fn parse_desktop_entry(content: &str) -> Option<DesktopFields> {
    let mut in_desktop_entry = false;
    let mut is_app = false;
    let mut name = None;
    let mut exec = None;
    let mut terminal = None;
    let mut only_show_in = None;
    let mut not_show_in = None;

    for line in content.lines() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            in_desktop_entry = line == DESKTOP_SECTION;
            continue;
        }

        if !in_desktop_entry {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            "Type" => {
                is_app = value == "Application";
                if !is_app {
                    return None;
                }
            }
            "NoDisplay" | "Hidden" if value == "true" => return None,
            "Name" => {
                name.get_or_insert_with(|| value.to_string());
            }
            "Exec" => {
                exec.get_or_insert_with(|| value.to_string());
            }
            "Terminal" => {
                terminal.get_or_insert(value == "true");
            }
            "OnlyShowIn" => {
                only_show_in.get_or_insert_with(|| value.to_string());
            }
            "NotShowIn" => {
                not_show_in.get_or_insert_with(|| value.to_string());
            }
            _ => {}
        }
    }

    let name = name.filter(|n| !n.is_empty())?;
    let exec = exec.filter(|e| !e.is_empty())?;
    if !is_app {
        return None;
    }

    Some(DesktopFields {
        name,
        exec,
        terminal: terminal.unwrap_or(false),
        only_show_in: only_show_in.unwrap_or_default(),
        not_show_in: not_show_in.unwrap_or_default(),
    })
}

/// Drops `%f`, `%U` and friends. Whole tokens go, so the spacing collapses.
pub fn strip_field_codes(exec: &str) -> String {
    exec.split_whitespace()
        .filter(|token| !token.starts_with('%'))
        .collect::<Vec<_>>()
        .join(" ")
}
