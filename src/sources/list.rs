use crate::error::LauncherError;
use crate::model::{Entry, EntryType};
use crate::sources::Source;
use crate::sources::desktop::strip_field_codes;
use anyhow::Result;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Entries from a flat file, one per line: `Name=...|Exec=...|Terminal=...`.
/// Used instead of desktop discovery when given. No desktop filtering.
pub struct ListSource {
    path: PathBuf,
}

impl ListSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Source for ListSource {
    fn scan(&self) -> Result<Vec<Entry>> {
        let content = fs::read_to_string(&self.path).map_err(|source| LauncherError::EntryList {
            path: self.path.clone(),
            source,
        })?;

        let entries: Vec<Entry> = content
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                let entry = parse_line(line, &self.path);
                if entry.is_none() && !line.trim().is_empty() {
                    debug!("{:?}:{}: no name or command, skipping", self.path, i + 1);
                }
                entry
            })
            .collect();

        info!("ListSource: found {} entries in {:?}", entries.len(), self.path);
        Ok(entries)
    }
}

fn parse_line(line: &str, path: &Path) -> Option<Entry> {
    let mut name = None;
    let mut exec = None;
    let mut terminal = None;

    for field in line.split('|') {
        let Some((key, value)) = field.split_once('=') else {
            continue;
        };
        match key.trim() {
            "Name" => {
                name.get_or_insert_with(|| value.trim().to_string());
            }
            "Exec" => {
                exec.get_or_insert_with(|| strip_field_codes(value));
            }
            "Terminal" => {
                terminal.get_or_insert(value.trim() == "true");
            }
            _ => {}
        }
    }

    Entry::new(
        name?,
        exec?,
        path.to_path_buf(),
        EntryType::List,
        terminal.unwrap_or(false),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_pipe_separated_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apps.txt");
        fs::write(
            &path,
            "Name=Htop|Exec=htop|Terminal=true\n\
             Exec=firefox %u|Name=Firefox\n\
             \n\
             Name=Broken\n\
             Name=First|Name=Second|Exec=a|Exec=b|Terminal=false|Terminal=true\n",
        )
        .unwrap();

        let entries = ListSource::new(path.clone()).scan().unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].name(), "Htop");
        assert!(entries[0].open_in_terminal());
        assert_eq!(entries[0].source_path(), path.as_path());

        assert_eq!(entries[1].name(), "Firefox");
        assert_eq!(entries[1].command(), "firefox");

        assert_eq!(entries[2].name(), "First");
        assert_eq!(entries[2].command(), "a");
        assert!(!entries[2].open_in_terminal());
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ListSource::new(dir.path().join("missing.txt")).scan().is_err());
    }
}
