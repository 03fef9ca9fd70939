use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Desktop,
    List,
    Custom,
    Search,
}

/// A launchable candidate. Constructed once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    name: String,
    command: String,
    source_path: PathBuf,
    open_in_terminal: bool,
    entry_type: EntryType,
}

impl Entry {
    /// Returns `None` unless both `name` and `command` are non-empty.
    pub fn new(
        name: String,
        command: String,
        source_path: PathBuf,
        entry_type: EntryType,
        open_in_terminal: bool,
    ) -> Option<Self> {
        if name.is_empty() || command.is_empty() {
            return None;
        }
        Some(Self {
            name,
            command,
            source_path,
            open_in_terminal,
            entry_type,
        })
    }

    /// Entry created outside discovery (static items, web search).
    pub fn synthetic(
        name: String,
        command: String,
        entry_type: EntryType,
        open_in_terminal: bool,
    ) -> Option<Self> {
        Self::new(name, command, PathBuf::new(), entry_type, open_in_terminal)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn open_in_terminal(&self) -> bool {
        self.open_in_terminal
    }

    #[allow(dead_code)]
    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }
}
