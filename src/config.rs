use crate::error::LauncherError;
use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub items: Vec<StaticEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_terminal")]
    pub terminal: String,
    #[serde(default = "default_terminal_flag")]
    pub terminal_flag: String,
    #[serde(default = "default_browser")]
    pub browser: String,
    #[serde(default = "default_search_url")]
    pub search_url: String,
}

fn default_terminal() -> String { "alacritty".to_string() }
fn default_terminal_flag() -> String { "-e".to_string() }
fn default_browser() -> String { "firefox".to_string() }
fn default_search_url() -> String { "https://www.google.com/search?q={query}".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            terminal: default_terminal(),
            terminal_flag: default_terminal_flag(),
            browser: default_browser(),
            search_url: default_search_url(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct DiscoveryConfig {
    /// Scan directories in priority order. Empty means the XDG defaults.
    #[serde(default)]
    pub directories: Vec<PathBuf>,
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    #[serde(default = "default_desktops")]
    pub desktops: Vec<String>,
    #[serde(default = "default_generic_desktop")]
    pub generic_desktop: String,
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_max_concurrency() -> usize { 20 }
fn default_desktops() -> Vec<String> { vec!["Hyprland".to_string(), "wlroots".to_string()] }
fn default_generic_desktop() -> String { "X-Generic".to_string() }

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            max_concurrency: default_max_concurrency(),
            desktops: default_desktops(),
            generic_desktop: default_generic_desktop(),
            exclude: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    pub fn scan_directories(&self) -> Vec<PathBuf> {
        let dirs = if self.directories.is_empty() {
            default_application_dirs()
        } else {
            self.directories.clone()
        };
        dedup_paths(dirs)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct StaticEntry {
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub terminal: bool,
}

/// What the executor needs to start a process.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub terminal: String,
    pub terminal_flag: String,
}

impl From<&GeneralConfig> for LaunchConfig {
    fn from(general: &GeneralConfig) -> Self {
        Self {
            terminal: general.terminal.clone(),
            terminal_flag: general.terminal_flag.clone(),
        }
    }
}

fn default_application_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(base_dirs) = BaseDirs::new() {
        dirs.push(base_dirs.data_dir().join("applications"));
    }

    match env::var("XDG_DATA_DIRS") {
        Ok(data_dirs) if !data_dirs.trim().is_empty() => {
            dirs.extend(
                data_dirs
                    .split(':')
                    .filter(|d| !d.is_empty())
                    .map(|d| Path::new(d).join("applications")),
            );
        }
        _ => {
            dirs.push(PathBuf::from("/usr/local/share/applications"));
            dirs.push(PathBuf::from("/usr/share/applications"));
        }
    }
    dirs
}

fn dedup_paths(dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::with_capacity(dirs.len());
    for dir in dirs {
        if !out.contains(&dir) {
            out.push(dir);
        }
    }
    out
}

pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("org", "drun", "drun")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

pub fn load_config(path: Option<&Path>) -> Result<Config, LauncherError> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    if !config_path.exists() {
        log::debug!("No config at {:?}, using defaults", config_path);
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path).map_err(|source| LauncherError::ConfigRead {
        path: config_path.clone(),
        source,
    })?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}
