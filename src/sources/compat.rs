use crate::config::DiscoveryConfig;

/// Decides whether an entry's `OnlyShowIn`/`NotShowIn` lists allow it on the
/// desktops this launcher runs under.
#[derive(Debug, Clone)]
pub struct DesktopFilter {
    desktops: Vec<String>,
    generic: String,
}

impl Default for DesktopFilter {
    fn default() -> Self {
        Self::from(&DiscoveryConfig::default())
    }
}

impl From<&DiscoveryConfig> for DesktopFilter {
    fn from(config: &DiscoveryConfig) -> Self {
        Self::new(config.desktops.clone(), config.generic_desktop.clone())
    }
}

impl DesktopFilter {
    pub fn new(desktops: Vec<String>, generic: impl Into<String>) -> Self {
        Self {
            desktops,
            generic: generic.into(),
        }
    }

    pub fn is_compatible(&self, only_show_in: &str, not_show_in: &str) -> bool {
        if split_list(not_show_in).any(|de| self.is_target(de)) {
            return false;
        }

        if only_show_in.trim().is_empty() {
            return true;
        }

        split_list(only_show_in).any(|de| self.is_target(de) || de == self.generic)
    }

    fn is_target(&self, de: &str) -> bool {
        self.desktops.iter().any(|d| d == de)
    }
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(';').map(str::trim).filter(|s| !s.is_empty())
}
