use crate::config::GeneralConfig;
use crate::matcher::FuzzyMatcher;
use crate::model::{Entry, EntryType};

const WEB_SEARCH_PREFIX: char = '?';

pub struct AppState {
    pub config: GeneralConfig,
    pub entries: Vec<Entry>,
    pub filtered_indices: Vec<usize>,
    /// Set instead of `filtered_indices` while the query is a web search.
    pub web_search: Option<Entry>,
    pub selected_index: usize,
    pub query: String,
    pub matcher: FuzzyMatcher,
}

impl AppState {
    pub fn new(config: GeneralConfig, entries: Vec<Entry>) -> Self {
        let mut state = Self {
            config,
            entries,
            filtered_indices: Vec::new(),
            web_search: None,
            selected_index: 0,
            query: String::new(),
            matcher: FuzzyMatcher::new(),
        };
        state.update_filter();
        state
    }

    pub fn update_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.update_filter();
    }

    fn update_filter(&mut self) {
        if let Some(text) = self.query.strip_prefix(WEB_SEARCH_PREFIX) {
            self.web_search = web_search_entry(text.trim(), &self.config);
            self.filtered_indices.clear();
        } else {
            self.web_search = None;
            self.filtered_indices = self.matcher.rank(self.query.trim(), &self.entries);
        }

        log::debug!("AppState: query='{}', results={}", self.query, self.len());
        self.selected_index = 0;
    }

    pub fn len(&self) -> usize {
        if self.web_search.is_some() {
            1
        } else {
            self.filtered_indices.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current results, best first.
    pub fn results(&self) -> Box<dyn Iterator<Item = &Entry> + '_> {
        match &self.web_search {
            Some(entry) => Box::new(std::iter::once(entry)),
            None => Box::new(self.filtered_indices.iter().map(|&i| &self.entries[i])),
        }
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.is_empty() {
            self.selected_index = 0;
            return;
        }

        let len = self.len() as i32;
        let new_index = (self.selected_index as i32 + delta).rem_euclid(len);
        self.selected_index = new_index as usize;
    }

    pub fn get_selected(&self) -> Option<&Entry> {
        self.results().nth(self.selected_index)
    }
}

fn web_search_entry(text: &str, config: &GeneralConfig) -> Option<Entry> {
    if text.is_empty() {
        return None;
    }
    let url = config
        .search_url
        .replace("{query}", &urlencoding::encode(text));
    Entry::synthetic(
        format!("Web search: {text}"),
        format!("{} '{}'", config.browser, url),
        EntryType::Search,
        false,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn state(names: &[&str]) -> AppState {
        let entries = names
            .iter()
            .map(|n| {
                Entry::synthetic(n.to_string(), n.to_lowercase(), EntryType::Custom, false)
                    .unwrap()
            })
            .collect();
        AppState::new(GeneralConfig::default(), entries)
    }

    fn names(state: &AppState) -> Vec<&str> {
        state.results().map(Entry::name).collect()
    }

    #[test]
    fn starts_with_whole_catalog() {
        let state = state(&["Vim", "Firefox", "Files"]);
        assert_eq!(names(&state), vec!["Vim", "Firefox", "Files"]);
        assert_eq!(state.get_selected().unwrap().name(), "Vim");
    }

    #[test]
    fn query_is_trimmed_and_ranked() {
        let mut state = state(&["Vim", "Firefox", "Files"]);
        state.update_query("  fi ");
        assert_eq!(names(&state), vec!["Files", "Firefox"]);

        state.update_query("   ");
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn selection_wraps_and_resets() {
        let mut state = state(&["Vim", "Firefox", "Files"]);
        state.move_selection(-1);
        assert_eq!(state.get_selected().unwrap().name(), "Files");
        state.move_selection(2);
        assert_eq!(state.get_selected().unwrap().name(), "Firefox");

        state.update_query("vim");
        assert_eq!(state.selected_index, 0);

        state.update_query("zzz");
        state.move_selection(1);
        assert!(state.get_selected().is_none());
    }

    #[test]
    fn question_mark_makes_web_search() {
        let mut state = state(&["Vim"]);
        state.update_query("?rust lang");

        assert_eq!(state.len(), 1);
        let entry = state.get_selected().unwrap();
        assert_eq!(entry.name(), "Web search: rust lang");
        assert_eq!(
            entry.command(),
            "firefox 'https://www.google.com/search?q=rust%20lang'"
        );
        assert_eq!(entry.source_path(), Path::new(""));
        assert_eq!(entry.entry_type(), EntryType::Search);
    }

    #[test]
    fn empty_web_search_has_no_results() {
        let mut state = state(&["Vim"]);
        state.update_query("?  ");
        assert!(state.is_empty());
        assert!(state.get_selected().is_none());
    }
}
