use crate::model::Entry;
use std::cmp::Reverse;

const BASE_SCORE: i64 = 10;
const CONSECUTIVE_BONUS: i64 = 5;
const BOUNDARY_BONUS: i64 = 15;
const BOUNDARY_CHARS: &[char] = &[' ', '.', '_', '-', '/'];

/// Scores `query` as a case-insensitive subsequence of `text`.
///
/// Every matched character earns a base score, plus a bonus when it directly
/// follows the previous match and another when it starts a word. The result
/// is reduced by how far the match spreads beyond the tightest possible span.
/// Scores may be negative. Returns `None` when `query` is not a subsequence.
pub fn fuzzy_score(query: &str, text: &str) -> Option<i64> {
    score_folded(&fold_query(query), text)
}

fn fold_query(query: &str) -> Vec<char> {
    query.chars().map(fold).collect()
}

/// `fuzzy_score` for a query already lowercased with `fold_query`.
fn score_folded(query: &[char], text: &str) -> Option<i64> {
    let mut qi = 0;
    let mut score = 0;
    // -1 so that a match at index 0 continues the "run" like any other.
    let mut last_match: i64 = -1;
    let mut prev: Option<char> = None;

    for (i, c) in text.chars().enumerate() {
        if qi == query.len() {
            break;
        }
        let i = i as i64;

        if fold(c) == query[qi] {
            score += BASE_SCORE;
            if last_match == i - 1 {
                score += CONSECUTIVE_BONUS;
            }
            if prev.is_none_or(|p| BOUNDARY_CHARS.contains(&p)) {
                score += BOUNDARY_BONUS;
            }
            last_match = i;
            qi += 1;
        }
        prev = Some(c);
    }

    if qi != query.len() {
        return None;
    }

    Some(score - (last_match - (qi as i64 - 1)))
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Ranks catalog entries by display name.
#[derive(Debug, Default)]
pub struct FuzzyMatcher;

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Indices into `entries` of the matches, best first: highest score, then
    /// shortest name. An empty query keeps every entry in catalog order.
    pub fn rank(&self, query: &str, entries: &[Entry]) -> Vec<usize> {
        if query.is_empty() {
            return (0..entries.len()).collect();
        }

        let folded = fold_query(query);
        let mut scored: Vec<(i64, usize, usize)> = entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| {
                score_folded(&folded, entry.name())
                    .map(|score| (score, entry.name().chars().count(), idx))
            })
            .collect();

        scored.sort_by_key(|&(score, len, _)| (Reverse(score), len));

        log::debug!("FuzzyMatcher: query='{}', matches={}", query, scored.len());
        scored.into_iter().map(|(_, _, idx)| idx).collect()
    }
}
