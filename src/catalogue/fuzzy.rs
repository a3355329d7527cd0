//! Fuzzy-search index over category names, backing the autocomplete on the
//! `/leetcode` category option.

use strsim::jaro_winkler;

/// Discord caps autocomplete suggestion lists at 25 entries.
pub const MAX_SUGGESTIONS: usize = 25;

/// Minimum Jaro-Winkler similarity for a non-substring match to count.
const SCORE_FLOOR: f64 = 0.6;

struct Entry {
    name: String,
    lowered: String,
}

/// Derived, ephemeral index; rebuilt whenever the snapshot changes.
pub struct CategoryIndex {
    entries: Vec<Entry>,
}

impl CategoryIndex {
    /// Builds an index over category names. Assumes the input is already
    /// sorted the way the snapshot sorts categories; ties keep that order.
    pub fn build(categories: &[String]) -> Self {
        Self {
            entries: categories
                .iter()
                .map(|name| Entry {
                    name: name.clone(),
                    lowered: name.to_lowercase(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ranked matches for `query`, at most `limit`. An empty or whitespace
    /// query returns the first `limit` categories in sorted order. Exact
    /// matches rank above substring matches, which rank above fuzzy ones.
    pub fn search(&self, query: &str, limit: usize) -> Vec<String> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self
                .entries
                .iter()
                .take(limit)
                .map(|e| e.name.clone())
                .collect();
        }

        let mut scored: Vec<(f64, &str)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let score = if entry.lowered == query {
                    3.0
                } else if entry.lowered.contains(&query) {
                    2.0 + jaro_winkler(&query, &entry.lowered)
                } else {
                    let similarity = jaro_winkler(&query, &entry.lowered);
                    if similarity < SCORE_FLOOR {
                        return None;
                    }
                    similarity
                };
                Some((score, entry.name.as_str()))
            })
            .collect();

        // Stable sort keeps the sorted-category order for equal scores
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}
