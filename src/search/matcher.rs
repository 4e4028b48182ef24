//! Prefix matcher turning a raw query into grouped results.

use super::normalize::normalize_key;
use super::results::{GroupedResults, ResultGroup};
use crate::config::MatcherConfig;
use crate::index::Index;
use crate::types::IndexEntry;

/// Stateless search over a borrowed [`Index`].
///
/// Each [`Matcher::search`] call is a pure function of the index, the query
/// and the configuration. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    index: &'a Index,
    config: MatcherConfig,
}

impl<'a> Matcher<'a> {
    pub fn new(index: &'a Index, config: MatcherConfig) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> &'a Index {
        self.index
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Searches for keys starting with the normalized query.
    ///
    /// The whole query is one literal prefix: `"pack bit"` matches a key
    /// `"pack bit vector"` but not `"pack_bit_vector"`. Groups come back in
    /// key order and are cut to `max_groups` only after ordering, so a capped
    /// result is always a prefix of the uncapped one.
    pub fn search(&self, query: &str) -> GroupedResults<'a> {
        let query = normalize_key(query);
        let mut results = GroupedResults::empty(query.clone());
        if query.is_empty() {
            return results;
        }

        let max_groups = self.config.max_groups;
        let max_entries = self.config.max_entries_per_group;

        for (key, entries) in self.index.prefix_matches(query) {
            let mut kept: Vec<&'a IndexEntry> = entries
                .iter()
                .filter(|e| self.config.accepts(e.kind))
                .collect();
            let Some(&first) = kept.first() else {
                continue;
            };

            if results.groups.len() >= max_groups {
                results.truncated = true;
                break;
            }

            let label: &'a str = first.label.as_str();
            let omitted_entries = kept.len().saturating_sub(max_entries);
            kept.truncate(max_entries);
            results.groups.push(ResultGroup {
                key,
                label,
                entries: kept,
                omitted_entries,
            });
        }

        tracing::debug!(
            query = %results.query,
            groups = results.groups.len(),
            truncated = results.truncated,
            "Symbol search completed"
        );

        results
    }
}
