//! Render-ready search results.

use crate::types::IndexEntry;
use serde::Serialize;

/// All anchors sharing one key, as shown in one row of the results panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultGroup<'a> {
    /// Normalized key the group was matched on
    pub key: &'a str,
    /// Display label, taken from the first entry in the group
    pub label: &'a str,
    /// Entries in the order the index received them
    pub entries: Vec<&'a IndexEntry>,
    /// Entries cut by `max_entries_per_group`
    pub omitted_entries: usize,
}

impl ResultGroup<'_> {
    /// Number of entries in the group before the per-group cap was applied.
    pub fn total_entries(&self) -> usize {
        self.entries.len() + self.omitted_entries
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.url.as_str())
    }
}

/// Ordered, grouped result of one search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedResults<'a> {
    /// The query after normalization
    pub query: String,
    /// Groups in lexicographic key order
    pub groups: Vec<ResultGroup<'a>>,
    /// Whether more groups matched than `max_groups` allowed
    pub truncated: bool,
}

impl<'a> GroupedResults<'a> {
    pub(crate) fn empty(query: String) -> Self {
        Self {
            query,
            groups: vec![],
            truncated: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultGroup<'a>> {
        self.groups.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key)
    }

    /// Serializes the results for a JavaScript render layer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<'r, 'a> IntoIterator for &'r GroupedResults<'a> {
    type Item = &'r ResultGroup<'a>;
    type IntoIter = std::slice::Iter<'r, ResultGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl<'a> IntoIterator for GroupedResults<'a> {
    type Item = ResultGroup<'a>;
    type IntoIter = std::vec::IntoIter<ResultGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}
