//! Immutable prefix index over documentation symbols.

use crate::error::{BuildWarning, MalformedEntry};
use crate::search::normalize_key;
use crate::types::{IndexEntry, RawEntry};
use ahash::AHashMap;
use std::time::Instant;

/// A read-only table from normalized key to the anchors sharing that key.
///
/// Keys are kept in a sorted array so a prefix lookup is a binary search for
/// the first candidate followed by a forward scan over the contiguous run of
/// matching keys.
#[derive(Debug, Clone, Default)]
pub struct Index {
    /// Normalized keys, sorted ascending by byte order
    keys: Vec<String>,
    /// Entries for `keys[i]`, in the order they were handed to `build`
    groups: Vec<Vec<IndexEntry>>,
    entry_count: usize,
    warnings: Vec<BuildWarning>,
}

impl Index {
    /// Builds an index from raw `(label, scope, url, kind)` entries.
    ///
    /// Entries with an empty label or url are dropped; each one is logged and
    /// recorded in [`Index::warnings`]. This never fails as a whole.
    pub fn build<I>(raw: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RawEntry>,
    {
        let start = Instant::now();
        let mut grouped: AHashMap<String, Vec<IndexEntry>> = AHashMap::new();
        let mut warnings = vec![];
        let mut entry_count = 0;

        for (position, raw) in raw.into_iter().enumerate() {
            let raw: RawEntry = raw.into();
            let label = raw.label.trim();
            let url = raw.url.trim();

            let reason = match (label.is_empty(), url.is_empty()) {
                (true, true) => Some("empty label and url"),
                (true, false) => Some("empty label"),
                (false, true) => Some("empty url"),
                (false, false) => None,
            };
            if let Some(reason) = reason {
                tracing::warn!(position, reason, "Dropping malformed index entry");
                warnings.push(MalformedEntry {
                    position,
                    reason: reason.to_string(),
                });
                continue;
            }

            grouped
                .entry(normalize_key(label))
                .or_default()
                .push(IndexEntry {
                    label: label.to_string(),
                    scope: raw.scope.trim().to_string(),
                    url: url.to_string(),
                    kind: raw.kind,
                });
            entry_count += 1;
        }

        let mut sorted: Vec<_> = grouped.into_iter().collect();
        sorted.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        let (keys, groups): (Vec<_>, Vec<_>) = sorted.into_iter().unzip();

        tracing::info!(
            "Built symbol index: {} keys, {} entries, {} dropped in {:?}",
            keys.len(),
            entry_count,
            warnings.len(),
            start.elapsed()
        );

        Self {
            keys,
            groups,
            entry_count,
            warnings,
        }
    }

    /// Returns every key starting with the normalized `prefix`, paired with its
    /// entries, in lexicographic key order.
    ///
    /// An empty prefix matches nothing.
    pub fn lookup_prefix(&self, prefix: &str) -> PrefixMatches<'_> {
        self.prefix_matches(normalize_key(prefix))
    }

    /// Same as [`Index::lookup_prefix`] for a prefix that is already normalized.
    pub(crate) fn prefix_matches(&self, prefix: String) -> PrefixMatches<'_> {
        let pos = if prefix.is_empty() {
            self.keys.len()
        } else {
            self.keys.partition_point(|key| key.as_str() < prefix.as_str())
        };
        PrefixMatches {
            index: self,
            prefix,
            pos,
        }
    }

    /// Exact lookup by key. The key is normalized first.
    pub fn get(&self, key: &str) -> Option<&[IndexEntry]> {
        let key = normalize_key(key);
        self.keys
            .binary_search(&key)
            .ok()
            .map(|i| self.groups[i].as_slice())
    }

    /// All keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Entries dropped during [`Index::build`].
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }
}

/// Iterator over the keys of an [`Index`] sharing a prefix.
#[derive(Debug, Clone)]
pub struct PrefixMatches<'a> {
    index: &'a Index,
    prefix: String,
    pos: usize,
}

impl<'a> Iterator for PrefixMatches<'a> {
    type Item = (&'a str, &'a [IndexEntry]);

    fn next(&mut self) -> Option<Self::Item> {
        let index: &'a Index = self.index;
        let key = index.keys.get(self.pos)?;
        if !key.starts_with(self.prefix.as_str()) {
            self.pos = index.keys.len();
            return None;
        }
        let entries = index.groups[self.pos].as_slice();
        self.pos += 1;
        Some((key.as_str(), entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryKind;
    use assert2::check;
    use rstest::{fixture, rstest};

    #[fixture]
    fn index() -> Index {
        Index::build([
            ("pairing", "alt_bn128_pp", "url1", "class"),
            ("power", "libff", "url3", "namespace"),
            ("pairing", "bn128_pp", "url2", "class"),
            ("precompute_G1", "alt_bn128_pp", "url4", "function"),
            ("P", "bn128_ate_G1_precomp", "url5", "member"),
            ("p", "other", "url6", "member"),
        ])
    }

    #[rstest]
    fn test_groups_by_normalized_key(index: Index) {
        check!(index.key_count() == 4);
        check!(index.entry_count() == 6);
        check!(index.keys().collect::<Vec<_>>() == ["p", "pairing", "power", "precompute_g1"]);

        let p = index.get("P").unwrap();
        check!(p.iter().map(|e| e.label.as_str()).collect::<Vec<_>>() == ["P", "p"]);
    }

    #[rstest]
    fn test_preserves_insertion_order(index: Index) {
        let urls: Vec<_> = index
            .get("pairing")
            .unwrap()
            .iter()
            .map(|e| e.url.as_str())
            .collect();
        check!(urls == ["url1", "url2"]);
        check!(index.get("pairing").unwrap()[0].kind == Some(EntryKind::Class));
    }

    #[rstest]
    #[case("pa", &["pairing"])]
    #[case("p", &["p", "pairing", "power", "precompute_g1"])]
    #[case("PR", &["precompute_g1"])]
    #[case("pairing", &["pairing"])]
    #[case("pairings", &[])]
    #[case("z", &[])]
    #[case("", &[])]
    #[case("   ", &[])]
    fn test_lookup_prefix(index: Index, #[case] prefix: &str, #[case] expected: &[&str]) {
        let keys: Vec<_> = index.lookup_prefix(prefix).map(|(key, _)| key).collect();
        check!(keys == expected);
    }

    #[test]
    fn test_malformed_entries_dropped() {
        let index = Index::build([
            ("", "", "", ""),
            ("power", "libff", "", ""),
            ("", "libff", "url", ""),
            ("power", "libff", "url3", ""),
        ]);
        check!(index.entry_count() == 1);
        check!(index.warnings().len() == 3);
        check!(index.warnings()[0].position == 0);
        check!(index.warnings()[0].reason == "empty label and url");
        check!(index.warnings()[1].reason == "empty url");
        check!(index.warnings()[2].reason == "empty label");
    }

    #[test]
    fn test_empty_index() {
        let index = Index::build(Vec::<RawEntry>::new());
        check!(index.is_empty());
        check!(index.lookup_prefix("a").next().is_none());
        check!(index.get("a").is_none());
    }
}
