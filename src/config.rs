//! Matcher configuration.

use crate::error::ConfigError;
use crate::types::EntryKind;
use serde::{Deserialize, Serialize};

/// Default cap on distinct keys returned by one search.
pub const DEFAULT_MAX_GROUPS: usize = 100;

/// Default cap on anchors shown per key.
pub const DEFAULT_MAX_ENTRIES_PER_GROUP: usize = 50;

/// Result caps and filters applied by the [`Matcher`](crate::Matcher).
///
/// Can be read from TOML:
///
/// ```toml
/// max_groups = 20
/// max_entries_per_group = 5
/// kinds = ["function", "class"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatcherConfig {
    /// Maximum number of distinct keys returned
    pub max_groups: usize,
    /// Maximum number of entries shown per key
    pub max_entries_per_group: usize,
    /// Only keep entries of these kinds; `None` keeps everything
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinds: Option<Vec<EntryKind>>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_groups: DEFAULT_MAX_GROUPS,
            max_entries_per_group: DEFAULT_MAX_ENTRIES_PER_GROUP,
            kinds: None,
        }
    }
}

impl MatcherConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects zero caps, which would make every search come back empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_groups == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "max_groups",
            });
        }
        if self.max_entries_per_group == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "max_entries_per_group",
            });
        }
        Ok(())
    }

    pub fn with_max_groups(mut self, max_groups: usize) -> Self {
        self.max_groups = max_groups;
        self
    }

    pub fn with_max_entries_per_group(mut self, max_entries_per_group: usize) -> Self {
        self.max_entries_per_group = max_entries_per_group;
        self
    }

    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = EntryKind>) -> Self {
        self.kinds = Some(kinds.into_iter().collect());
        self
    }

    /// Whether an entry of the given kind passes the kind filter.
    pub(crate) fn accepts(&self, kind: Option<EntryKind>) -> bool {
        self.kinds
            .as_deref()
            .is_none_or(|kinds| kind.is_some_and(|k| kinds.contains(&k)))
    }
}
