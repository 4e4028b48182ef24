//! Error handling types and utilities.

/// A specialized Result type for operations that touch the filesystem.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods in [`crate::source`] and [`crate::catalog`].
pub type Result<T> = anyhow::Result<T>;

/// Fatal failure to parse a generated index payload.
///
/// Only raised when the payload as a whole is not the expected shape. Defects
/// confined to a single anchor are downgraded to [`LoadWarning`]s instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The payload is not a well-formed array literal.
    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },
    /// The literal parsed, but its structure is not a list of symbol records.
    #[error("unexpected index shape at record {position}: {message}")]
    Shape { position: usize, message: String },
}

/// A raw entry or anchor that was dropped while building or loading an index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed entry at position {position}: {reason}")]
pub struct MalformedEntry {
    /// Zero-based position of the entry in the input sequence
    pub position: usize,
    pub reason: String,
}

/// Warning produced by [`Index::build`](crate::Index::build).
pub type BuildWarning = MalformedEntry;

/// Warning produced by the loader for a skipped anchor or symbol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record {record}{}: {reason}", anchor_suffix(.anchor.as_ref()))]
pub struct LoadWarning {
    pub record: usize,
    /// Anchor within the record, or `None` when the whole symbol was skipped
    pub anchor: Option<usize>,
    pub reason: String,
}

fn anchor_suffix(anchor: Option<&usize>) -> String {
    anchor.map(|a| format!(", anchor {}", a)).unwrap_or_default()
}

/// Errors surfaced by [`Catalog`](crate::Catalog) searches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// `search` was called before any index was installed.
    #[error("no symbol index has been loaded")]
    IndexNotLoaded,
}

/// Invalid matcher configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse matcher config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{field} must be at least 1")]
    ZeroLimit { field: &'static str },
}
