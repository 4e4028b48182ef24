//! Core data model shared by the loader, the index and the matcher.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a documentation anchor.
///
/// Mirrors the category tabs the generator offers in its own search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Function,
    Member,
    Class,
    Namespace,
    File,
    Page,
}

impl EntryKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Member => "member",
            Self::Class => "class",
            Self::Namespace => "namespace",
            Self::File => "file",
            Self::Page => "page",
        }
    }

    /// Infers the kind of an anchor from its URL and scope description.
    ///
    /// The generator encodes `.` in file names as `_8`, so `foo_8hpp.html` is
    /// the page for `foo.hpp`. Any URL carrying an `#anchor` points inside a
    /// page and is a member; members whose scope reads like a signature are
    /// functions.
    pub fn infer(url: &str, scope: &str) -> Option<Self> {
        let (path, anchor) = match url.split_once('#') {
            Some((path, anchor)) => (path, Some(anchor)),
            None => (url, None),
        };
        let file = path.rsplit('/').next().unwrap_or(path);
        if file.is_empty() {
            return None;
        }

        if anchor.is_some_and(|a| !a.is_empty()) {
            return Some(if scope.contains('(') {
                Self::Function
            } else {
                Self::Member
            });
        }

        let stem = file.strip_suffix(".html").unwrap_or(file);
        if ["class", "struct", "union", "interface"]
            .iter()
            .any(|p| stem.starts_with(p))
        {
            Some(Self::Class)
        } else if stem.starts_with("namespace") {
            Some(Self::Namespace)
        } else if stem.contains("_8") {
            Some(Self::File)
        } else if file.ends_with(".html") {
            Some(Self::Page)
        } else {
            None
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name an [`EntryKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entry kind '{0}'")]
pub struct ParseKindError(pub String);

impl FromStr for EntryKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "function" | "functions" | "fn" => Ok(Self::Function),
            "member" | "members" | "variable" | "variables" => Ok(Self::Member),
            "class" | "classes" | "struct" => Ok(Self::Class),
            "namespace" | "namespaces" => Ok(Self::Namespace),
            "file" | "files" => Ok(Self::File),
            "page" | "pages" => Ok(Self::Page),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

/// One documentation anchor for a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Display name of the symbol, not necessarily unique
    pub label: String,
    /// Enclosing container, used to tell overloads apart
    pub scope: String,
    /// Relative link (path + anchor), never empty
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
}

/// An unvalidated entry as handed to [`Index::build`](crate::Index::build).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub label: String,
    pub scope: String,
    pub url: String,
    pub kind: Option<EntryKind>,
}

impl RawEntry {
    pub fn new(
        label: impl Into<String>,
        scope: impl Into<String>,
        url: impl Into<String>,
        kind: Option<EntryKind>,
    ) -> Self {
        Self {
            label: label.into(),
            scope: scope.into(),
            url: url.into(),
            kind,
        }
    }
}

impl<L, S, U, K> From<(L, S, U, K)> for RawEntry
where
    L: Into<String>,
    S: Into<String>,
    U: Into<String>,
    K: AsRef<str>,
{
    /// Builds a raw entry from a `(label, scope, url, kind)` tuple. An empty or
    /// unrecognized kind string leaves the kind unset.
    fn from((label, scope, url, kind): (L, S, U, K)) -> Self {
        Self::new(label, scope, url, kind.as_ref().parse().ok())
    }
}
