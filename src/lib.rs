pub mod catalog;
pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod logging;
pub mod search;
pub mod source;
pub mod types;

pub use catalog::{Catalog, LoadReport};
pub use config::MatcherConfig;
pub use error::{BuildWarning, ConfigError, LoadError, LoadWarning, MalformedEntry, SearchError};
pub use index::{Index, PrefixMatches};
pub use loader::{Loaded, parse_search_data};
pub use search::{GroupedResults, Matcher, ResultGroup, normalize_key};
pub use types::{EntryKind, IndexEntry, RawEntry};
