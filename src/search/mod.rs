//! Incremental symbol search over a loaded [`Index`](crate::Index).
//!
//! This module provides query normalization, the prefix matcher and the
//! grouped result shape handed to the render layer.

// Module declarations
pub(crate) mod matcher;
pub(crate) mod normalize;
pub(crate) mod results;

// Public re-exports (used via lib.rs)
pub use matcher::Matcher;
pub use normalize::normalize_key;
pub use results::{GroupedResults, ResultGroup};
