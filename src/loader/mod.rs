//! Loader for the generator's `searchData` index payloads.
//!
//! The generator writes each index chunk as a script assigning one array
//! literal to a variable:
//!
//! ```text
//! var searchData=
//! [
//!   ['power_915',['power',['../namespacelibff.html#a868…',1,'libff::power(…)']]],
//! ];
//! ```
//!
//! [`parse_search_data`] strips the assignment, parses the literal and
//! flattens every symbol into [`RawEntry`](crate::RawEntry) values ready for
//! [`Index::build`](crate::Index::build).

mod entities;
mod literal;
mod records;

pub use records::Loaded;

use crate::error::LoadError;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Instant;

/// Matches a leading `var name =` (or `let`/`const`) assignment.
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:var|let|const)\s+[A-Za-z_$][\w$]*\s*=")
        .expect("assignment pattern is valid")
});

/// Parses one index payload, either the generator's script or plain JSON.
///
/// Structural failures abort with a [`LoadError`]. Anchors that are present
/// but malformed are skipped and listed in [`Loaded::warnings`].
pub fn parse_search_data(payload: &str) -> Result<Loaded, LoadError> {
    let start = Instant::now();
    let payload = payload.strip_prefix('\u{feff}').unwrap_or(payload);
    let base = ASSIGNMENT.find(payload).map_or(0, |m| m.end());

    let value = literal::parse_literal(&payload[base..], base)?;
    let loaded = records::entries_from_value(value)?;

    tracing::debug!(
        "Parsed search data: {} records, {} entries, {} skipped anchors in {:?}",
        loaded.records,
        loaded.entries.len(),
        loaded.warnings.len(),
        start.elapsed()
    );

    Ok(loaded)
}
