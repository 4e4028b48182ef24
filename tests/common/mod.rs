//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `libff_index`: index built from a real generator chunk (`fixtures/all_e.js`)
//! - `scenario_index`: the three-entry `pairing`/`power` index
//! - `search_dir`: a temporary `search/` directory holding generator chunks

use doxsearch::{Index, parse_search_data};
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Generator output for symbols starting with `p` in the libff reference manual.
pub const ALL_E: &str = include_str!("../fixtures/all_e.js");

/// Index built from [`ALL_E`].
#[fixture]
pub fn libff_index() -> Index {
    doxsearch::logging::init();
    let loaded = parse_search_data(ALL_E).expect("fixture parses");
    Index::build(loaded.entries)
}

#[fixture]
pub fn scenario_index() -> Index {
    Index::build([
        ("pairing", "alt_bn128_pp", "url1", "class"),
        ("pairing", "bn128_pp", "url2", "class"),
        ("power", "libff", "url3", "namespace"),
    ])
}

/// A temporary generator `search/` directory, removed when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct SearchDir {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl SearchDir {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().join("search");
        std::fs::create_dir_all(&root).expect("Failed to create search directory");
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes a chunk file into the directory.
    ///
    /// # Panics
    /// Panics if the write fails.
    pub fn create_file(&self, name: &str, content: &str) {
        std::fs::write(self.root.join(name), content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", name, e));
    }
}

/// Directory with the real `all_e.js` chunk plus a small `all_0.js` and an
/// unrelated category chunk.
#[fixture]
pub fn search_dir() -> SearchDir {
    doxsearch::logging::init();
    let dir = SearchDir::new();
    dir.create_file(
        "all_0.js",
        "var searchData=\n[\n  ['add_5fmul_0',['add_mul',['../namespacelibff.html#a01',1,'libff::add_mul()']]]\n];\n",
    );
    dir.create_file("all_e.js", ALL_E);
    dir.create_file(
        "functions_0.js",
        "var searchData=\n[\n  ['zzz_0',['zzz',['../namespacelibff.html#a02',1,'libff::zzz()']]]\n];\n",
    );
    dir
}

/// Asserts the ordering invariants every result must satisfy.
#[allow(dead_code)] // Used across different integration test crates
pub fn assert_well_formed(results: &doxsearch::GroupedResults<'_>) {
    let keys: Vec<&str> = results.keys().collect();
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1], "groups out of order: {:?}", keys);
    }
    for group in results {
        assert!(
            group.key.starts_with(results.query.as_str()),
            "key '{}' does not start with '{}'",
            group.key,
            results.query
        );
        assert!(!group.entries.is_empty() || group.omitted_entries > 0);
    }
}
