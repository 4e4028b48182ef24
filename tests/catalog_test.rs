mod common;

use assert2::{check, let_assert};
use common::{SearchDir, search_dir};
use doxsearch::{Catalog, EntryKind, MatcherConfig, SearchError};
use rstest::rstest;

/// Test: loading a generator `search/` directory indexes every `all_*` chunk.
#[rstest]
fn load_dir_combines_chunks(search_dir: SearchDir) {
    let mut catalog = Catalog::default();
    let report = catalog.load_dir(search_dir.path(), "all").unwrap();

    check!(report.files == 2);
    check!(report.records == 55);
    check!(report.entries == 139);
    check!(report.keys == 55);
    check!(report.warnings == 0);

    check!(catalog.search("add").unwrap().keys().collect::<Vec<_>>() == ["add_mul"]);
    check!(catalog.search("pairing").unwrap().len() == 1);
    // Chunks of other categories are not loaded
    check!(catalog.search("zzz").unwrap().is_empty());
}

#[rstest]
fn load_dir_by_category(search_dir: SearchDir) {
    let mut catalog = Catalog::default();
    let report = catalog.load_dir(search_dir.path(), "functions").unwrap();

    check!(report.files == 1);
    check!(catalog.search("z").unwrap().keys().collect::<Vec<_>>() == ["zzz"]);
}

/// Test: a broken chunk aborts the reload and names the file.
#[rstest]
fn broken_chunk_keeps_previous_index(search_dir: SearchDir) {
    let mut catalog = Catalog::default();
    catalog.load_dir(search_dir.path(), "all").unwrap();

    search_dir.create_file("all_1.js", "var searchData=[['broken'");
    let err = catalog.load_dir(search_dir.path(), "all").unwrap_err();
    check!(format!("{:#}", err).contains("all_1.js"));

    check!(catalog.generation() == 1);
    check!(catalog.search("add").unwrap().len() == 1);
}

#[test]
fn load_dir_missing_directory() {
    let dir = SearchDir::new();
    let mut catalog = Catalog::default();
    check!(catalog.load_dir(&dir.path().join("nope"), "all").is_err());
    check!(catalog.load_dir(dir.path(), "all").is_err());
    let_assert!(Err(SearchError::IndexNotLoaded) = catalog.search("p"));
}

#[rstest]
fn config_applies_to_catalog_searches(search_dir: SearchDir) {
    let config = MatcherConfig::from_toml_str(
        r#"
        max_groups = 3
        max_entries_per_group = 2
        kinds = ["function"]
        "#,
    )
    .unwrap();
    let mut catalog = Catalog::new(config);
    catalog.load_dir(search_dir.path(), "all").unwrap();

    let results = catalog.search("p").unwrap();
    check!(results.len() == 3);
    check!(results.truncated);
    for group in &results {
        check!(group.entries.len() <= 2);
        check!(group.entries.iter().all(|e| e.kind == Some(EntryKind::Function)));
    }
}

#[rstest]
fn searches_share_index_snapshot(search_dir: SearchDir) {
    let mut catalog = Catalog::default();
    catalog.load_dir(search_dir.path(), "all").unwrap();
    let snapshot = catalog.index().unwrap();

    catalog.load_str("var searchData=[];").unwrap();
    check!(catalog.search("p").unwrap().is_empty());
    check!(snapshot.key_count() == 55);

    let matcher = doxsearch::Matcher::new(&snapshot, MatcherConfig::default());
    check!(matcher.search("power").len() == 1);
}
