//! Session-level ownership of the loaded index.
//!
//! A [`Catalog`] holds the index for the current documentation build and the
//! matcher configuration. Reloading replaces the index wholesale; searches
//! that already hold an `Arc<Index>` keep reading the old snapshot.

use crate::config::MatcherConfig;
use crate::error::{LoadError, Result, SearchError};
use crate::index::Index;
use crate::loader::{Loaded, parse_search_data};
use crate::search::{GroupedResults, Matcher};
use crate::source::read_search_dir;
use anyhow::Context;
use std::path::Path;
use std::sync::Arc;

/// Summary of one load, for logging or display by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Chunk files parsed
    pub files: usize,
    pub records: usize,
    /// Entries kept in the index
    pub entries: usize,
    pub keys: usize,
    /// Anchors skipped by the loader plus entries dropped by the index build
    pub warnings: usize,
}

#[derive(Debug, Default)]
pub struct Catalog {
    index: Option<Arc<Index>>,
    config: MatcherConfig,
    /// Incremented on every install
    generation: u64,
}

impl Catalog {
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            index: None,
            config,
            generation: 0,
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: MatcherConfig) {
        self.config = config;
    }

    /// Current index snapshot, if one has been installed.
    pub fn index(&self) -> Option<Arc<Index>> {
        self.index.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Installs a new index, returning the one it replaces.
    pub fn replace(&mut self, index: Index) -> Option<Arc<Index>> {
        self.generation += 1;
        tracing::info!(
            generation = self.generation,
            keys = index.key_count(),
            entries = index.entry_count(),
            "Installed symbol index"
        );
        self.index.replace(Arc::new(index))
    }

    /// Drops the current index. Searches fail with `IndexNotLoaded` until the
    /// next install.
    pub fn clear(&mut self) {
        self.index = None;
    }

    /// Parses one payload and installs the resulting index.
    ///
    /// On error the current index is left untouched.
    pub fn load_str(&mut self, payload: &str) -> std::result::Result<LoadReport, LoadError> {
        let loaded = parse_search_data(payload)?;
        Ok(self.install(loaded, 1))
    }

    /// Reads every `<category>_*.js` chunk in a generated `search/` directory
    /// and installs the combined index.
    ///
    /// All chunks must parse before anything is replaced.
    pub fn load_dir(&mut self, dir: &Path, category: &str) -> Result<LoadReport> {
        let files = read_search_dir(dir, category)?;
        let mut combined = Loaded::default();
        for file in &files {
            let loaded = parse_search_data(&file.contents)
                .with_context(|| format!("Failed to parse {}", file.path.display()))?;
            combined.extend(loaded);
        }
        Ok(self.install(combined, files.len()))
    }

    fn install(&mut self, loaded: Loaded, files: usize) -> LoadReport {
        let Loaded {
            entries,
            warnings,
            records,
        } = loaded;
        let index = Index::build(entries);
        let report = LoadReport {
            files,
            records,
            entries: index.entry_count(),
            keys: index.key_count(),
            warnings: warnings.len() + index.warnings().len(),
        };
        if report.warnings > 0 {
            tracing::warn!("Index loaded with {} skipped entries", report.warnings);
        }
        self.replace(index);
        report
    }

    /// Matcher over the current index.
    pub fn matcher(&self) -> std::result::Result<Matcher<'_>, SearchError> {
        let index = self.index.as_deref().ok_or(SearchError::IndexNotLoaded)?;
        Ok(Matcher::new(index, self.config.clone()))
    }

    /// Runs a search against the current index.
    pub fn search(&self, query: &str) -> std::result::Result<GroupedResults<'_>, SearchError> {
        Ok(self.matcher()?.search(query))
    }
}
