//! Reading index chunk files from a generated `search/` directory.
//!
//! The generator splits each category of its index into numbered chunks
//! (`all_0.js`, `all_1.js`, ..., `functions_0.js`, ...). This module finds the
//! chunks of one category and reads them in chunk order.

use crate::error::Result;
use anyhow::{Context, bail};
use regex::Regex;
use std::path::{Path, PathBuf};

/// One chunk file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDataFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Lists the chunk files of `category` in `dir`, ordered by chunk number.
pub fn list_search_files(dir: &Path, category: &str) -> Result<Vec<PathBuf>> {
    if category.is_empty() || !category.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("Invalid index category '{}'", category);
    }
    let pattern = Regex::new(&format!(r"^{}_([0-9a-fA-F]+)\.js$", category))
        .context("Failed to build chunk file pattern")?;

    let mut chunks = vec![];
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read search directory {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(caps) = pattern.captures(name) {
            let number = u64::from_str_radix(&caps[1], 16).unwrap_or(u64::MAX);
            chunks.push((number, name.to_string(), entry.path()));
        }
    }

    chunks.sort();
    Ok(chunks.into_iter().map(|(_, _, path)| path).collect())
}

/// Reads every chunk file of `category` in `dir`.
///
/// Fails if the directory holds no chunk for the category, since an empty
/// index is almost always a wrong path rather than an empty manual.
pub fn read_search_dir(dir: &Path, category: &str) -> Result<Vec<SearchDataFile>> {
    let paths = list_search_files(dir, category)?;
    if paths.is_empty() {
        bail!(
            "No '{}' index chunks found in {}",
            category,
            dir.display()
        );
    }

    paths
        .into_iter()
        .map(|path| -> Result<SearchDataFile> {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            tracing::debug!("Read index chunk {} ({} bytes)", path.display(), contents.len());
            Ok(SearchDataFile { path, contents })
        })
        .collect()
}
