//! Page discovery for `convert --all`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every file under `dir` whose name ends in `ext`, sorted.
///
/// A missing `dir` yields no pages.
pub fn find_pages(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut pages = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(ext) {
            pages.push(entry.into_path());
        }
    }
    pages.sort();
    Ok(pages)
}
