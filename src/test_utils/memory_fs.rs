//! In-memory page store.

use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::WxportError;
use crate::utils::fs::{SourceFs, normalize_path};

/// A [`SourceFs`] over a map of normalized paths to contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: HashMap<PathBuf, String>,
}

impl MemoryFs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.files.insert(normalize_path(path.as_ref()), content.into());
    }
}

impl SourceFs for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(&normalize_path(path))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files.get(&normalize_path(path)).cloned().ok_or_else(|| {
            WxportError::FileNotFound {
                path: path.display().to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_normalized() {
        let fs = MemoryFs::new().with_file("/src/pages/../a.wxml", "<view/>");
        assert!(fs.exists(Path::new("/src/./a.wxml")));
        assert_eq!(fs.read_to_string(Path::new("/src/a.wxml")).unwrap(), "<view/>");
        assert!(fs.read_to_string(Path::new("/src/b.wxml")).is_err());
    }
}
