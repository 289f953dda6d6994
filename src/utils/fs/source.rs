//! Read access to source pages.
//!
//! The resolver never touches `std::fs` directly; it asks a [`SourceFs`].
//! [`LocalFs`] is the real implementation, tests use the in-memory one from
//! `test_utils`.

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::WxportError;

/// File existence and read operations needed by the resolver.
pub trait SourceFs {
    /// Whether `path` names an existing file.
    fn exists(&self, path: &Path) -> bool;

    /// Read the whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// [`SourceFs`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl SourceFs for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        match std::fs::read_to_string(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(WxportError::FileNotFound {
                path: path.display().to_string(),
            }
            .into()),
            result => result.with_context(|| format!("Failed to read source file: {}", path.display())),
        }
    }
}
