//! Cross-platform utilities for wxport
//!
//! - [`fs`] - path handling, atomic writes and the source file-system seam

pub mod fs;

pub use fs::{LocalFs, SourceFs, atomic_write, ensure_dir, normalize_path, safe_write};
