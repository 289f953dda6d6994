//! File system utilities
//!
//! - [`paths`] - lexical path normalization, relative references, extension rewrites
//! - [`atomic`] - atomic temp-and-rename writes for generated artifacts
//! - [`source`] - the [`SourceFs`] seam the resolver reads pages through
//! - [`discovery`] - page lookup under the input root
//!
//! # Examples
//!
//! ```rust,no_run
//! use wxport::utils::fs::{relative_src, safe_write};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let src = relative_src(Path::new("/src/pages/a/a.wxml"), Path::new("/src/common/card.wxml"));
//! assert_eq!(src, "../../common/card.wxml");
//!
//! safe_write(Path::new("dist/pages/a/a.axml"), "<view/>")?;
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod discovery;
pub mod paths;
pub mod source;

pub use atomic::{atomic_write, ensure_dir, safe_write};
pub use discovery::find_pages;
pub use paths::{
    absolutize, dotted_extension, normalize_path, normalize_path_for_storage, relative_path,
    relative_src, replace_extension,
};
pub use source::{LocalFs, SourceFs};
