//! Path utilities for normalization, relative references and extension rewrites.
//!
//! Everything here is lexical: no function touches the filesystem, resolves
//! symbolic links or checks that a path exists. The resolver works with paths
//! of pages that may only exist in memory (template virtual files), so this
//! is a requirement rather than a shortcut.

use std::path::{Component, Path, PathBuf};

/// Normalizes a path by resolving `.` and `..` components.
///
/// - Removes `.` (current directory) components
/// - Resolves `..` against the previous normal component
/// - Keeps leading `..` components of relative paths
/// - Never pops past the root of an absolute path
///
/// # Examples
///
/// ```rust,no_run
/// use wxport::utils::fs::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// let path = Path::new("/foo/./bar/../baz");
/// assert_eq!(normalize_path(path), PathBuf::from("/foo/baz"));
///
/// let relative = Path::new("../src/./lib.rs");
/// assert_eq!(normalize_path(relative), PathBuf::from("../src/lib.rs"));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Normalizes a path for storage by converting all separators to forward slashes.
///
/// Import `src` attributes end up inside generated markup, which must be
/// identical regardless of the platform the conversion ran on.
///
/// ```rust,no_run
/// use wxport::utils::fs::normalize_path_for_storage;
/// use std::path::Path;
///
/// assert_eq!(normalize_path_for_storage(Path::new("..\\common\\card.wxml")), "../common/card.wxml");
/// ```
#[must_use]
pub fn normalize_path_for_storage<P: AsRef<Path>>(path: P) -> String {
    let path_str = path.as_ref().to_string_lossy();

    // Strip Windows extended-length path prefixes before normalization
    let cleaned = if let Some(stripped) = path_str.strip_prefix(r"\\?\UNC\") {
        format!("//{stripped}")
    } else if let Some(stripped) = path_str.strip_prefix(r"\\?\") {
        stripped.to_string()
    } else {
        path_str.to_string()
    };

    cleaned.replace('\\', "/")
}

/// Resolves `path` against `base_dir` unless it is already rooted, then normalizes.
#[must_use]
pub fn absolutize(base_dir: &Path, path: &Path) -> PathBuf {
    if path.has_root() {
        normalize_path(path)
    } else {
        normalize_path(&base_dir.join(path))
    }
}

/// Computes the path of `to` relative to the directory `from_dir`.
///
/// Both paths are normalized first. Returns an empty path when they are equal.
///
/// ```rust,no_run
/// use wxport::utils::fs::relative_path;
/// use std::path::{Path, PathBuf};
///
/// let rel = relative_path(Path::new("/src/pages/a"), Path::new("/src/common/card.wxml"));
/// assert_eq!(rel, PathBuf::from("../../common/card.wxml"));
/// ```
#[must_use]
pub fn relative_path(from_dir: &Path, to: &Path) -> PathBuf {
    let from = normalize_path(from_dir);
    let to = normalize_path(to);
    let from_parts: Vec<Component<'_>> = from.components().collect();
    let to_parts: Vec<Component<'_>> = to.components().collect();

    let common = from_parts.iter().zip(&to_parts).take_while(|(a, b)| a == b).count();

    let mut relative = PathBuf::new();
    for _ in common..from_parts.len() {
        relative.push("..");
    }
    for component in &to_parts[common..] {
        relative.push(component.as_os_str());
    }
    relative
}

/// The `src` a page at `page` uses to reference `target`.
///
/// Relative to the page's directory, forward-slash separated and prefixed
/// with `./` unless it climbs out of the directory.
#[must_use]
pub fn relative_src(page: &Path, target: &Path) -> String {
    let dir = page.parent().unwrap_or_else(|| Path::new(""));
    let relative = normalize_path_for_storage(relative_path(dir, target));
    if relative == ".." || relative.starts_with("../") {
        relative
    } else {
        format!("./{relative}")
    }
}

/// Replaces the final extension of `path` (dot included) with `suffix`.
///
/// `suffix` is appended verbatim, so it can carry more than an extension:
///
/// ```rust,no_run
/// use wxport::utils::fs::replace_extension;
/// use std::path::{Path, PathBuf};
///
/// let out = replace_extension(Path::new("/src/a/a.wxml"), "-wxs-util.sjs");
/// assert_eq!(out, PathBuf::from("/src/a/a-wxs-util.sjs"));
/// ```
#[must_use]
pub fn replace_extension(path: &Path, suffix: &str) -> PathBuf {
    let mut stem = path.with_extension("").into_os_string();
    stem.push(suffix);
    PathBuf::from(stem)
}

/// The final extension of `path` with its leading dot, if any.
#[must_use]
pub fn dotted_extension(path: &Path) -> Option<String> {
    path.extension().map(|ext| format!(".{}", ext.to_string_lossy()))
}
