//! Conversion options: input/output roots and output extensions.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::parser::parse_config;
use crate::constants::{
    DEFAULT_INPUT_DIR, DEFAULT_MARKUP_EXT, DEFAULT_OUTPUT_DIR, DEFAULT_SCRIPT_EXT,
};
use crate::core::WxportError;
use crate::utils::fs::{absolutize, normalize_path, relative_path, replace_extension};

/// Output file extensions, dot included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extensions {
    /// Extension of generated markup modules, e.g. `.axml`.
    pub wxml: String,
    /// Extension of relocated script modules, e.g. `.sjs`.
    pub wxs: String,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            wxml: DEFAULT_MARKUP_EXT.to_string(),
            wxs: DEFAULT_SCRIPT_EXT.to_string(),
        }
    }
}

/// Options shared by every resolution in a run.
///
/// ```toml
/// input = "src"
/// output = "dist"
///
/// [ext]
/// wxml = ".axml"
/// wxs = ".sjs"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Root source directory.
    pub input: PathBuf,
    /// Root output directory.
    pub output: PathBuf,
    pub ext: Extensions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            ext: Extensions::default(),
        }
    }
}

impl ConvertOptions {
    /// Options with the given roots and default extensions.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ext: Extensions::default(),
        }
    }

    /// Load options from a TOML file; relative roots are taken relative to
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(WxportError::ConfigNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let options: Self = parse_config(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        tracing::debug!("Loaded conversion options from {}", path.display());
        Ok(options.with_base_dir(base))
    }

    /// Resolve relative roots against `base`.
    #[must_use]
    pub fn with_base_dir(mut self, base: &Path) -> Self {
        self.input = absolutize(base, &self.input);
        self.output = absolutize(base, &self.output);
        self
    }

    /// Reject options the resolver cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() || self.output.as_os_str().is_empty() {
            return Err(WxportError::ConfigError {
                message: "input and output roots must not be empty".to_string(),
            }
            .into());
        }
        for (key, ext) in [("ext.wxml", &self.ext.wxml), ("ext.wxs", &self.ext.wxs)] {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(WxportError::ConfigError {
                    message: format!("{key} must start with '.', got '{ext}'"),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Output path of a page: the input-root prefix is swapped for the output
    /// root and the extension for `ext.wxml`.
    ///
    /// Pages outside the input root keep their position relative to it.
    #[must_use]
    pub fn output_path(&self, page: &Path) -> PathBuf {
        replace_extension(&self.output_asset_path(page), &self.ext.wxml)
    }

    /// Maps any path under the input root into the output root, keeping its
    /// file name untouched.
    #[must_use]
    pub fn output_asset_path(&self, path: &Path) -> PathBuf {
        let relative = match path.strip_prefix(&self.input) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => relative_path(&self.input, path),
        };
        normalize_path(&self.output.join(relative))
    }
}
