//! On-disk project fixtures.
//!
//! A [`ProjectFixture`] is a temporary directory holding `src/` pages and an
//! optional `wxport.toml`, removed when the fixture is dropped.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::ConvertOptions;

/// Sample pages shared by unit and integration tests.
pub mod pages {
    /// A page importing a shared card and defining one local template.
    pub const INDEX: &str = r#"<import src="../../common/card.wxml"/>
<wxs module="fmt">module.exports = { upper: function (s) { return s.toUpperCase(); } };</wxs>
<template name="row">
  <view class="row"><template is="card" data="{{item}}"/></view>
</template>
<view class="page">
  <block wx:for="{{items}}"><template is="row" data="{{item}}"/></block>
  <text>{{fmt.upper(title)}}</text>
</view>
"#;

    /// A library page with a single template and no views.
    pub const CARD: &str = r#"<template name="card">
  <view class="card">{{item.title}}</view>
</template>
"#;
}

/// Temporary project directory.
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    /// Create an empty project.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("Failed to create fixture directory")?;
        Ok(Self {
            dir,
        })
    }

    /// The sample project: `src/pages/index/index.wxml` importing
    /// `src/common/card.wxml`.
    pub fn sample() -> Result<Self> {
        let fixture = Self::new()?;
        fixture.write("src/pages/index/index.wxml", pages::INDEX)?;
        fixture.write("src/common/card.wxml", pages::CARD)?;
        Ok(fixture)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `relative` inside the project.
    #[must_use]
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.path(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Options for `<root>/src` → `<root>/dist` with default extensions.
    #[must_use]
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions::new(self.path("src"), self.path("dist"))
    }
}
