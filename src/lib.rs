//! wxport - WXML page template rewriter
//!
//! Rewrites mini-program pages written in WXML into a set of standalone,
//! separately importable artifacts for a target platform. Each locally
//! defined template is split out into its own file, every artifact receives
//! exactly the `<import>` nodes it needs, imports are followed across files
//! and inline `<wxs>` script modules are given output paths of their own.
//!
//! # Architecture Overview
//!
//! A run starts from one entry page:
//!
//! 1. The [`parser`] turns page source into a [`fragment::Fragment`]: script
//!    modules, view nodes, import directives and template definitions.
//! 2. The [`resolver`] walks the import graph depth-first. Templates become
//!    artifacts of their own at virtual paths (`<page>-<name>.wxml`), imports
//!    are injected idempotently and scripts are relocated.
//! 3. The [`writer`] renders every artifact of the resulting
//!    [`fragment::RunResult`] to the output root.
//!
//! Missing pages and import cycles do not stop a run; they are collected as
//! [`resolver::Diagnostic`]s next to the result.
//!
//! # Core Modules
//!
//! - [`cli`] - `convert` and `inspect` commands
//! - [`config`] - input/output roots and output extensions (`wxport.toml`)
//! - [`core`] - error types and user-facing error rendering
//! - [`fragment`] - the node tree and artifact data model
//! - [`parser`] - the bundled WXML parser behind the [`parser::FragmentParser`] seam
//! - [`resolver`] - import resolution and template splitting
//! - [`utils`] - path arithmetic, atomic writes and the [`utils::SourceFs`] seam
//! - [`writer`] - artifact serialization
//!
//! # Example
//!
//! ```toml
//! # wxport.toml
//! input = "src"
//! output = "dist"
//!
//! [ext]
//! wxml = ".axml"
//! wxs = ".sjs"
//! ```
//!
//! ```bash
//! wxport convert src/pages/index/index.wxml
//! wxport convert --all
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod fragment;
pub mod parser;
pub mod resolver;
pub mod utils;
pub mod writer;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
