//! Configuration management for wxport
//!
//! A conversion is configured by two roots and two extensions. They come from
//! `wxport.toml` in the working directory (or the file given with `--config`)
//! and can be overridden on the command line.
//!
//! ```toml
//! # Pages are read from here...
//! input = "miniprogram"
//! # ...and generated modules are written here, mirroring the input layout.
//! output = "dist"
//!
//! [ext]
//! wxml = ".axml"   # generated markup modules
//! wxs = ".sjs"     # relocated inline scripts
//! ```
//!
//! # Modules
//!
//! - `options` - [`ConvertOptions`] and its output-path rewrites
//! - `parser` - generic TOML parsing with file context

mod options;
mod parser;

pub use options::{ConvertOptions, Extensions};
pub use parser::parse_config;
