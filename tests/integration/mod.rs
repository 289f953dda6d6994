//! Integration test suite for wxport
//!
//! End-to-end tests that resolve real page trees on disk and drive the
//! `wxport` binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **resolve**: the library pipeline (parse, resolve, write) over on-disk projects
//! - **convert**: the `convert` command, flags and exit codes
//! - **inspect**: the `inspect` command's JSON report
//! - **config**: `wxport.toml` discovery and overrides

mod config;
mod convert;
mod inspect;
mod resolve;

use assert_cmd::Command;
use wxport::test_utils::ProjectFixture;

/// The `wxport` binary running inside `fixture`'s root.
pub fn wxport(fixture: &ProjectFixture) -> Command {
    let mut cmd = Command::cargo_bin("wxport").unwrap();
    cmd.current_dir(fixture.root()).env_remove("RUST_LOG");
    cmd
}
