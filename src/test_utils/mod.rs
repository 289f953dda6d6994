//! Test utilities for wxport
//!
//! - [`init_test_logging`] - one-time tracing setup for tests
//! - [`MemoryFs`] - an in-memory [`SourceFs`](crate::utils::SourceFs)
//! - [`ProjectFixture`] - a temporary on-disk project with a `src/` tree
//!
//! # Example
//!
//! ```rust,no_run
//! use wxport::test_utils::MemoryFs;
//!
//! let fs = MemoryFs::new()
//!     .with_file("/src/pages/a/a.wxml", "<view/>")
//!     .with_file("/src/common/card.wxml", "<template name=\"card\"><view/></template>");
//! ```

pub mod fixtures;
pub mod memory_fs;

pub use fixtures::ProjectFixture;
pub use memory_fs::MemoryFs;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG` when set, otherwise leaves logging off.
///
/// ```bash
/// RUST_LOG=wxport=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
