//! RustF migration source - discovers, orders and streams migration scripts
//!
//! Scans a directory (on disk or embedded in the binary) holding
//! `{version}_{identifier}.{up|down}.{ext}` scripts and exposes them to a
//! migration engine through:
//! - Stateless navigation (`first`, `prev`, `next`) over an immutable index
//! - Lazy streaming of up/down scripts (`read_up`, `read_down`)
//! - A scheme registry for `file://` and application-defined locations

// Enforce error handling best practices
#![cfg_attr(
    not(test),
    warn(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
    )
)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used,))]

#[cfg(feature = "config")]
pub mod config;
pub mod error;
pub mod migrations;
pub mod registry;
pub mod source;
pub mod storage;
#[doc(hidden)]
pub mod testing;

// Re-export main types for public API
#[cfg(feature = "config")]
pub use config::SourceConfig;
pub use error::{Error, Result};
pub use migrations::{Direction, Migration, MigrationFile, MigrationIndex};
pub use registry::SourceRegistry;
pub use source::{FileSource, Location, MemorySource, MigrationSource, SourceDriver};
pub use storage::{DirectoryStore, MemoryStore, MigrationReader, MigrationStore};

#[cfg(feature = "embedded")]
pub use source::EmbeddedSource;
#[cfg(feature = "embedded")]
pub use storage::EmbeddedStore;

// Re-export rust-embed so applications can derive their embedded folders
#[cfg(feature = "embedded")]
pub use rust_embed::{self, RustEmbed};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::ErrorContext;
    pub use crate::{
        Direction, Error, FileSource, MigrationSource, MigrationStore, Result, SourceDriver,
        SourceRegistry,
    };
}
