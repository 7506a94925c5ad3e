//! Storage backends for migration scripts
//!
//! The scanner and the cursor only need two capabilities from a backend:
//! list the direct entries of the root, and open one entry for reading.
//! Disk directories, embedded folders and in-memory maps all implement
//! [`MigrationStore`] and share the same indexing logic.

pub mod directory;
#[cfg(feature = "embedded")]
pub mod embedded;
pub mod memory;

pub use directory::DirectoryStore;
#[cfg(feature = "embedded")]
pub use embedded::EmbeddedStore;
pub use memory::MemoryStore;

use crate::error::Result;
use std::io::Read;

/// Readable stream returned for a migration script. Owned by the caller.
pub type MigrationReader = Box<dyn Read + Send>;

/// Trait for listable roots holding migration scripts
pub trait MigrationStore: Send + Sync {
    /// Names of the regular entries directly under the root.
    /// Subdirectories are not included.
    fn list_entries(&self) -> Result<Vec<String>>;

    /// Open an entry previously returned by [`list_entries`](Self::list_entries)
    fn open_entry(&self, name: &str) -> Result<MigrationReader>;

    /// Human-readable description of the root, used in logs and errors
    fn describe(&self) -> String;
}
