//! Migration source drivers
//!
//! A driver answers navigation (`first`, `prev`, `next`) and read
//! (`read_up`, `read_down`) queries over an index built once at open time.
//! Navigation is stateless: every call takes an explicit version.

pub mod file;
#[cfg(feature = "embedded")]
pub mod embedded;
pub mod location;

pub use file::FileSource;
#[cfg(feature = "embedded")]
pub use embedded::EmbeddedSource;
pub use location::Location;

use crate::error::{Error, ErrorContext, Result};
use crate::migrations::{Direction, MigrationIndex};
use crate::storage::{MemoryStore, MigrationReader, MigrationStore};

/// Trait implemented by every migration source
///
/// Errors for which [`Error::is_not_found`] is true mean "nothing in that
/// direction"; a migration engine treats them as the end of the chain.
pub trait SourceDriver: Send + Sync {
    /// Smallest available version
    fn first(&self) -> Result<u64>;

    /// Largest version strictly below `version`
    fn prev(&self, version: u64) -> Result<u64>;

    /// Smallest version strictly above `version`
    fn next(&self, version: u64) -> Result<u64>;

    /// Open the up script of `version` and return it with its identifier
    fn read_up(&self, version: u64) -> Result<(MigrationReader, String)>;

    /// Open the down script of `version` and return it with its identifier
    fn read_down(&self, version: u64) -> Result<(MigrationReader, String)>;

    /// Release the source. Streams already returned stay valid.
    fn close(self: Box<Self>) -> Result<()>;
}

/// Source driver over any [`MigrationStore`]
#[derive(Debug)]
pub struct MigrationSource<S: MigrationStore> {
    store: S,
    index: MigrationIndex,
}

/// Source backed by an in-memory store
pub type MemorySource = MigrationSource<MemoryStore>;

impl<S: MigrationStore> MigrationSource<S> {
    /// Scan `store` and build the index. Fails without returning a partial
    /// source if any entry is malformed or conflicting.
    pub fn new(store: S) -> Result<Self> {
        let index = MigrationIndex::build(&store)?;
        Ok(Self { store, index })
    }

    pub fn index(&self) -> &MigrationIndex {
        &self.index
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn first(&self) -> Result<u64> {
        self.index
            .first()
            .ok_or_else(|| Error::not_found(format!("no migrations in {}", self.store.describe())))
    }

    pub fn prev(&self, version: u64) -> Result<u64> {
        self.index
            .prev(version)
            .ok_or_else(|| Error::not_found(format!("no migration before version {}", version)))
    }

    pub fn next(&self, version: u64) -> Result<u64> {
        self.index
            .next(version)
            .ok_or_else(|| Error::not_found(format!("no migration after version {}", version)))
    }

    pub fn read_up(&self, version: u64) -> Result<(MigrationReader, String)> {
        self.read(version, Direction::Up)
    }

    pub fn read_down(&self, version: u64) -> Result<(MigrationReader, String)> {
        self.read(version, Direction::Down)
    }

    /// Open the script for `version` in `direction`
    pub fn read(&self, version: u64, direction: Direction) -> Result<(MigrationReader, String)> {
        let migration = self
            .index
            .get(version)
            .ok_or_else(|| Error::not_found(format!("no migration with version {}", version)))?;

        let entry = migration.entry(direction).ok_or_else(|| {
            Error::not_found(format!(
                "version {} has no {} migration",
                version, direction
            ))
        })?;

        // The index claimed this entry exists; failures here are read errors
        let reader = self
            .store
            .open_entry(entry)
            .with_context(|| format!("Failed to read {} migration {}", direction, entry))?;

        Ok((reader, migration.identifier.clone()))
    }

    /// Release the store and the index
    pub fn close(self) -> Result<()> {
        log::debug!("Closing migration source {}", self.store.describe());
        Ok(())
    }
}

impl<S: MigrationStore> SourceDriver for MigrationSource<S> {
    fn first(&self) -> Result<u64> {
        MigrationSource::first(self)
    }

    fn prev(&self, version: u64) -> Result<u64> {
        MigrationSource::prev(self, version)
    }

    fn next(&self, version: u64) -> Result<u64> {
        MigrationSource::next(self, version)
    }

    fn read_up(&self, version: u64) -> Result<(MigrationReader, String)> {
        MigrationSource::read_up(self, version)
    }

    fn read_down(&self, version: u64) -> Result<(MigrationReader, String)> {
        MigrationSource::read_down(self, version)
    }

    fn close(self: Box<Self>) -> Result<()> {
        MigrationSource::close(*self)
    }
}
