//! Disk-backed migration source (`file://` locations)

use super::{Location, MigrationSource, SourceDriver};
use crate::error::{ErrorContext, Result};
use crate::migrations::MigrationIndex;
use crate::storage::{DirectoryStore, MigrationReader};
use std::env;
use std::path::Path;

/// Migration source reading scripts from a directory on disk
#[derive(Debug)]
pub struct FileSource {
    location: String,
    inner: MigrationSource<DirectoryStore>,
}

impl FileSource {
    /// Open a location such as `file:///srv/app/migrations` or `file://migrations`.
    ///
    /// Relative and empty paths resolve against the working directory at the
    /// time of this call.
    pub fn open(location: &str) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to determine the current working directory")?;
        Self::open_in(location, &cwd)
    }

    /// Open a location, resolving relative paths against `base`
    pub fn open_in(location: &str, base: &Path) -> Result<Self> {
        let parsed = Location::parse(location)?;
        let root = parsed.resolve(base);
        log::debug!("Opening migration source {} at {}", location, root.display());

        let inner = MigrationSource::new(DirectoryStore::new(root))?;
        Ok(Self {
            location: location.to_string(),
            inner,
        })
    }

    /// Open a directory path directly, without a location string
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let inner = MigrationSource::new(DirectoryStore::new(root))?;
        Ok(Self {
            location: format!("file://{}", root.display()),
            inner,
        })
    }

    /// The location string this source was opened with
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Absolute root directory
    pub fn root(&self) -> &Path {
        self.inner.store().root()
    }

    pub fn index(&self) -> &MigrationIndex {
        self.inner.index()
    }

    pub fn close(self) -> Result<()> {
        self.inner.close()
    }
}

impl SourceDriver for FileSource {
    fn first(&self) -> Result<u64> {
        self.inner.first()
    }

    fn prev(&self, version: u64) -> Result<u64> {
        self.inner.prev(version)
    }

    fn next(&self, version: u64) -> Result<u64> {
        self.inner.next(version)
    }

    fn read_up(&self, version: u64) -> Result<(MigrationReader, String)> {
        self.inner.read_up(version)
    }

    fn read_down(&self, version: u64) -> Result<(MigrationReader, String)> {
        self.inner.read_down(version)
    }

    fn close(self: Box<Self>) -> Result<()> {
        FileSource::close(*self)
    }
}
