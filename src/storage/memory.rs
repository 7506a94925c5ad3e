//! In-memory backend
//!
//! Useful for scripts compiled in with `include_str!` and for tests.

use super::{MigrationReader, MigrationStore};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::io::{Cursor, ErrorKind};

/// Migration scripts held in memory, keyed by entry name
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    pub fn insert(&mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), contents.into());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_file(mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(name, contents);
        self
    }

    /// Remove an entry, returning its contents
    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        self.files.remove(name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl MigrationStore for MemoryStore {
    fn list_entries(&self) -> Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn open_entry(&self, name: &str) -> Result<MigrationReader> {
        let contents = self.files.get(name).ok_or_else(|| {
            Error::Io(std::io::Error::new(
                ErrorKind::NotFound,
                format!("memory entry '{}' does not exist", name),
            ))
        })?;
        Ok(Box::new(Cursor::new(contents.clone())))
    }

    fn describe(&self) -> String {
        format!("memory ({} entries)", self.files.len())
    }
}
