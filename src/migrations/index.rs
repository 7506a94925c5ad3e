//! Version-ordered migration index
//!
//! Built once from a [`MigrationStore`] listing and read-only afterwards.
//! Every lookup is a pure query over a frozen `BTreeMap`, so a built index can
//! be shared between threads without locking.

use super::{Direction, MigrationFile};
use crate::error::{Error, Result};
use crate::storage::MigrationStore;
use serde::Serialize;
use std::collections::btree_map::{self, BTreeMap};
use std::ops::Bound;

/// One migration version with its optional up and down entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Migration {
    pub version: u64,
    pub identifier: String,
    /// Entry name of the up script, if any
    pub up: Option<String>,
    /// Entry name of the down script, if any
    pub down: Option<String>,
}

impl Migration {
    fn from_file(file: MigrationFile) -> Self {
        let mut migration = Self {
            version: file.version,
            identifier: file.identifier,
            up: None,
            down: None,
        };
        *migration.slot_mut(file.direction) = Some(file.raw);
        migration
    }

    /// Entry name for the given direction
    pub fn entry(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Up => self.up.as_deref(),
            Direction::Down => self.down.as_deref(),
        }
    }

    pub fn has(&self, direction: Direction) -> bool {
        self.entry(direction).is_some()
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut Option<String> {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }

    /// Any entry recorded for this version, used to name the existing side of a conflict
    fn any_entry(&self) -> &str {
        self.up.as_deref().or(self.down.as_deref()).unwrap_or_default()
    }

    /// Record a second entry for the same version.
    ///
    /// A different identifier is a duplicate version. The same identifier in
    /// the direction already filled is a duplicate migration. The same
    /// identifier in the empty direction completes the pair.
    fn attach(&mut self, file: MigrationFile) -> Result<()> {
        if file.identifier != self.identifier {
            return Err(Error::DuplicateVersion {
                version: self.version,
                entry: file.raw,
                existing: self.any_entry().to_string(),
            });
        }

        let version = self.version;
        let slot = self.slot_mut(file.direction);
        if let Some(existing) = slot {
            return Err(Error::DuplicateMigration {
                version,
                direction: file.direction,
                entry: file.raw,
                existing: existing.clone(),
            });
        }

        *slot = Some(file.raw);
        Ok(())
    }
}

/// Immutable, ascending index of migrations keyed by version
#[derive(Debug, Clone, Default)]
pub struct MigrationIndex {
    migrations: BTreeMap<u64, Migration>,
}

impl MigrationIndex {
    /// Scan a store and build the index.
    ///
    /// Entries are processed in name order. Names that are not migrations are
    /// skipped. Any malformed or conflicting entry aborts the build.
    pub fn build<S>(store: &S) -> Result<Self>
    where
        S: MigrationStore + ?Sized,
    {
        let mut names = store.list_entries()?;
        names.sort();

        let mut migrations: BTreeMap<u64, Migration> = BTreeMap::new();
        for name in names {
            let Some(file) = MigrationFile::parse(&name)? else {
                log::trace!("Skipping non-migration entry: {}", name);
                continue;
            };

            match migrations.entry(file.version) {
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(Migration::from_file(file));
                }
                btree_map::Entry::Occupied(mut slot) => {
                    slot.get_mut().attach(file)?;
                }
            }
        }

        log::info!(
            "Indexed {} migration version(s) from {}",
            migrations.len(),
            store.describe()
        );

        Ok(Self { migrations })
    }

    /// Smallest version
    pub fn first(&self) -> Option<u64> {
        self.migrations.keys().next().copied()
    }

    /// Largest version
    pub fn last(&self) -> Option<u64> {
        self.migrations.keys().next_back().copied()
    }

    /// Largest indexed version strictly below `version`.
    /// `version` itself does not have to be indexed.
    pub fn prev(&self, version: u64) -> Option<u64> {
        self.migrations.range(..version).next_back().map(|(v, _)| *v)
    }

    /// Smallest indexed version strictly above `version`.
    /// `version` itself does not have to be indexed.
    pub fn next(&self, version: u64) -> Option<u64> {
        self.migrations
            .range((Bound::Excluded(version), Bound::Unbounded))
            .next()
            .map(|(v, _)| *v)
    }

    pub fn get(&self, version: u64) -> Option<&Migration> {
        self.migrations.get(&version)
    }

    pub fn contains(&self, version: u64) -> bool {
        self.migrations.contains_key(&version)
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Migrations in ascending version order
    pub fn iter(&self) -> impl Iterator<Item = &Migration> {
        self.migrations.values()
    }

    pub fn versions(&self) -> Vec<u64> {
        self.migrations.keys().copied().collect()
    }
}
