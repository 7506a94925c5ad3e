//! Conformance checks for migration sources
//!
//! Any [`SourceDriver`] opened over the standard fixture (versions 1, 3, 4,
//! 5 and 7 with a mix of up-only, down-only and paired scripts) can be run
//! through [`run_conformance`]. The checks panic on failure, so they are meant
//! to be called from tests.

#![allow(clippy::panic)]

use crate::source::SourceDriver;
use crate::storage::MemoryStore;
use std::fs;
use std::io;
use std::path::Path;

/// Entry names and contents of the standard fixture
pub const STANDARD_FIXTURE: &[(&str, &str)] = &[
    ("1_foobar.up.sql", "1 up"),
    ("1_foobar.down.sql", "1 down"),
    ("3_foobar.up.sql", "3 up"),
    ("4_foobar.up.sql", "4 up"),
    ("4_foobar.down.sql", "4 down"),
    ("5_foobar.down.sql", "5 down"),
    ("7_foobar.up.sql", "7 up"),
    ("7_foobar.down.sql", "7 down"),
];

/// Write the standard fixture into `dir`
pub fn write_standard_fixture(dir: &Path) -> io::Result<()> {
    for (name, contents) in STANDARD_FIXTURE {
        fs::write(dir.join(name), contents)?;
    }
    Ok(())
}

/// The standard fixture as an in-memory store
pub fn standard_memory_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    for (name, contents) in STANDARD_FIXTURE {
        store.insert(*name, *contents);
    }
    store
}

/// Run every check against a source opened over the standard fixture
pub fn run_conformance(driver: &dyn SourceDriver) {
    check_first(driver);
    check_prev(driver);
    check_next(driver);
    check_read_up(driver);
    check_read_down(driver);
}

pub fn check_first(driver: &dyn SourceDriver) {
    match driver.first() {
        Ok(version) => assert_eq!(version, 1, "first() returned the wrong version"),
        Err(e) => panic!("first() failed: {}", e),
    }
}

pub fn check_prev(driver: &dyn SourceDriver) {
    // (input, expected previous version)
    let cases: [(u64, Option<u64>); 9] = [
        (0, None),
        (1, None),
        (2, Some(1)),
        (3, Some(1)),
        (4, Some(3)),
        (5, Some(4)),
        (6, Some(5)),
        (7, Some(5)),
        (8, Some(7)),
    ];

    for (version, expected) in cases {
        match (driver.prev(version), expected) {
            (Ok(prev), Some(want)) => assert_eq!(prev, want, "prev({})", version),
            (Err(e), None) => assert!(e.is_not_found(), "prev({}): unexpected error {}", version, e),
            (Ok(prev), None) => panic!("prev({}) returned {}, expected not found", version, prev),
            (Err(e), Some(want)) => panic!("prev({}) failed with {}, expected {}", version, e, want),
        }
    }
}

pub fn check_next(driver: &dyn SourceDriver) {
    let cases: [(u64, Option<u64>); 9] = [
        (0, Some(1)),
        (1, Some(3)),
        (2, Some(3)),
        (3, Some(4)),
        (4, Some(5)),
        (5, Some(7)),
        (6, Some(7)),
        (7, None),
        (8, None),
    ];

    for (version, expected) in cases {
        match (driver.next(version), expected) {
            (Ok(next), Some(want)) => assert_eq!(next, want, "next({})", version),
            (Err(e), None) => assert!(e.is_not_found(), "next({}): unexpected error {}", version, e),
            (Ok(next), None) => panic!("next({}) returned {}, expected not found", version, next),
            (Err(e), Some(want)) => panic!("next({}) failed with {}, expected {}", version, e, want),
        }
    }
}

pub fn check_read_up(driver: &dyn SourceDriver) {
    let present = [1, 3, 4, 7];
    for version in 0..=8u64 {
        check_read(version, present.contains(&version), "up", driver.read_up(version));
    }
}

pub fn check_read_down(driver: &dyn SourceDriver) {
    let present = [1, 4, 5, 7];
    for version in 0..=8u64 {
        check_read(version, present.contains(&version), "down", driver.read_down(version));
    }
}

fn check_read(
    version: u64,
    expect_present: bool,
    direction: &str,
    result: crate::Result<(crate::storage::MigrationReader, String)>,
) {
    match result {
        Ok((mut reader, identifier)) => {
            assert!(
                expect_present,
                "read_{}({}) succeeded, expected not found",
                direction, version
            );
            assert!(
                !identifier.is_empty(),
                "read_{}({}) returned an empty identifier",
                direction,
                version
            );

            let mut content = String::new();
            if let Err(e) = io::Read::read_to_string(&mut reader, &mut content) {
                panic!("read_{}({}) stream failed: {}", direction, version, e);
            }
            assert_eq!(
                content,
                format!("{} {}", version, direction),
                "read_{}({}) returned the wrong content",
                direction,
                version
            );
        }
        Err(e) => {
            assert!(
                !expect_present,
                "read_{}({}) failed: {}",
                direction, version, e
            );
            assert!(
                e.is_not_found(),
                "read_{}({}): expected not found, got {}",
                direction,
                version,
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MigrationSource;

    #[test]
    fn test_memory_source_conforms() {
        let source = MigrationSource::new(standard_memory_store()).unwrap();
        run_conformance(&source);
    }
}
