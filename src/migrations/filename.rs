//! Migration entry name parsing
//!
//! Entry names follow `{version}_{identifier}.{up|down}.{ext}`. Anything else
//! in the directory (READMEs, scratch files) is not a migration and is skipped
//! by the caller.

use super::Direction;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::expect_used)]
static MIGRATION_FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)_(.*)\.(down|up)\.(.+)$").expect("migration filename pattern is valid")
});

/// A directory entry recognised as a migration script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    pub version: u64,
    pub identifier: String,
    pub direction: Direction,
    /// Entry name as listed by the store
    pub raw: String,
}

impl MigrationFile {
    /// Parse an entry name.
    ///
    /// Returns `Ok(None)` for names that are not migrations, and an error for
    /// names that are shaped like a migration but carry a version that does
    /// not fit in a `u64`.
    pub fn parse(name: &str) -> Result<Option<Self>> {
        let Some(caps) = MIGRATION_FILE.captures(name) else {
            return Ok(None);
        };

        let version = caps[1]
            .parse::<u64>()
            .map_err(|e| Error::invalid_version(name, e.to_string()))?;

        let direction = caps[3]
            .parse::<Direction>()
            .map_err(|reason| Error::invalid_version(name, reason))?;

        Ok(Some(Self {
            version,
            identifier: caps[2].to_string(),
            direction,
            raw: name.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_up_and_down() {
        let up = MigrationFile::parse("1_foobar.up.sql").unwrap().unwrap();
        assert_eq!(up.version, 1);
        assert_eq!(up.identifier, "foobar");
        assert_eq!(up.direction, Direction::Up);
        assert_eq!(up.raw, "1_foobar.up.sql");

        let down = MigrationFile::parse("20250104123045_create_users.down.sql")
            .unwrap()
            .unwrap();
        assert_eq!(down.version, 20250104123045);
        assert_eq!(down.identifier, "create_users");
        assert_eq!(down.direction, Direction::Down);
    }

    #[test]
    fn test_identifier_keeps_inner_dots_and_underscores() {
        let file = MigrationFile::parse("7_add_users.v2.up.psql").unwrap().unwrap();
        assert_eq!(file.version, 7);
        assert_eq!(file.identifier, "add_users.v2");
    }

    #[test]
    fn test_leading_zeros() {
        let file = MigrationFile::parse("0003_init.up.sql").unwrap().unwrap();
        assert_eq!(file.version, 3);
    }

    #[test]
    fn test_non_migration_names_are_skipped() {
        for name in [
            "README.md",
            "1_foobar.sql",
            "1_foobar.sideways.sql",
            "1_foobar.up.",
            "foobar.up.sql",
            "v1_foobar.up.sql",
            "1-foobar.up.sql",
            ".gitkeep",
        ] {
            assert!(
                MigrationFile::parse(name).unwrap().is_none(),
                "expected {} to be skipped",
                name
            );
        }
    }

    #[test]
    fn test_version_overflow_is_an_error() {
        let err = MigrationFile::parse("99999999999999999999999_foo.up.sql").unwrap_err();
        assert!(err.is_construction_error());
        assert!(err.to_string().contains("99999999999999999999999_foo.up.sql"));
    }
}
