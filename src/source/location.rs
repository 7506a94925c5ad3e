//! Source location strings
//!
//! A location is `scheme://path` or `scheme:path`. The scheme picks the driver
//! in a [`SourceRegistry`](crate::registry::SourceRegistry); the path names
//! the root directory for disk-backed drivers.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::path::{Component, Path, PathBuf};

#[allow(clippy::expect_used)]
static SCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").expect("scheme pattern is valid")
});

/// Parsed source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub scheme: String,
    /// Percent-decoded path, possibly empty or relative
    pub path: String,
}

impl Location {
    pub fn parse(location: &str) -> Result<Self> {
        let (scheme, rest) = location
            .split_once(':')
            .ok_or_else(|| Error::invalid_location(location, "missing scheme"))?;

        if !SCHEME.is_match(scheme) {
            return Err(Error::invalid_location(
                location,
                format!("invalid scheme '{}'", scheme),
            ));
        }

        // `scheme://path` and the opaque `scheme:path` form
        let rest = rest.strip_prefix("//").unwrap_or(rest);
        let rest = rest.split(['?', '#']).next().unwrap_or_default();

        let path = percent_decode_str(rest)
            .decode_utf8()
            .map_err(|e| Error::invalid_location(location, e.to_string()))?
            .into_owned();

        Ok(Self {
            scheme: scheme.to_string(),
            path,
        })
    }

    /// Resolve the path to an absolute directory.
    ///
    /// Absolute paths are kept as-is, an empty path is `base`, and relative
    /// paths are joined to `base` and normalized.
    pub fn resolve(&self, base: &Path) -> PathBuf {
        if self.path.is_empty() {
            return base.to_path_buf();
        }

        let path = Path::new(&self.path);
        if path.is_absolute() {
            return path.to_path_buf();
        }

        normalize(&base.join(path))
    }
}

/// Lexically remove `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute() {
        let location = Location::parse("file:///var/lib/app/migrations").unwrap();
        assert_eq!(location.scheme, "file");
        assert_eq!(location.path, "/var/lib/app/migrations");
        assert_eq!(
            location.resolve(Path::new("/home/app")),
            PathBuf::from("/var/lib/app/migrations")
        );
    }

    #[test]
    fn test_parse_relative_forms() {
        let base = Path::new("/home/app");

        let plain = Location::parse("file://foo").unwrap();
        assert_eq!(plain.path, "foo");
        assert_eq!(plain.resolve(base), PathBuf::from("/home/app/foo"));

        let dotted = Location::parse("file://./foo").unwrap();
        assert_eq!(dotted.resolve(base), PathBuf::from("/home/app/foo"));

        let parent = Location::parse("file://../shared/migrations").unwrap();
        assert_eq!(parent.resolve(base), PathBuf::from("/home/shared/migrations"));

        let opaque = Location::parse("file:db/migrations").unwrap();
        assert_eq!(opaque.resolve(base), PathBuf::from("/home/app/db/migrations"));
    }

    #[test]
    fn test_empty_path_defaults_to_base() {
        let location = Location::parse("file://").unwrap();
        assert_eq!(location.path, "");
        assert_eq!(location.resolve(Path::new("/srv")), PathBuf::from("/srv"));
    }

    #[test]
    fn test_query_fragment_and_escapes() {
        let location = Location::parse("file:///tmp/my%20migrations?x-debug=1#frag").unwrap();
        assert_eq!(location.path, "/tmp/my migrations");
    }

    #[test]
    fn test_invalid_locations() {
        let err = Location::parse("/no/scheme/here").unwrap_err();
        assert_eq!(err.error_code(), "E_INVALID_LOCATION");

        let err = Location::parse("1file://foo").unwrap_err();
        assert!(err.to_string().contains("invalid scheme"));

        assert!(Location::parse("file:///bad%ff").is_err());
    }
}
