//! Embedded backend using rust-embed
//!
//! Applications embed their migrations folder with their own `RustEmbed`
//! struct and root the store at a subpath inside it:
//!
//! ```ignore
//! #[derive(rust_embed::RustEmbed)]
//! #[folder = "db/"]
//! struct Db;
//!
//! let store = EmbeddedStore::<Db>::new("migrations");
//! ```

use super::{MigrationReader, MigrationStore};
use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use std::fmt;
use std::io::{Cursor, ErrorKind};
use std::marker::PhantomData;

/// Migration scripts embedded in the binary, rooted at a subpath
pub struct EmbeddedStore<E: RustEmbed> {
    prefix: String,
    _assets: PhantomData<fn() -> E>,
}

impl<E: RustEmbed> EmbeddedStore<E> {
    /// Root the store at `subpath` inside the embedded folder.
    /// An empty subpath or `.` means the folder itself.
    pub fn new(subpath: impl AsRef<str>) -> Self {
        let trimmed = subpath.as_ref().trim_matches('/');
        let prefix = if trimmed == "." { "" } else { trimmed };
        Self {
            prefix: prefix.to_string(),
            _assets: PhantomData,
        }
    }

    pub fn subpath(&self) -> &str {
        &self.prefix
    }

    fn full_path(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.prefix, name)
        }
    }

    /// Path relative to the root, or None when the embedded path is outside it
    fn relative<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.prefix.is_empty() {
            Some(path)
        } else {
            path.strip_prefix(self.prefix.as_str())?.strip_prefix('/')
        }
    }
}

impl<E: RustEmbed> MigrationStore for EmbeddedStore<E> {
    fn list_entries(&self) -> Result<Vec<String>> {
        let mut found_root = self.prefix.is_empty();
        let mut names = Vec::new();

        for path in E::iter() {
            let Some(relative) = self.relative(&path) else {
                continue;
            };
            found_root = true;

            // nested files belong to subdirectories
            if relative.contains('/') {
                continue;
            }
            names.push(relative.to_string());
        }

        if !found_root {
            return Err(Error::root_unavailable(
                self.describe(),
                std::io::Error::new(ErrorKind::NotFound, "no embedded entries under this path"),
            ));
        }

        Ok(names)
    }

    fn open_entry(&self, name: &str) -> Result<MigrationReader> {
        let path = self.full_path(name);
        let file = E::get(&path).ok_or_else(|| {
            Error::Io(std::io::Error::new(
                ErrorKind::NotFound,
                format!("embedded entry '{}' does not exist", path),
            ))
        })?;
        Ok(Box::new(Cursor::new(file.data)))
    }

    fn describe(&self) -> String {
        if self.prefix.is_empty() {
            "embedded:/".to_string()
        } else {
            format!("embedded:/{}", self.prefix)
        }
    }
}

impl<E: RustEmbed> fmt::Debug for EmbeddedStore<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedStore")
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl<E: RustEmbed> Clone for EmbeddedStore<E> {
    fn clone(&self) -> Self {
        Self {
            prefix: self.prefix.clone(),
            _assets: PhantomData,
        }
    }
}
