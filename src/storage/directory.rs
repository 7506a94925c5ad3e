//! Disk directory backend

use super::{MigrationReader, MigrationStore};
use crate::error::{Error, ErrorContext, Result};
use crate::migrations::MigrationFile;
use std::fs;
use std::path::{Path, PathBuf};

/// Migration scripts stored in a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MigrationStore for DirectoryStore {
    fn list_entries(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| Error::root_unavailable(self.root.display().to_string(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| Error::root_unavailable(self.root.display().to_string(), e))?;

            // symlinks are followed; a dangling link is listed and fails on read
            if fs::metadata(entry.path()).is_ok_and(|meta| meta.is_dir()) {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    let name = raw.to_string_lossy();
                    if MigrationFile::parse(&name)?.is_some() {
                        return Err(Error::invalid_version(
                            name,
                            "entry name is not valid UTF-8",
                        ));
                    }
                    log::trace!("Skipping non UTF-8 entry: {:?}", raw);
                }
            }
        }

        Ok(names)
    }

    fn open_entry(&self, name: &str) -> Result<MigrationReader> {
        let path = self.root.join(name);
        let file = fs::File::open(&path)
            .with_context(|| format!("Failed to open migration file {}", path.display()))?;
        Ok(Box::new(file))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_lists_files_but_not_directories() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("1_init.up.sql"), "CREATE TABLE t (id INT);").unwrap();
        fs::write(temp_dir.path().join("README.md"), "docs").unwrap();
        fs::create_dir(temp_dir.path().join("2_nested.up.sql")).unwrap();

        let store = DirectoryStore::new(temp_dir.path());
        let mut names = store.list_entries().unwrap();
        names.sort();

        assert_eq!(names, vec!["1_init.up.sql", "README.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("shared");
        fs::create_dir(&target).unwrap();
        std::os::unix::fs::symlink(&target, temp_dir.path().join("3_x.up.sql")).unwrap();
        fs::write(temp_dir.path().join("1_init.up.sql"), "").unwrap();

        let store = DirectoryStore::new(temp_dir.path());
        assert_eq!(store.list_entries().unwrap(), vec!["1_init.up.sql"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_migration_name_fails_listing() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let name = OsStr::from_bytes(b"1_caf\xe9.up.sql");
        if fs::write(temp_dir.path().join(name), "1 up").is_err() {
            // filesystem refuses non UTF-8 names
            return;
        }
        fs::write(temp_dir.path().join("2_ok.up.sql"), "2 up").unwrap();

        let err = DirectoryStore::new(temp_dir.path()).list_entries().unwrap_err();
        assert!(matches!(err, Error::InvalidVersion { .. }));
        assert!(err.is_construction_error());
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_unrelated_name_is_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        if fs::write(temp_dir.path().join(OsStr::from_bytes(b"notes\xff.txt")), "").is_err() {
            return;
        }
        fs::write(temp_dir.path().join("2_ok.up.sql"), "2 up").unwrap();

        let store = DirectoryStore::new(temp_dir.path());
        assert_eq!(store.list_entries().unwrap(), vec!["2_ok.up.sql"]);
    }

    #[test]
    fn test_open_entry_reads_bytes() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("1_init.up.sql"), "1 up").unwrap();

        let store = DirectoryStore::new(temp_dir.path());
        let mut content = String::new();
        store
            .open_entry("1_init.up.sql")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();

        assert_eq!(content, "1 up");
    }

    #[test]
    fn test_missing_root_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(temp_dir.path().join("missing"));

        let err = store.list_entries().unwrap_err();
        assert!(matches!(err, Error::RootUnavailable { .. }));
        assert!(err.is_construction_error());
    }

    #[test]
    fn test_missing_entry_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(temp_dir.path());

        let err = match store.open_entry("1_gone.up.sql") {
            Ok(_) => panic!("expected open to fail"),
            Err(e) => e,
        };
        assert_eq!(err.error_code(), "E_IO");
        assert!(!err.is_not_found());
    }
}
