//! Location resolution against the process working directory.
//!
//! Changing the working directory affects the whole test binary, so every
//! check lives in a single test in its own file.

use rustf_migrate_source::{FileSource, SourceDriver};
use std::env;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_relative_locations_use_working_directory_at_open() {
    let original = env::current_dir().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().canonicalize().unwrap();

    fs::create_dir(base.join("foo")).unwrap();
    fs::write(base.join("foo").join("1_foobar.up.sql"), "1 up").unwrap();

    env::set_current_dir(&base).unwrap();

    let result = std::panic::catch_unwind(|| {
        // dir: foo
        let plain = FileSource::open("file://foo").unwrap();
        assert_eq!(plain.root(), base.join("foo"));
        assert_eq!(plain.first().unwrap(), 1);

        // dir: ./foo
        let dotted = FileSource::open("file://./foo").unwrap();
        assert_eq!(dotted.root(), base.join("foo"));
        assert_eq!(dotted.first().unwrap(), 1);

        // no path: the working directory itself
        let current = FileSource::open("file://").unwrap();
        assert_eq!(current.root(), base.as_path());
        assert!(current.first().unwrap_err().is_not_found());

        // the root is fixed at open time
        env::set_current_dir(base.join("foo")).unwrap();
        assert_eq!(plain.root(), base.join("foo"));
        assert_eq!(plain.first().unwrap(), 1);
        assert!(plain.read_up(1).is_ok());
    });

    env::set_current_dir(&original).unwrap();
    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}
