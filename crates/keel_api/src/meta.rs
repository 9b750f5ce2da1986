use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use keel_fs::FileKind;

use crate::sentinel::OrSentinel;

/// Returned by [`crate::Filesystem::file_size`] when the size cannot be read.
pub const FILE_SIZE_UNKNOWN: u64 = u64::MAX;

/// Whole seconds since the Unix epoch, rounded down, so earlier times are
/// negative.
fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
        Err(before) => {
            let before = before.duration();
            let partial = i64::from(before.subsec_nanos() > 0);
            i64::try_from(before.as_secs())
                .ok()
                .and_then(|secs| secs.checked_add(partial))
                .map(|secs| -secs)
                .unwrap_or(i64::MIN)
        }
    }
}

impl crate::Filesystem {
    fn kind(&self, op: &'static str, path: &Path) -> Option<FileKind> {
        self.backend.kind(path).map(Some).or_sentinel(op, None)
    }

    /// Returns true if a file or directory exists at `path`; false if it
    /// doesn't exist or there was an error.
    pub fn exists<T: AsRef<Path>>(&self, path: T) -> bool {
        self.kind("exists", path.as_ref()).is_some()
    }

    /// Returns true if `path` exists and is a directory.
    pub fn is_directory<T: AsRef<Path>>(&self, path: T) -> bool {
        self.kind("is_directory", path.as_ref()) == Some(FileKind::Directory)
    }

    /// Returns true if `path` exists and is a regular file.
    pub fn is_regular_file<T: AsRef<Path>>(&self, path: T) -> bool {
        self.kind("is_regular_file", path.as_ref()) == Some(FileKind::File)
    }

    /// Gets the last write time of `path` in seconds since the Unix epoch, or
    /// `0` if there was an error.
    pub fn last_write_time<T: AsRef<Path>>(&self, path: T) -> i64 {
        self.backend
            .modified(path.as_ref())
            .map(unix_seconds)
            .or_sentinel("last_write_time", 0)
    }

    /// Gets the size of the regular file at `path`, or [`FILE_SIZE_UNKNOWN`]
    /// if there was an error.
    pub fn file_size<T: AsRef<Path>>(&self, path: T) -> u64 {
        self.backend
            .size(path.as_ref())
            .or_sentinel("file_size", FILE_SIZE_UNKNOWN)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test::Fixture;

    #[test]
    fn test_unix_seconds() {
        assert_eq!(unix_seconds(UNIX_EPOCH + Duration::from_secs(90)), 90);
        assert_eq!(unix_seconds(UNIX_EPOCH - Duration::from_secs(90)), -90);
        assert_eq!(unix_seconds(UNIX_EPOCH + Duration::from_millis(1500)), 1);
        assert_eq!(unix_seconds(UNIX_EPOCH - Duration::from_millis(500)), -1);
        assert_eq!(unix_seconds(UNIX_EPOCH - Duration::from_millis(1500)), -2);
    }

    #[test]
    fn test_queries_on_file_and_directory() {
        for fixture in Fixture::all() {
            let fs = fixture.fs();
            let dir = fixture.mkdir("dir");
            let file = fixture.write("dir/file.txt", b"hello world");

            assert!(fs.exists(&dir));
            assert!(fs.is_directory(&dir));
            assert!(!fs.is_regular_file(&dir));

            assert!(fs.exists(&file));
            assert!(fs.is_regular_file(&file));
            assert!(!fs.is_directory(&file));
            assert_eq!(fs.file_size(&file), 11);
        }
    }

    #[test]
    fn test_file_size_of_directory_is_unknown() {
        for fixture in Fixture::all() {
            let dir = fixture.mkdir("dir");
            assert_eq!(fixture.fs().file_size(&dir), FILE_SIZE_UNKNOWN);
        }
    }

    #[test]
    fn test_last_write_time_is_recent() {
        let now = unix_seconds(SystemTime::now());
        for fixture in Fixture::all() {
            let file = fixture.write("file", b"x");
            let written = fixture.fs().last_write_time(&file);
            assert!((written - now).abs() < 60, "{written} is not close to {now}");
        }
    }

    #[test]
    fn test_missing_path_yields_sentinels() {
        for fixture in Fixture::all() {
            let fs = fixture.fs();
            let missing = fixture.path("no/such/thing");

            assert!(!fs.exists(&missing));
            assert!(!fs.is_directory(&missing));
            assert!(!fs.is_regular_file(&missing));
            assert_eq!(fs.last_write_time(&missing), 0);
            assert_eq!(fs.file_size(&missing), FILE_SIZE_UNKNOWN);
        }
    }

    #[test]
    fn test_empty_path_does_not_exist() {
        for fixture in Fixture::all() {
            assert!(!fixture.fs().exists(""));
        }
    }
}
