//! Free functions over the operating system's filesystem.

use std::path::Path;

use bytes::Bytes;
use lazy_static::lazy_static;

use crate::{DirectoryIterator, Filesystem};

lazy_static! {
    static ref HOST: Filesystem = Filesystem::host();
}

/// See [`Filesystem::exists`].
pub fn exists<T: AsRef<Path>>(path: T) -> bool {
    HOST.exists(path)
}

/// See [`Filesystem::is_directory`].
pub fn is_directory<T: AsRef<Path>>(path: T) -> bool {
    HOST.is_directory(path)
}

/// See [`Filesystem::is_regular_file`].
pub fn is_regular_file<T: AsRef<Path>>(path: T) -> bool {
    HOST.is_regular_file(path)
}

/// See [`Filesystem::last_write_time`].
pub fn last_write_time<T: AsRef<Path>>(path: T) -> i64 {
    HOST.last_write_time(path)
}

/// See [`Filesystem::file_size`].
pub fn file_size<T: AsRef<Path>>(path: T) -> u64 {
    HOST.file_size(path)
}

/// See [`Filesystem::remove`].
pub fn remove<T: AsRef<Path>>(path: T) -> bool {
    HOST.remove(path)
}

/// See [`Filesystem::remove_all`].
pub fn remove_all<T: AsRef<Path>>(path: T) -> bool {
    HOST.remove_all(path)
}

/// See [`Filesystem::create_directory`].
pub fn create_directory<T: AsRef<Path>>(path: T) -> bool {
    HOST.create_directory(path)
}

/// See [`Filesystem::create_directories`].
pub fn create_directories<T: AsRef<Path>>(path: T) -> bool {
    HOST.create_directories(path)
}

/// See [`Filesystem::copy_file`].
pub fn copy_file<T: AsRef<Path>, U: AsRef<Path>>(from: T, to: U) -> bool {
    HOST.copy_file(from, to)
}

/// See [`Filesystem::copy_file_with`].
pub fn copy_file_with<T: AsRef<Path>, U: AsRef<Path>>(from: T, to: U, overwrite: bool) -> bool {
    HOST.copy_file_with(from, to, overwrite)
}

/// See [`Filesystem::rename`].
pub fn rename<T: AsRef<Path>, U: AsRef<Path>>(from: T, to: U) -> bool {
    HOST.rename(from, to)
}

/// See [`Filesystem::read_file`].
pub fn read_file<T: AsRef<Path>>(path: T) -> Option<Bytes> {
    HOST.read_file(path)
}

/// See [`Filesystem::read_file_utf8`].
pub fn read_file_utf8<T: AsRef<Path>>(path: T) -> Option<String> {
    HOST.read_file_utf8(path)
}

/// See [`Filesystem::read_dir`].
pub fn read_dir<T: AsRef<Path>>(path: T) -> DirectoryIterator {
    HOST.read_dir(path)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    #[test]
    fn test_free_functions_use_host() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, b"host").unwrap();

        assert!(super::is_regular_file(&file));
        assert_eq!(super::file_size(&file), 4);
        assert!(super::copy_file(&file, dir.path().join("copy")));
        assert_eq!(super::read_file_utf8(dir.path().join("copy")).as_deref(), Some("host"));
        assert!(super::remove_all(dir.path().join("copy")));
        assert_eq!(super::read_dir(dir.path()).name(), Some("file"));
    }
}
