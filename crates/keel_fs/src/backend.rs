use std::path::{Path, PathBuf};
use std::time::SystemTime;

use strum_macros::Display;

use crate::error::Result;

/// Kind of a filesystem object, after following symbolic links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FileKind {
    File,
    Directory,
    /// Sockets, devices, fifos and anything else that is neither
    Other,
}

/// One entry produced while listing a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name of the entry, without any leading directory
    pub name: String,

    /// Full path of the entry, i.e. the listed directory joined with `name`
    pub path: PathBuf,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), path: path.into() }
    }
}

/// Native iteration handle over a directory listing. Dropping it releases the
/// handle.
pub type ReadDir = Box<dyn Iterator<Item = Result<DirEntry>> + Send>;

/// Capabilities a native filesystem must provide.
///
/// Implementations translate every native failure into [`crate::Error`]; no
/// native error type crosses this trait. All calls block until the native
/// operation completes.
pub trait Backend: Send + Sync {
    /// Kind of the object at `path`, following symbolic links.
    fn kind(&self, path: &Path) -> Result<FileKind>;

    /// Byte length of the regular file at `path`.
    fn size(&self, path: &Path) -> Result<u64>;

    /// Last modification time of the object at `path`.
    fn modified(&self, path: &Path) -> Result<SystemTime>;

    /// Removes a file, symbolic link or empty directory.
    fn remove(&self, path: &Path) -> Result<()>;

    /// Removes a file or a whole directory tree.
    fn remove_all(&self, path: &Path) -> Result<()>;

    /// Creates a single directory; the parent must be a directory.
    fn create_dir(&self, path: &Path) -> Result<()>;

    /// Creates a directory along with any missing ancestors.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Copies the regular file `from` to `to`. An existing `to` is replaced
    /// only when `overwrite` is set.
    fn copy_file(&self, from: &Path, to: &Path, overwrite: bool) -> Result<()>;

    /// Moves `from` to `to`. Fails with [`crate::Error::Exists`] if anything,
    /// including a dangling symbolic link, is already at `to`.
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Reads the whole regular file at `path`.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Opens a listing of the directory at `path`. Never yields `.` or `..`.
    fn read_dir(&self, path: &Path) -> Result<ReadDir>;
}
