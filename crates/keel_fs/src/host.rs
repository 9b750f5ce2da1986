use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::path::Path;
use std::time::SystemTime;

use tracing::trace;

use crate::backend::{Backend, DirEntry, FileKind, ReadDir};
use crate::error::{Error, Result};

/// Backend over the operating system's filesystem, via `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostBackend;

impl HostBackend {
    pub fn new() -> Self {
        Self
    }
}

fn kind_of(file_type: fs::FileType) -> FileKind {
    if file_type.is_dir() {
        FileKind::Directory
    } else if file_type.is_file() {
        FileKind::File
    } else {
        FileKind::Other
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl Backend for HostBackend {
    fn kind(&self, path: &Path) -> Result<FileKind> {
        let metadata = fs::metadata(path).map_err(|e| Error::from_io(path, e))?;
        Ok(kind_of(metadata.file_type()))
    }

    fn size(&self, path: &Path) -> Result<u64> {
        let metadata = fs::metadata(path).map_err(|e| Error::from_io(path, e))?;
        if !metadata.is_file() {
            return Err(Error::wrong_type(path, FileKind::File));
        }
        Ok(metadata.len())
    }

    fn modified(&self, path: &Path) -> Result<SystemTime> {
        fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .map_err(|e| Error::from_io(path, e))
    }

    fn remove(&self, path: &Path) -> Result<()> {
        // symlink_metadata so that a link is removed rather than its target
        let metadata = fs::symlink_metadata(path).map_err(|e| Error::from_io(path, e))?;
        let removed = if metadata.is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };
        removed.map_err(|e| Error::from_io(path, e))
    }

    fn remove_all(&self, path: &Path) -> Result<()> {
        let metadata = fs::symlink_metadata(path).map_err(|e| Error::from_io(path, e))?;
        let removed = if metadata.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        removed.map_err(|e| Error::from_io(path, e))
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir(path).map_err(|e| Error::from_io(path, e))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::precondition(path, "empty path"));
        }
        fs::create_dir_all(path).map_err(|e| Error::from_io(path, e))
    }

    fn copy_file(&self, from: &Path, to: &Path, overwrite: bool) -> Result<()> {
        let metadata = fs::metadata(from).map_err(|e| Error::from_io(from, e))?;
        if !metadata.is_file() {
            return Err(Error::wrong_type(from, FileKind::File));
        }

        if overwrite {
            // fs::copy truncates the destination before reading the source
            if same_file(from, to) {
                return Err(Error::precondition(to, "source and destination are the same file"));
            }
        } else {
            // create_new claims the destination, failing if it already exists
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(to)
                .map_err(|e| Error::from_io(to, e))?;
        }

        if let Err(source) = fs::copy(from, to) {
            if !overwrite {
                if let Err(cleanup) = fs::remove_file(to) {
                    trace!(path = %to.display(), error = %cleanup, "Failed to release claimed destination");
                }
            }
            return Err(Error::from_io(to, source));
        }
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        // fs::rename replaces an existing destination; a dangling link counts as existing
        match fs::symlink_metadata(to) {
            Ok(_) => return Err(Error::Exists(to.to_path_buf())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::from_io(to, e)),
        }
        fs::rename(from, to).map_err(|e| Error::from_io(from, e))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        // Opening a fifo blocks until a writer appears
        let kind = self.kind(path)?;
        if kind != FileKind::File {
            return Err(Error::wrong_type(path, FileKind::File));
        }

        let file = File::open(path).map_err(|e| Error::from_io(path, e))?;
        let metadata = file.metadata().map_err(|e| Error::from_io(path, e))?;
        if !metadata.is_file() {
            return Err(Error::wrong_type(path, FileKind::File));
        }

        let len = usize::try_from(metadata.len())
            .map_err(|_| Error::precondition(path, "file does not fit in memory"))?;
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(len).map_err(|_| Error::Io {
            path: path.to_path_buf(),
            source: io::Error::from(io::ErrorKind::OutOfMemory),
        })?;

        // Never read past the length observed at open time
        file.take(metadata.len())
            .read_to_end(&mut buffer)
            .map_err(|e| Error::from_io(path, e))?;
        Ok(buffer)
    }

    fn read_dir(&self, path: &Path) -> Result<ReadDir> {
        let entries = fs::read_dir(path).map_err(|e| Error::from_io(path, e))?;
        let dir = path.to_path_buf();
        Ok(Box::new(entries.map(move |entry| {
            entry
                .map(|entry| {
                    DirEntry::new(entry.file_name().to_string_lossy().into_owned(), entry.path())
                })
                .map_err(|e| Error::from_io(&dir, e))
        })))
    }
}
