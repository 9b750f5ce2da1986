use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::FileKind;

/// Error type for backend operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("No such file or directory: {}", .0.display())]
    Absent(PathBuf),

    #[error("Expected {expected} at {}", path.display())]
    WrongType { path: PathBuf, expected: FileKind },

    #[error("Destination already exists: {}", .0.display())]
    Exists(PathBuf),

    #[error("Precondition failed for {}: {reason}", path.display())]
    Precondition { path: PathBuf, reason: &'static str },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Classifies a native I/O failure on `path`.
    pub fn from_io(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Error::Absent(path),
            io::ErrorKind::AlreadyExists => Error::Exists(path),
            _ => Error::Io { path, source },
        }
    }

    pub fn wrong_type(path: impl AsRef<Path>, expected: FileKind) -> Self {
        Error::WrongType { path: path.as_ref().to_path_buf(), expected }
    }

    pub fn precondition(path: impl AsRef<Path>, reason: &'static str) -> Self {
        Error::Precondition { path: path.as_ref().to_path_buf(), reason }
    }

    /// Returns true if the target did not exist.
    pub fn is_absent(&self) -> bool {
        matches!(self, Error::Absent(_))
    }

    /// Returns true if the destination was already taken.
    pub fn is_exists(&self) -> bool {
        matches!(self, Error::Exists(_))
    }
}

pub type Result<A> = std::result::Result<A, Error>;
