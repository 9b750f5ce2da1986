use std::path::Path;
use std::sync::Arc;

use keel_fs::{Backend, DirEntry, FileKind, ReadDir};

use crate::sentinel::{discard, OrSentinel};
use crate::Filesystem;

/// Cursor over the entries of one directory.
///
/// After construction and after every [`advance`](Self::advance) the
/// iterator is either positioned at an entry or at the end. Failing to open
/// the directory behaves exactly like listing an empty one:
///
/// ```no_run
/// let fs = keel_api::Filesystem::host();
/// let mut it = fs.read_dir("assets");
/// while !it.at_end() {
///     println!("{:?}", it.name());
///     it.advance();
/// }
/// ```
///
/// The iterator exclusively owns its backend handle, which is released as
/// soon as the end is reached or the iterator is dropped. It cannot be cloned.
pub struct DirectoryIterator {
    backend: Arc<dyn Backend>,
    handle: Option<ReadDir>,
    current: Option<DirEntry>,
}

impl DirectoryIterator {
    /// Opens `path` for iteration; an empty path lists the filesystem's
    /// current directory.
    pub fn open<T: AsRef<Path>>(fs: &Filesystem, path: T) -> Self {
        let path = path.as_ref();
        let path = if path.as_os_str().is_empty() {
            fs.current_dir.as_path()
        } else {
            path
        };

        let handle = fs.backend.read_dir(path).map(Some).or_sentinel("read_dir", None);
        let mut iter = Self { backend: fs.backend.clone(), handle, current: None };
        iter.advance();
        iter
    }

    /// Moves to the next entry. Reaching the end or hitting a backend error
    /// releases the handle; advancing at the end does nothing.
    pub fn advance(&mut self) -> &mut Self {
        let Some(handle) = self.handle.as_mut() else {
            return self;
        };
        match handle.next() {
            Some(Ok(entry)) => self.current = Some(entry),
            Some(Err(error)) => {
                discard("advance", &error);
                self.close();
            }
            None => self.close(),
        }
        self
    }

    fn close(&mut self) {
        self.handle = None;
        self.current = None;
    }

    /// Returns true once there are no more entries.
    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    /// File name of the current entry, or `None` at the end.
    pub fn name(&self) -> Option<&str> {
        self.current.as_ref().map(|entry| entry.name.as_str())
    }

    /// Full path of the current entry, or `None` at the end.
    pub fn path(&self) -> Option<&Path> {
        self.current.as_ref().map(|entry| entry.path.as_path())
    }

    fn kind(&self, op: &'static str) -> Option<FileKind> {
        let entry = self.current.as_ref()?;
        self.backend.kind(&entry.path).map(Some).or_sentinel(op, None)
    }

    /// Returns true if the current entry is a directory. False at the end or
    /// when the type cannot be determined.
    pub fn is_directory(&self) -> bool {
        self.kind("entry_is_directory") == Some(FileKind::Directory)
    }

    /// Returns true if the current entry is a regular file. False at the end
    /// or when the type cannot be determined.
    pub fn is_regular_file(&self) -> bool {
        self.kind("entry_is_regular_file") == Some(FileKind::File)
    }
}

impl crate::Filesystem {
    /// Opens a [`DirectoryIterator`] over `path`.
    pub fn read_dir<T: AsRef<Path>>(&self, path: T) -> DirectoryIterator {
        DirectoryIterator::open(self, path)
    }
}
