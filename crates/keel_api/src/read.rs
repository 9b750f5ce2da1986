use std::path::Path;

use bytes::Bytes;

use crate::sentinel::OrSentinel;

impl crate::Filesystem {
    /// Reads the whole regular file at `path` into a new buffer sized to the
    /// file's length at the time of the read.
    ///
    /// Returns `None` if the file is missing, is not a regular file, cannot be
    /// read or does not fit in memory.
    pub fn read_file<T: AsRef<Path>>(&self, path: T) -> Option<Bytes> {
        self.backend
            .read(path.as_ref())
            .map(|data| Some(Bytes::from(data)))
            .or_sentinel("read_file", None)
    }

    /// Reads the whole file at `path` as text, replacing invalid UTF-8.
    pub fn read_file_utf8<T: AsRef<Path>>(&self, path: T) -> Option<String> {
        self.read_file(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }
}
