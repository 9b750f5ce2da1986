use std::path::Path;

use keel_fs::Error;

use crate::sentinel::Succeeded;

/// Treats a target that is already gone as removed.
fn ignore_absent(error: Error) -> keel_fs::Result<()> {
    if error.is_absent() {
        Ok(())
    } else {
        Err(error)
    }
}

impl crate::Filesystem {
    /// Removes a file or empty directory.
    ///
    /// Returns true if the target was removed or didn't exist.
    pub fn remove<T: AsRef<Path>>(&self, path: T) -> bool {
        self.backend
            .remove(path.as_ref())
            .or_else(ignore_absent)
            .succeeded("remove")
    }

    /// Recursively removes a file or directory.
    ///
    /// Returns true if the target was removed or didn't exist.
    pub fn remove_all<T: AsRef<Path>>(&self, path: T) -> bool {
        self.backend
            .remove_all(path.as_ref())
            .or_else(ignore_absent)
            .succeeded("remove_all")
    }
}
