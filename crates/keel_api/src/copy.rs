use std::path::Path;

use crate::sentinel::Succeeded;

impl crate::Filesystem {
    /// Copies a regular file, failing if `to` already exists.
    ///
    /// `from` must exist and be a regular file; the parent of `to` must exist
    /// and be a directory.
    pub fn copy_file<T: AsRef<Path>, U: AsRef<Path>>(&self, from: T, to: U) -> bool {
        self.copy_file_with(from, to, false)
    }

    /// Copies a regular file, replacing an existing regular file at `to` when
    /// `overwrite` is set.
    pub fn copy_file_with<T: AsRef<Path>, U: AsRef<Path>>(
        &self,
        from: T,
        to: U,
        overwrite: bool,
    ) -> bool {
        self.backend
            .copy_file(from.as_ref(), to.as_ref(), overwrite)
            .succeeded("copy_file")
    }

    /// Moves a file or directory.
    ///
    /// `from` must exist and the parent of `to` must exist and be a directory.
    /// An existing `to`, even a dangling symbolic link, is never replaced: the
    /// call fails and both paths are left untouched.
    pub fn rename<T: AsRef<Path>, U: AsRef<Path>>(&self, from: T, to: U) -> bool {
        self.backend
            .rename(from.as_ref(), to.as_ref())
            .succeeded("rename")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test::Fixture;

    #[test]
    fn test_copy_file_without_overwrite() {
        for fixture in Fixture::all() {
            let fs = fixture.fs();
            let from = fixture.write("from", b"source");
            let to = fixture.path("to");

            assert!(fs.copy_file(&from, &to));
            assert_eq!(fs.read_file(&to).unwrap().as_ref(), b"source");
            assert!(fs.is_regular_file(&from));

            let again = fixture.write("from", b"changed");
            assert!(!fs.copy_file(&again, &to));
            assert_eq!(fs.read_file(&to).unwrap().as_ref(), b"source");
        }
    }

    #[test]
    fn test_copy_file_with_overwrite() {
        for fixture in Fixture::all() {
            let fs = fixture.fs();
            let from = fixture.write("from", b"fresh");
            let to = fixture.write("to", b"stale content");

            assert!(fs.copy_file_with(&from, &to, true));
            assert_eq!(fs.read_file(&to).unwrap().as_ref(), b"fresh");
            assert_eq!(fs.file_size(&to), 5);
        }
    }

    #[test]
    fn test_copy_file_preconditions() {
        for fixture in Fixture::all() {
            let fs = fixture.fs();
            let dir = fixture.mkdir("dir");
            let file = fixture.write("file", b"x");

            assert!(!fs.copy_file(fixture.path("missing"), fixture.path("out")));
            assert!(!fs.copy_file(&dir, fixture.path("out")));
            assert!(!fs.copy_file(&file, fixture.path("missing/out")));
            assert!(!fs.copy_file_with(&file, &dir, true));
            assert!(!fs.exists(fixture.path("out")));
        }
    }

    #[test]
    fn test_rename_file_and_directory() {
        for fixture in Fixture::all() {
            let fs = fixture.fs();
            let file = fixture.write("file", b"payload");
            fixture.mkdir("dir/sub");
            fixture.write("dir/sub/leaf", b"leaf");

            let moved = fixture.path("dir/moved");
            assert!(fs.rename(&file, &moved));
            assert!(!fs.exists(&file));
            assert_eq!(fs.read_file(&moved).unwrap().as_ref(), b"payload");

            let renamed = fixture.path("renamed");
            assert!(fs.rename(fixture.path("dir"), &renamed));
            assert!(fs.is_regular_file(fixture.path("renamed/sub/leaf")));
            assert!(!fs.exists(fixture.path("dir")));
        }
    }

    #[test]
    fn test_rename_never_replaces_destination() {
        for fixture in Fixture::all() {
            let fs = fixture.fs();
            let from = fixture.write("from", b"from");
            let to = fixture.write("to", b"to");

            assert!(!fs.rename(&from, &to));
            assert_eq!(fs.read_file(&from).unwrap().as_ref(), b"from");
            assert_eq!(fs.read_file(&to).unwrap().as_ref(), b"to");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_rename_never_replaces_dangling_symlink() {
        let fixture = Fixture::host();
        let fs = fixture.fs();
        let from = fixture.write("from", b"payload");
        let to = fixture.path("to");
        std::os::unix::fs::symlink(fixture.path("nowhere"), &to).unwrap();

        assert!(!fs.rename(&from, &to));
        assert_eq!(fs.read_file(&from).unwrap().as_ref(), b"payload");
        assert!(std::fs::symlink_metadata(&to).unwrap().file_type().is_symlink());
    }

    #[test]
    fn test_rename_onto_itself_fails() {
        for fixture in Fixture::all() {
            let fs = fixture.fs();
            let file = fixture.write("file", b"x");

            assert!(!fs.rename(&file, &file));
            assert!(fs.is_regular_file(&file));
        }
    }

    #[test]
    fn test_rename_preconditions() {
        for fixture in Fixture::all() {
            let fs = fixture.fs();
            let file = fixture.write("file", b"x");

            assert!(!fs.rename(fixture.path("missing"), fixture.path("out")));
            assert!(!fs.rename(&file, fixture.path("missing/out")));
            assert!(fs.is_regular_file(&file));
        }
    }
}
