use std::path::Path;

use crate::sentinel::Succeeded;

impl crate::Filesystem {
    /// Creates a single directory. The parent of `path` must exist and be a
    /// directory.
    ///
    /// Returns true if the directory was created or already exists as a
    /// directory.
    pub fn create_directory<T: AsRef<Path>>(&self, path: T) -> bool {
        let path = path.as_ref();
        self.backend
            .create_dir(path)
            .or_else(|error| {
                if error.is_exists() && self.is_directory(path) {
                    Ok(())
                } else {
                    Err(error)
                }
            })
            .succeeded("create_directory")
    }

    /// Creates a directory and any missing ancestors. Every existing ancestor
    /// must be a directory.
    ///
    /// Returns true if the directory was created or already exists as a
    /// directory.
    pub fn create_directories<T: AsRef<Path>>(&self, path: T) -> bool {
        self.backend
            .create_dir_all(path.as_ref())
            .succeeded("create_directories")
    }
}

#[cfg(test)]
mod tests {
    use crate::test::Fixture;

    #[test]
    fn test_create_directory() {
        for fixture in Fixture::all() {
            let fs = fixture.fs();
            let dir = fixture.path("dir");

            assert!(fs.create_directory(&dir));
            assert!(fs.is_directory(&dir));
            assert!(fs.create_directory(&dir), "existing directory is accepted");
        }
    }

    #[test]
    fn test_create_directory_requires_parent() {
        for fixture in Fixture::all() {
            let fs = fixture.fs();
            let nested = fixture.path("missing/child");

            assert!(!fs.create_directory(&nested));
            assert!(!fs.exists(&nested));
        }
    }

    #[test]
    fn test_create_directory_over_file_fails() {
        for fixture in Fixture::all() {
            let fs = fixture.fs();
            let file = fixture.write("file", b"x");

            assert!(!fs.create_directory(&file));
            assert!(fs.is_regular_file(&file));
            assert!(!fs.create_directory(fixture.path("file/child")));
        }
    }

    #[test]
    fn test_create_directories_builds_ancestors() {
        for fixture in Fixture::all() {
            let fs = fixture.fs();
            let deep = fixture.path("a/b/c/d");

            assert!(fs.create_directories(&deep));
            assert!(fs.is_directory(&deep));
            assert!(fs.is_directory(fixture.path("a/b")));
            assert!(fs.create_directories(&deep));
        }
    }

    #[test]
    fn test_create_directories_fails_on_file_ancestor() {
        for fixture in Fixture::all() {
            let fs = fixture.fs();
            fixture.write("blocker", b"x");

            assert!(!fs.create_directories(fixture.path("blocker/a/b")));
            assert!(!fs.create_directories(fixture.path("blocker")));
        }
    }

    #[test]
    fn test_create_directories_rejects_empty_path() {
        for fixture in Fixture::all() {
            assert!(!fixture.fs().create_directories(""));
        }
    }
}
