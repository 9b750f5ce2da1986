use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;

use tracing::trace;

use crate::backend::{Backend, DirEntry, FileKind, ReadDir};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
enum Node {
    File { data: Vec<u8>, modified: SystemTime },
    Directory { modified: SystemTime },
}

impl Node {
    fn directory() -> Self {
        Node::Directory { modified: SystemTime::now() }
    }

    fn file(data: Vec<u8>) -> Self {
        Node::File { data, modified: SystemTime::now() }
    }

    fn kind(&self) -> FileKind {
        match self {
            Node::File { .. } => FileKind::File,
            Node::Directory { .. } => FileKind::Directory,
        }
    }
}

type Tree = BTreeMap<PathBuf, Node>;

/// Backend holding a directory tree in process memory.
///
/// Paths are resolved lexically against `/`: relative paths are treated as
/// relative to the root, `.` is dropped and `..` pops a component. Listings
/// are sorted by name. Useful wherever a test or tool needs a filesystem that
/// cannot touch the host.
#[derive(Debug)]
pub struct MemoryBackend {
    nodes: RwLock<Tree>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn root() -> PathBuf {
    PathBuf::from("/")
}

fn normalize(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(Error::Absent(path.to_path_buf()));
    }
    let mut normalized = root();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized = root(),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(name) => normalized.push(name),
        }
    }
    Ok(normalized)
}

/// Ensures the parent of `path` exists and is a directory.
fn check_parent(nodes: &Tree, path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    match nodes.get(parent) {
        Some(Node::Directory { .. }) => Ok(()),
        Some(Node::File { .. }) => Err(Error::wrong_type(parent, FileKind::Directory)),
        None => Err(Error::Absent(parent.to_path_buf())),
    }
}

fn has_children(nodes: &Tree, dir: &Path) -> bool {
    nodes.keys().any(|key| key.parent() == Some(dir))
}

impl MemoryBackend {
    /// Creates a backend containing only the root directory.
    pub fn new() -> Self {
        let mut nodes = Tree::new();
        nodes.insert(root(), Node::directory());
        Self { nodes: RwLock::new(nodes) }
    }

    /// Creates or truncates the regular file at `path` with `contents`. The
    /// parent must already be a directory.
    pub fn write(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
        let path = normalize(path.as_ref())?;
        let mut nodes = self.write_lock();
        check_parent(&nodes, &path)?;
        if let Some(Node::Directory { .. }) = nodes.get(&path) {
            return Err(Error::wrong_type(&path, FileKind::File));
        }
        nodes.insert(path, Node::file(contents.as_ref().to_vec()));
        Ok(())
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, Tree> {
        self.nodes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, Tree> {
        self.nodes.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn node(&self, path: &Path) -> Result<Node> {
        let path = normalize(path)?;
        self.read_lock().get(&path).cloned().ok_or(Error::Absent(path))
    }
}

impl Backend for MemoryBackend {
    fn kind(&self, path: &Path) -> Result<FileKind> {
        Ok(self.node(path)?.kind())
    }

    fn size(&self, path: &Path) -> Result<u64> {
        match self.node(path)? {
            Node::File { data, .. } => Ok(data.len() as u64),
            Node::Directory { .. } => Err(Error::wrong_type(path, FileKind::File)),
        }
    }

    fn modified(&self, path: &Path) -> Result<SystemTime> {
        match self.node(path)? {
            Node::File { modified, .. } | Node::Directory { modified } => Ok(modified),
        }
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let path = normalize(path)?;
        if path == root() {
            return Err(Error::precondition(&path, "cannot remove the root directory"));
        }
        let mut nodes = self.write_lock();
        match nodes.get(&path).map(Node::kind) {
            None => return Err(Error::Absent(path)),
            Some(FileKind::Directory) if has_children(&nodes, &path) => {
                return Err(Error::precondition(&path, "directory not empty"))
            }
            Some(_) => {}
        }
        nodes.remove(&path);
        Ok(())
    }

    fn remove_all(&self, path: &Path) -> Result<()> {
        let path = normalize(path)?;
        if path == root() {
            return Err(Error::precondition(&path, "cannot remove the root directory"));
        }
        let mut nodes = self.write_lock();
        if !nodes.contains_key(&path) {
            return Err(Error::Absent(path));
        }
        let before = nodes.len();
        nodes.retain(|key, _| !key.starts_with(&path));
        trace!(path = %path.display(), removed = before - nodes.len(), "Removed subtree");
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        let path = normalize(path)?;
        let mut nodes = self.write_lock();
        if nodes.contains_key(&path) {
            return Err(Error::Exists(path));
        }
        check_parent(&nodes, &path)?;
        nodes.insert(path, Node::directory());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let path = normalize(path)?;
        let mut nodes = self.write_lock();
        let mut ancestors = path.ancestors().collect::<Vec<_>>();
        ancestors.reverse();
        for ancestor in ancestors {
            match nodes.get(ancestor).map(Node::kind) {
                Some(FileKind::Directory) => {}
                Some(_) => return Err(Error::wrong_type(ancestor, FileKind::Directory)),
                None => {
                    nodes.insert(ancestor.to_path_buf(), Node::directory());
                }
            }
        }
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path, overwrite: bool) -> Result<()> {
        let from = normalize(from)?;
        let to = normalize(to)?;
        let mut nodes = self.write_lock();
        let data = match nodes.get(&from) {
            Some(Node::File { data, .. }) => data.clone(),
            Some(Node::Directory { .. }) => return Err(Error::wrong_type(&from, FileKind::File)),
            None => return Err(Error::Absent(from)),
        };
        check_parent(&nodes, &to)?;
        match nodes.get(&to) {
            Some(_) if !overwrite => return Err(Error::Exists(to)),
            Some(Node::Directory { .. }) => return Err(Error::wrong_type(&to, FileKind::File)),
            Some(Node::File { .. }) if from == to => {
                return Err(Error::precondition(&to, "source and destination are the same file"))
            }
            _ => {}
        }
        nodes.insert(to, Node::file(data));
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let from = normalize(from)?;
        let to = normalize(to)?;
        if from == root() {
            return Err(Error::precondition(&from, "cannot move the root directory"));
        }
        let mut nodes = self.write_lock();
        if !nodes.contains_key(&from) {
            return Err(Error::Absent(from));
        }
        check_parent(&nodes, &to)?;
        if nodes.contains_key(&to) {
            return Err(Error::Exists(to));
        }
        if to.starts_with(&from) {
            return Err(Error::precondition(&to, "cannot move a directory into itself"));
        }

        let moved = nodes
            .keys()
            .filter(|key| key.starts_with(&from))
            .cloned()
            .collect::<Vec<_>>();
        for key in moved {
            if let Some(node) = nodes.remove(&key) {
                let relative = key.strip_prefix(&from).unwrap_or(Path::new(""));
                let destination = if relative.as_os_str().is_empty() {
                    to.clone()
                } else {
                    to.join(relative)
                };
                nodes.insert(destination, node);
            }
        }
        Ok(())
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        match self.node(path)? {
            Node::File { data, .. } => Ok(data),
            Node::Directory { .. } => Err(Error::wrong_type(path, FileKind::File)),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<ReadDir> {
        let dir = normalize(path)?;
        let nodes = self.read_lock();
        match nodes.get(&dir) {
            Some(Node::Directory { .. }) => {}
            Some(Node::File { .. }) => return Err(Error::wrong_type(&dir, FileKind::Directory)),
            None => return Err(Error::Absent(dir)),
        }
        // Snapshot the listing so later mutations do not affect an open handle
        let entries = nodes
            .keys()
            .filter(|key| key.parent() == Some(dir.as_path()))
            .filter_map(|key| {
                let name = key.file_name()?.to_string_lossy().into_owned();
                Some(DirEntry::new(name, key.clone()))
            })
            .collect::<Vec<_>>();
        Ok(Box::new(entries.into_iter().map(Ok)))
    }
}
