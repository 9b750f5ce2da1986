//! # keel_api
//!
//! Uniform, non-throwing filesystem access.
//!
//! Every operation reports its outcome as a plain value: predicates return
//! `false`, [`Filesystem::last_write_time`] returns `0`,
//! [`Filesystem::file_size`] returns [`FILE_SIZE_UNKNOWN`], reads return `None`
//! and mutations return `false` when anything goes wrong. The cause is logged
//! through `tracing` and then discarded, so callers can probe speculatively
//! without checking existence first.
//!
//! Operations are available on a [`Filesystem`], which wraps an injected
//! [`keel_fs::Backend`], and as free functions bound to the host filesystem.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use keel_fs::{Backend, HostBackend, MemoryBackend};

mod config;
mod copy;
mod create_dirs;
mod dir_iter;
mod host;
mod meta;
mod read;
mod remove;
mod sentinel;

pub use config::*;
pub use dir_iter::*;
pub use host::*;
pub use meta::FILE_SIZE_UNKNOWN;

/// Filesystem operations over one backend.
///
/// Cloning is cheap; clones share the backend.
#[derive(Clone)]
pub struct Filesystem {
    backend: Arc<dyn Backend>,
    current_dir: PathBuf,
}

impl Filesystem {
    /// Creates a filesystem over `backend`, listing `./` for empty paths.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend, current_dir: PathBuf::from(DEFAULT_CURRENT_DIR) }
    }

    /// Creates a filesystem over the operating system's filesystem.
    pub fn host() -> Self {
        Self::new(Arc::new(HostBackend::new()))
    }

    /// Creates a filesystem with the backend and current directory chosen by
    /// `config`. A memory backend starts out empty.
    pub fn from_config(config: &Config) -> Self {
        let backend: Arc<dyn Backend> = match config.backend {
            BackendKind::Host => Arc::new(HostBackend::new()),
            BackendKind::Memory => Arc::new(MemoryBackend::new()),
        };
        Self { backend, current_dir: config.current_dir.clone() }
    }

    /// Replaces the directory iterated when an empty path is opened.
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = dir.into();
        self
    }

    /// Directory iterated when [`Filesystem::read_dir`] gets an empty path.
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }
}
