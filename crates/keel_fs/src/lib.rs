//! # keel_fs
//!
//! Backend adapters for the keel filesystem layer.
//!
//! Each adapter implements [`Backend`] over one concrete filesystem and
//! translates that filesystem's failure signaling into [`Error`], so that no
//! native error type leaks past this crate. [`HostBackend`] wraps `std::fs`;
//! [`MemoryBackend`] keeps a directory tree in process memory.

mod backend;
mod error;
mod host;
mod memory;

pub use backend::*;
pub use error::*;
pub use host::*;
pub use memory::*;
