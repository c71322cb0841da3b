//! Storage layer for atomic file operations.

mod atomic_file;
mod atomic_toml;

pub use atomic_file::{AtomicFile, AtomicFileError};
pub use atomic_toml::AtomicTomlFile;
