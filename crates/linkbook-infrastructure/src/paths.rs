//! Unified path management for linkbook files.
//!
//! All paths are resolved via AppPaths from the version-migrate crate, so the
//! layout is consistent across platforms.

use std::path::PathBuf;
use version_migrate::AppPaths;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for linkbook.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/linkbook/          # Config directory (AppPaths default)
/// ├── config.toml              # Application configuration
/// └── logs/                    # Application logs
///     └── linkbook.log.YYYY-MM-DD
///
/// ~/.local/share/linkbook/     # Data directory
/// └── contacts.json            # Contact store
/// ```
pub struct LinkbookPaths;

impl LinkbookPaths {
    const CONFIG_FILENAME: &'static str = "config.toml";
    const CONTACTS_FILENAME: &'static str = "contacts.json";

    fn app_paths() -> AppPaths {
        AppPaths::new("linkbook")
    }

    /// Returns the linkbook configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .config_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    /// Returns the linkbook data directory.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .data_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(Self::CONFIG_FILENAME))
    }

    /// Returns the contact store path inside `data_dir`.
    pub fn contacts_file_in(data_dir: &std::path::Path) -> PathBuf {
        data_dir.join(Self::CONTACTS_FILENAME)
    }

    /// Returns the path to the default contact store.
    pub fn contacts_file() -> Result<PathBuf, PathError> {
        Ok(Self::contacts_file_in(&Self::data_dir()?))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}
