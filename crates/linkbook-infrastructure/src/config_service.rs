//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml` (by default
//! `~/.config/linkbook/config.toml`) and caches it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use linkbook_core::config::AppConfig;
use linkbook_core::error::{LinkbookError, Result};

use crate::paths::LinkbookPaths;
use crate::storage::AtomicTomlFile;

/// Configuration service that loads and caches the application configuration.
///
/// A missing file yields the default configuration; it is only written by
/// [`init_default`](Self::init_default) or [`update`](Self::update).
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service for the configuration file at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service for the platform default configuration file.
    pub fn with_default_path() -> Result<Self> {
        let path = LinkbookPaths::config_file().map_err(|e| LinkbookError::config(e.to_string()))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref config) = *cached {
                return Ok(config.clone());
            }
        }

        let loaded = self.load()?;

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Writes the default configuration if no file exists yet.
    ///
    /// Returns `true` when a file was created.
    pub fn init_default(&self) -> Result<bool> {
        if !self.file().save_if_missing(&AppConfig::default())? {
            return Ok(false);
        }

        tracing::info!(path = %self.path.display(), "Wrote default configuration");
        self.invalidate_cache();
        Ok(true)
    }

    /// Applies `f` to the stored configuration under the file lock.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut AppConfig),
    {
        self.file().update(AppConfig::default(), f)?;
        self.invalidate_cache();
        Ok(())
    }

    fn load(&self) -> Result<AppConfig> {
        let loaded = self.file().load().map_err(|e| {
            LinkbookError::config(format!(
                "Failed to load configuration from '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        match loaded {
            Some(config) => Ok(config),
            None => {
                tracing::debug!(path = %self.path.display(), "No configuration file, using defaults");
                Ok(AppConfig::default())
            }
        }
    }

    fn file(&self) -> AtomicTomlFile<AppConfig> {
        AtomicTomlFile::new(self.path.clone())
    }
}
