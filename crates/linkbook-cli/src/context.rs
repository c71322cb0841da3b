//! Services shared by all commands.

use anyhow::{Context, Result};
use std::path::PathBuf;

use linkbook_core::config::AppConfig;
use linkbook_infrastructure::paths::LinkbookPaths;
use linkbook_infrastructure::{ConfigService, FileContactStore};

pub struct AppContext {
    pub config_service: ConfigService,
    pub config: AppConfig,
    data_dir_override: Option<PathBuf>,
}

impl AppContext {
    pub fn load(config_path: Option<PathBuf>, data_dir_override: Option<PathBuf>) -> Result<Self> {
        let config_service = match config_path {
            Some(path) => ConfigService::new(path),
            None => ConfigService::with_default_path()?,
        };
        let config = config_service
            .get_config()
            .context("Failed to load configuration")?;

        Ok(Self {
            config_service,
            config,
            data_dir_override,
        })
    }

    /// Data directory: command line, then configuration, then platform default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = self
            .data_dir_override
            .clone()
            .or_else(|| self.config.storage.data_dir.clone())
        {
            return Ok(dir);
        }
        LinkbookPaths::data_dir().map_err(|e| anyhow::anyhow!(e.to_string()))
    }

    pub fn contact_store(&self) -> Result<FileContactStore> {
        let path = LinkbookPaths::contacts_file_in(&self.data_dir()?);
        Ok(FileContactStore::new(path))
    }
}
