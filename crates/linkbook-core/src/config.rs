//! Application configuration model (`config.toml`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::profile_link::ServerLinks;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where the server links come from.
///
/// When `config_url` is set the links are fetched from that deep-link
/// document; otherwise the static values below are used.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ServerSettings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_accounts_url")]
    pub accounts_url: String,
    #[serde(default = "default_web_socket_url")]
    pub web_socket_url: String,
    #[serde(default = "default_teams_url")]
    pub teams_url: String,
    #[serde(default = "default_website_url")]
    pub website_url: String,
    #[serde(default)]
    pub is_on_premises: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_url: Option<String>,
    /// Seconds to wait for the server links. 0 disables the limit.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl ServerSettings {
    /// Static links described by these settings.
    pub fn links(&self) -> ServerLinks {
        ServerLinks {
            api: self.api_url.clone(),
            accounts: self.accounts_url.clone(),
            web_socket: self.web_socket_url.clone(),
            teams: self.teams_url.clone(),
            website: self.website_url.clone(),
            title: self.title.clone(),
            is_on_premises: self.is_on_premises,
        }
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        match self.fetch_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            api_url: default_api_url(),
            accounts_url: default_accounts_url(),
            web_socket_url: default_web_socket_url(),
            teams_url: default_teams_url(),
            website_url: default_website_url(),
            is_on_premises: false,
            config_url: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StorageSettings {
    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_title() -> String {
    "production".to_string()
}

fn default_api_url() -> String {
    "https://prod-nginz-https.wire.com".to_string()
}

fn default_accounts_url() -> String {
    "https://account.wire.com".to_string()
}

fn default_web_socket_url() -> String {
    "https://prod-nginz-ssl.wire.com".to_string()
}

fn default_teams_url() -> String {
    "https://teams.wire.com".to_string()
}

fn default_website_url() -> String {
    "https://wire.com".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}
