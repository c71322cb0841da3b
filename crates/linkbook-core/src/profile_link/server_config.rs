//! Server link configuration and the provider seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The set of links a backend publishes about itself.
///
/// Only `accounts` is needed for profile links; the rest is carried so a
/// provider can hand over the whole configuration it fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerLinks {
    pub api: String,
    pub accounts: String,
    pub web_socket: String,
    pub teams: String,
    pub website: String,
    pub title: String,
    #[serde(default)]
    pub is_on_premises: bool,
}

/// Why the server configuration could not be obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServerConfigError {
    /// The configuration source could not be reached.
    #[error("server configuration unavailable: {0}")]
    Unavailable(String),

    /// The configuration endpoint answered with a non-success status.
    #[error("server configuration request failed with status {status}")]
    Http { status: u16 },

    /// The response could not be understood.
    #[error("invalid server configuration payload: {0}")]
    InvalidPayload(String),

    /// No answer within the configured timeout.
    #[error("server configuration fetch timed out after {millis} ms")]
    Timeout { millis: u64 },

    /// The local configuration is unusable.
    #[error("server configuration error: {0}")]
    Config(String),
}

/// Source of the current account's server links.
///
/// A single call yields either the links or a failure; callers decide what a
/// failure means for them.
#[async_trait]
pub trait ServerConfigProvider: Send + Sync {
    async fn server_links(&self) -> Result<ServerLinks, ServerConfigError>;
}
