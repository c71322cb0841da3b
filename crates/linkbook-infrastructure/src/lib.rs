pub mod config_service;
pub mod dto;
pub mod file_contact_store;
pub mod paths;
pub mod server_config_provider;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::file_contact_store::FileContactStore;
pub use crate::server_config_provider::{
    HttpServerConfigProvider, StaticServerConfigProvider, provider_from_settings,
};
