pub mod config;
pub mod contact;
pub mod error;
pub mod identity;
pub mod profile_link;

// Re-export common error type
pub use error::LinkbookError;
