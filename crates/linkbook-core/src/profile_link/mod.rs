//! Self profile link domain module.
//!
//! Resolves the signed-in user's identity into the profile URL that is shown
//! as a QR code and shared as a link.
//!
//! # Module Structure
//!
//! - `model`: link state snapshots and the link template
//! - `server_config`: server link configuration and its provider trait
//! - `resolver`: the asynchronous, single-shot resolver
//!
//! # Usage
//!
//! ```ignore
//! use linkbook_core::profile_link::{ProfileLinkResolver, ResolverOptions};
//!
//! let mut resolver = ProfileLinkResolver::spawn(identity, handle, provider, ResolverOptions::default());
//! let state = resolver.wait_resolved().await;
//! if state.has_error {
//!     // leave the screen
//! }
//! ```

mod model;
mod resolver;
mod server_config;

// Re-export public API
pub use model::{
    ProfileLinkState, ResolutionPhase, USER_PROFILE_PATH, format_profile_link,
};
pub use resolver::{ProfileLinkResolver, ResolverOptions};
pub use server_config::{ServerConfigError, ServerConfigProvider, ServerLinks};
