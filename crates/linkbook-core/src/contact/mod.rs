//! Contact domain module.
//!
//! # Module Structure
//!
//! - `model`: the persisted contact record
//! - `repository`: the contact store trait
//!
//! # Usage
//!
//! ```ignore
//! use linkbook_core::contact::{ContactRecord, ContactStore};
//! ```

mod model;
mod repository;

// Re-export public API
pub use model::ContactRecord;
pub use repository::ContactStore;
