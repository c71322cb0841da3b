//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema for persisted data. They are
//! private to the infrastructure layer and absorb changes of the storage
//! format over time.
//!
//! ### ContactBook Version History
//! - **1.0.0**: Initial schema

mod contact_book;

// Re-export contact_book DTOs and migrator
pub use contact_book::{
    ContactBook, ContactBookV1_0_0, ContactRecordV1_0_0, create_contact_book_migrator,
};
