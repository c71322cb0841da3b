//! Contact book DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Initial schema, a flat list of `{id, name}` records

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use version_migrate::{FromDomain, IntoDomain, Versioned};

use linkbook_core::contact::ContactRecord;

/// All contacts held in one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactBook {
    pub contacts: Vec<ContactRecord>,
}

impl ContactBook {
    /// Inserts records, replacing any stored record with the same id.
    ///
    /// A replaced record keeps its position; new ids are appended in the
    /// order given. Repeated ids inside `records` resolve to the last one.
    pub fn upsert_all(&mut self, records: impl IntoIterator<Item = ContactRecord>) {
        let mut positions: HashMap<String, usize> = self
            .contacts
            .iter()
            .enumerate()
            .map(|(index, record)| (record.id.clone(), index))
            .collect();

        for record in records {
            match positions.get(&record.id) {
                Some(&index) => self.contacts[index] = record,
                None => {
                    positions.insert(record.id.clone(), self.contacts.len());
                    self.contacts.push(record);
                }
            }
        }
    }
}

// ============================================================================
// ContactRecord DTOs
// ============================================================================

/// Contact record DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecordV1_0_0 {
    pub id: String,
    pub name: String,
}

impl From<&ContactRecord> for ContactRecordV1_0_0 {
    fn from(record: &ContactRecord) -> Self {
        ContactRecordV1_0_0 {
            id: record.id.clone(),
            name: record.name.clone(),
        }
    }
}

impl From<ContactRecordV1_0_0> for ContactRecord {
    fn from(dto: ContactRecordV1_0_0) -> Self {
        ContactRecord {
            id: dto.id,
            name: dto.name,
        }
    }
}

// ============================================================================
// ContactBook DTOs
// ============================================================================

/// Contact book DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct ContactBookV1_0_0 {
    #[serde(default)]
    pub contacts: Vec<ContactRecordV1_0_0>,
}

/// Convert ContactBookV1_0_0 DTO to domain model
impl IntoDomain<ContactBook> for ContactBookV1_0_0 {
    fn into_domain(self) -> ContactBook {
        ContactBook {
            contacts: self.contacts.into_iter().map(|c| c.into()).collect(),
        }
    }
}

/// Convert domain model to ContactBookV1_0_0 DTO (for version-migrate save support)
impl FromDomain<ContactBook> for ContactBookV1_0_0 {
    fn from_domain(book: ContactBook) -> Self {
        ContactBookV1_0_0 {
            contacts: book.contacts.iter().map(|c| c.into()).collect(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for ContactBook documents.
pub fn create_contact_book_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("contact_book" => [
        ContactBookV1_0_0,
        ContactBook
    ], save = true)
    .expect("Failed to create contact_book migrator")
}
