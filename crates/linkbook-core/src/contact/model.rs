//! ContactRecord domain model.

use serde::{Deserialize, Serialize};

/// A known contact as stored locally.
///
/// `id` is the primary key. Records are stored and read back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: String,
    pub name: String,
}

impl ContactRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
