//! Contact store trait.

use async_trait::async_trait;
use std::collections::HashSet;

use super::model::ContactRecord;
use crate::error::Result;

/// Durable storage of contact records.
///
/// Conflicts are resolved by replacement: writing a record whose id is
/// already stored supersedes the stored record, for `insert` and `insert_all`
/// alike. Within one batch the last record for an id wins.
///
/// Implementations serialise their own writers; callers may share one store
/// across tasks without extra locking.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Persists one record.
    async fn insert(&self, record: ContactRecord) -> Result<()>;

    /// Persists a batch. Readers observe either none or all of it.
    async fn insert_all(&self, records: Vec<ContactRecord>) -> Result<()>;

    /// Every stored record. Order carries no meaning.
    async fn contacts(&self) -> Result<HashSet<ContactRecord>>;
}
