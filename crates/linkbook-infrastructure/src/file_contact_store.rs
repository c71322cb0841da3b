//! File-backed contact store.
//!
//! All contacts live in a single versioned JSON document
//! (`{data_dir}/contacts.json`). Every write replaces the document through
//! [`AtomicFile`], which is what makes a batch visible all at once.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tokio::task;

use linkbook_core::contact::{ContactRecord, ContactStore};
use linkbook_core::error::{LinkbookError, Result};

use crate::dto::{ContactBook, create_contact_book_migrator};
use crate::storage::AtomicFile;

const ENTITY_NAME: &str = "contact_book";

/// Contact store persisted in one JSON file.
///
/// # Features
///
/// - **Replace on conflict**: a record with a known id supersedes the stored one
/// - **Atomic batches**: `insert_all` is one read-modify-write of the whole file
/// - **Serialised writers**: an async mutex in-process, a file lock across processes
/// - **Async-safe**: file IO runs in `tokio::task::spawn_blocking`
pub struct FileContactStore {
    file: AtomicFile,
    writer: Mutex<()>,
}

impl FileContactStore {
    /// Creates a store backed by `path`. The file is created on first write.
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path),
            writer: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Number of stored records.
    pub async fn len(&self) -> Result<usize> {
        Ok(self.load_book().await?.contacts.len())
    }

    async fn load_book(&self) -> Result<ContactBook> {
        let file = self.file.clone();
        let book = task::spawn_blocking(move || -> Result<_> {
            match file.read()? {
                Some(content) => decode(&content),
                None => Ok(ContactBook::default()),
            }
        })
        .await
        .map_err(|e| LinkbookError::internal(format!("Contact store read task failed: {}", e)))??;

        Ok(book)
    }

    async fn upsert(&self, records: Vec<ContactRecord>) -> Result<()> {
        let _writer = self.writer.lock().await;

        let file = self.file.clone();
        let count = records.len();
        task::spawn_blocking(move || {
            file.update(|current| {
                let mut book = match current {
                    Some(content) => decode(&content)?,
                    None => ContactBook::default(),
                };
                book.upsert_all(records);
                encode(book)
            })
        })
        .await
        .map_err(|e| LinkbookError::internal(format!("Contact store write task failed: {}", e)))??;

        tracing::debug!(
            path = %self.file.path().display(),
            count,
            "Stored contact records"
        );
        Ok(())
    }
}

fn decode(content: &str) -> Result<ContactBook> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;
    Ok(create_contact_book_migrator().load_flat_from(ENTITY_NAME, json_value)?)
}

fn encode(book: ContactBook) -> Result<String> {
    Ok(create_contact_book_migrator().save_domain_flat(ENTITY_NAME, book)?)
}

#[async_trait]
impl ContactStore for FileContactStore {
    async fn insert(&self, record: ContactRecord) -> Result<()> {
        self.upsert(vec![record]).await
    }

    async fn insert_all(&self, records: Vec<ContactRecord>) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        self.upsert(records).await
    }

    async fn contacts(&self) -> Result<HashSet<ContactRecord>> {
        Ok(self.load_book().await?.contacts.into_iter().collect())
    }
}
