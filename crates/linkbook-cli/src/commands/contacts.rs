use anyhow::{Context, Result};
use std::path::Path;

use linkbook_core::contact::{ContactRecord, ContactStore};

use crate::context::AppContext;

pub async fn add(context: &AppContext, id: String, name: String) -> Result<()> {
    let store = context.contact_store()?;
    store.insert(ContactRecord::new(id.clone(), name)).await?;
    println!("Stored contact {}", id);
    Ok(())
}

pub async fn import(context: &AppContext, file: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let records = parse_import(&content)
        .with_context(|| format!("Failed to parse contacts from {}", file.display()))?;
    let count = records.len();

    let store = context.contact_store()?;
    store.insert_all(records).await?;

    tracing::info!(count, file = %file.display(), "Imported contacts");
    println!("Imported {} contacts", count);
    Ok(())
}

pub async fn list(context: &AppContext, json: bool) -> Result<()> {
    let store = context.contact_store()?;
    let contacts = sorted(store.contacts().await?);

    if json {
        println!("{}", serde_json::to_string_pretty(&contacts)?);
    } else {
        for contact in &contacts {
            println!("{}\t{}", contact.id, contact.name);
        }
    }
    Ok(())
}

fn parse_import(content: &str) -> Result<Vec<ContactRecord>> {
    Ok(serde_json::from_str(content)?)
}

/// Display order only; the store itself is unordered.
fn sorted(contacts: impl IntoIterator<Item = ContactRecord>) -> Vec<ContactRecord> {
    let mut contacts: Vec<_> = contacts.into_iter().collect();
    contacts.sort_by(|a, b| a.id.cmp(&b.id));
    contacts
}
