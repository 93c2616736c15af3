/*
 * Responsibility
 * - operations on the `carts` collection
 * - reads are always scoped by the owner email (except lookup by id)
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::{decode, decode_all, encode, error::RepoError};
use crate::services::store::{Collection, Document, DocumentStore, client::filter_eq};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartRow {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "classId", default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    // snapshot of the class at the time it was added (name, price, ...)
    #[serde(flatten)]
    pub details: Document,
}

#[derive(Debug, Serialize)]
struct NewCartDoc<'a> {
    email: &'a str,
    #[serde(rename = "classId")]
    class_id: &'a str,
    #[serde(flatten)]
    details: &'a Document,
}

pub async fn list_by_owner(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Vec<CartRow>, RepoError> {
    let docs = store
        .find_by(Collection::Carts, &filter_eq("email", email))
        .await?;
    decode_all(docs)
}

pub async fn get(store: &dyn DocumentStore, item_id: Uuid) -> Result<Option<CartRow>, RepoError> {
    store
        .find_by_id(Collection::Carts, item_id)
        .await?
        .map(decode)
        .transpose()
}

pub async fn create(
    store: &dyn DocumentStore,
    email: &str,
    class_id: &str,
    details: &Document,
) -> Result<Uuid, RepoError> {
    let mut details = details.clone();
    for key in ["_id", "email", "classId"] {
        details.remove(key);
    }

    let doc = encode(&NewCartDoc {
        email,
        class_id,
        details: &details,
    })?;

    Ok(store.insert(Collection::Carts, doc).await?)
}

pub async fn delete(store: &dyn DocumentStore, item_id: Uuid) -> Result<u64, RepoError> {
    Ok(store.delete_by_id(Collection::Carts, item_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MemoryStore;

    #[tokio::test]
    async fn delete_removes_only_that_item() {
        let store = MemoryStore::new();
        let details = Document::new();

        let keep = create(&store, "a@yoga.io", "class-1", &details)
            .await
            .unwrap();
        let removed = create(&store, "a@yoga.io", "class-2", &details)
            .await
            .unwrap();

        assert_eq!(delete(&store, removed).await.unwrap(), 1);
        assert!(get(&store, removed).await.unwrap().is_none());

        let left = list_by_owner(&store, "a@yoga.io").await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, keep);
        assert_eq!(left[0].class_id.as_deref(), Some("class-1"));
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner() {
        let store = MemoryStore::new();
        let details = Document::new();
        create(&store, "a@yoga.io", "c", &details).await.unwrap();
        create(&store, "b@yoga.io", "c", &details).await.unwrap();

        let mine = list_by_owner(&store, "b@yoga.io").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].email, "b@yoga.io");
    }
}
