use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::services::store::client::{
    Collection, Document, DocumentStore, StoreResult, matches, strip_id, with_id,
};

/// In-process document store.
///
/// Used for local development (`STORE_BACKEND=memory`) and tests. Each
/// collection keeps insertion order so `find_all` is stable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<(Uuid, Document)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        let guard = self.collections.read().await;
        let docs = guard
            .get(&collection)
            .map(|rows| {
                rows.iter()
                    .map(|(id, body)| with_id(*id, body.clone()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(docs)
    }

    async fn find_by(
        &self,
        collection: Collection,
        filter: &Document,
    ) -> StoreResult<Vec<Document>> {
        let guard = self.collections.read().await;
        let docs = guard
            .get(&collection)
            .map(|rows| {
                rows.iter()
                    .map(|(id, body)| with_id(*id, body.clone()))
                    .filter(|doc| matches(doc, filter))
                    .collect()
            })
            .unwrap_or_default();

        Ok(docs)
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Document>> {
        let guard = self.collections.read().await;
        let doc = guard.get(&collection).and_then(|rows| {
            rows.iter()
                .find(|(row_id, _)| *row_id == id)
                .map(|(row_id, body)| with_id(*row_id, body.clone()))
        });

        Ok(doc)
    }

    async fn insert(&self, collection: Collection, doc: Document) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        let mut guard = self.collections.write().await;
        guard
            .entry(collection)
            .or_default()
            .push((id, strip_id(doc)));

        Ok(id)
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: Uuid,
        partial: Document,
    ) -> StoreResult<u64> {
        let mut guard = self.collections.write().await;
        let Some(body) = guard
            .get_mut(&collection)
            .and_then(|rows| rows.iter_mut().find(|(row_id, _)| *row_id == id))
            .map(|(_, body)| body)
        else {
            return Ok(0);
        };

        for (key, value) in strip_id(partial) {
            body.insert(key, value);
        }

        Ok(1)
    }

    async fn delete_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<u64> {
        let mut guard = self.collections.write().await;
        let Some(rows) = guard.get_mut(&collection) else {
            return Ok(0);
        };

        let before = rows.len();
        rows.retain(|(row_id, _)| *row_id != id);

        Ok((before - rows.len()) as u64)
    }

    async fn close(&self) {}
}
