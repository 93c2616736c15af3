/*
 * Responsibility
 * - read access to the `instructor` collection (written outside this service)
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::{decode_all, error::RepoError};
use crate::services::store::{Collection, Document, DocumentStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorRow {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub details: Document,
}

pub async fn list(store: &dyn DocumentStore) -> Result<Vec<InstructorRow>, RepoError> {
    let docs = store.find_all(Collection::Instructors).await?;
    decode_all(docs)
}
