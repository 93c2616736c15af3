/*
 * Responsibility
 * - operations on the `classes` collection
 * - no cascade: cart items keep pointing at removed classes
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::{decode_all, encode, error::RepoError};
use crate::services::store::{Collection, Document, DocumentStore, client::filter_eq};

pub const INSTRUCTOR_EMAIL_FIELD: &str = "instructorEmail";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRow {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(
        rename = "instructorEmail",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub instructor_email: Option<String>,
    // name, image, seats, price, ...
    #[serde(flatten)]
    pub details: Document,
}

#[derive(Debug, Serialize)]
struct NewClassDoc<'a> {
    #[serde(rename = "instructorEmail")]
    instructor_email: &'a str,
    #[serde(flatten)]
    details: &'a Document,
}

pub async fn list(store: &dyn DocumentStore) -> Result<Vec<ClassRow>, RepoError> {
    let docs = store.find_all(Collection::Classes).await?;
    decode_all(docs)
}

pub async fn list_by_instructor(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Vec<ClassRow>, RepoError> {
    let docs = store
        .find_by(
            Collection::Classes,
            &filter_eq(INSTRUCTOR_EMAIL_FIELD, email),
        )
        .await?;
    decode_all(docs)
}

pub async fn create(
    store: &dyn DocumentStore,
    instructor_email: &str,
    details: &Document,
) -> Result<Uuid, RepoError> {
    let mut details = details.clone();
    details.remove("_id");
    details.remove(INSTRUCTOR_EMAIL_FIELD);

    let doc = encode(&NewClassDoc {
        instructor_email,
        details: &details,
    })?;

    Ok(store.insert(Collection::Classes, doc).await?)
}
