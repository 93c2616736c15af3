//! Document store interface used by the repos.
//!
//! Every collection exposes the same six operations. Backends keep the `_id`
//! out of the stored body and inject it on read, so callers always see it as a
//! regular top-level field.
use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// A semi-structured record (top-level JSON object).
pub type Document = Map<String, Value>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Key under which a document's identifier is exposed.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),
    #[error("store query error: {0}")]
    Query(String),
    #[error("unique constraint violated")]
    Conflict,
}

/// Named collections of the booking database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Classes,
    Instructors,
    Carts,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "user",
            Collection::Classes => "classes",
            Collection::Instructors => "instructor",
            Collection::Carts => "carts",
        }
    }
}

/// Uniform async access to the collections.
///
/// Filters are matched by top-level equality: a document matches when every
/// key of `filter` is present with an equal value. Updates are shallow merges.
///
/// Implementations must be shareable across requests (`Arc<dyn DocumentStore>`).
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn ping(&self) -> StoreResult<()>;

    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Document>>;

    async fn find_by(&self, collection: Collection, filter: &Document)
    -> StoreResult<Vec<Document>>;

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Document>>;

    // Returns the id assigned to the new document.
    async fn insert(&self, collection: Collection, doc: Document) -> StoreResult<Uuid>;

    // Returns the number of matched documents (0 or 1).
    async fn update_by_id(
        &self,
        collection: Collection,
        id: Uuid,
        partial: Document,
    ) -> StoreResult<u64>;

    // Returns the number of deleted documents (0 or 1).
    async fn delete_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<u64>;

    async fn close(&self);
}

/// Build a single-key equality filter.
pub fn filter_eq(key: &str, value: impl Into<Value>) -> Document {
    let mut filter = Document::new();
    filter.insert(key.to_string(), value.into());
    filter
}

/// Top-level equality match shared by the in-process backend.
pub fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(k, v)| doc.get(k) == Some(v))
}

/// Re-attach the identifier to a stored body.
pub fn with_id(id: Uuid, mut body: Document) -> Document {
    body.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    body
}

/// Remove the identifier from an incoming document; stores own it.
pub fn strip_id(mut doc: Document) -> Document {
    doc.remove(ID_FIELD);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: Value) -> Document {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn filter_matches_on_every_key() {
        let d = doc(json!({"email": "a@x.io", "classId": "c1", "price": 10}));

        assert!(matches(&d, &filter_eq("email", "a@x.io")));
        assert!(matches(&d, &doc(json!({"email": "a@x.io", "price": 10}))));
        assert!(!matches(&d, &doc(json!({"email": "a@x.io", "price": 11}))));
        assert!(!matches(&d, &filter_eq("role", "admin")));
        assert!(matches(&d, &Document::new()));
    }

    #[test]
    fn id_is_injected_and_stripped() {
        let id = Uuid::new_v4();
        let d = with_id(id, doc(json!({"email": "a@x.io"})));
        assert_eq!(d.get(ID_FIELD), Some(&Value::String(id.to_string())));

        let body = strip_id(d);
        assert!(!body.contains_key(ID_FIELD));
    }

    #[test]
    fn collection_names_are_distinct() {
        let mut names: Vec<_> = [
            Collection::Users,
            Collection::Classes,
            Collection::Instructors,
            Collection::Carts,
        ]
        .iter()
        .map(|c| c.name())
        .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
