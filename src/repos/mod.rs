/*
 * Responsibility
 * - typed access to each collection on top of DocumentStore
 * - conversion between documents and the typed rows
 */
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::repos::error::RepoError;
use crate::services::store::Document;

pub mod cart_repo;
pub mod class_repo;
pub mod error;
pub mod instructor_repo;
pub mod user_repo;

fn decode<T: DeserializeOwned>(doc: Document) -> Result<T, RepoError> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}

fn decode_all<T: DeserializeOwned>(docs: Vec<Document>) -> Result<Vec<T>, RepoError> {
    docs.into_iter().map(decode).collect()
}

fn encode<T: Serialize>(value: &T) -> Result<Document, RepoError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(RepoError::Decode(serde::ser::Error::custom(
            "documents must be JSON objects",
        ))),
    }
}
