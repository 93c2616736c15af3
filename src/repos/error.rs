/**
 * Responsibility
 * - meaning of store failures as seen by the handlers
 */
use thiserror::Error;

use crate::services::store::StoreError;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("store error: {0}")]
    Store(StoreError),
    #[error("document does not match the expected shape: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("conflict")]
    Conflict,
}

impl From<StoreError> for RepoError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict => RepoError::Conflict,
            other => RepoError::Store(other),
        }
    }
}
