/*
 * Responsibility
 * - take the `{id}` path segment and parse it into a document id (UUID)
 * - malformed ids become 400 INVALID_ID instead of reaching the store
 */
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocId(pub Uuid);

pub fn parse_doc_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::bad_request("INVALID_ID", "invalid id"))
}

impl FromRequestParts<AppState> for DocId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("INVALID_ID", "missing id"))?;

        Ok(Self(parse_doc_id(&raw)?))
    }
}
