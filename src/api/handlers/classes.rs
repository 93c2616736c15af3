/*
 * Responsibility
 * - /classes (public list + create) and /myclasses (owner-scoped by instructorEmail)
 */
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};

use crate::{
    api::{
        dto::{classes::CreateClassRequest, results::InsertResult, scope::EmailScope},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    repos::class_repo::{self, ClassRow},
    state::AppState,
};

pub async fn list_classes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassRow>>, AppError> {
    let classes = class_repo::list(state.store.as_ref()).await?;
    Ok(Json(classes))
}

pub async fn create_class(
    State(state): State<AppState>,
    payload: Result<Json<CreateClassRequest>, JsonRejection>,
) -> Result<Json<InsertResult>, AppError> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let id = class_repo::create(state.store.as_ref(), &req.instructor_email, &req.details).await?;
    Ok(Json(InsertResult::new(id)))
}

/// Classes taught by the caller; `?email=` must be the caller's own.
pub async fn my_classes(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Query(scope): Query<EmailScope>,
) -> Result<Json<Vec<ClassRow>>, AppError> {
    let Some(email) = scope.email() else {
        return Ok(Json(Vec::new()));
    };
    if !ctx.is(email) {
        return Err(AppError::Forbidden);
    }

    let classes = class_repo::list_by_instructor(state.store.as_ref(), email).await?;
    Ok(Json(classes))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::extractors::AuthCtx;
    use crate::services::auth::{Claims, TokenService};
    use crate::services::store::MemoryStore;

    #[tokio::test]
    async fn other_instructors_classes_are_forbidden() {
        let state = AppState::new(Arc::new(MemoryStore::new()), Arc::new(TokenService::new("s")));
        let caller = AuthCtxExtractor(AuthCtx::new(Claims::new("ivy@yoga.io")));
        let scope = Query(EmailScope {
            email: Some("max@yoga.io".to_string()),
        });

        let res = my_classes(State(state), caller, scope).await;

        assert!(matches!(res, Err(AppError::Forbidden)));
    }
}
