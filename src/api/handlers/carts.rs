/*
 * Responsibility
 * - /carts handlers
 * - listing is owner-scoped (gate checks `?email=`); lookup/delete by id are not
 */
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};

use crate::{
    api::{
        dto::{
            carts::AddCartItemRequest,
            results::{DeleteResult, InsertResult},
            scope::EmailScope,
        },
        extractors::{AuthCtxExtractor, DocId},
    },
    error::AppError,
    repos::cart_repo::{self, CartRow},
    state::AppState,
};

pub async fn list_cart(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Query(scope): Query<EmailScope>,
) -> Result<Json<Vec<CartRow>>, AppError> {
    let Some(email) = scope.email() else {
        return Ok(Json(Vec::new()));
    };
    if !ctx.is(email) {
        return Err(AppError::Forbidden);
    }

    let items = cart_repo::list_by_owner(state.store.as_ref(), email).await?;
    Ok(Json(items))
}

// Absent items serialize as `null`.
pub async fn get_cart_item(
    State(state): State<AppState>,
    DocId(item_id): DocId,
) -> Result<Json<Option<CartRow>>, AppError> {
    let item = cart_repo::get(state.store.as_ref(), item_id).await?;
    Ok(Json(item))
}

pub async fn add_cart_item(
    State(state): State<AppState>,
    payload: Result<Json<AddCartItemRequest>, JsonRejection>,
) -> Result<Json<InsertResult>, AppError> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let id = cart_repo::create(state.store.as_ref(), &req.email, &req.class_id, &req.details).await?;
    Ok(Json(InsertResult::new(id)))
}

pub async fn delete_cart_item(
    State(state): State<AppState>,
    DocId(item_id): DocId,
) -> Result<Json<DeleteResult>, AppError> {
    let deleted = cart_repo::delete(state.store.as_ref(), item_id).await?;
    Ok(Json(DeleteResult::new(deleted)))
}
