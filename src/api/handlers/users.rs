/*
 * Responsibility
 * - /users handlers: listing (admin), sign-in registration, role checks, role changes
 * - role checks answer for the caller only; another email is reported as `false`
 */
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::{
    api::{
        dto::{
            results::{DeleteResult, InsertResult, UpdateResult},
            users::{
                AdminCheckResponse, CreateUserRequest, CreateUserResponse,
                InstructorCheckResponse, USER_ALREADY_EXISTS,
            },
        },
        extractors::{AuthCtxExtractor, DocId},
    },
    error::AppError,
    repos::user_repo::{self, CreateOutcome, Role, UserRow},
    state::AppState,
};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserRow>>, AppError> {
    let users = user_repo::list(state.store.as_ref()).await?;
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<CreateUserResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let outcome = user_repo::create_if_absent(state.store.as_ref(), &req.email, &req.profile).await?;

    let res = match outcome {
        CreateOutcome::Created(id) => CreateUserResponse::Created(InsertResult::new(id)),
        CreateOutcome::AlreadyExists => CreateUserResponse::AlreadyExists {
            message: USER_ALREADY_EXISTS,
        },
    };

    Ok(Json(res))
}

async fn caller_has_role(
    state: &AppState,
    caller: &AuthCtxExtractor,
    email: &str,
    role: Role,
) -> Result<bool, AppError> {
    if !caller.0.is(email) {
        return Ok(false);
    }

    let stored = user_repo::role_of(state.store.as_ref(), email).await?;
    Ok(stored == Some(role))
}

pub async fn is_admin(
    State(state): State<AppState>,
    caller: AuthCtxExtractor,
    Path(email): Path<String>,
) -> Result<Json<AdminCheckResponse>, AppError> {
    let admin = caller_has_role(&state, &caller, &email, Role::Admin).await?;
    Ok(Json(AdminCheckResponse { admin }))
}

pub async fn is_instructor(
    State(state): State<AppState>,
    caller: AuthCtxExtractor,
    Path(email): Path<String>,
) -> Result<Json<InstructorCheckResponse>, AppError> {
    let instructor = caller_has_role(&state, &caller, &email, Role::Instructor).await?;
    Ok(Json(InstructorCheckResponse { instructor }))
}

pub async fn make_admin(
    State(state): State<AppState>,
    caller: AuthCtxExtractor,
    DocId(user_id): DocId,
) -> Result<Json<UpdateResult>, AppError> {
    let matched = user_repo::set_role(state.store.as_ref(), user_id, Role::Admin).await?;

    tracing::info!(by = %caller.0.email, %user_id, matched, "promoted user to admin");
    Ok(Json(UpdateResult::new(matched)))
}

pub async fn make_instructor(
    State(state): State<AppState>,
    caller: AuthCtxExtractor,
    DocId(user_id): DocId,
) -> Result<Json<UpdateResult>, AppError> {
    let matched = user_repo::set_role(state.store.as_ref(), user_id, Role::Instructor).await?;

    tracing::info!(by = %caller.0.email, %user_id, matched, "promoted user to instructor");
    Ok(Json(UpdateResult::new(matched)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    caller: AuthCtxExtractor,
    DocId(user_id): DocId,
) -> Result<Json<DeleteResult>, AppError> {
    let deleted = user_repo::delete(state.store.as_ref(), user_id).await?;

    tracing::info!(by = %caller.0.email, %user_id, deleted, "deleted user");
    Ok(Json(DeleteResult::new(deleted)))
}
