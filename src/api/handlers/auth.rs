/*
 * Responsibility
 * - POST /jwt: sign the posted identity into a bearer token
 * - no credential check; the front-end identity provider already signed the user in
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    api::dto::auth::{TokenRequest, TokenResponse},
    error::AppError,
    state::AppState,
};

pub async fn issue_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let claims = req.into_claims();
    let token = state.tokens.issue(&claims)?;

    tracing::debug!(email = %claims.email, "issued access token");
    Ok(Json(TokenResponse { token }))
}
