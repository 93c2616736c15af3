//! Middlewares that run the gate stages in front of handlers.
//!
//! Applied per handler from `api::routes` with `Handler::layer`, e.g.
//! ```ignore
//! let admin_only = middleware::from_fn_with_state(state.clone(), access::admin_only);
//! Router::new().route("/users", get(list_users.layer(admin_only)));
//! ```

use axum::{
    body::Body,
    extract::{Query, State},
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::api::dto::scope::EmailScope;
use crate::error::AppError;
use crate::middleware::auth::gate;
use crate::state::AppState;

/// Authentication only.
pub async fn authenticated(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = gate::authenticate(&state.tokens, req.headers())?;

    // middleware → extractor
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

/// Authentication, then `?email=` must name the caller.
pub async fn owner_scoped(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = gate::authenticate(&state.tokens, req.headers())?;

    // parsed here rather than as an extractor so a bad query never beats the 401
    let Query(scope) = Query::<EmailScope>::try_from_uri(req.uri())
        .map_err(|_| AppError::bad_request("INVALID_QUERY", "invalid query string"))?;
    gate::check_ownership(&ctx, scope.email())?;

    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

/// Authentication, then the caller's stored role must be admin.
pub async fn admin_only(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = gate::authenticate(&state.tokens, req.headers())?;
    gate::require_admin(state.store.as_ref(), &ctx).await?;

    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
