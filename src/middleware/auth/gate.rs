//! Authorization gate: the ordered guard stages behind every protected route.
//!
//! Each stage either hands back an enriched context or a terminal `AppError`;
//! the middlewares in `access` only compose them. Stages never write.
//!
//! 1. `authenticate`    bearer token → `AuthCtx` (401 on any failure)
//! 2. `check_ownership` `?email=` must equal the caller (403, no store access)
//! 3. `require_admin`   stored role of the caller must be `admin` (403)

use axum::http::{HeaderMap, header};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::repos::user_repo::{self, Role};
use crate::services::auth::TokenService;
use crate::services::store::DocumentStore;

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthenticated)?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthenticated)?;

    Ok(token)
}

pub fn authenticate(tokens: &TokenService, headers: &HeaderMap) -> Result<AuthCtx, AppError> {
    let token = bearer_token(headers)?;

    let claims = match tokens.verify(token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(AppError::Unauthenticated);
        }
    };

    let ctx = AuthCtx::new(claims);
    tracing::Span::current().record("caller", ctx.email.as_str());

    Ok(ctx)
}

/// `requested` is the owner the request asks for; `None` means unscoped and
/// is left to the handler (which answers with an empty listing).
pub fn check_ownership(ctx: &AuthCtx, requested: Option<&str>) -> Result<(), AppError> {
    match requested {
        Some(email) if !ctx.is(email) => {
            tracing::warn!(caller = %ctx.email, requested = %email, "ownership mismatch");
            Err(AppError::Forbidden)
        }
        _ => Ok(()),
    }
}

pub async fn require_admin(store: &dyn DocumentStore, ctx: &AuthCtx) -> Result<(), AppError> {
    let role = user_repo::role_of(store, &ctx.email).await?;

    if role != Some(Role::Admin) {
        tracing::warn!(caller = %ctx.email, ?role, "admin role required");
        return Err(AppError::Forbidden);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    use crate::services::auth::Claims;
    use crate::services::store::MemoryStore;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn ctx(email: &str) -> AuthCtx {
        AuthCtx::new(Claims::new(email))
    }

    #[test]
    fn missing_or_malformed_header_is_unauthenticated() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AppError::Unauthenticated)
        ));
        assert!(matches!(
            bearer_token(&headers_with("Basic abc")),
            Err(AppError::Unauthenticated)
        ));
        assert!(matches!(
            bearer_token(&headers_with("Bearer ")),
            Err(AppError::Unauthenticated)
        ));
        assert_eq!(bearer_token(&headers_with("Bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn valid_token_yields_context() {
        let tokens = TokenService::new("gate-secret");
        let token = tokens.issue(&Claims::new("a@yoga.io")).unwrap();

        let ctx = authenticate(&tokens, &headers_with(&format!("Bearer {token}"))).unwrap();
        assert_eq!(ctx.email, "a@yoga.io");

        let forged = TokenService::new("other").issue(&Claims::new("a@yoga.io")).unwrap();
        assert!(matches!(
            authenticate(&tokens, &headers_with(&format!("Bearer {forged}"))),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn ownership_requires_same_email() {
        let me = ctx("a@yoga.io");
        assert!(check_ownership(&me, Some("a@yoga.io")).is_ok());
        assert!(check_ownership(&me, None).is_ok());
        assert!(matches!(
            check_ownership(&me, Some("b@yoga.io")),
            Err(AppError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn admin_guard_reads_stored_role() {
        let store = MemoryStore::new();
        let profile = Default::default();
        let id = match user_repo::create_if_absent(&store, "boss@yoga.io", &profile)
            .await
            .unwrap()
        {
            user_repo::CreateOutcome::Created(id) => id,
            other => panic!("unexpected outcome: {other:?}"),
        };

        // unknown user and user without role are both refused
        assert!(matches!(
            require_admin(&store, &ctx("ghost@yoga.io")).await,
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            require_admin(&store, &ctx("boss@yoga.io")).await,
            Err(AppError::Forbidden)
        ));

        user_repo::set_role(&store, id, Role::Admin).await.unwrap();
        assert!(require_admin(&store, &ctx("boss@yoga.io")).await.is_ok());
    }
}
