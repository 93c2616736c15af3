/*
 * Responsibility
 * - authenticated context as seen by handlers
 * - the gate verifies the bearer token and stores this in request extensions;
 *   handlers only receive this type
 */
use crate::services::auth::Claims;

/// Context attached to every request that passed authentication.
///
/// `email` is the identity every owner-scoped query is bound to.
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub email: String,
}

impl AuthCtx {
    pub fn new(claims: Claims) -> Self {
        Self {
            email: claims.email,
        }
    }

    pub fn is(&self, email: &str) -> bool {
        self.email == email
    }
}
