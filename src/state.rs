/*
 * Responsibility
 * - shared context attached to the Router (AppState)
 *   - store: document store handle, tokens: issuer/verifier
 * - Clone is cheap (Arc inside)
 */
use std::sync::Arc;

use crate::services::{auth::TokenService, store::DocumentStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.backend_name())
            .field("tokens", &self.tokens)
            .finish()
    }
}
