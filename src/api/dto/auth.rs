use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::services::auth::Claims;

/// Body of `POST /jwt`: the identity to sign, plus any extra fields the client
/// wants carried in the token.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() {
            return Err("email is required");
        }
        Ok(())
    }

    pub fn into_claims(self) -> Claims {
        Claims {
            email: self.email,
            extra: self.extra,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
