use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Fixed validity window of issued tokens.
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60;

// Registered timing claims owned by the issuer; never taken from the payload.
const RESERVED_CLAIMS: [&str; 3] = ["exp", "iat", "nbf"];

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Identity carried inside a bearer token.
///
/// `extra` keeps whatever else the client posted to `/jwt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            extra: Map::new(),
        }
    }

    fn without_reserved(mut self) -> Self {
        for key in RESERVED_CLAIMS {
            self.extra.remove(key);
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SignedClaims {
    #[serde(flatten)]
    claims: Claims,
    iat: i64,
    exp: i64,
}

/// HS256 token issuer/verifier keyed by `ACCESS_TOKEN_SECRET`.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        self.issue_at(claims, chrono::Utc::now().timestamp())
    }

    /// Sign `claims` as if issued at `now` (unix seconds).
    pub fn issue_at(&self, claims: &Claims, now: i64) -> Result<String, TokenError> {
        let signed = SignedClaims {
            claims: claims.clone().without_reserved(),
            iat: now,
            exp: now + TOKEN_TTL_SECONDS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &signed, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Check signature and expiry, returning the claims as they were issued.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<SignedClaims>(token, &self.decoding_key, &self.validation)
            .map_err(TokenError::Unauthenticated)?;

        Ok(data.claims.claims)
    }
}
