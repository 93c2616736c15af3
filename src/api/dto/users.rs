/*
 * Responsibility
 * - request/response DTOs of /users
 */
use serde::{Deserialize, Serialize};

use crate::api::dto::results::InsertResult;
use crate::services::store::Document;

/// Body of `POST /users` (first sign-in). Everything besides `email` is kept as profile.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    #[serde(flatten)]
    pub profile: Document,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() {
            return Err("email is required");
        }
        Ok(())
    }
}

pub const USER_ALREADY_EXISTS: &str = "User Already Exist";

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CreateUserResponse {
    Created(InsertResult),
    AlreadyExists { message: &'static str },
}

#[derive(Debug, Serialize)]
pub struct AdminCheckResponse {
    pub admin: bool,
}

#[derive(Debug, Serialize)]
pub struct InstructorCheckResponse {
    pub instructor: bool,
}
