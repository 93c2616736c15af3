use serde::Deserialize;

use crate::services::store::Document;

/// Body of `POST /carts`.
#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    pub email: String,
    #[serde(rename = "classId")]
    pub class_id: String,
    #[serde(flatten)]
    pub details: Document,
}

impl AddCartItemRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() {
            return Err("email is required");
        }
        if self.class_id.trim().is_empty() {
            return Err("classId is required");
        }
        Ok(())
    }
}
