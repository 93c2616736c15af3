use serde::Deserialize;

use crate::services::store::Document;

/// Body of `POST /classes`.
#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    #[serde(rename = "instructorEmail")]
    pub instructor_email: String,
    #[serde(flatten)]
    pub details: Document,
}

impl CreateClassRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.instructor_email.trim().is_empty() {
            return Err("instructorEmail is required");
        }
        Ok(())
    }
}
