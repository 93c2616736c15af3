use serde::Deserialize;

/// `?email=` scoping of owner-bound listings (`/carts`, `/myclasses`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailScope {
    pub email: Option<String>,
}

impl EmailScope {
    // Blank values count as absent.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.trim().is_empty())
    }
}
