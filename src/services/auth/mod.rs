pub mod token;

pub use token::{Claims, TokenError, TokenService};
