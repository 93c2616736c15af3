pub mod auth;
pub mod carts;
pub mod classes;
pub mod results;
pub mod scope;
pub mod users;
