//! HTTP request handlers.

pub mod auth_handler;
pub mod vocab_handler;

pub use auth_handler::auth_routes;
pub use vocab_handler::vocab_routes;
