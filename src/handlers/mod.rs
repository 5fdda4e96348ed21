//! Request-boundary handlers

pub mod auth;

// Re-export the bearer-token guard
pub use auth::{AuthMiddleware, AuthRequest};
