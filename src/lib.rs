//! Rusty Auth - A minimal credential service implemented in Rust
//!
//! This library registers users with Argon2-hashed passwords, issues
//! stateless HS256 session tokens on login, and guards protected
//! operations with bearer-token verification.

pub mod auth;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod handlers;
pub mod notify;
pub mod security_logger;
pub mod storage;

// Re-export main components
pub use auth::{AuthenticatedIdentity, Credentials, UserProfile, UserRecord};
pub use config::AuthConfig;
pub use constants::*;
pub use crate::core::AuthService;
pub use error::{Result, RustyAuthError};
pub use handlers::{AuthMiddleware, AuthRequest};
