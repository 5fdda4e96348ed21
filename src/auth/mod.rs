//! Password hashing, session tokens and the credential data model

pub mod password;
pub mod token;
pub mod user;

// Re-export main components
pub use password::PasswordHasher;
pub use token::{extract_bearer_token, Claims, TokenIssuer, TokenVerifier};
pub use user::{AuthenticatedIdentity, Credentials, UserProfile, UserRecord};
