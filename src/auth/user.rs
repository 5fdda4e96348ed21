use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, RustyAuthError};

/// Login or registration input
#[derive(Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields must be present; shape checks beyond that belong to the caller
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(RustyAuthError::ValidationError("email is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(RustyAuthError::ValidationError("password is required".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Stored user, as held by a credential store
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    /// Unique key, compared case-sensitively
    pub email: String,
    /// PHC-formatted Argon2 hash
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Identity bound into issued tokens
    pub identity_id: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Creates a new record with a fresh identity id
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            email,
            password_hash,
            identity_id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
        }
    }

    /// The record without its password hash
    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("identity_id", &self.identity_id)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Registered user as exposed outside the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub identity_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&UserRecord> for UserProfile {
    fn from(record: &UserRecord) -> Self {
        Self {
            email: record.email.clone(),
            identity_id: record.identity_id.clone(),
            created_at: record.created_at,
        }
    }
}

/// Claims established by a verified session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedIdentity {
    pub identity_id: String,
    pub expires_at: DateTime<Utc>,
}
