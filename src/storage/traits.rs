//! Abstract storage interface for pluggable credential backends
//!
//! The service only ever reads a record by email and inserts new ones;
//! records are immutable once stored.

use async_trait::async_trait;

use crate::auth::user::UserRecord;
use crate::error::Result;

/// Credential storage interface
///
/// `insert` must be atomic per email: when two callers insert the same email
/// concurrently, exactly one succeeds and the other gets
/// `RustyAuthError::DuplicateKey`. An existing record is never overwritten.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Get user by email (exact, case-sensitive match)
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// Store a new user, failing with `DuplicateKey` if the email is taken
    async fn insert(&self, record: UserRecord) -> Result<UserRecord>;
}
