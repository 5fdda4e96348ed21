//! In-memory storage implementation for development and testing
//!
//! Keeps every record in a map guarded by a single async lock. Suitable for
//! development, testing, or small single-process deployments.

use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::CredentialStore;
use crate::auth::user::UserRecord;
use crate::error::{Result, RustyAuthError};

/// In-memory credential storage keyed by email
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn insert(&self, record: UserRecord) -> Result<UserRecord> {
        // Check and insert under one write guard
        let mut users = self.users.write().await;
        match users.entry(record.email.clone()) {
            Entry::Occupied(_) => Err(RustyAuthError::DuplicateKey(record.email)),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                log::debug!("Stored user record {}", record.identity_id);
                Ok(record)
            }
        }
    }
}
