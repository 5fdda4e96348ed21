//! Registration and login orchestration
//!
//! `AuthService` ties the credential store, the password hasher and the token
//! issuer together. Hashing is CPU-bound and runs on the blocking pool.

use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::auth::password::PasswordHasher;
use crate::auth::token::{TokenIssuer, TokenVerifier};
use crate::auth::user::{AuthenticatedIdentity, Credentials, UserProfile, UserRecord};
use crate::config::AuthConfig;
use crate::error::{Result, RustyAuthError};
use crate::notify::Notifier;
use crate::security_logger::{log_security_event, SecurityEvent};
use crate::storage::CredentialStore;

pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    notifier: Option<Arc<dyn Notifier>>,
    send_welcome_email: bool,
    token_ttl: Duration,
    /// Verified against when the email is unknown, so both login failures cost one hash
    dummy_hash: String,
}

impl AuthService {
    pub fn new(config: &AuthConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let hasher = PasswordHasher::from_config(config)?;
        let dummy_hash = hasher.hash("rusty-auth-timing-equalizer")?;

        Ok(Self {
            store,
            hasher,
            issuer: TokenIssuer::new(&config.signing_secret),
            verifier: TokenVerifier::new(&config.signing_secret),
            notifier: None,
            send_welcome_email: config.send_welcome_email,
            token_ttl: config.token_ttl,
            dummy_hash,
        })
    }

    /// Attach the notifier used for welcome messages
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Register a new user and return its public profile
    pub async fn register(&self, credentials: Credentials) -> Result<UserProfile> {
        credentials.validate()?;

        if self.store.find_by_email(&credentials.email).await?.is_some() {
            log_security_event(SecurityEvent::RegistrationRejected {
                reason: "email already registered".to_string(),
            })
            .await;
            return Err(RustyAuthError::UserAlreadyExists);
        }

        let Credentials { email, password } = credentials;
        let hasher = self.hasher.clone();
        let password_hash = task::spawn_blocking(move || hasher.hash(&password)).await??;

        // A concurrent registration may have won since the lookup above
        let stored = match self.store.insert(UserRecord::new(email, password_hash)).await {
            Ok(record) => record,
            Err(RustyAuthError::DuplicateKey(_)) => {
                log_security_event(SecurityEvent::RegistrationRejected {
                    reason: "email registered concurrently".to_string(),
                })
                .await;
                return Err(RustyAuthError::UserAlreadyExists);
            }
            Err(e) => return Err(e),
        };

        log::info!("Registered user {}", stored.identity_id);
        log_security_event(SecurityEvent::RegistrationSuccess {
            identity_id: stored.identity_id.clone(),
        })
        .await;

        self.send_welcome(&stored.email);
        Ok(stored.profile())
    }

    /// Check credentials and issue a session token
    pub async fn login(&self, credentials: Credentials) -> Result<String> {
        credentials.validate()?;

        let record = self.store.find_by_email(&credentials.email).await?;
        let (stored_hash, identity_id) = match record {
            Some(record) => (record.password_hash, Some(record.identity_id)),
            None => (self.dummy_hash.clone(), None),
        };

        let Credentials { email, password } = credentials;
        let hasher = self.hasher.clone();
        let matches = task::spawn_blocking(move || hasher.verify(&password, &stored_hash)).await??;

        let identity_id = match (identity_id, matches) {
            (Some(identity_id), true) => identity_id,
            (known, _) => {
                let reason = if known.is_some() { "wrong password" } else { "unknown email" };
                log_security_event(SecurityEvent::AuthenticationFailed {
                    email,
                    reason: reason.to_string(),
                })
                .await;
                return Err(RustyAuthError::InvalidCredentials);
            }
        };

        let token = self.issuer.issue(&identity_id, self.token_ttl)?;
        log_security_event(SecurityEvent::AuthenticationSuccess { identity_id }).await;
        Ok(token)
    }

    /// Verify a session token and return the identity it carries
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedIdentity> {
        match self.verifier.verify(token) {
            Ok(identity) => Ok(identity),
            Err(e) => {
                log_security_event(SecurityEvent::TokenValidationFailed {
                    reason: e.to_string(),
                })
                .await;
                Err(e)
            }
        }
    }

    fn send_welcome(&self, email: &str) {
        if !self.send_welcome_email {
            return;
        }
        let Some(notifier) = self.notifier.clone() else {
            return;
        };

        let email = email.to_string();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&email).await {
                log::warn!("Welcome notification for {} failed: {}", email, e);
            }
        });
    }
}
