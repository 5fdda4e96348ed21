//! Service configuration module
//! Loads the signing secret, token lifetime and hashing cost from the environment

use crate::constants::{
    DEFAULT_HASH_MEMORY_KIB, DEFAULT_HASH_WORK_FACTOR, DEFAULT_TOKEN_HEADER,
    DEFAULT_TOKEN_TTL_SECS, HASH_PARALLELISM, MIN_SECRET_LENGTH,
};
use crate::error::{Result, RustyAuthError};
use chrono::Utc;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Credential service configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for token signing/validation
    pub signing_secret: String,
    /// Lifetime of issued session tokens
    pub token_ttl: Duration,
    /// Argon2 iteration count
    pub hash_work_factor: u32,
    /// Argon2 memory cost in KiB
    pub hash_memory_kib: u32,
    /// Header the middleware reads the bearer token from
    pub token_header: String,
    /// Send the welcome notification after registration
    pub send_welcome_email: bool,
}

// Keep the secret out of logs
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("hash_work_factor", &self.hash_work_factor)
            .field("hash_memory_kib", &self.hash_memory_kib)
            .field("token_header", &self.token_header)
            .field("send_welcome_email", &self.send_welcome_email)
            .finish()
    }
}

impl AuthConfig {
    /// Build a configuration with default settings around the given secret.
    /// The secret is not validated here; call `validate()` for that.
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            hash_work_factor: DEFAULT_HASH_WORK_FACTOR,
            hash_memory_kib: DEFAULT_HASH_MEMORY_KIB,
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            send_welcome_email: true,
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_hash_cost(mut self, work_factor: u32, memory_kib: u32) -> Self {
        self.hash_work_factor = work_factor;
        self.hash_memory_kib = memory_kib;
        self
    }

    pub fn with_token_header(mut self, header: impl Into<String>) -> Self {
        self.token_header = header.into();
        self
    }

    pub fn with_welcome_email(mut self, enabled: bool) -> Self {
        self.send_welcome_email = enabled;
        self
    }

    /// Validate that a secret meets security requirements
    fn validate_secret(secret: &str) -> Result<()> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(RustyAuthError::ConfigError(format!(
                "Signing secret must be at least {} characters long",
                MIN_SECRET_LENGTH
            )));
        }

        // Check for insecure default or example values
        let insecure_patterns = [
            "your-secret-key",
            "change-this",
            "changeme",
            "default",
            "password",
            "12345",
        ];

        for pattern in &insecure_patterns {
            if secret.to_lowercase().contains(pattern) {
                return Err(RustyAuthError::ConfigError(format!(
                    "Signing secret contains insecure pattern '{}'. Please use a secure random secret generated with: openssl rand -base64 32",
                    pattern
                )));
            }
        }

        // Ensure some complexity
        if secret.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RustyAuthError::ConfigError(
                "Signing secret should contain mixed characters (letters, numbers, symbols) for security".to_string(),
            ));
        }

        Ok(())
    }

    /// Check every setting, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        Self::validate_secret(&self.signing_secret)?;

        if self.hash_work_factor == 0 {
            return Err(RustyAuthError::ConfigError(
                "Hash work factor must be at least 1".to_string(),
            ));
        }

        if self.hash_memory_kib < 8 * HASH_PARALLELISM {
            return Err(RustyAuthError::ConfigError(format!(
                "Hash memory cost must be at least {} KiB",
                8 * HASH_PARALLELISM
            )));
        }

        if self.token_header.trim().is_empty() {
            return Err(RustyAuthError::ConfigError(
                "Token header name must not be empty".to_string(),
            ));
        }

        // Every login adds the TTL to the current time; it must never overflow
        let ttl_fits = chrono::Duration::from_std(self.token_ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .is_some();
        if !ttl_fits {
            return Err(RustyAuthError::ConfigError(format!(
                "Token TTL of {} seconds is out of range",
                self.token_ttl.as_secs()
            )));
        }

        Ok(())
    }

    /// Parse an optional numeric setting; a present but malformed value is an error
    fn parse_setting<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
    where
        F: Fn(&str) -> Option<String>,
        T: FromStr,
    {
        match lookup(key) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                RustyAuthError::ConfigError(format!(
                    "{} must be a non-negative integer, got '{}'",
                    key, raw
                ))
            }),
            None => Ok(default),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signing_secret = lookup("RUSTY_AUTH_SIGNING_SECRET")
            .or_else(|| lookup("JWT_SECRET"))
            .ok_or_else(|| {
                RustyAuthError::ConfigError(
                    "RUSTY_AUTH_SIGNING_SECRET (or JWT_SECRET) environment variable is required. \
                     Generate one with: openssl rand -base64 32"
                        .to_string(),
                )
            })?;

        let ttl_secs: u64 =
            Self::parse_setting(&lookup, "RUSTY_AUTH_TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;
        let hash_work_factor: u32 =
            Self::parse_setting(&lookup, "RUSTY_AUTH_HASH_WORK_FACTOR", DEFAULT_HASH_WORK_FACTOR)?;
        let hash_memory_kib: u32 =
            Self::parse_setting(&lookup, "RUSTY_AUTH_HASH_MEMORY_KIB", DEFAULT_HASH_MEMORY_KIB)?;

        let token_header = lookup("RUSTY_AUTH_TOKEN_HEADER")
            .unwrap_or_else(|| DEFAULT_TOKEN_HEADER.to_string());

        let send_welcome_email = lookup("RUSTY_AUTH_WELCOME_EMAIL")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(true);

        let config = Self {
            signing_secret,
            token_ttl: Duration::from_secs(ttl_secs),
            hash_work_factor,
            hash_memory_kib,
            token_header,
            send_welcome_email,
        };

        config.validate()?;
        Ok(config)
    }
}
