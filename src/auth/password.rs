//! Password hashing and verification.
//!
//! Hashes are Argon2id PHC strings: salt and cost parameters travel inside the
//! stored value, so verification works for hashes produced under an older work
//! factor.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::config::AuthConfig;
use crate::constants::HASH_PARALLELISM;
use crate::error::{Result, RustyAuthError};

/// Argon2id hasher with a tunable work factor
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Creates a hasher; `work_factor` is the Argon2 iteration count
    pub fn new(work_factor: u32, memory_kib: u32) -> Result<Self> {
        let params = Params::new(memory_kib, work_factor, HASH_PARALLELISM, None).map_err(|e| {
            RustyAuthError::ConfigError(format!("Invalid password hashing parameters: {}", e))
        })?;
        Ok(Self { params })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        Self::new(config.hash_work_factor, config.hash_memory_kib)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)?
            .to_string();
        Ok(hash)
    }

    /// Verify a password against a stored hash.
    ///
    /// A wrong password is `Ok(false)`; only a stored value that cannot be
    /// parsed or recomputed is an error.
    pub fn verify(&self, plaintext: &str, hashed: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hashed)?;
        match self.argon2().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
