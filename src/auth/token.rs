use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::auth::user::AuthenticatedIdentity;
use crate::error::{Result, RustyAuthError};

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity ID)
    pub sub: String,
    /// Expiration time (as UTC timestamp)
    pub exp: i64,
    /// Issued at (as UTC timestamp)
    pub iat: i64,
    /// Token ID
    pub jti: String,
}

impl Claims {
    /// Creates claims expiring `ttl` after `issued_at`
    pub fn new(identity_id: String, issued_at: DateTime<Utc>, ttl: Duration) -> Result<Self> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|_| RustyAuthError::SigningFailure("Token TTL out of range".to_string()))?;
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| RustyAuthError::SigningFailure("Token expiry out of range".to_string()))?;

        Ok(Self {
            sub: identity_id,
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        })
    }

    /// Expired once `now` reaches `exp`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

/// Signs session tokens with the server secret
pub struct TokenIssuer {
    encoding_key: Option<EncodingKey>,
}

impl TokenIssuer {
    /// An empty secret is accepted here and reported on every `issue` call
    pub fn new(secret: &str) -> Self {
        let encoding_key = if secret.is_empty() {
            log::error!("Token issuer created without a signing secret");
            None
        } else {
            Some(EncodingKey::from_secret(secret.as_bytes()))
        };
        Self { encoding_key }
    }

    /// Issue a token for `identity_id` valid for `ttl` from now
    pub fn issue(&self, identity_id: &str, ttl: Duration) -> Result<String> {
        self.issue_at(identity_id, Utc::now(), ttl)
    }

    /// Issue a token as if the current time were `issued_at`
    pub fn issue_at(
        &self,
        identity_id: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String> {
        let key = self.encoding_key.as_ref().ok_or_else(|| {
            RustyAuthError::SigningFailure("Signing secret is not configured".to_string())
        })?;

        let claims = Claims::new(identity_id.to_string(), issued_at, ttl)?;
        encode(&Header::new(Algorithm::HS256), &claims, key)
            .map_err(|e| RustyAuthError::SigningFailure(format!("Failed to generate token: {}", e)))
    }
}

/// Checks token signature and expiry
pub struct TokenVerifier {
    decoding_key: Option<DecodingKey>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let decoding_key = if secret.is_empty() {
            None
        } else {
            Some(DecodingKey::from_secret(secret.as_bytes()))
        };

        // Expiry is checked against our own clock, without leeway
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key,
            validation,
        }
    }

    /// Validate a token against the current time
    pub fn verify(&self, token: &str) -> Result<AuthenticatedIdentity> {
        self.verify_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<AuthenticatedIdentity> {
        let claims = self.decode_claims(token)?;

        if claims.is_expired_at(now) {
            return Err(RustyAuthError::TokenExpired);
        }

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or_else(|| RustyAuthError::InvalidToken("Expiry out of range".to_string()))?;

        Ok(AuthenticatedIdentity {
            identity_id: claims.sub,
            expires_at,
        })
    }

    /// Signature-checked claims, without any expiry decision
    pub fn decode_claims(&self, token: &str) -> Result<Claims> {
        let key = self.decoding_key.as_ref().ok_or_else(|| {
            RustyAuthError::SigningFailure("Signing secret is not configured".to_string())
        })?;

        let data = decode::<Claims>(token, key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => {
                RustyAuthError::InvalidToken("Signature mismatch".to_string())
            }
            _ => RustyAuthError::InvalidToken(format!("Malformed token: {}", e)),
        })?;

        if data.claims.sub.is_empty() {
            return Err(RustyAuthError::InvalidToken("Empty subject".to_string()));
        }

        Ok(data.claims)
    }
}

/// Extracts bearer token from an Authorization header value
pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    let mut parts = auth_header.trim().splitn(2, ' ');
    let scheme = parts.next()?;
    if !scheme.eq_ignore_ascii_case(crate::constants::BEARER_SCHEME) {
        return None;
    }
    let token = parts.next()?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
