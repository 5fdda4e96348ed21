//! Bearer-token guard for protected operations

use std::collections::HashMap;
use std::future::Future;

use crate::auth::token::{extract_bearer_token, TokenVerifier};
use crate::auth::user::AuthenticatedIdentity;
use crate::config::AuthConfig;
use crate::error::{Result, RustyAuthError};
use crate::security_logger::{log_security_event, SecurityEvent};

/// Inbound request as seen by the guard: headers plus the identity slot
#[derive(Debug, Clone, Default)]
pub struct AuthRequest {
    headers: HashMap<String, String>,
    identity: Option<AuthenticatedIdentity>,
}

impl AuthRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header names are case-insensitive
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Identity attached by a successful `AuthMiddleware::authenticate`
    pub fn identity(&self) -> Option<&AuthenticatedIdentity> {
        self.identity.as_ref()
    }
}

/// Rejects requests without a valid bearer token.
///
/// Depends on the token verifier only; it never reads or writes the
/// credential store.
pub struct AuthMiddleware {
    verifier: TokenVerifier,
    header: String,
}

impl AuthMiddleware {
    pub fn new(verifier: TokenVerifier, header: &str) -> Self {
        Self {
            verifier,
            header: header.to_ascii_lowercase(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(TokenVerifier::new(&config.signing_secret), &config.token_header)
    }

    /// Bearer token from the designated header, if any
    pub fn extract_token(&self, request: &AuthRequest) -> Option<String> {
        let token = request.header(&self.header).and_then(extract_bearer_token);
        if token.is_some() {
            log::debug!("Token extracted from {} header", self.header);
        }
        token
    }

    /// Verify the request's token and attach the identity to it
    pub async fn authenticate(&self, request: &mut AuthRequest) -> Result<AuthenticatedIdentity> {
        let token = match self.extract_token(request) {
            Some(token) => token,
            None => {
                log_security_event(SecurityEvent::MissingToken).await;
                return Err(RustyAuthError::MissingToken);
            }
        };

        let identity = match self.verifier.verify(&token) {
            Ok(identity) => identity,
            Err(e) => {
                log_security_event(SecurityEvent::TokenValidationFailed {
                    reason: e.to_string(),
                })
                .await;
                return Err(e);
            }
        };

        request.identity = Some(identity.clone());
        Ok(identity)
    }

    /// Run `handler` only when the request carries a valid token
    pub async fn guard<T, F, Fut>(&self, mut request: AuthRequest, handler: F) -> Result<T>
    where
        F: FnOnce(AuthRequest) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.authenticate(&mut request).await?;
        handler(request).await
    }
}
