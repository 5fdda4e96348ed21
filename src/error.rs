use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RustyAuthError {
    // Input errors
    ValidationError(String),

    // Registration / login errors
    UserAlreadyExists,
    InvalidCredentials,

    // Token errors
    MissingToken,
    InvalidToken(String),
    TokenExpired,

    // Crypto errors
    HashingFailure(String),
    SigningFailure(String),

    // Storage errors
    DuplicateKey(String),
    StorageError(String),

    // Configuration errors
    ConfigError(String),
}

impl fmt::Display for RustyAuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::UserAlreadyExists => write!(f, "User already exists"),
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
            Self::MissingToken => write!(f, "Token required"),
            Self::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            Self::TokenExpired => write!(f, "Token expired"),
            Self::HashingFailure(msg) => write!(f, "Password hashing failure: {}", msg),
            Self::SigningFailure(msg) => write!(f, "Token signing failure: {}", msg),
            Self::DuplicateKey(key) => write!(f, "Duplicate key: {}", key),
            Self::StorageError(msg) => write!(f, "Storage error: {}", msg),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for RustyAuthError {}

impl RustyAuthError {
    /// Status the request boundary reports for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ValidationError(_) => 400,
            Self::InvalidCredentials | Self::MissingToken => 401,
            Self::InvalidToken(_) | Self::TokenExpired => 403,
            Self::UserAlreadyExists | Self::DuplicateKey(_) => 409,
            Self::HashingFailure(_)
            | Self::SigningFailure(_)
            | Self::StorageError(_)
            | Self::ConfigError(_) => 500,
        }
    }

    /// Message safe to show to an end user.
    ///
    /// Internal details (hash parser output, store errors, JWT decoder
    /// messages) never leave the process through this.
    pub fn public_message(&self) -> String {
        match self {
            Self::ValidationError(msg) => format!("Validation error: {}", msg),
            Self::UserAlreadyExists | Self::DuplicateKey(_) => "User already exists".to_string(),
            Self::InvalidCredentials => "Invalid credentials".to_string(),
            Self::MissingToken => "Token required".to_string(),
            Self::InvalidToken(_) => "Token is invalid".to_string(),
            Self::TokenExpired => "Token has expired".to_string(),
            Self::HashingFailure(_)
            | Self::SigningFailure(_)
            | Self::StorageError(_)
            | Self::ConfigError(_) => "Internal server error".to_string(),
        }
    }

    /// Misconfiguration or corrupted data, as opposed to a caller mistake
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::HashingFailure(_) | Self::SigningFailure(_) | Self::ConfigError(_)
        )
    }
}

impl From<argon2::password_hash::Error> for RustyAuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        RustyAuthError::HashingFailure(err.to_string())
    }
}

// A panicked or cancelled blocking task only ever carries hashing work
impl From<tokio::task::JoinError> for RustyAuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        RustyAuthError::HashingFailure(format!("Hashing task failed: {}", err))
    }
}

// Generic result type for RustyAuth
pub type Result<T> = std::result::Result<T, RustyAuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(RustyAuthError::ValidationError("email".into()).status_code(), 400);
        assert_eq!(RustyAuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(RustyAuthError::MissingToken.status_code(), 401);
        assert_eq!(RustyAuthError::InvalidToken("bad".into()).status_code(), 403);
        assert_eq!(RustyAuthError::TokenExpired.status_code(), 403);
        assert_eq!(RustyAuthError::UserAlreadyExists.status_code(), 409);
        assert_eq!(RustyAuthError::SigningFailure("no key".into()).status_code(), 500);
    }

    #[test]
    fn test_public_message_hides_internals() {
        let err = RustyAuthError::HashingFailure("invalid PHC string".into());
        assert_eq!(err.public_message(), "Internal server error");

        let err = RustyAuthError::InvalidToken("InvalidSignature".into());
        assert!(!err.public_message().contains("InvalidSignature"));

        let err = RustyAuthError::DuplicateKey("a@x.com".into());
        assert!(!err.public_message().contains("a@x.com"));
    }

    #[test]
    fn test_fatal_errors() {
        assert!(RustyAuthError::HashingFailure("x".into()).is_fatal());
        assert!(RustyAuthError::SigningFailure("x".into()).is_fatal());
        assert!(RustyAuthError::ConfigError("x".into()).is_fatal());
        assert!(!RustyAuthError::InvalidCredentials.is_fatal());
        assert!(!RustyAuthError::TokenExpired.is_fatal());
        assert!(!RustyAuthError::UserAlreadyExists.is_fatal());
    }
}
