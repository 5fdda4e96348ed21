//! Post-registration notifications
//!
//! Delivery is best-effort: the service spawns the notification after a
//! successful registration and only logs a failure.

use async_trait::async_trait;

use crate::constants::WELCOME_SUBJECT;
use crate::error::Result;

/// Welcome message sent to newly registered users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl WelcomeEmail {
    pub fn new(to: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: WELCOME_SUBJECT.to_string(),
            html: "<h1>Welcome to Our Service!</h1><p>Thank you for registering with us.</p>"
                .to_string(),
        }
    }
}

/// Notification channel for newly registered users
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Notify the owner of `email` that their account exists
    async fn notify(&self, email: &str) -> Result<()>;
}

/// Writes the welcome message to the log instead of delivering it
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, email: &str) -> Result<()> {
        let message = WelcomeEmail::new(email);
        log::info!("Welcome email to {}: {}", message.to, message.subject);
        log::debug!("Welcome email body: {}", message.html);
        Ok(())
    }
}
