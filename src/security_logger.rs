//! Security-focused logging module to track authentication events

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Types of security events to track
#[derive(Debug, Clone)]
pub enum SecurityEvent {
    // Registration events
    RegistrationSuccess { identity_id: String },
    RegistrationRejected { reason: String },

    // Authentication events
    AuthenticationSuccess { identity_id: String },
    AuthenticationFailed { email: String, reason: String },

    // Token events
    TokenValidationFailed { reason: String },
    MissingToken,

    // System security
    ConfigurationError { component: String, error: String },
}

/// Security event with timestamp
#[derive(Debug, Clone)]
struct TimestampedEvent {
    event: SecurityEvent,
    timestamp: Instant,
}

/// Security logger for tracking and alerting on security events
pub struct SecurityLogger {
    events: Arc<RwLock<Vec<TimestampedEvent>>>,
    event_counts: Arc<RwLock<HashMap<String, usize>>>,
    max_events: usize,
    alert_thresholds: HashMap<String, usize>,
}

impl Default for SecurityLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityLogger {
    /// Create a new security logger
    pub fn new() -> Self {
        let mut alert_thresholds = HashMap::new();
        alert_thresholds.insert("auth_failed".to_string(), 5);
        alert_thresholds.insert("registration_rejected".to_string(), 20);
        alert_thresholds.insert("token_validation_failed".to_string(), 10);
        alert_thresholds.insert("missing_token".to_string(), 50);
        alert_thresholds.insert("config_error".to_string(), 1);

        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            event_counts: Arc::new(RwLock::new(HashMap::new())),
            max_events: 10000,
            alert_thresholds,
        }
    }

    /// Log a security event
    pub async fn log_event(&self, event: SecurityEvent) {
        let event_key = Self::event_key(&event);

        {
            let mut events = self.events.write().await;
            events.push(TimestampedEvent {
                event: event.clone(),
                timestamp: Instant::now(),
            });

            // Limit memory usage
            if events.len() > self.max_events {
                let events_to_remove = events.len() - self.max_events;
                events.drain(0..events_to_remove);
            }
        }

        // Update counters and check for alerts
        {
            let mut counts = self.event_counts.write().await;
            let count = counts.entry(event_key.to_string()).or_insert(0);
            *count += 1;

            if let Some(&threshold) = self.alert_thresholds.get(event_key) {
                if *count >= threshold {
                    log::error!(
                        "SECURITY ALERT: {} events of type '{}' detected",
                        count,
                        event_key
                    );
                    log::error!("Sample event: {:?}", event);
                    *count = 0;
                }
            }
        }

        match event {
            SecurityEvent::RegistrationSuccess { identity_id } => {
                log::info!("SECURITY: Registration success - Identity: {}", identity_id);
            }
            SecurityEvent::RegistrationRejected { reason } => {
                log::info!("SECURITY: Registration rejected - Reason: {}", reason);
            }
            SecurityEvent::AuthenticationSuccess { identity_id } => {
                log::info!("SECURITY: Authentication success - Identity: {}", identity_id);
            }
            SecurityEvent::AuthenticationFailed { email, reason } => {
                log::warn!(
                    "SECURITY: Authentication failed - Email: {}, Reason: {}",
                    email,
                    reason
                );
            }
            SecurityEvent::TokenValidationFailed { reason } => {
                log::warn!("SECURITY: Token validation failed - Reason: {}", reason);
            }
            SecurityEvent::MissingToken => {
                log::debug!("SECURITY: Request without bearer token rejected");
            }
            SecurityEvent::ConfigurationError { component, error } => {
                log::error!(
                    "SECURITY: Configuration error - Component: {}, Error: {}",
                    component,
                    error
                );
            }
        }
    }

    fn event_key(event: &SecurityEvent) -> &'static str {
        match event {
            SecurityEvent::RegistrationSuccess { .. } => "registration_success",
            SecurityEvent::RegistrationRejected { .. } => "registration_rejected",
            SecurityEvent::AuthenticationSuccess { .. } => "auth_success",
            SecurityEvent::AuthenticationFailed { .. } => "auth_failed",
            SecurityEvent::TokenValidationFailed { .. } => "token_validation_failed",
            SecurityEvent::MissingToken => "missing_token",
            SecurityEvent::ConfigurationError { .. } => "config_error",
        }
    }

    /// Get recent security events
    pub async fn get_recent_events(&self, duration: Duration) -> Vec<SecurityEvent> {
        let events = self.events.read().await;
        let now = Instant::now();

        events
            .iter()
            .filter(|event| now.duration_since(event.timestamp) <= duration)
            .map(|event| event.event.clone())
            .collect()
    }

    /// Get event counts since the last alert for each kind
    pub async fn get_event_stats(&self) -> HashMap<String, usize> {
        self.event_counts.read().await.clone()
    }

    /// Clean up old events
    pub async fn cleanup_old_events(&self, max_age: Duration) {
        let mut events = self.events.write().await;
        let now = Instant::now();
        events.retain(|event| now.duration_since(event.timestamp) <= max_age);
    }

    /// Start periodic cleanup task
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(300)); // Every 5 minutes
            loop {
                interval.tick().await;
                self.cleanup_old_events(Duration::from_secs(3600 * 24)).await; // Keep 24 hours
            }
        });
    }
}

/// Global security logger instance - thread-safe singleton
static SECURITY_LOGGER: OnceLock<Arc<SecurityLogger>> = OnceLock::new();

/// Initialize the global security logger. Must run inside a tokio runtime.
pub fn init_security_logger() {
    SECURITY_LOGGER.get_or_init(|| {
        let logger = Arc::new(SecurityLogger::new());
        logger.clone().start_cleanup_task();
        logger
    });
}

/// Get the global security logger
pub fn get_security_logger() -> Option<Arc<SecurityLogger>> {
    SECURITY_LOGGER.get().cloned()
}

/// Log a security event using the global logger
pub async fn log_security_event(event: SecurityEvent) {
    if let Some(logger) = get_security_logger() {
        logger.log_event(event).await;
    }
}
