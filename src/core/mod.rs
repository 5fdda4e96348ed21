//! Core functionality for the credential service

pub mod service;

// Re-export main components for convenience
pub use service::AuthService;
