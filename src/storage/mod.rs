//! Storage mechanisms for persisting and retrieving user credentials

pub mod memory;
pub mod traits;

// Re-export the store interface and the in-memory backend
pub use memory::MemoryCredentialStore;
pub use traits::CredentialStore;
