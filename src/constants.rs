// Token defaults
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
pub const DEFAULT_TOKEN_HEADER: &str = "authorization";
pub const BEARER_SCHEME: &str = "Bearer";

// Argon2id defaults (OWASP baseline: 19 MiB, 2 iterations, 1 lane)
pub const DEFAULT_HASH_WORK_FACTOR: u32 = 2;
pub const DEFAULT_HASH_MEMORY_KIB: u32 = 19 * 1024;
pub const HASH_PARALLELISM: u32 = 1;

// Signing secret requirements
pub const MIN_SECRET_LENGTH: usize = 32;

// Welcome notification
pub const WELCOME_SUBJECT: &str = "Welcome to Our Service";
