//! Tests for loading configuration from the process environment

use rusty_auth::config::AuthConfig;
use std::env;
use std::time::Duration;

const VARS: [&str; 7] = [
    "RUSTY_AUTH_SIGNING_SECRET",
    "JWT_SECRET",
    "RUSTY_AUTH_TOKEN_TTL_SECS",
    "RUSTY_AUTH_HASH_WORK_FACTOR",
    "RUSTY_AUTH_HASH_MEMORY_KIB",
    "RUSTY_AUTH_TOKEN_HEADER",
    "RUSTY_AUTH_WELCOME_EMAIL",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

// Single test so environment mutations never race within this binary
#[test]
fn test_from_env() {
    let original: Vec<(&str, Option<String>)> =
        VARS.iter().map(|v| (*v, env::var(v).ok())).collect();

    // Missing secret
    clear_env();
    let result = AuthConfig::from_env();
    assert!(result.is_err());
    assert!(result.unwrap_err().is_fatal());

    // Weak secret
    env::set_var("RUSTY_AUTH_SIGNING_SECRET", "short");
    assert!(AuthConfig::from_env().is_err(), "Should reject short secret");

    // Valid secret with defaults
    env::set_var(
        "RUSTY_AUTH_SIGNING_SECRET",
        "env_signing_key_with_32_characters_minimum_abc123",
    );
    let config = AuthConfig::from_env().unwrap();
    assert_eq!(config.token_ttl, Duration::from_secs(3600));
    assert_eq!(config.token_header, "authorization");

    // Overrides
    env::set_var("RUSTY_AUTH_TOKEN_TTL_SECS", "900");
    env::set_var("RUSTY_AUTH_HASH_WORK_FACTOR", "3");
    env::set_var("RUSTY_AUTH_WELCOME_EMAIL", "0");
    let config = AuthConfig::from_env().unwrap();
    assert_eq!(config.token_ttl, Duration::from_secs(900));
    assert_eq!(config.hash_work_factor, 3);
    assert!(!config.send_welcome_email);

    // Restore original environment
    clear_env();
    for (var, value) in original {
        if let Some(value) = value {
            env::set_var(var, value);
        }
    }
}
