use log::{error, info, warn};
use serde_json::json;
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, BufReader};

use rusty_auth::config::AuthConfig;
use rusty_auth::core::AuthService;
use rusty_auth::error::RustyAuthError;
use rusty_auth::handlers::{AuthMiddleware, AuthRequest};
use rusty_auth::notify::LogNotifier;
use rusty_auth::security_logger::{init_security_logger, log_security_event, SecurityEvent};
use rusty_auth::storage::MemoryCredentialStore;
use rusty_auth::Credentials;

#[tokio::main]
async fn main() {
    // Load .env before the logger so RUST_LOG can come from it
    let dotenv_result = dotenvy::dotenv();

    // Initialize logging
    env_logger::init();
    match dotenv_result {
        Ok(path) => info!("Environment variables loaded from {}", path.display()),
        Err(e) => warn!("Failed to load .env file: {}", e),
    };
    init_security_logger();

    let config = match AuthConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log_security_event(SecurityEvent::ConfigurationError {
                component: "config".to_string(),
                error: e.to_string(),
            })
            .await;
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Configuration: token_ttl={}s, hash_work_factor={}, token_header={}",
        config.token_ttl.as_secs(),
        config.hash_work_factor,
        config.token_header
    );

    let service = match AuthService::new(&config, Arc::new(MemoryCredentialStore::new())) {
        Ok(service) => service.with_notifier(Arc::new(LogNotifier)),
        Err(e) => {
            error!("Failed to initialize auth service: {}", e);
            std::process::exit(1);
        }
    };
    let middleware = AuthMiddleware::from_config(&config);

    info!("Rusty Auth ready: register <email> <password> | login <email> <password> | whoami <authorization> | quit");

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read command: {}", e);
                break;
            }
        };

        let mut parts = line.trim().splitn(2, ' ');
        let command = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or_default().trim();

        let outcome = match command {
            "" => continue,
            "quit" | "exit" => break,
            "register" => match parse_credentials(rest) {
                Ok(credentials) => service.register(credentials).await.map(|profile| {
                    let body = json!({
                        "success": true,
                        "message": "Registration successful",
                        "data": profile,
                    });
                    (201, body)
                }),
                Err(e) => Err(e),
            },
            "login" => match parse_credentials(rest) {
                Ok(credentials) => service
                    .login(credentials)
                    .await
                    .map(|token| (200, json!({ "success": true, "token": token }))),
                Err(e) => Err(e),
            },
            "whoami" => {
                let request = AuthRequest::new().with_header(&config.token_header, rest);
                middleware
                    .guard(request, |request| async move {
                        Ok((200, json!({ "success": true, "identity": request.identity() })))
                    })
                    .await
            }
            other => Err(RustyAuthError::ValidationError(format!("unknown command '{}'", other))),
        };

        let (status, body) = match outcome {
            Ok(ok) => ok,
            Err(e) => {
                if e.is_fatal() {
                    error!("Fatal service error: {}", e);
                }
                (e.status_code(), json!({ "success": false, "message": e.public_message() }))
            }
        };
        println!("{}", json!({ "status": status, "body": body }));
    }

    info!("Rusty Auth shutting down");
}

fn parse_credentials(args: &str) -> Result<Credentials, RustyAuthError> {
    let mut parts = args.split_whitespace();
    let credentials = Credentials::new(
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
    );
    credentials.validate()?;
    Ok(credentials)
}
