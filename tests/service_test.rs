use rusty_auth::handlers::{AuthMiddleware, AuthRequest};
use rusty_auth::storage::{CredentialStore, MemoryCredentialStore};
use rusty_auth::{AuthConfig, AuthService, Credentials, RustyAuthError};
use std::sync::Arc;

const SECRET: &str = "service-integration-key-0123456789abcdef";

fn test_config() -> AuthConfig {
    AuthConfig::new(SECRET).with_hash_cost(1, 1024)
}

fn setup() -> (Arc<AuthService>, MemoryCredentialStore) {
    let store = MemoryCredentialStore::new();
    let service = AuthService::new(&test_config(), Arc::new(store.clone())).unwrap();
    (Arc::new(service), store)
}

#[tokio::test]
async fn test_register_login_scenario() {
    let (service, store) = setup();

    let profile = service
        .register(Credentials::new("a@x.com", "secret123"))
        .await
        .unwrap();
    assert_eq!(profile.email, "a@x.com");

    let record = store.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_ne!(record.password_hash, "secret123");

    let token = service
        .login(Credentials::new("a@x.com", "secret123"))
        .await
        .unwrap();
    let identity = service.authenticate(&token).await.unwrap();
    assert_eq!(identity.identity_id, profile.identity_id);

    let wrong_password = service
        .login(Credentials::new("a@x.com", "wrong"))
        .await
        .unwrap_err();
    let unknown_email = service
        .login(Credentials::new("nobody@x.com", "x"))
        .await
        .unwrap_err();
    assert_eq!(wrong_password, RustyAuthError::InvalidCredentials);
    assert_eq!(unknown_email, RustyAuthError::InvalidCredentials);
    assert_eq!(wrong_password.public_message(), unknown_email.public_message());
    assert_eq!(wrong_password.status_code(), unknown_email.status_code());
}

#[tokio::test]
async fn test_duplicate_registration_keeps_first_record() {
    let (service, store) = setup();

    let first = service
        .register(Credentials::new("a@x.com", "secret123"))
        .await
        .unwrap();
    let before = store.find_by_email("a@x.com").await.unwrap().unwrap();

    let second = service
        .register(Credentials::new("a@x.com", "another-password"))
        .await;
    assert_eq!(second, Err(RustyAuthError::UserAlreadyExists));

    let after = store.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(before, after);
    assert_eq!(after.identity_id, first.identity_id);

    // The original password still works, the rejected one never does
    assert!(service
        .login(Credentials::new("a@x.com", "secret123"))
        .await
        .is_ok());
    assert_eq!(
        service
            .login(Credentials::new("a@x.com", "another-password"))
            .await,
        Err(RustyAuthError::InvalidCredentials)
    );
}

#[tokio::test]
async fn test_concurrent_registration_single_winner() {
    let (service, store) = setup();

    let a = {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            service
                .register(Credentials::new("race@x.com", "password-one"))
                .await
        })
    };
    let b = {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            service
                .register(Credentials::new("race@x.com", "password-two"))
                .await
        })
    };

    let (a, b) = tokio::join!(a, b);
    let results = [a.unwrap(), b.unwrap()];

    let winners = results.iter().filter(|r| r.is_ok()).count();
    let losers = results
        .iter()
        .filter(|r| matches!(r, Err(RustyAuthError::UserAlreadyExists)))
        .count();
    assert_eq!(winners, 1);
    assert_eq!(losers, 1);
    assert_eq!(store.count().await, 1);
}

#[tokio::test]
async fn test_many_concurrent_registrations() {
    let (service, store) = setup();

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .register(Credentials::new("same@x.com", format!("password-{}", i)))
                .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(RustyAuthError::UserAlreadyExists) => {}
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(store.count().await, 1);
}

#[tokio::test]
async fn test_token_from_login_passes_middleware() {
    let config = test_config();
    let store = MemoryCredentialStore::new();
    let service = AuthService::new(&config, Arc::new(store)).unwrap();
    let middleware = AuthMiddleware::from_config(&config);

    let profile = service
        .register(Credentials::new("a@x.com", "secret123"))
        .await
        .unwrap();
    let token = service
        .login(Credentials::new("a@x.com", "secret123"))
        .await
        .unwrap();

    let request = AuthRequest::new().with_header("Authorization", format!("Bearer {}", token));
    let identity_id = middleware
        .guard(request, |request| async move {
            Ok(request.identity().map(|i| i.identity_id.clone()))
        })
        .await
        .unwrap();
    assert_eq!(identity_id, Some(profile.identity_id));
}

#[tokio::test]
async fn test_token_from_other_deployment_rejected() {
    let (service, _) = setup();

    let other_config =
        AuthConfig::new("other-deployment-key-0123456789abcdef").with_hash_cost(1, 1024);
    let other = AuthService::new(&other_config, Arc::new(MemoryCredentialStore::new())).unwrap();
    other
        .register(Credentials::new("a@x.com", "secret123"))
        .await
        .unwrap();
    let foreign_token = other
        .login(Credentials::new("a@x.com", "secret123"))
        .await
        .unwrap();

    let result = service.authenticate(&foreign_token).await;
    assert!(matches!(result, Err(RustyAuthError::InvalidToken(_))));
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let (service, _) = setup();

    let result = service.register(Credentials::new("a@x.com", "")).await;
    assert!(matches!(result, Err(RustyAuthError::ValidationError(_))));

    let result = service.login(Credentials::new("", "secret123")).await;
    assert!(matches!(result, Err(RustyAuthError::ValidationError(_))));
    assert_eq!(result.unwrap_err().status_code(), 400);
}
