//! Integration tests for the credential validator using a wiremock server

use ship_client::CredentialClient;
use ship_session::store::codec;
use ship_session::{CredentialValidator, SessionError};

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

const LOGIN_PATH: &str = "/api/mfg/auth/loginRemote";

async fn client_for(server: &MockServer) -> CredentialClient {
    CredentialClient::new(&format!("{}{LOGIN_PATH}", server.uri()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_validate_success() {
    let mock_server = MockServer::start().await;
    let user = codec::encode(&json!({
        "token": "tok-bob",
        "userID": "u-7",
        "firstname": "Bob",
        "email": "bob@xenoptics.com"
    }))
    .unwrap();

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_json(json!({
            "mode": "login",
            "username": "bob",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ret": 0, "data": user })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let validated = client.validate("bob", &SecretString::from("secret")).await.unwrap();

    assert_eq!(validated.subject_id, "u-7");
    assert_eq!(validated.display_name.as_deref(), Some("Bob"));
    assert_eq!(validated.credential.expose(), "tok-bob");
}

#[tokio::test]
async fn test_validate_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid username or password" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.validate("bob", &SecretString::from("wrongpass")).await.unwrap_err();

    assert!(matches!(err, SessionError::InvalidCredentials { .. }));
    assert_eq!(err.user_message(), "Invalid username or password");
}

#[tokio::test]
async fn test_validate_unauthorized_without_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.validate("bob", &SecretString::from("wrongpass")).await.unwrap_err();

    assert!(matches!(err, SessionError::InvalidCredentials { .. }));
    assert!(!err.user_message().is_empty());
}

#[tokio::test]
async fn test_validate_server_error_is_network_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "message": "database unavailable" }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.validate("bob", &SecretString::from("secret")).await.unwrap_err();

    assert!(matches!(err, SessionError::NetworkFailure { .. }));
    assert!(err.to_string().contains("database unavailable"));
}

#[tokio::test]
async fn test_validate_rejected_by_ret_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ret": 2 })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.validate("bob", &SecretString::from("wrongpass")).await.unwrap_err();

    assert!(matches!(err, SessionError::InvalidCredentials { .. }));
}

#[tokio::test]
async fn test_validate_unreachable_server() {
    let mock_server = MockServer::start().await;
    let url = format!("{}{LOGIN_PATH}", mock_server.uri());
    drop(mock_server);

    let client = CredentialClient::new(&url, Duration::from_secs(2)).unwrap();
    let err = client.validate("bob", &SecretString::from("secret")).await.unwrap_err();

    assert!(matches!(err, SessionError::NetworkFailure { .. }));
    assert!(err.is_transient());
}
