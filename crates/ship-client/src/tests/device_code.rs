use crate::device_code::protocol::{IdTokenClaims, TokenPoll, TokenResponse};
use crate::device_code::{account_from_claims, decode_id_token, interpret_token_response};
use crate::{AccountCache, CachedAccount, ClientError};

use std::fs;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use googletest::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn jwt(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

fn error_response(error: &str) -> TokenResponse {
    TokenResponse {
        error: Some(error.to_string()),
        ..TokenResponse::default()
    }
}

// =========================================================================
// Token polling
// =========================================================================

#[test]
fn given_pending_answer_then_keep_polling() {
    let poll = interpret_token_response(400, error_response("authorization_pending")).unwrap();

    assert!(matches!(poll, TokenPoll::Pending));
}

#[test]
fn given_slow_down_answer_then_back_off() {
    let poll = interpret_token_response(400, error_response("slow_down")).unwrap();

    assert!(matches!(poll, TokenPoll::SlowDown));
}

#[test]
fn given_declined_answer_then_protocol_error() {
    let err = interpret_token_response(400, error_response("authorization_declined")).unwrap_err();

    assert!(matches!(err, ClientError::Protocol { .. }));
    assert_that!(err.to_string().as_str(), contains_substring("declined"));
}

#[test]
fn given_unknown_error_then_description_reported() {
    let response = TokenResponse {
        error: Some(String::from("invalid_grant")),
        error_description: Some(String::from("AADSTS70000: grant is invalid")),
        ..TokenResponse::default()
    };

    let err = interpret_token_response(400, response).unwrap_err();

    assert_that!(err.to_string().as_str(), contains_substring("AADSTS70000"));
}

#[test]
fn given_success_then_token_granted() {
    let response = TokenResponse {
        access_token: Some(String::from("access")),
        expires_in: Some(3599),
        ..TokenResponse::default()
    };

    let poll = interpret_token_response(200, response).unwrap();

    let TokenPoll::Granted(token) = poll else {
        panic!("expected a granted token");
    };
    assert_that!(token.access_token.as_str(), eq("access"));
    assert_that!(token.expires_in, eq(3599));
}

#[test]
fn given_success_without_access_token_then_protocol_error() {
    let err = interpret_token_response(200, TokenResponse::default()).unwrap_err();

    assert!(matches!(err, ClientError::Protocol { .. }));
}

#[test]
fn given_server_error_without_oauth_error_then_api_error() {
    let err = interpret_token_response(503, TokenResponse::default()).unwrap_err();

    assert_that!(err.status(), some(eq(503)));
}

// =========================================================================
// ID token claims
// =========================================================================

#[test]
fn given_id_token_then_account_uses_home_account_id() {
    let token = jwt(json!({
        "oid": "object-1",
        "tid": "tenant-1",
        "preferred_username": "fed@xenoptics.com",
        "name": "Fed User"
    }));

    let account = decode_id_token(&token).and_then(account_from_claims).unwrap();

    assert_that!(account.account_id.as_str(), eq("object-1.tenant-1"));
    assert_that!(account.username.as_str(), eq("fed@xenoptics.com"));
    assert_that!(account.name.as_deref(), some(eq("Fed User")));
}

#[test]
fn given_claims_without_username_then_no_account() {
    let claims = IdTokenClaims {
        sub: Some(String::from("subject")),
        ..IdTokenClaims::default()
    };

    assert_that!(account_from_claims(claims), none());
}

#[test]
fn given_malformed_id_token_then_no_claims() {
    assert!(decode_id_token("not-a-jwt").is_none());
    assert!(decode_id_token("a.!!!.c").is_none());
}

// =========================================================================
// AccountCache
// =========================================================================

fn account(expires_in_minutes: i64) -> CachedAccount {
    CachedAccount {
        account_id: String::from("object-1.tenant-1"),
        username: String::from("fed@xenoptics.com"),
        name: Some(String::from("Fed User")),
        expires_at: Utc::now() + Duration::minutes(expires_in_minutes),
    }
}

#[test]
fn given_stored_account_when_loaded_then_same_account() {
    let dir = TempDir::new().unwrap();
    let cache = AccountCache::new(dir.path().join("session").join("provider_account.json"));
    let stored = account(30);

    cache.store(&stored).unwrap();

    assert_that!(cache.load(), some(eq(&stored)));
}

#[test]
fn given_past_expiry_then_account_is_expired() {
    assert!(account(-1).is_expired(Utc::now()));
    assert!(!account(10).is_expired(Utc::now()));
}

#[test]
fn given_unreadable_cache_when_loaded_then_none_and_removed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("provider_account.json");
    fs::write(&path, "garbage").unwrap();
    let cache = AccountCache::new(&path);

    assert_that!(cache.load(), none());
    assert!(!path.exists());
}

#[test]
fn given_empty_cache_when_cleared_then_ok() {
    let dir = TempDir::new().unwrap();
    let cache = AccountCache::new(dir.path().join("provider_account.json"));

    assert_that!(cache.clear(), ok(anything()));
}
