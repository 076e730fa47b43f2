use crate::IdentityProviderConfig;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};

#[test]
fn given_default_config_when_validate_then_ok() {
    assert_that!(IdentityProviderConfig::default().validate(), ok(anything()));
}

#[test]
fn given_authority_when_deriving_endpoints_then_uses_v2_paths() {
    let config = IdentityProviderConfig {
        authority: String::from("https://login.example.com/tenant/"),
        ..Default::default()
    };

    assert_that!(
        config.device_code_url().map(String::from),
        ok(eq("https://login.example.com/tenant/oauth2/v2.0/devicecode"))
    );
    assert_that!(
        config.token_url().map(String::from),
        ok(eq("https://login.example.com/tenant/oauth2/v2.0/token"))
    );
}

#[test]
fn given_authority_without_host_when_validate_then_error() {
    let config = IdentityProviderConfig {
        authority: String::from("https://:443/tenant"),
        ..Default::default()
    };

    assert_that!(config.validate(), err(anything()));
    assert_that!(config.token_url(), err(anything()));
}

#[test]
fn given_empty_allow_list_when_validate_then_error() {
    let config = IdentityProviderConfig {
        allowed_domains: vec![],
        ..Default::default()
    };

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_email_in_allow_list_when_validate_then_error() {
    let config = IdentityProviderConfig {
        allowed_domains: vec![String::from("admin@xenoptics.com")],
        ..Default::default()
    };

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_blank_client_id_when_validate_then_error() {
    let config = IdentityProviderConfig {
        client_id: String::from("  "),
        ..Default::default()
    };

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_no_scopes_when_validate_then_error() {
    let config = IdentityProviderConfig {
        scopes: vec![],
        ..Default::default()
    };

    assert_that!(config.validate(), err(anything()));
}
