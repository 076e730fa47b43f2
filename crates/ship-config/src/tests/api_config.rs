use crate::ApiConfig;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};

#[test]
fn given_default_api_config_when_validate_then_ok() {
    assert_that!(ApiConfig::default().validate(), ok(anything()));
}

#[test]
fn given_trailing_slash_base_url_when_shipments_url_then_single_slash() {
    let config = ApiConfig {
        base_url: String::from("http://localhost:8000/api/logistics/"),
        ..Default::default()
    };

    assert_that!(
        config.shipments_url().map(String::from),
        ok(eq("http://localhost:8000/api/logistics/shipment_request/"))
    );
}

#[test]
fn given_base_url_without_trailing_slash_when_shipments_url_then_keeps_base_path() {
    let config = ApiConfig {
        base_url: String::from("http://192.168.60.31:8000/api/logistics"),
        ..Default::default()
    };

    assert_that!(
        config.shipments_url().map(String::from),
        ok(eq("http://192.168.60.31:8000/api/logistics/shipment_request/"))
    );
}

#[test]
fn given_base_url_with_space_in_host_when_validate_then_error() {
    let config = ApiConfig {
        base_url: String::from("http://exa mple/api"),
        ..Default::default()
    };

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_base_url_without_host_when_validate_then_error() {
    let config = ApiConfig {
        base_url: String::from("https://:80/api"),
        ..Default::default()
    };

    assert_that!(config.validate(), err(anything()));
    assert_that!(config.shipments_url(), err(anything()));
}

#[test]
fn given_relative_shipments_path_when_validate_then_error() {
    let config = ApiConfig {
        shipments_path: String::from("shipment_request/"),
        ..Default::default()
    };

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_zero_timeout_when_validate_then_error() {
    let config = ApiConfig {
        timeout_secs: 0,
        ..Default::default()
    };

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_base_url_without_scheme_when_validate_then_error() {
    let config = ApiConfig {
        base_url: String::from("192.168.60.31/api/logistics"),
        ..Default::default()
    };

    assert_that!(config.validate(), err(anything()));
}
