use crate::CliError;

use ship_client::ClientError;
use ship_session::SessionError;

#[test]
fn given_network_failure_then_transient() {
    let err = CliError::from(SessionError::network_failure("connection refused"));

    assert!(err.is_transient());
}

#[test]
fn given_rejected_credentials_then_not_transient() {
    let err = CliError::from(SessionError::invalid_credentials("Bad credentials"));

    assert!(!err.is_transient());
}

#[test]
fn given_unavailable_shipment_api_then_transient() {
    let err = CliError::from(ClientError::api(503, "Service Unavailable"));

    assert!(err.is_transient());
}

#[test]
fn given_missing_shipment_endpoint_then_not_transient() {
    assert!(!CliError::from(ClientError::api(404, "Not Found")).is_transient());
    assert!(!CliError::NotSignedIn.is_transient());
}
