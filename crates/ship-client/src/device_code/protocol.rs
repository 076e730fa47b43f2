//! Wire types of the OAuth 2.0 device authorization grant (RFC 8628).

use serde::Deserialize;

pub(crate) const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Seconds between polls when the authority does not say.
pub(crate) const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Added to the poll interval on every `slow_down` answer.
pub(crate) const SLOW_DOWN_STEP_SECS: u64 = 5;

#[derive(Debug, Deserialize)]
pub(crate) struct DeviceAuthorization {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    pub expires_in: u64,
    #[serde(default)]
    pub interval: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Token endpoint answer; success and error share the same shape.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Debug)]
pub(crate) struct GrantedToken {
    pub access_token: String,
    pub expires_in: u64,
    pub id_token: Option<String>,
}

#[derive(Debug)]
pub(crate) enum TokenPoll {
    Granted(GrantedToken),
    Pending,
    SlowDown,
}

/// Claims read from an ID token payload.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct IdTokenClaims {
    #[serde(default)]
    pub oid: Option<String>,
    #[serde(default)]
    pub tid: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Profile resource of the signed-in user.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
    #[serde(default)]
    pub user_principal_name: Option<String>,
}
