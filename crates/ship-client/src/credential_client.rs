use crate::{ClientResult, http};

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client as ReqwestClient;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ship_config::AuthConfig;
use ship_session::store::codec;
use ship_session::{Credential, CredentialValidator, SessionError, SessionResult, ValidatedCredential};

const INVALID_LOGIN: &str = "Invalid username or password";
const INVALID_USER_DATA: &str = "Invalid user data received";

/// Username/password validator backed by the remote login endpoint.
pub struct CredentialClient {
    login_url: String,
    client: ReqwestClient,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    mode: &'static str,
    username: &'a str,
    password: &'a str,
}

/// Envelope returned by the login endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub ret: Option<i64>,
    #[serde(default)]
    pub data: Option<String>,
}

/// User record carried, encoded, in `LoginResponse::data`.
#[derive(Debug, Deserialize)]
struct RemoteUser {
    #[serde(default)]
    token: String,
    #[serde(default, alias = "userID", alias = "user_id")]
    id: Option<Value>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    firstname: Option<String>,
    #[serde(default)]
    lastname: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl CredentialClient {
    pub fn new(login_url: &str, timeout: Duration) -> ClientResult<Self> {
        Ok(Self {
            login_url: login_url.to_string(),
            client: http::build_client(timeout)?,
        })
    }

    pub fn from_config(auth: &AuthConfig, timeout: Duration) -> ClientResult<Self> {
        Self::new(&auth.login_url, timeout)
    }

    async fn post_login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            mode: "login",
            username,
            password: password.expose_secret(),
        };

        let response = self.client.post(&self.login_url).json(&body).send().await?;
        let value = http::read_json(response).await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl CredentialValidator for CredentialClient {
    async fn validate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> SessionResult<ValidatedCredential> {
        debug!("Validating credentials for {username}");

        let response = self
            .post_login(username, password)
            .await
            .map_err(|e| e.into_credential_error())?;

        let validated = interpret_login_response(username, response)?;
        info!("Credential validator accepted {username}");
        Ok(validated)
    }
}

/// Turn a 2xx login envelope into validated claims.
pub(crate) fn interpret_login_response(
    username: &str,
    response: LoginResponse,
) -> SessionResult<ValidatedCredential> {
    if response.ret != Some(0) {
        return Err(SessionError::invalid_credentials(INVALID_LOGIN));
    }

    let Some(data) = response.data.filter(|d| !d.trim().is_empty()) else {
        // First login for this account; the backend wants it registered.
        let short_name = username.split('@').next().unwrap_or(username);
        return Err(SessionError::registration_required(short_name));
    };

    let user: RemoteUser =
        codec::decode(&data).map_err(|_| SessionError::invalid_credentials(INVALID_USER_DATA))?;
    if user.token.trim().is_empty() {
        return Err(SessionError::invalid_credentials(INVALID_USER_DATA));
    }

    let subject_id = match &user.id {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => user.username.clone().unwrap_or_else(|| username.to_string()),
    };

    let full_name = [user.firstname.as_deref(), user.lastname.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(ValidatedCredential {
        subject_id,
        display_name: (!full_name.is_empty()).then_some(full_name),
        email: user.email.filter(|e| !e.trim().is_empty()),
        credential: Credential::new(user.token),
    })
}
