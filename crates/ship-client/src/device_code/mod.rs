//! Federated sign-in through the OAuth 2.0 device authorization grant.
//!
//! A terminal has no browser popup, so the user is shown a short code to enter
//! on another device while this side polls the token endpoint.

mod account_cache;
pub(crate) mod protocol;

pub use account_cache::{AccountCache, CachedAccount};

use crate::{ClientError, ClientResult, http};
use protocol::{
    DEFAULT_POLL_INTERVAL_SECS, DEVICE_CODE_GRANT, DeviceAuthorization, GrantedToken,
    IdTokenClaims, ProfileResponse, SLOW_DOWN_STEP_SECS, TokenPoll, TokenResponse,
};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use log::{debug, info, warn};
use reqwest::Client as ReqwestClient;
use ship_config::IdentityProviderConfig;
use ship_session::{
    Credential, IdentityProvider, ProviderAccount, ProviderProfile, ProviderSignIn, SessionResult,
};
use tokio::time::{Instant, sleep};

/// Scopes always requested so the token response carries an ID token.
const IDENTITY_SCOPES: [&str; 2] = ["openid", "profile"];

/// Upper bound on a cached account's lifetime.
const MAX_TOKEN_LIFETIME_SECS: u64 = 60 * 60 * 24;

/// What the user must do to complete a device-code sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCodePrompt {
    pub user_code: String,
    pub verification_uri: String,
    /// Ready-made instruction text from the authority
    pub message: String,
    pub expires_in: Duration,
}

/// Receives the prompt once per sign-in attempt.
pub type PromptFn = Arc<dyn Fn(&DeviceCodePrompt) + Send + Sync>;

pub struct DeviceCodeProvider {
    client: ReqwestClient,
    device_code_url: String,
    token_url: String,
    profile_endpoint: String,
    client_id: String,
    scope: String,
    cache: AccountCache,
    prompt: PromptFn,
}

impl DeviceCodeProvider {
    pub fn new(
        config: &IdentityProviderConfig,
        cache: AccountCache,
        timeout: Duration,
        prompt: PromptFn,
    ) -> ClientResult<Self> {
        let mut scopes: Vec<&str> = config.scopes.iter().map(String::as_str).collect();
        for scope in IDENTITY_SCOPES {
            if !scopes.contains(&scope) {
                scopes.push(scope);
            }
        }

        Ok(Self {
            client: http::build_client(timeout)?,
            device_code_url: config.device_code_url()?.into(),
            token_url: config.token_url()?.into(),
            profile_endpoint: config.profile_endpoint.clone(),
            client_id: config.client_id.clone(),
            scope: scopes.join(" "),
            cache,
            prompt,
        })
    }

    pub fn cache(&self) -> &AccountCache {
        &self.cache
    }

    async fn run_sign_in(&self) -> ClientResult<ProviderSignIn> {
        let authorization = self.request_device_code().await?;

        (self.prompt)(&DeviceCodePrompt {
            message: authorization.message.clone().unwrap_or_else(|| {
                format!(
                    "To sign in, open {} and enter the code {}",
                    authorization.verification_uri, authorization.user_code
                )
            }),
            user_code: authorization.user_code.clone(),
            verification_uri: authorization.verification_uri.clone(),
            expires_in: Duration::from_secs(authorization.expires_in),
        });

        let token = self.wait_for_token(&authorization).await?;
        let account = self.resolve_account(&token).await?;

        let lifetime = token.expires_in.min(MAX_TOKEN_LIFETIME_SECS);
        let now = Utc::now();
        let expires_at = TimeDelta::try_seconds(lifetime as i64)
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(now);

        self.cache.store(&CachedAccount {
            account_id: account.account_id.clone(),
            username: account.username.clone(),
            name: account.name.clone(),
            expires_at,
        })?;

        info!("Provider sign-in completed for {}", account.username);
        Ok(ProviderSignIn {
            credential: Credential::new(token.access_token),
            account,
        })
    }

    async fn request_device_code(&self) -> ClientResult<DeviceAuthorization> {
        let params = [("client_id", self.client_id.as_str()), ("scope", self.scope.as_str())];
        let response = self
            .client
            .post(&self.device_code_url)
            .form(&params)
            .send()
            .await?;

        let body = http::read_json(response).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Poll until the user finishes, declines, or the code expires.
    async fn wait_for_token(&self, authorization: &DeviceAuthorization) -> ClientResult<GrantedToken> {
        let deadline = Instant::now() + Duration::from_secs(authorization.expires_in);
        let mut interval =
            Duration::from_secs(authorization.interval.unwrap_or(DEFAULT_POLL_INTERVAL_SECS));

        loop {
            sleep(interval).await;
            if Instant::now() >= deadline {
                return Err(ClientError::protocol(
                    "The sign-in code expired before it was used",
                ));
            }

            match self.poll_token(&authorization.device_code).await? {
                TokenPoll::Granted(token) => return Ok(token),
                TokenPoll::Pending => debug!("Waiting for the user to complete sign-in"),
                TokenPoll::SlowDown => {
                    interval += Duration::from_secs(SLOW_DOWN_STEP_SECS);
                    debug!("Authority asked to slow down; polling every {interval:?}");
                }
            }
        }
    }

    async fn poll_token(&self, device_code: &str) -> ClientResult<TokenPoll> {
        let params = [
            ("grant_type", DEVICE_CODE_GRANT),
            ("client_id", self.client_id.as_str()),
            ("device_code", device_code),
        ];
        let response = self.client.post(&self.token_url).form(&params).send().await?;
        let status = response.status();
        let text = response.text().await?;

        let token: TokenResponse = if status.is_success() {
            serde_json::from_str(&text)?
        } else {
            serde_json::from_str(&text).unwrap_or_default()
        };

        interpret_token_response(status.as_u16(), token)
    }

    async fn resolve_account(&self, token: &GrantedToken) -> ClientResult<ProviderAccount> {
        if let Some(claims) = token.id_token.as_deref().and_then(decode_id_token)
            && let Some(account) = account_from_claims(claims)
        {
            return Ok(account);
        }

        debug!("No usable ID token; resolving account from the profile endpoint");
        let profile = self.fetch_profile(&token.access_token).await?;
        let username = profile
            .mail
            .or(profile.user_principal_name)
            .ok_or_else(|| ClientError::protocol("The provider returned no account name"))?;

        Ok(ProviderAccount {
            account_id: profile.id.unwrap_or_else(|| username.clone()),
            username,
            name: profile.display_name,
        })
    }

    async fn fetch_profile(&self, access_token: &str) -> ClientResult<ProfileResponse> {
        let response = self
            .client
            .get(&self.profile_endpoint)
            .bearer_auth(access_token)
            .send()
            .await?;

        let body = http::read_json(response).await.map_err(|e| match e.status() {
            Some(status) => ClientError::api(status, format!("Profile API error: {status}")),
            None => e,
        })?;
        Ok(serde_json::from_value(body)?)
    }
}

#[async_trait]
impl IdentityProvider for DeviceCodeProvider {
    async fn sign_in(&self) -> SessionResult<ProviderSignIn> {
        self.run_sign_in().await.map_err(|e| e.into_provider_error())
    }

    async fn sign_out(&self) -> SessionResult<()> {
        self.cache.clear().map_err(|e| e.into_provider_error())?;
        info!("Cleared provider account");
        Ok(())
    }

    async fn get_profile(&self, credential: &Credential) -> SessionResult<ProviderProfile> {
        let profile = self
            .fetch_profile(credential.expose())
            .await
            .map_err(|e| e.into_provider_error())?;

        Ok(ProviderProfile {
            display_name: profile.display_name,
            email: profile.mail.or(profile.user_principal_name),
        })
    }

    async fn has_active_session(&self) -> SessionResult<bool> {
        let Some(account) = self.cache.load() else {
            return Ok(false);
        };

        if account.is_expired(Utc::now()) {
            warn!("Provider session for {} has expired", account.username);
            return Ok(false);
        }
        Ok(true)
    }
}

pub(crate) fn interpret_token_response(status: u16, token: TokenResponse) -> ClientResult<TokenPoll> {
    match token.error.as_deref() {
        None if (200..300).contains(&status) => {
            let access_token = token
                .access_token
                .filter(|t| !t.is_empty())
                .ok_or_else(|| ClientError::protocol("Token response carried no access token"))?;
            Ok(TokenPoll::Granted(GrantedToken {
                access_token,
                expires_in: token.expires_in.unwrap_or(0),
                id_token: token.id_token,
            }))
        }
        None => Err(ClientError::api(status, "Token request failed")),
        Some("authorization_pending") => Ok(TokenPoll::Pending),
        Some("slow_down") => Ok(TokenPoll::SlowDown),
        Some("authorization_declined" | "access_denied") => {
            Err(ClientError::protocol("User declined the sign-in"))
        }
        Some("expired_token") => Err(ClientError::protocol(
            "The sign-in code expired before it was used",
        )),
        Some(other) => Err(ClientError::protocol(
            token.error_description.unwrap_or_else(|| other.to_string()),
        )),
    }
}

/// Claims of an ID token. The signature is not verified: the token came
/// straight from the authority's token endpoint over TLS.
pub(crate) fn decode_id_token(id_token: &str) -> Option<IdTokenClaims> {
    match jsonwebtoken::dangerous::insecure_decode::<IdTokenClaims>(id_token) {
        Ok(token) => Some(token.claims),
        Err(e) => {
            debug!("Ignoring unreadable ID token: {e}");
            None
        }
    }
}

pub(crate) fn account_from_claims(claims: IdTokenClaims) -> Option<ProviderAccount> {
    let username = claims.preferred_username.or(claims.email)?;
    let account_id = match (claims.oid, claims.tid) {
        (Some(oid), Some(tid)) => format!("{oid}.{tid}"),
        (Some(oid), None) => oid,
        (None, _) => claims.sub?,
    };

    Some(ProviderAccount {
        account_id,
        username,
        name: claims.name,
    })
}
