use crate::{
    ConfigError, ConfigErrorResult, ConfigSection, DEFAULT_ALLOWED_DOMAIN, DEFAULT_AUTHORITY,
    DEFAULT_CLIENT_ID, DEFAULT_PROFILE_ENDPOINT, DEFAULT_SCOPE,
};

use serde::Deserialize;
use url::Url;

/// Federated sign-in settings.
///
/// `authority` is the tenant-scoped OAuth2 authority; the device authorization
/// and token endpoints are derived from it (`{authority}/oauth2/v2.0/...`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityProviderConfig {
    pub authority: String,
    pub client_id: String,
    pub scopes: Vec<String>,
    /// Endpoint returning the signed-in user's profile claims
    pub profile_endpoint: String,
    /// Email domains permitted to complete a federated login
    pub allowed_domains: Vec<String>,
}

impl Default for IdentityProviderConfig {
    fn default() -> Self {
        Self {
            authority: String::from(DEFAULT_AUTHORITY),
            client_id: String::from(DEFAULT_CLIENT_ID),
            scopes: vec![String::from(DEFAULT_SCOPE)],
            profile_endpoint: String::from(DEFAULT_PROFILE_ENDPOINT),
            allowed_domains: vec![String::from(DEFAULT_ALLOWED_DOMAIN)],
        }
    }
}

impl IdentityProviderConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        crate::config::parse_http_url(
            ConfigSection::IdentityProvider,
            "identity_provider.authority",
            &self.authority,
        )?;
        crate::config::parse_http_url(
            ConfigSection::IdentityProvider,
            "identity_provider.profile_endpoint",
            &self.profile_endpoint,
        )?;

        if self.client_id.trim().is_empty() {
            return Err(ConfigError::invalid(
                ConfigSection::IdentityProvider,
                "identity_provider.client_id cannot be empty",
            ));
        }

        if self.scopes.is_empty() {
            return Err(ConfigError::invalid(
                ConfigSection::IdentityProvider,
                "identity_provider.scopes must contain at least one scope",
            ));
        }

        if self.allowed_domains.is_empty() {
            return Err(ConfigError::invalid(
                ConfigSection::IdentityProvider,
                "identity_provider.allowed_domains must contain at least one domain",
            ));
        }

        for domain in &self.allowed_domains {
            if domain.trim().is_empty() || domain.contains('@') {
                return Err(ConfigError::invalid(
                    ConfigSection::IdentityProvider,
                    format!(
                        "identity_provider.allowed_domains entries must be bare domains, got '{}'",
                        domain
                    ),
                ));
            }
        }

        Ok(())
    }

    /// OAuth2 device authorization endpoint
    pub fn device_code_url(&self) -> ConfigErrorResult<Url> {
        self.authority_endpoint("oauth2/v2.0/devicecode")
    }

    /// OAuth2 token endpoint
    pub fn token_url(&self) -> ConfigErrorResult<Url> {
        self.authority_endpoint("oauth2/v2.0/token")
    }

    fn authority_endpoint(&self, path: &str) -> ConfigErrorResult<Url> {
        crate::config::endpoint_below(
            ConfigSection::IdentityProvider,
            "identity_provider.authority",
            &self.authority,
            path,
        )
    }
}
