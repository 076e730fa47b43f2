use crate::{
    ConfigError, ConfigErrorResult, ConfigSection, DEFAULT_API_BASE_URL,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SHIPMENTS_PATH, MAX_REQUEST_TIMEOUT_SECS, MIN_REQUEST_TIMEOUT_SECS,
};

use serde::Deserialize;
use url::Url;

/// Configuration for the logistics REST API
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the logistics API (no trailing slash required)
    pub base_url: String,
    /// Path of the shipment request listing, relative to `base_url`
    pub shipments_path: String,
    /// Per-request timeout applied to every HTTP call
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_API_BASE_URL),
            shipments_path: String::from(DEFAULT_SHIPMENTS_PATH),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        crate::config::parse_http_url(ConfigSection::Api, "api.base_url", &self.base_url)?;

        if !self.shipments_path.starts_with('/') {
            return Err(ConfigError::invalid(
                ConfigSection::Api,
                format!(
                    "api.shipments_path must start with '/', got '{}'",
                    self.shipments_path
                ),
            ));
        }

        if self.timeout_secs < MIN_REQUEST_TIMEOUT_SECS
            || self.timeout_secs > MAX_REQUEST_TIMEOUT_SECS
        {
            return Err(ConfigError::invalid(
                ConfigSection::Api,
                format!(
                    "api.timeout_secs must be {}-{}, got {}",
                    MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS, self.timeout_secs
                ),
            ));
        }

        self.shipments_url()?;
        Ok(())
    }

    /// Full URL of the shipment listing endpoint.
    pub fn shipments_url(&self) -> ConfigErrorResult<Url> {
        crate::config::endpoint_below(
            ConfigSection::Api,
            "api.base_url",
            &self.base_url,
            &self.shipments_path,
        )
    }
}
