use crate::{ConfigErrorResult, ConfigSection, DEFAULT_LOGIN_URL};

use serde::Deserialize;

/// Remote credential validator (username/password login)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub login_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_url: String::from(DEFAULT_LOGIN_URL),
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        crate::config::parse_http_url(ConfigSection::Auth, "auth.login_url", &self.login_url)?;
        Ok(())
    }
}
