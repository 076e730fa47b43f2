use crate::{
    ConfigError, ConfigErrorResult, ConfigSection, DEFAULT_PASSWORD_SESSION_MAX_AGE_HOURS,
    DEFAULT_SESSION_DIR, DEFAULT_STORAGE_KEY,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the persisted session record
    pub storage_key: String,
    /// Directory holding session records, relative to the config directory
    pub dir: String,
    /// Age after which a persisted password session is discarded on startup (0 = never)
    pub password_session_max_age_hours: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: String::from(DEFAULT_STORAGE_KEY),
            dir: String::from(DEFAULT_SESSION_DIR),
            password_session_max_age_hours: DEFAULT_PASSWORD_SESSION_MAX_AGE_HOURS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let key_is_plain = !self.storage_key.is_empty()
            && self
                .storage_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');

        if !key_is_plain || self.storage_key.starts_with('.') {
            return Err(ConfigError::invalid(
                ConfigSection::Session,
                format!(
                    "session.storage_key must be a plain file name, got '{}'",
                    self.storage_key
                ),
            ));
        }

        let dir = std::path::Path::new(&self.dir);
        if self.dir.is_empty() || dir.is_absolute() || self.dir.contains("..") {
            return Err(ConfigError::invalid(
                ConfigSection::Session,
                "session.dir must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
