use crate::{
    ApiConfig, AuthConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    ConfigSection, DEFAULT_CONFIG_DIR, IdentityProviderConfig, LoggingConfig, SessionConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub identity_provider: IdentityProviderConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config from the default config directory.
    ///
    /// Loading order:
    /// 1. Check for XENSHIP_CONFIG_DIR env var, else use ./.xenship/
    /// 2. Load config.toml if it exists, else use defaults
    /// 3. Apply XENSHIP_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;
        Self::load_from(&config_dir)
    }

    /// Load config from an explicit directory (defaults + TOML + env overrides).
    pub fn load_from(config_dir: &Path) -> ConfigErrorResult<Self> {
        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::toml(path, e))
    }

    /// Get the config directory.
    /// Priority: XENSHIP_CONFIG_DIR env var > ./.xenship/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir().map_err(|_| {
            ConfigError::invalid(
                ConfigSection::General,
                "Cannot determine current working directory",
            )
        })?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.api.validate()?;
        self.auth.validate()?;
        self.identity_provider.validate()?;
        self.session.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Absolute directory holding persisted session records.
    pub fn session_dir(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.session.dir)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        let shipments = match self.api.shipments_url() {
            Ok(url) => url.to_string(),
            Err(_) => self.api.base_url.clone(),
        };
        info!("  api: {} (timeout {}s)", shipments, self.api.timeout_secs);
        info!("  auth: {}", self.auth.login_url);
        info!(
            "  identity_provider: {} scopes={} allowed_domains={}",
            self.identity_provider.authority,
            self.identity_provider.scopes.join(" "),
            self.identity_provider.allowed_domains.join(",")
        );

        let max_age = match self.session.password_session_max_age_hours {
            0 => String::from("unlimited"),
            hours => format!("{hours}h"),
        };
        info!(
            "  session: key={} dir={} password_max_age={}",
            self.session.storage_key, self.session.dir, max_age
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Api
        Self::apply_env_string("XENSHIP_API_BASE_URL", &mut self.api.base_url);
        Self::apply_env_string("XENSHIP_API_SHIPMENTS_PATH", &mut self.api.shipments_path);
        Self::apply_env_parse("XENSHIP_API_TIMEOUT_SECS", &mut self.api.timeout_secs);

        // Auth
        Self::apply_env_string("XENSHIP_AUTH_LOGIN_URL", &mut self.auth.login_url);

        // Identity provider
        Self::apply_env_string(
            "XENSHIP_IDP_AUTHORITY",
            &mut self.identity_provider.authority,
        );
        Self::apply_env_string(
            "XENSHIP_IDP_CLIENT_ID",
            &mut self.identity_provider.client_id,
        );
        Self::apply_env_list("XENSHIP_IDP_SCOPES", &mut self.identity_provider.scopes);
        Self::apply_env_string(
            "XENSHIP_IDP_PROFILE_ENDPOINT",
            &mut self.identity_provider.profile_endpoint,
        );
        Self::apply_env_list(
            "XENSHIP_IDP_ALLOWED_DOMAINS",
            &mut self.identity_provider.allowed_domains,
        );

        // Session
        Self::apply_env_string("XENSHIP_SESSION_STORAGE_KEY", &mut self.session.storage_key);
        Self::apply_env_string("XENSHIP_SESSION_DIR", &mut self.session.dir);
        Self::apply_env_parse(
            "XENSHIP_SESSION_PASSWORD_MAX_AGE_HOURS",
            &mut self.session.password_session_max_age_hours,
        );

        // Logging
        Self::apply_env_parse("XENSHIP_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("XENSHIP_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("XENSHIP_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Helper: Apply environment variable override for comma-separated lists
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
    }
}

/// Parse `value` as an absolute http(s) URL with a host.
pub(crate) fn parse_http_url(
    section: ConfigSection,
    field: &str,
    value: &str,
) -> ConfigErrorResult<Url> {
    let url = Url::parse(value).map_err(|e| {
        ConfigError::invalid(section, format!("{field} is not a valid URL ('{value}'): {e}"))
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::invalid(
            section,
            format!("{field} must be an absolute http(s) URL, got '{value}'"),
        ));
    }

    Ok(url)
}

/// Resolve `path` below `base`, keeping every path segment of `base`.
pub(crate) fn endpoint_below(
    section: ConfigSection,
    field: &str,
    base: &str,
    path: &str,
) -> ConfigErrorResult<Url> {
    let mut base = parse_http_url(section, field, base)?;
    if !base.path().ends_with('/') {
        let directory = format!("{}/", base.path());
        base.set_path(&directory);
    }

    base.join(path.trim_start_matches('/')).map_err(|e| {
        ConfigError::invalid(section, format!("{field}: cannot append '{path}': {e}"))
    })
}
