mod api_config;
mod auth_config;
mod config;
mod error;
mod identity_provider_config;
mod log_level;
mod logging_config;
mod session_config;

pub use api_config::ApiConfig;
pub use auth_config::AuthConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult, ConfigSection};
pub use identity_provider_config::IdentityProviderConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use session_config::SessionConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "XENSHIP_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".xenship";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_API_BASE_URL: &str = "http://192.168.60.31/api/logistics";
const DEFAULT_SHIPMENTS_PATH: &str = "/shipment_request/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

const DEFAULT_LOGIN_URL: &str = "http://192.168.60.211/api/mfg/auth/loginRemote";

const DEFAULT_AUTHORITY: &str =
    "https://login.microsoftonline.com/b8c84464-86e7-4d3a-8c4d-d5b1acce5b88";
const DEFAULT_CLIENT_ID: &str = "10c691cd-fa9e-49ae-9e12-310bf0d3d2b1";
const DEFAULT_SCOPE: &str = "User.Read";
const DEFAULT_PROFILE_ENDPOINT: &str = "https://graph.microsoft.com/v1.0/me";
const DEFAULT_ALLOWED_DOMAIN: &str = "xenoptics.com";

const DEFAULT_STORAGE_KEY: &str = "xen_erp_user";
const DEFAULT_SESSION_DIR: &str = "session";
const DEFAULT_PASSWORD_SESSION_MAX_AGE_HOURS: u64 = 0;

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
