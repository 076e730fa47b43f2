use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use ship_config::ConfigError;
use ship_session::SessionError;
use thiserror::Error;

/// Failures talking to the login service, the identity provider, or the
/// shipment API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("Request failed: {source} {location}")]
    Transport {
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Server returned {status}: {message} {location}")]
    Api {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Malformed response body: {source} {location}")]
    Decode {
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    /// A well-formed response that breaks the sign-in exchange.
    #[error("Sign-in protocol error: {message} {location}")]
    Protocol {
        message: String,
        location: ErrorLocation,
    },

    #[error("Account cache {path}: {message} {location}")]
    Cache {
        path: PathBuf,
        message: String,
        location: ErrorLocation,
    },

    /// An endpoint could not be derived from configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    #[track_caller]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn protocol(message: impl Into<String>) -> Self {
        ClientError::Protocol {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn cache(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ClientError::Cache {
            path: path.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// No response, or the server was unavailable or throttling.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Transport { .. } => true,
            ClientError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Map a failure of the credential validator endpoint.
    ///
    /// `401`/`403` are rejections; anything else means the server could not
    /// give an answer.
    #[track_caller]
    pub fn into_credential_error(self) -> SessionError {
        match self {
            ClientError::Api {
                status: 401 | 403,
                message,
                ..
            } => SessionError::invalid_credentials(message),
            ClientError::Api {
                status, message, ..
            } => SessionError::network_failure(format!("{message} (HTTP {status})")),
            ClientError::Transport { source, .. } => {
                SessionError::network_failure(source.to_string())
            }
            ClientError::Decode { source, .. } => {
                SessionError::network_failure(format!("unexpected response: {source}"))
            }
            ClientError::Protocol { message, .. } => {
                SessionError::network_failure(format!("unexpected response: {message}"))
            }
            ClientError::Cache { message, .. } => SessionError::storage(message),
            ClientError::Config(e) => SessionError::network_failure(e.to_string()),
        }
    }

    /// Map a failure talking to the identity provider.
    #[track_caller]
    pub fn into_provider_error(self) -> SessionError {
        match self {
            ClientError::Transport { source, .. } => {
                SessionError::network_failure(source.to_string())
            }
            ClientError::Decode { source, .. } => SessionError::provider_failure(source.to_string()),
            ClientError::Api { message, .. } | ClientError::Protocol { message, .. } => {
                SessionError::provider_failure(message)
            }
            ClientError::Cache { message, .. } => SessionError::storage(message),
            ClientError::Config(e) => SessionError::provider_failure(e.to_string()),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        ClientError::Transport {
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        ClientError::Decode {
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
