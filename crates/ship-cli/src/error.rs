use std::panic::Location;

use error_location::ErrorLocation;
use ship_client::ClientError;
use ship_config::ConfigError;
use ship_session::SessionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to write output: {message} {location}")]
    Output {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Not signed in")]
    NotSignedIn,
}

impl CliError {
    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        CliError::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn output(source: serde_json::Error) -> Self {
        CliError::Output {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    /// Text for the terminal; session errors drop their source location.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Session(e) => e.user_message(),
            other => other.to_string(),
        }
    }

    /// Whether running the same command again may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            CliError::Session(e) => e.is_transient(),
            CliError::Client(e) => e.is_transient(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
