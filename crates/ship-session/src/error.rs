use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures of session operations.
///
/// The `Display` output carries the source location for logs; use
/// [`SessionError::user_message`] for text shown to the user.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid credentials: {message} {location}")]
    InvalidCredentials {
        message: String,
        location: ErrorLocation,
    },

    #[error("Account '{username}' is not registered {location}")]
    RegistrationRequired {
        username: String,
        location: ErrorLocation,
    },

    #[error("Network failure: {message} {location}")]
    NetworkFailure {
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity provider failure: {message} {location}")]
    ProviderFailure {
        message: String,
        location: ErrorLocation,
    },

    #[error("Email domain not allowed: {email} {location}")]
    DomainNotAllowed {
        email: String,
        allowed: Vec<String>,
        location: ErrorLocation,
    },

    #[error("Corrupt session record: {message} {location}")]
    CorruptSession {
        message: String,
        location: ErrorLocation,
    },

    #[error("Session storage error: {message} {location}")]
    Storage {
        message: String,
        location: ErrorLocation,
    },
}

impl SessionError {
    /// Human-readable message without source location.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials { message, .. } => message.clone(),
            Self::RegistrationRequired { username, .. } => {
                format!("Account '{username}' has not been registered yet.")
            }
            Self::NetworkFailure { message, .. } => {
                format!("Unable to reach the server: {message}")
            }
            Self::ProviderFailure { message, .. } => message.clone(),
            Self::DomainNotAllowed { email, allowed, .. } => {
                let domains = allowed
                    .iter()
                    .map(|d| format!("@{d}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "Access denied. Only {domains} email addresses are allowed. Your email: {email}"
                )
            }
            Self::CorruptSession { .. } => String::from("The saved session could not be read."),
            Self::Storage { message, .. } => format!("Unable to save your session: {message}"),
        }
    }

    /// Whether retrying the same operation may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkFailure { .. } | Self::Storage { .. })
    }

    #[track_caller]
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn registration_required(username: impl Into<String>) -> Self {
        Self::RegistrationRequired {
            username: username.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn network_failure(message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn provider_failure(message: impl Into<String>) -> Self {
        Self::ProviderFailure {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn domain_not_allowed(email: impl Into<String>, allowed: &[String]) -> Self {
        Self::DomainNotAllowed {
            email: email.into(),
            allowed: allowed.to_vec(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn corrupt_session(message: impl Into<String>) -> Self {
        Self::CorruptSession {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
