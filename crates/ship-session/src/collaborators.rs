//! Contracts for the two external credential sources.

use crate::{Credential, SessionResult};

use async_trait::async_trait;
use secrecy::SecretString;

/// Claims returned by the remote credential validator on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCredential {
    pub subject_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub credential: Credential,
}

/// Account descriptor returned by an interactive federated sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAccount {
    /// Stable account identifier at the provider
    pub account_id: String,
    /// Sign-in name, normally the user's email
    pub username: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSignIn {
    pub credential: Credential,
    pub account: ProviderAccount,
}

/// Profile claims fetched with a federated credential.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderProfile {
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Backend endpoint exchanging username/password for a credential.
///
/// Single attempt per call; implementations must not retry.
#[async_trait]
pub trait CredentialValidator: Send + Sync {
    async fn validate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> SessionResult<ValidatedCredential>;
}

/// Third-party identity provider.
///
/// All calls are single-attempt and may fail with a provider-specific message.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Interactive sign-in. May be cancelled or declined by the user.
    async fn sign_in(&self) -> SessionResult<ProviderSignIn>;

    async fn sign_out(&self) -> SessionResult<()>;

    async fn get_profile(&self, credential: &Credential) -> SessionResult<ProviderProfile>;

    /// Whether the provider still holds a live session for the signed-in account.
    async fn has_active_session(&self) -> SessionResult<bool>;
}
