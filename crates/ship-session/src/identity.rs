use crate::{Credential, ProviderProfile, ProviderSignIn, ValidatedCredential};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which credential source produced an [`Identity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Username/password against the remote credential validator
    Password,
    /// Delegated sign-in through the external identity provider
    Federated,
}

/// The signed-in principal.
///
/// Replaced wholesale on re-login; never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub subject_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub credential: Credential,
    pub provider: Provider,
    /// Records written without a timestamp read as the epoch, so age limits
    /// treat them as expired.
    #[serde(default = "unknown_sign_in_time")]
    pub signed_in_at: DateTime<Utc>,
}

pub(crate) fn unknown_sign_in_time() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl Identity {
    /// Build a password identity from a validator response.
    pub fn from_password_login(validated: ValidatedCredential, now: DateTime<Utc>) -> Self {
        Self {
            subject_id: validated.subject_id,
            display_name: validated.display_name,
            email: validated.email,
            credential: validated.credential,
            provider: Provider::Password,
            signed_in_at: now,
        }
    }

    /// Build a federated identity. `email` must already have passed the allow-list.
    pub fn from_federated_login(
        sign_in: ProviderSignIn,
        profile: ProviderProfile,
        email: String,
        now: DateTime<Utc>,
    ) -> Self {
        let display_name = profile
            .display_name
            .filter(|name| !name.trim().is_empty())
            .or(sign_in.account.name);

        Self {
            subject_id: sign_in.account.account_id,
            display_name,
            email: Some(email),
            credential: sign_in.credential,
            provider: Provider::Federated,
            signed_in_at: now,
        }
    }

    /// Best human-readable label: display name, then email, then subject id.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.subject_id)
    }
}
