//! Records written by the earlier client: the user object as plain JSON,
//! with no encoding and no sign-in timestamp.

use crate::identity::unknown_sign_in_time;
use crate::{Credential, Identity, Provider};

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyRecord {
    id: Value,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    provider: Option<String>,
    /// Federated records
    #[serde(default)]
    access_token: Option<String>,
    /// Password records
    #[serde(default)]
    token: Option<String>,
}

/// Rebuild an [`Identity`] from a legacy record.
///
/// `None` unless the record has a subject id and a non-empty token.
pub(crate) fn migrate(text: &str) -> Option<Identity> {
    let record: LegacyRecord = serde_json::from_str(text.trim()).ok()?;

    let subject_id = match record.id {
        Value::String(id) if !id.trim().is_empty() => id,
        Value::Number(id) => id.to_string(),
        _ => return None,
    };

    let token = record
        .access_token
        .or(record.token)
        .filter(|token| !token.is_empty())?;

    let provider = match record.provider.as_deref() {
        Some("microsoft") => Provider::Federated,
        _ => Provider::Password,
    };

    Some(Identity {
        subject_id,
        display_name: record.name.filter(|name| !name.trim().is_empty()),
        email: record.email.filter(|email| !email.trim().is_empty()),
        credential: Credential::new(token),
        provider,
        signed_in_at: unknown_sign_in_time(),
    })
}
