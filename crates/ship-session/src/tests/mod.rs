
use crate::{Credential, Identity, Provider};

use chrono::{TimeZone, Utc};
use secrecy::SecretString;

pub(crate) fn password(value: &str) -> SecretString {
    SecretString::from(value)
}

pub(crate) fn password_identity(subject_id: &str) -> Identity {
    Identity {
        subject_id: subject_id.to_string(),
        display_name: Some(String::from("Bob Builder")),
        email: Some(format!("{subject_id}@xenoptics.com")),
        credential: Credential::new(format!("token-{subject_id}")),
        provider: Provider::Password,
        signed_in_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap(),
    }
}

pub(crate) fn federated_identity(email: &str) -> Identity {
    Identity {
        subject_id: String::from("home-account-1"),
        display_name: Some(String::from("Fed User")),
        email: Some(email.to_string()),
        credential: Credential::new("federated-access-token"),
        provider: Provider::Federated,
        signed_in_at: Utc::now(),
    }
}
