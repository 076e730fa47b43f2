use crate::app::{build_session_manager, password_session_max_age};

use ship_config::Config;
use ship_session::{
    Credential, FileSessionStore, Identity, Provider, SessionPhase, SessionStore,
};

use chrono::{Duration, Utc};
use googletest::prelude::*;
use tempfile::TempDir;

#[test]
fn given_zero_hours_then_no_max_age() {
    assert_that!(password_session_max_age(0), none());
}

#[test]
fn given_hours_then_max_age_in_hours() {
    assert_that!(password_session_max_age(24), some(eq(Duration::hours(24))));
}

#[test]
fn given_absurd_hours_then_no_max_age() {
    assert_that!(password_session_max_age(u64::MAX), none());
}

#[tokio::test]
async fn given_saved_password_session_when_started_then_restored_from_disk() {
    // Given
    let dir = TempDir::new().unwrap();
    let config = Config::default();
    let store = FileSessionStore::new(
        config.session_dir(dir.path()),
        &config.session.storage_key,
    );
    let identity = Identity {
        subject_id: String::from("42"),
        display_name: Some(String::from("Bob")),
        email: None,
        credential: Credential::new("tok"),
        provider: Provider::Password,
        signed_in_at: Utc::now(),
    };
    store.save(&identity).unwrap();

    // When
    let mut manager = build_session_manager(&config, dir.path()).unwrap();
    manager.initialize().await;

    // Then
    assert_that!(manager.current_identity(), some(eq(&identity)));
}

#[tokio::test]
async fn given_empty_config_dir_when_started_then_unauthenticated() {
    let dir = TempDir::new().unwrap();
    let config = Config::default();

    let mut manager = build_session_manager(&config, dir.path()).unwrap();
    manager.initialize().await;

    assert_that!(manager.state().phase(), eq(SessionPhase::Unauthenticated));
}
