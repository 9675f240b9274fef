//! Tests for session persistence
//!
//! These tests verify:
//! - Sessions survive a save/load cycle
//! - Login keeps the saved profile; logout keeps it for next time
//! - Rejected credentials leave the saved session untouched
//! - Profile and payout changes are saved; password changes are validated
//! - Configuration and session files work together

use tempfile::TempDir;

use creatorbook::config::AppConfig;
use creatorbook::session::{AuthError, Authenticator, PayoutMethod, SessionStore};
use creatorbook::types::UserType;

#[test]
fn test_missing_session_file_is_signed_out() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::load(dir.path().join("session.json")).unwrap();
    assert!(!store.is_authenticated());
    assert_eq!(store.data().display_name(), "User");
}

#[test]
fn test_signup_persists_across_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let mut store = SessionStore::load(&path).unwrap();
    store
        .signup("Riley", "riley@example.com", "hunter22", true)
        .unwrap();
    store.save().unwrap();

    let reloaded = SessionStore::load(&path).unwrap();
    assert!(reloaded.is_authenticated());
    assert!(reloaded.data().is_creator());
    assert_eq!(reloaded.data().user_name, "Riley");
    assert_eq!(reloaded.data().email, "riley@example.com");
}

#[test]
fn test_login_after_logout_restores_profile() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut store = SessionStore::load(&path).unwrap();
    store
        .signup("Riley", "riley@example.com", "hunter22", true)
        .unwrap();
    store.logout();
    store.save().unwrap();

    let mut store = SessionStore::load(&path).unwrap();
    assert!(!store.is_authenticated());
    assert!(!store.data().is_creator());

    store.login("riley@work.example", "hunter22").unwrap();
    assert_eq!(store.data().user_type, UserType::Creator);
    assert_eq!(store.data().user_name, "Riley");
    assert_eq!(store.data().email, "riley@work.example");
}

#[test]
fn test_rejected_login_keeps_state() {
    let mut store = SessionStore::in_memory();
    assert_eq!(
        store.login("not-an-email", "hunter22").unwrap_err(),
        AuthError::InvalidCredentials
    );
    assert_eq!(
        store.login("riley@example.com", "short").unwrap_err(),
        AuthError::InvalidCredentials
    );
    assert!(!store.is_authenticated());
}

#[test]
fn test_in_memory_store_save_is_noop() {
    let mut store = SessionStore::in_memory();
    store.login("riley@example.com", "hunter22").unwrap();
    assert!(store.save().is_ok());
    assert!(store.path().is_none());
}

#[test]
fn test_corrupt_session_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(SessionStore::load(&path).is_err());
}

#[test]
fn test_profile_update_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut store = SessionStore::load(&path).unwrap();
    store
        .signup("Riley", "riley@example.com", "hunter22", false)
        .unwrap();
    store.update_profile("  Riley Quinn ").unwrap();
    store.save().unwrap();

    let reloaded = SessionStore::load(&path).unwrap();
    assert_eq!(reloaded.data().display_name(), "Riley Quinn");
    assert_eq!(reloaded.data().email, "riley@example.com");
}

#[test]
fn test_rejected_profile_update_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut store = SessionStore::load(&path).unwrap();
    assert_eq!(store.update_profile("Riley"), Err(AuthError::NotLoggedIn));
    store
        .signup("Riley", "riley@example.com", "hunter22", false)
        .unwrap();
    store.save().unwrap();

    let mut store = SessionStore::load(&path).unwrap();
    assert_eq!(store.update_profile("   "), Err(AuthError::EmptyName));
    store.save().unwrap();
    assert_eq!(SessionStore::load(&path).unwrap().data().user_name, "Riley");
}

#[test]
fn test_password_change_rules_on_saved_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let store = SessionStore::load(&path).unwrap();
    assert_eq!(
        store.change_password("hunter23", "hunter23"),
        Err(AuthError::NotLoggedIn)
    );

    let mut store = SessionStore::load(&path).unwrap();
    store.login("riley@example.com", "hunter22").unwrap();
    store.save().unwrap();

    let store = SessionStore::load(&path).unwrap();
    assert_eq!(
        store.change_password("hunter23", "hunter24"),
        Err(AuthError::PasswordMismatch)
    );
    assert_eq!(
        store.change_password("abc", "abc"),
        Err(AuthError::PasswordTooShort)
    );
    assert!(store.change_password("hunter23", "hunter23").is_ok());
    store.save().unwrap();
    assert!(SessionStore::load(&path).unwrap().is_authenticated());
}

#[test]
fn test_payout_details_persist() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut store = SessionStore::load(&path).unwrap();
    store
        .signup("Riley", "riley@example.com", "hunter22", true)
        .unwrap();
    assert_eq!(
        store.update_payout(PayoutMethod::Bank, "Riley Quinn", "  "),
        Err(AuthError::IncompletePayout)
    );
    store
        .update_payout(PayoutMethod::Bank, "Riley Quinn", "987654321234")
        .unwrap();
    store.save().unwrap();

    let mut store = SessionStore::load(&path).unwrap();
    let payout = store.data().payout.clone().expect("payout saved");
    assert_eq!(payout.method, PayoutMethod::Bank);
    assert_eq!(payout.account_holder, "Riley Quinn");
    assert_eq!(payout.masked_account(), "••••••••1234");

    // Logging out and back in keeps the payout details
    store.logout();
    store.login("riley@example.com", "hunter22").unwrap();
    store
        .update_payout(PayoutMethod::Paypal, "", "riley@example.com")
        .unwrap();
    store.save().unwrap();

    let reloaded = SessionStore::load(&path).unwrap();
    let payout = reloaded.data().payout.clone().expect("payout saved");
    assert_eq!(payout.method, PayoutMethod::Paypal);
    assert_eq!(payout.account, "riley@example.com");
}

#[test]
fn test_session_without_payout_field_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(
        &path,
        r#"{"is_logged_in": true, "user_type": "creator", "user_name": "Riley", "email": "riley@example.com"}"#,
    )
    .unwrap();

    let store = SessionStore::load(&path).unwrap();
    assert!(store.data().is_creator());
    assert!(store.data().payout.is_none());
}

#[test]
fn test_session_file_from_config() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        session_file: dir.path().join("from-config.json"),
        ..AppConfig::default()
    };
    let config_path = dir.path().join("config.json");
    config.save_to_file(&config_path).unwrap();

    let loaded = AppConfig::load_from_file(&config_path).unwrap();
    loaded.validate().unwrap();

    let mut store = SessionStore::load(&loaded.session_file).unwrap();
    store.login("riley@example.com", "hunter22").unwrap();
    store.save().unwrap();
    assert!(loaded.session_file.exists());
}
