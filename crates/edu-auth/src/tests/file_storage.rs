use crate::{AuthError, CredentialStorage, FileStorage, TokenStore};

use edu_core::ManualClock;

use std::sync::Arc;

use chrono::TimeDelta;
use tempfile::TempDir;

#[test]
fn given_missing_file_when_loaded_then_none() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path());

    assert!(storage.load("auth_token").unwrap().is_none());
}

#[test]
fn given_stored_value_when_loaded_then_returns_same_contents() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path().join("nested"));

    storage.store("auth_token", "{\"value\":\"x\"}").unwrap();

    assert_eq!(
        storage.load("auth_token").unwrap().as_deref(),
        Some("{\"value\":\"x\"}")
    );
    assert!(temp.path().join("nested").join("auth_token.json").exists());
}

#[test]
fn given_store_when_complete_then_no_temp_file_left() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path());

    storage.store("auth_token", "a").unwrap();
    storage.store("auth_token", "b").unwrap();

    let names: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["auth_token.json".to_string()]);
    assert_eq!(storage.load("auth_token").unwrap().as_deref(), Some("b"));
}

#[test]
fn given_missing_file_when_removed_then_ok() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path());

    assert!(storage.remove("auth_token").is_ok());
}

#[test]
fn given_key_with_separator_when_stored_then_invalid_key() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path());

    let result = storage.store("../escape", "x");

    assert!(matches!(result, Err(AuthError::InvalidKey { .. })));
}

#[test]
fn given_file_backed_store_when_reopened_then_credential_survives() {
    let temp = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(crate::tests::start()));

    let first = TokenStore::new(Arc::new(FileStorage::new(temp.path())), clock.clone());
    first.save("persisted", TimeDelta::hours(1)).unwrap();

    let second = TokenStore::new(Arc::new(FileStorage::new(temp.path())), clock);
    let credential = second.read().unwrap();

    assert_eq!(credential.token(), "persisted");
}
