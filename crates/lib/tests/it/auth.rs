//! Tests for the CredentialStore over real credential files.
//!
//! Verification must fail closed on bad input (unknown users, wrong
//! passwords, unparseable stored hashes) and only error when the credential
//! file itself cannot be used.

use tempfile::TempDir;

use vellum::CredentialStore;

use crate::helpers::*;

// ===== LOADING TESTS =====

#[tokio::test]
async fn test_load_returns_the_seeded_accounts() {
    let (_dir, store) = seeded_credentials();

    let credentials = store.load().await.expect("Failed to load credentials");
    assert_eq!(credentials.len(), 1);
    assert!(credentials.contains_key(TEST_USER));
}

#[tokio::test]
async fn test_missing_credential_file_is_unreadable() {
    let dir = TempDir::new().expect("Failed to create scratch directory");
    let store = CredentialStore::new(dir.path().join("never-created.json"));

    let err = store.load().await.expect_err("Load should fail");
    assert!(err.is_unreadable());
}

#[tokio::test]
async fn test_malformed_credential_file_is_unreadable() {
    let dir = TempDir::new().expect("Failed to create scratch directory");
    let path = dir.path().join("users.json");
    std::fs::write(&path, "not json at all").expect("Failed to write file");

    let err = CredentialStore::new(&path)
        .load()
        .await
        .expect_err("Load should fail");
    assert!(err.is_unreadable());
}

#[tokio::test]
async fn test_non_string_hash_values_are_malformed() {
    let dir = TempDir::new().expect("Failed to create scratch directory");
    let path = dir.path().join("users.json");
    std::fs::write(&path, r#"{"admin": 42}"#).expect("Failed to write file");

    let err = CredentialStore::new(&path)
        .load()
        .await
        .expect_err("Load should fail");
    assert!(err.is_unreadable());
}

// ===== VERIFICATION TESTS =====

#[tokio::test]
async fn test_verify_correct_credentials() {
    let (_dir, store) = seeded_credentials();

    let verified = store
        .verify(TEST_USER, TEST_PASSWORD)
        .await
        .expect("Verification should not error");
    assert!(verified);
}

#[tokio::test]
async fn test_verify_wrong_password() {
    let (_dir, store) = seeded_credentials();

    let verified = store
        .verify(TEST_USER, "shhhh")
        .await
        .expect("Verification should not error");
    assert!(!verified);
}

#[tokio::test]
async fn test_verify_unknown_username() {
    let (_dir, store) = seeded_credentials();

    let verified = store
        .verify("guest", TEST_PASSWORD)
        .await
        .expect("Verification should not error");
    assert!(!verified);
}

#[tokio::test]
async fn test_verify_fails_closed_on_unparseable_stored_hash() {
    let dir = TempDir::new().expect("Failed to create scratch directory");
    let path = dir.path().join("users.json");
    // A plaintext password in the file must never verify
    std::fs::write(&path, r#"{"admin": "secret"}"#).expect("Failed to write file");
    let store = CredentialStore::new(&path);

    let verified = store
        .verify("admin", "secret")
        .await
        .expect("Verification should not error");
    assert!(!verified);
}

#[tokio::test]
async fn test_verify_errors_when_file_disappears() {
    let (dir, store) = seeded_credentials();
    std::fs::remove_file(dir.path().join("users.json")).expect("Failed to remove file");

    let err = store
        .verify(TEST_USER, TEST_PASSWORD)
        .await
        .expect_err("Verification should fail");
    assert!(err.is_unreadable());
}

#[tokio::test]
async fn test_rotation_takes_effect_without_restart() {
    let (dir, store) = seeded_credentials();
    assert!(store.verify(TEST_USER, TEST_PASSWORD).await.unwrap());

    // Rotate the password externally; the same store must see it
    let (rotated_dir, _) = credentials_with(&[(TEST_USER, "rotated")]);
    std::fs::copy(
        rotated_dir.path().join("users.json"),
        dir.path().join("users.json"),
    )
    .expect("Failed to replace credential file");

    assert!(!store.verify(TEST_USER, TEST_PASSWORD).await.unwrap());
    assert!(store.verify(TEST_USER, "rotated").await.unwrap());
}

#[tokio::test]
async fn test_accounts_are_independent() {
    let (_dir, store) = credentials_with(&[("admin", "secret"), ("editor", "letmein")]);

    assert!(store.verify("admin", "secret").await.unwrap());
    assert!(store.verify("editor", "letmein").await.unwrap());
    assert!(!store.verify("admin", "letmein").await.unwrap());
    assert!(!store.verify("editor", "secret").await.unwrap());
}
