//! Tests for the DocumentStore over real scratch directories.
//!
//! Covers enumeration, the read/write/create/delete lifecycle, name
//! sanitization, and containment of traversal attempts.

use vellum::DocumentStore;

use crate::helpers::*;

// ===== LISTING TESTS =====

#[tokio::test]
async fn test_list_empty_root() {
    let (_dir, store) = scratch_store();

    let names = store.list().await.expect("Failed to list documents");
    assert!(names.is_empty());
}

#[tokio::test]
async fn test_list_names_every_document() {
    let (_dir, store) = seeded_store(&[("about.txt", "a"), ("changes.txt", "b")]).await;

    let mut names = store.list().await.expect("Failed to list documents");
    names.sort();
    assert_eq!(names, ["about.txt", "changes.txt"]);
}

#[tokio::test]
async fn test_list_skips_directories_and_dotfiles() {
    let (dir, store) = seeded_store(&[("kept.txt", "x")]).await;
    std::fs::create_dir(dir.path().join("subdir")).expect("Failed to create subdir");
    std::fs::write(dir.path().join(".hidden"), "x").expect("Failed to write dotfile");

    let names = store.list().await.expect("Failed to list documents");
    assert_eq!(names, ["kept.txt"]);
}

#[tokio::test]
async fn test_list_reflects_external_changes() {
    let (dir, store) = scratch_store();

    // Another writer drops a file into the root between calls
    assert!(store.list().await.expect("Failed to list").is_empty());
    std::fs::write(dir.path().join("late.txt"), "x").expect("Failed to write file");

    let names = store.list().await.expect("Failed to list documents");
    assert_eq!(names, ["late.txt"]);
}

#[tokio::test]
async fn test_list_missing_root_errors() {
    let dir = tempfile::TempDir::new().expect("Failed to create scratch directory");
    let store = DocumentStore::new(dir.path().join("never-created"));

    assert!(store.list().await.is_err());
}

// ===== READ / WRITE TESTS =====

#[tokio::test]
async fn test_write_then_read_round_trips_bytes() {
    let (_dir, store) = scratch_store();

    store
        .write("about.txt", b"This is a file based cms program.")
        .await
        .expect("Failed to write document");

    let bytes = store.read("about.txt").await.expect("Failed to read document");
    assert_eq!(bytes, b"This is a file based cms program.");
}

#[tokio::test]
async fn test_write_overwrites_existing_content() {
    let (_dir, store) = seeded_store(&[("notes.txt", "old")]).await;

    store
        .write("notes.txt", b"new")
        .await
        .expect("Failed to overwrite document");

    let bytes = store.read("notes.txt").await.expect("Failed to read document");
    assert_eq!(bytes, b"new");
}

#[tokio::test]
async fn test_read_absent_document_is_not_found() {
    let (_dir, store) = scratch_store();

    assert_not_found(store.read("doesnt_exist.txt").await);
}

#[tokio::test]
async fn test_exists() {
    let (_dir, store) = seeded_store(&[("about.txt", "x")]).await;

    assert!(store.exists("about.txt").await);
    assert!(!store.exists("changes.txt").await);
    assert!(!store.exists("").await);
}

// ===== CREATE TESTS =====

#[tokio::test]
async fn test_create_appends_txt_when_name_has_no_extension() {
    let (_dir, store) = scratch_store();

    let stored = store.create("new_doc_test").await.expect("Failed to create");
    assert_eq!(stored, "new_doc_test.txt");

    let names = store.list().await.expect("Failed to list documents");
    assert_eq!(names, ["new_doc_test.txt"]);
}

#[tokio::test]
async fn test_create_keeps_any_supplied_extension() {
    let (_dir, store) = scratch_store();

    assert_eq!(store.create("new_doc_test.txt").await.unwrap(), "new_doc_test.txt");
    assert_eq!(store.create("readme.md").await.unwrap(), "readme.md");
    assert_eq!(store.create("data.csv").await.unwrap(), "data.csv");
}

#[tokio::test]
async fn test_create_trims_surrounding_whitespace() {
    let (_dir, store) = scratch_store();

    let stored = store.create("  padded  ").await.expect("Failed to create");
    assert_eq!(stored, "padded.txt");
    assert!(store.exists("padded.txt").await);
}

#[tokio::test]
async fn test_create_empty_name_is_invalid() {
    let (_dir, store) = scratch_store();

    assert_invalid_name(store.create("").await);
    assert_invalid_name(store.create("   ").await);

    let names = store.list().await.expect("Failed to list documents");
    assert!(names.is_empty());
}

#[tokio::test]
async fn test_create_makes_an_empty_document() {
    let (_dir, store) = scratch_store();

    store.create("blank.txt").await.expect("Failed to create");

    let bytes = store.read("blank.txt").await.expect("Failed to read document");
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_create_truncates_an_existing_document() {
    let (_dir, store) = seeded_store(&[("notes.txt", "contents")]).await;

    store.create("notes.txt").await.expect("Failed to create");

    let bytes = store.read("notes.txt").await.expect("Failed to read document");
    assert!(bytes.is_empty());
}

// ===== DELETE TESTS =====

#[tokio::test]
async fn test_delete_removes_the_document() {
    let (_dir, store) = seeded_store(&[("test_file.txt", "x")]).await;

    store.delete("test_file.txt").await.expect("Failed to delete");

    assert!(!store.exists("test_file.txt").await);
    let names = store.list().await.expect("Failed to list documents");
    assert!(names.is_empty());
}

#[tokio::test]
async fn test_delete_absent_document_is_not_found() {
    let (_dir, store) = scratch_store();

    assert_not_found(store.delete("doesnt_exist.txt").await);
}

// ===== NAME SANITIZATION TESTS =====

#[tokio::test]
async fn test_traversal_names_stay_inside_the_root() {
    let outer = tempfile::TempDir::new().expect("Failed to create scratch directory");
    let root = outer.path().join("root");
    std::fs::create_dir(&root).expect("Failed to create root");
    let store = DocumentStore::new(&root);

    store
        .write("../leak.txt", b"contained")
        .await
        .expect("Failed to write document");

    // The name reduced to its final component and landed inside the root
    assert!(root.join("leak.txt").is_file());
    assert!(!outer.path().join("leak.txt").exists());
}

#[tokio::test]
async fn test_absolute_path_names_stay_inside_the_root() {
    let (dir, store) = scratch_store();

    store
        .write("/etc/passwd", b"contained")
        .await
        .expect("Failed to write document");

    assert!(dir.path().join("passwd").is_file());
    let bytes = store.read("passwd").await.expect("Failed to read document");
    assert_eq!(bytes, b"contained");
}

#[tokio::test]
async fn test_names_with_no_usable_component_are_invalid() {
    let (_dir, store) = scratch_store();

    for name in ["", ".", "..", "/"] {
        assert_invalid_name(store.read(name).await);
        assert_invalid_name(store.write(name, b"x").await);
        assert_invalid_name(store.delete(name).await);
        assert!(!store.exists(name).await);
    }
}

#[tokio::test]
async fn test_deleting_by_traversal_only_touches_the_root() {
    let outer = tempfile::TempDir::new().expect("Failed to create scratch directory");
    let root = outer.path().join("root");
    std::fs::create_dir(&root).expect("Failed to create root");
    std::fs::write(outer.path().join("precious.txt"), "keep me").expect("Failed to write file");
    let store = DocumentStore::new(&root);

    // Reduces to "precious.txt" under the root, which does not exist there
    assert_not_found(store.delete("../precious.txt").await);
    assert!(outer.path().join("precious.txt").is_file());
}
