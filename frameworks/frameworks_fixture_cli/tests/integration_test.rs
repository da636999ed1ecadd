//! Integration tests for frameworks_fixture_cli crate
//!
//! Generation and verification through the library entry points the binary uses.

use std::fs;

use frameworks_fixture_cli::*;
use usecases_fixture_generation::Backend;

#[test]
fn test_both_backends_write_identical_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let a = generate(&dir.path().join("a"), DEFAULT_FILE_NAME, Backend::Malachite).unwrap();
    let b = generate(&dir.path().join("b"), DEFAULT_FILE_NAME, Backend::Digits).unwrap();
    assert_eq!(a.bytes, b.bytes);
    assert_eq!(fs::read(&a.path).unwrap(), fs::read(&b.path).unwrap());
}

#[test]
fn test_regenerated_artifact_verifies() {
    let dir = tempfile::tempdir().unwrap();
    let first = generate(dir.path(), DEFAULT_FILE_NAME, Backend::Malachite).unwrap();
    let before = fs::read(&first.path).unwrap();
    let second = generate(dir.path(), DEFAULT_FILE_NAME, Backend::Malachite).unwrap();
    assert_eq!(before, fs::read(&second.path).unwrap());
    verify(&second.path).unwrap();
}

#[test]
fn test_corrupted_artifact_fails_verification() {
    let dir = tempfile::tempdir().unwrap();
    let written = generate(dir.path(), DEFAULT_FILE_NAME, Backend::Malachite).unwrap();
    let mut bytes = fs::read(&written.path).unwrap();
    // Flip the first comparison symbol ((0, 0) is '=')
    let first_symbol = bytes.len() - 34 * 34;
    bytes[first_symbol] = b'>';
    fs::write(&written.path, &bytes).unwrap();

    let err = verify(&written.path).unwrap_err();
    assert!(err.to_string().contains("comparison matrix entry 0"));
}
