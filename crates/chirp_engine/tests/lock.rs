use std::fs;

use chirp_engine::{RunLock, StoreError, LOCK_FILENAME};
use tempfile::TempDir;

#[test]
fn second_acquire_fails_while_held() {
    let temp = TempDir::new().unwrap();
    let lock = RunLock::acquire(temp.path()).unwrap();
    assert_eq!(lock.path(), temp.path().join(LOCK_FILENAME));
    assert!(lock.path().is_file());

    let err = RunLock::acquire(temp.path()).unwrap_err();
    assert!(matches!(err, StoreError::Locked(_)));
}

#[test]
fn drop_releases_the_lock() {
    let temp = TempDir::new().unwrap();
    {
        let _lock = RunLock::acquire(temp.path()).unwrap();
    }
    assert!(RunLock::acquire(temp.path()).is_ok());
}

#[test]
fn leftover_lock_file_from_dead_run_is_taken_over() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(LOCK_FILENAME);
    // A run killed before cleanup leaves its file behind, but no OS lock.
    fs::write(&path, "999999\n").unwrap();

    let lock = RunLock::acquire(temp.path()).expect("stale lock file must not block");

    let holder = fs::read_to_string(lock.path()).unwrap();
    assert_eq!(holder.trim(), std::process::id().to_string());
}
