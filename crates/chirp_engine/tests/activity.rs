use std::fs;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chirp_core::LogLabel;
use chirp_engine::{format_entry, ActivityLog, ActivityLogError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn entry_format_matches_layout() {
    assert_eq!(
        format_entry("2025-01-02 03:04:05.000006", "a.jpg", LogLabel::Posted),
        "2025-01-02 03:04:05.000006: Posted photo 'a.jpg'\n"
    );
    assert_eq!(
        format_entry("t", "b c.png", LogLabel::Rejected),
        "t: Rejected photo 'b c.png'\n"
    );
}

#[test]
fn records_append_in_order() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("post_log.txt");
    fs::write(&path, "earlier line\n").unwrap();

    let tick = Arc::new(AtomicU32::new(0));
    let clock_tick = tick.clone();
    let log = ActivityLog::new(&path).with_clock(Arc::new(move || {
        format!("T{}", clock_tick.fetch_add(1, Ordering::SeqCst))
    }));

    log.record("a.jpg", LogLabel::Rejected).unwrap();
    log.record("b.jpg", LogLabel::Posted).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "earlier line\nT0: Rejected photo 'a.jpg'\nT1: Posted photo 'b.jpg'\n"
    );
    assert_eq!(tick.load(Ordering::SeqCst), 2);
}

#[test]
fn default_clock_is_iso_like() {
    let temp = TempDir::new().unwrap();
    let log = ActivityLog::new(temp.path().join("logs").join("post_log.txt"));

    log.record("a.jpg", LogLabel::Posted).unwrap();

    let content = fs::read_to_string(log.path()).unwrap();
    let (timestamp, rest) = content.split_once(": ").unwrap();
    assert_eq!(rest, "Posted photo 'a.jpg'\n");
    assert!(chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S%.f").is_ok());
}

#[test]
fn write_failure_is_reported() {
    let temp = TempDir::new().unwrap();
    // The log path is a directory, so opening it for append fails.
    let log = ActivityLog::new(temp.path());

    let err = log.record("a.jpg", LogLabel::Posted).unwrap_err();
    assert!(matches!(err, ActivityLogError::Write(..)));
}
