use listwise_storage::Database;
use listwise_text::QuoteStyle;

#[test]
fn test_settings_default_when_empty() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.last_input().unwrap(), None);
    assert_eq!(db.quote_style().unwrap(), QuoteStyle::Single);
    assert!(db.watch_enabled().unwrap());
}

#[test]
fn test_last_input_round_trip() {
    let db = Database::open_in_memory().unwrap();
    db.set_last_input("A001, A002; A003").unwrap();
    assert_eq!(db.last_input().unwrap().as_deref(), Some("A001, A002; A003"));

    // Overwrite, not append.
    db.set_last_input("1,2,3").unwrap();
    assert_eq!(db.last_input().unwrap().as_deref(), Some("1,2,3"));
}

#[test]
fn test_quote_style_round_trip() {
    let db = Database::open_in_memory().unwrap();
    db.set_quote_style(QuoteStyle::Double).unwrap();
    assert_eq!(db.quote_style().unwrap(), QuoteStyle::Double);
}

#[test]
fn test_watch_enabled_round_trip() {
    let db = Database::open_in_memory().unwrap();
    db.set_watch_enabled(false).unwrap();
    assert!(!db.watch_enabled().unwrap());
    db.set_watch_enabled(true).unwrap();
    assert!(db.watch_enabled().unwrap());
}

#[test]
fn test_open_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("listwise.db");

    let db = Database::open(&path).unwrap();
    db.set_last_input("persisted").unwrap();
    drop(db);

    let reopened = Database::open(&path).unwrap();
    assert_eq!(reopened.last_input().unwrap().as_deref(), Some("persisted"));
}
