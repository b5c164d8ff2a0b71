//! Integration tests for directory listing, loading and saving

mod common;
use common::*;

use seqtool::{FileList, FileName, LoadError, list_directory, load_sequence, save_sequence};
use std::path::Path;
use tempfile::TempDir;

fn create_file(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn list_directory_returns_all_entries() {
    let tmp = TempDir::new().unwrap();
    create_file(tmp.path(), "demo.seq", DEMO_FILE);
    create_file(tmp.path(), "other", "");
    std::fs::create_dir(tmp.path().join("nested")).unwrap();

    let list = list_directory(tmp.path()).unwrap();
    let mut names: Vec<&str> = list.entries().iter().map(|f| f.name.as_str()).collect();
    names.sort_unstable();

    assert_eq!(names, ["demo.seq", "nested", "other"]);
    assert!(list.entries().iter().all(|f| f.path == tmp.path()));
    assert_eq!(list.selected(), None);
}

#[test]
fn list_directory_of_empty_dir_is_empty() {
    let tmp = TempDir::new().unwrap();
    let list = list_directory(tmp.path()).unwrap();
    assert!(list.is_empty());
}

#[test]
fn list_directory_fails_for_missing_dir() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing");
    let err = list_directory(&missing).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert_eq!(err.path(), missing);
}

#[test]
fn file_list_selection() {
    let mut list = FileList::new();
    list.add(FileName::new("/seq", "a"));
    list.add(FileName::new("/seq", "b"));

    assert!(list.select(Some(1)));
    assert_eq!(list.selected_file().map(|f| f.name.as_str()), Some("b"));

    assert!(!list.select(Some(2)));
    assert_eq!(list.selected(), Some(1));

    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.selected(), None);
}

#[test]
fn load_sequence_reads_demo_file() {
    let tmp = TempDir::new().unwrap();
    create_file(tmp.path(), "demo.seq", DEMO_FILE);

    let sequence: TestSequence = load_sequence(&FileName::new(tmp.path(), "demo.seq")).unwrap();
    assert!(sequence.is_valid());
    assert_eq!(sequence.short_name(), "demo");
    assert_eq!(sequence.file_name(), "demo.seq");
    assert_eq!(sequence.step_count(), 2);
    assert!(seconds_equal(sequence.duration(), 1.5));
}

#[test]
fn load_sequence_defaults_name_to_file_name() {
    let tmp = TempDir::new().unwrap();
    create_file(tmp.path(), "unnamed", "01 FF0000 00 00FF00 10\n");

    let sequence: TestSequence = load_sequence(&FileName::new(tmp.path(), "unnamed")).unwrap();
    assert_eq!(sequence.short_name(), "unnamed");
}

#[test]
fn load_sequence_missing_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let result: Result<TestSequence, _> = load_sequence(&FileName::new(tmp.path(), "nope"));
    let err = result.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert_eq!(err.path(), tmp.path().join("nope"));
}

#[test]
fn load_sequence_malformed_file_is_parse_error() {
    let tmp = TempDir::new().unwrap();
    create_file(tmp.path(), "bad.seq", "# bad\nGG 123 00 456 10\n");

    let result: Result<TestSequence, _> = load_sequence(&FileName::new(tmp.path(), "bad.seq"));
    match result {
        Err(LoadError::Parse { source, .. }) => {
            assert!(source.is_malformed_line());
            assert_eq!(source.line, 2);
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn load_error_display_includes_path_and_reason() {
    let tmp = TempDir::new().unwrap();
    create_file(tmp.path(), "bad.seq", "01 02\n");

    let result: Result<TestSequence, _> = load_sequence(&FileName::new(tmp.path(), "bad.seq"));
    let message = result.unwrap_err().to_string();
    assert!(message.contains("bad.seq"));
    assert!(message.ends_with("line 1: expected 5 fields, found 2"));
}

#[test]
fn load_error_exposes_source() {
    use std::error::Error;

    let tmp = TempDir::new().unwrap();
    let result: Result<TestSequence, _> = load_sequence(&FileName::new(tmp.path(), "nope"));
    assert!(result.unwrap_err().source().is_some());
}

#[test]
fn saved_sequence_loads_back() {
    let tmp = TempDir::new().unwrap();
    let original = sequence_of(
        "saved",
        &[(0x01, 0x123456, 0x00, 0xABCDEF, 7), (0x00, 0x000000, 0x03, 0xFFFFFF, 200)],
    );
    let path = tmp.path().join("saved.seq");
    save_sequence(&path, &original).unwrap();

    let loaded: TestSequence = load_sequence(&FileName::new(tmp.path(), "saved.seq")).unwrap();
    assert_eq!(loaded.short_name(), "saved");
    assert_eq!(loaded.steps(), original.steps());
    assert_eq!(loaded.duration(), original.duration());
}

#[test]
fn save_sequence_to_missing_dir_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("missing").join("x.seq");
    let err = save_sequence(&path, &sequence_of("x", &[])).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn read_error_mid_file_discards_partial_sequence() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("torn.seq"),
        b"# torn\n01 FF0000 00 00FF00 10\n\xff\xfe\n".as_slice(),
    )
    .unwrap();

    let result: Result<TestSequence, _> = load_sequence(&FileName::new(tmp.path(), "torn.seq"));
    match result {
        Err(LoadError::Io { path, source }) => {
            assert_eq!(path, tmp.path().join("torn.seq"));
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
        }
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn saved_multi_line_name_loads_back() {
    let tmp = TempDir::new().unwrap();
    let mut original = sequence_of("x", &[(0x00, 0x112233, 0x01, 0x445566, 12)]);
    original.set_short_name("left\nright");
    let path = tmp.path().join("named.seq");
    save_sequence(&path, &original).unwrap();

    let loaded: TestSequence = load_sequence(&FileName::new(tmp.path(), "named.seq")).unwrap();
    assert_eq!(loaded.short_name(), "left right");
    assert_eq!(loaded.steps(), original.steps());
}
