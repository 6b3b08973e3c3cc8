use std::fs;

use recovery_core::{parse_timestamp, PostRecord};
use recovery_engine::{ensure_output_dir, AtomicFileWriter, PostWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("source").join("_posts");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("_posts");
    fs::write(&file_path, "x").unwrap();
    assert!(ensure_output_dir(&file_path).is_err());
}

#[test]
fn atomic_write_never_clobbers() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("doc.md", "hello").unwrap();
    assert_eq!(first.file_name().unwrap(), "doc.md");
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    assert!(writer.write("doc.md", "world").is_err());
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");
    let leftovers = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn post_writer_never_overwrites() {
    let temp = TempDir::new().unwrap();
    let writer = PostWriter::new(temp.path().to_path_buf());

    let mut record = PostRecord::new("Build <notes> / part 1?");
    record.created_at = parse_timestamp("2020-02-02T02:02:02Z");
    record.body_markdown = "first".into();
    let first = writer.write_post(&record).unwrap();

    record.body_markdown = "second".into();
    let second = writer.write_post(&record).unwrap();

    assert_eq!(first.file_name().unwrap(), "Build notes part 1.md");
    assert_eq!(second.file_name().unwrap(), "Build notes part 1_1.md");
    assert!(fs::read_to_string(&first).unwrap().ends_with("first"));
    assert!(fs::read_to_string(&second).unwrap().ends_with("second"));
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = PostWriter::new(file_path.clone());
    let result = writer.write_post(&PostRecord::new("Doc"));
    assert!(result.is_err());
    assert!(!file_path.with_file_name("Doc.md").exists());
}
