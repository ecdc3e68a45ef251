//! Integration tests for vaultex-core.
//!
//! End-to-end runs against a real directory vault.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use vaultex_core::ExtractionConfig;
use vaultex_core::ExtractionError;
use vaultex_core::FsStorage;
use vaultex_core::TargetRoot;
use vaultex_core::extract_bytes;
use vaultex_core::extract_into_vault;
use vaultex_core::test_utils::ZipTestBuilder;
use vaultex_core::test_utils::create_test_tar;
use vaultex_core::test_utils::create_test_tar_gz;
use vaultex_core::test_utils::create_test_zip;
use vaultex_core::test_utils::set_zip_compression_method;

fn snapshot(root: &Path) -> Vec<(String, Option<Vec<u8>>)> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<(String, Option<Vec<u8>>)>) {
        let mut children: Vec<_> = fs::read_dir(dir).unwrap().map(|e| e.unwrap().path()).collect();
        children.sort();
        for child in children {
            let rel = child.strip_prefix(root).unwrap().to_string_lossy().into_owned();
            if child.is_dir() {
                out.push((rel, None));
                walk(root, &child, out);
            } else {
                out.push((rel, Some(fs::read(&child).unwrap())));
            }
        }
    }

    let mut out = Vec::new();
    walk(root, root, &mut out);
    out
}

fn course_archive() -> Vec<u8> {
    ZipTestBuilder::new()
        .add_directory("week1/")
        .add_file("week1/slides.pdf", &[0x25; 1024])
        .add_file("__MACOSX/._slides.pdf", b"resource fork")
        .add_file(".DS_Store", b"finder")
        .build()
}

#[test]
fn test_course_modules_end_to_end() {
    let temp = TempDir::new().expect("failed to create temp dir");
    fs::create_dir(temp.path().join("Course Modules")).unwrap();
    let target = TargetRoot::parse("/Course Modules").unwrap();

    let report =
        extract_into_vault(&course_archive(), temp.path(), &target, &ExtractionConfig::default())
            .unwrap();

    assert_eq!(report.files_written, 1);
    assert_eq!(report.directories_created, 1);
    assert_eq!(report.entries_ignored, 2);
    assert!(report.warnings.is_empty());

    let course = temp.path().join("Course Modules");
    assert!(course.join("week1").is_dir());
    assert_eq!(fs::read(course.join("week1/slides.pdf")).unwrap().len(), 1024);
    assert!(!course.join("__MACOSX").exists());
    assert!(!course.join(".DS_Store").exists());
    assert!(!temp.path().join("__MACOSX").exists());
}

#[test]
fn test_second_run_is_noop() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let bytes = create_test_zip(vec![
        ("notes/a.md", b"alpha"),
        ("notes/deep/b.md", b"beta"),
        ("readme.txt", b"hello"),
    ]);
    let target = TargetRoot::parse("Imports").unwrap();
    let config = ExtractionConfig::default();

    let first = extract_into_vault(&bytes, temp.path(), &target, &config).unwrap();
    assert_eq!(first.files_written, 3);
    let before = snapshot(temp.path());

    let second = extract_into_vault(&bytes, temp.path(), &target, &config).unwrap();
    assert_eq!(second.files_written, 0);
    assert_eq!(second.files_skipped, 3);
    assert_eq!(second.directories_created, 0);
    assert!(second.is_noop());
    assert_eq!(snapshot(temp.path()), before);
}

#[test]
fn test_existing_files_never_overwritten() {
    let temp = TempDir::new().expect("failed to create temp dir");
    fs::create_dir_all(temp.path().join("notes")).unwrap();
    fs::write(temp.path().join("notes/todo.md"), "my edits").unwrap();

    let bytes = create_test_tar(vec![
        ("notes/todo.md", b"archive version"),
        ("notes/new.md", b"new"),
    ]);
    let storage = FsStorage::open(temp.path()).unwrap();
    let report = extract_bytes(&bytes, &storage, &TargetRoot::root(), &ExtractionConfig::default())
        .unwrap();

    assert_eq!(report.files_skipped, 1);
    assert_eq!(report.files_written, 1);
    assert_eq!(fs::read_to_string(temp.path().join("notes/todo.md")).unwrap(), "my edits");
}

#[test]
fn test_escape_attempts_stay_inside_target() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let vault = temp.path().join("vault");
    fs::create_dir(&vault).unwrap();

    let bytes = create_test_zip(vec![
        ("../../escape.txt", b"x"),
        ("a/../../escape2.txt", b"x"),
        ("/abs/inside.txt", b"ok"),
        ("win\\style\\path.txt", b"ok"),
    ]);
    let target = TargetRoot::parse("Sub").unwrap();
    let report = extract_into_vault(&bytes, &vault, &target, &ExtractionConfig::default()).unwrap();

    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings.iter().all(|w| w.code == "PATH_TRAVERSAL"));
    assert!(!temp.path().join("escape.txt").exists());
    assert!(!vault.join("escape.txt").exists());
    assert!(vault.join("Sub/abs/inside.txt").is_file());
    assert!(vault.join("Sub/win/style/path.txt").is_file());
}

#[test]
fn test_metadata_entries_have_no_effect() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let bytes = create_test_tar_gz(vec![
        ("__MACOSX/foo.txt", b"meta"),
        ("notes/.DS_Store", b"meta"),
    ]);

    let report =
        extract_into_vault(&bytes, temp.path(), &TargetRoot::root(), &ExtractionConfig::default())
            .unwrap();

    assert_eq!(report.files_written, 0);
    assert_eq!(report.entries_ignored, 2);
    assert!(snapshot(temp.path()).is_empty());
}

#[test]
fn test_implicit_directories_created() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let bytes = create_test_zip(vec![("a/b/c.txt", b"c")]);

    let report =
        extract_into_vault(&bytes, temp.path(), &TargetRoot::root(), &ExtractionConfig::default())
            .unwrap();

    assert_eq!(report.directories_created, 2);
    assert!(temp.path().join("a").is_dir());
    assert!(temp.path().join("a/b").is_dir());
    assert_eq!(fs::read(temp.path().join("a/b/c.txt")).unwrap(), b"c");
}

#[test]
fn test_file_over_directory_is_single_conflict() {
    let temp = TempDir::new().expect("failed to create temp dir");
    fs::create_dir_all(temp.path().join("lectures/week1")).unwrap();
    let bytes = create_test_zip(vec![("lectures/week1", b"file"), ("lectures/other.md", b"o")]);

    let report =
        extract_into_vault(&bytes, temp.path(), &TargetRoot::root(), &ExtractionConfig::default())
            .unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].code, "WRITE_CONFLICT");
    assert_eq!(report.warnings[0].path, "lectures/week1");
    assert_eq!(report.files_written, 1);
    assert!(temp.path().join("lectures/week1").is_dir());
}

#[test]
fn test_corrupt_archive_aborts_before_writing() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let mut bytes = create_test_tar_gz(vec![("a.txt", b"alpha"), ("b.txt", b"beta")]);
    let len = bytes.len();
    bytes.truncate(len / 2);

    let result =
        extract_into_vault(&bytes, temp.path(), &TargetRoot::root(), &ExtractionConfig::default());

    assert!(matches!(result, Err(ExtractionError::InvalidArchive(_))));
    assert!(snapshot(temp.path()).is_empty());
}

#[test]
fn test_unsupported_compression_aborts_before_writing() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let target = TargetRoot::parse("Course Modules").unwrap();
    let mut bytes = create_test_zip(vec![("a.txt", b"alpha"), ("b.txt", b"beta")]);
    set_zip_compression_method(&mut bytes, "b.txt", 12);

    let result = extract_into_vault(&bytes, temp.path(), &target, &ExtractionConfig::default());

    assert!(matches!(result, Err(ExtractionError::InvalidArchive(_))));
    assert!(!temp.path().join("Course Modules/a.txt").exists());
}

#[test]
fn test_colliding_entries_last_wins_over_new_only() {
    let temp = TempDir::new().expect("failed to create temp dir");
    fs::write(temp.path().join("kept.md"), "mine").unwrap();
    let bytes = create_test_tar(vec![
        ("notes.md", b"draft"),
        ("kept.md", b"draft"),
        ("notes.md", b"final"),
        ("kept.md", b"final"),
    ]);

    let report =
        extract_into_vault(&bytes, temp.path(), &TargetRoot::root(), &ExtractionConfig::default())
            .unwrap();

    assert_eq!(report.files_written, 1);
    assert_eq!(report.files_skipped, 2);
    assert_eq!(fs::read_to_string(temp.path().join("notes.md")).unwrap(), "final");
    assert_eq!(fs::read_to_string(temp.path().join("kept.md")).unwrap(), "mine");
}

#[test]
fn test_root_target_has_no_prefix() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let bytes = create_test_zip(vec![("top.md", b"t")]);

    extract_into_vault(&bytes, temp.path(), &TargetRoot::root(), &ExtractionConfig::default())
        .unwrap();
    assert!(temp.path().join("top.md").is_file());
}

#[test]
#[cfg(unix)]
fn test_symlinked_directory_in_vault_not_followed() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let outside = TempDir::new().expect("failed to create temp dir");
    std::os::unix::fs::symlink(outside.path(), temp.path().join("linked")).unwrap();

    let bytes = create_test_zip(vec![("linked/payload.txt", b"x")]);
    let report =
        extract_into_vault(&bytes, temp.path(), &TargetRoot::root(), &ExtractionConfig::default())
            .unwrap();

    assert_eq!(report.files_written, 0);
    assert_eq!(report.warnings[0].code, "DIRECTORY_CONFLICT");
    assert!(!outside.path().join("payload.txt").exists());
}
