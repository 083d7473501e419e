/*!
 * Integration tests for the hiddendump binary
 */

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hiddendump"))
        .args(args)
        .output()
        .expect("failed to run hiddendump")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp path is valid UTF-8")
}

#[test]
fn test_text_dump_is_written_beside_root() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".env"), "A=1").unwrap();
    fs::write(temp_dir.path().join("README.md"), "hello").unwrap();

    let output = run(&[path_arg(temp_dir.path()), "-q"]);
    assert!(output.status.success());

    let dump = fs::read_to_string(temp_dir.path().join("hidden_dump.txt")).unwrap();
    assert!(dump.contains("## DIRECTORY STRUCTURE"));
    assert!(dump.contains("### .env\n```\nA=1\n```"));
    assert!(!dump.contains("README.md"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hidden_dump.txt"));
}

#[test]
fn test_json_format() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".gitignore"), "*.log\n").unwrap();

    let output = run(&[path_arg(temp_dir.path()), "--format", "json", "-q"]);
    assert!(output.status.success());

    let raw = fs::read_to_string(temp_dir.path().join("hidden_dump.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!({ ".gitignore": "*.log\n" }));
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".hidden"), "x".repeat(50)).unwrap();

    let output = run(&[path_arg(temp_dir.path()), "--dry-run", "-q"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("DRY RUN"));
    assert!(stdout.contains("50 (50 bytes)"));
    let written: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with("hidden_dump"))
        .collect();
    assert!(written.is_empty());
}

#[test]
fn test_sqlite_format_and_extra_excludes() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".env"), "A=1").unwrap();
    fs::create_dir_all(temp_dir.path().join(".private")).unwrap();
    fs::write(temp_dir.path().join(".private/.token"), "t").unwrap();

    let output = run(&[
        path_arg(temp_dir.path()),
        "--format",
        "sqlite",
        "--exclude",
        ".private",
        "-q",
    ]);
    assert!(output.status.success());

    let conn = rusqlite::Connection::open(temp_dir.path().join("hidden_dump.db")).unwrap();
    let paths: Vec<String> = conn
        .prepare("SELECT filepath FROM files ORDER BY id")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(paths, [".env"]);
}

#[test]
fn test_missing_directory_fails() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("missing");

    let output = run(&[path_arg(&missing), "-q"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_write_failure_exits_with_code_2() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".env"), "A=1").unwrap();
    fs::create_dir(temp_dir.path().join("hidden_dump.txt")).unwrap();

    let output = run(&[path_arg(temp_dir.path()), "-q"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("hidden_dump.txt"));
}

#[test]
fn test_vietnamese_messages() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".env"), "A=1").unwrap();

    let output = run(&[path_arg(temp_dir.path()), "--lang", "vi", "--dry-run", "-q"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Thống kê"));
}

#[test]
fn test_invalid_max_size_is_a_usage_error() {
    let output = run(&["--max-size", "huge"]);
    assert!(!output.status.success());
}
