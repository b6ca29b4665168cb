//! End-to-end runs of the fshelf binary

use crate::fixtures::{create_storage_fixture, write_file};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fshelf(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fshelf"))
        .args(args)
        .output()
        .expect("Failed to execute fshelf")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_help_and_version() {
    let help = fshelf(&["--help"]);
    assert!(help.status.success());
    let stdout = String::from_utf8_lossy(&help.stdout);
    assert!(stdout.contains("fshelf scan"));
    assert!(stdout.contains("--preset"));

    let version = fshelf(&["--version"]);
    assert!(version.status.success());
    let stdout = String::from_utf8_lossy(&version.stdout);
    assert!(stdout.starts_with("fshelf "));
    assert!(stdout.contains("Commit:"));
}

#[test]
fn test_scan_json_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_storage_fixture(temp_dir.path()).unwrap();

    let output = fshelf(&["scan", root.to_str().unwrap(), "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let json = stdout_json(&output);
    assert_eq!(json["total_files"], 11);
    assert_eq!(json["categories"].as_array().unwrap().len(), 6);
}

#[test]
fn test_scan_of_a_file_is_invalid_input() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("plain.txt");
    write_file(&file, 3).unwrap();

    let output = fshelf(&["scan", file.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));

    let output = fshelf(&["scan"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_delete_with_missing_path_is_partial_failure() {
    let temp_dir = TempDir::new().unwrap();
    let present = temp_dir.path().join("a.txt");
    let missing = temp_dir.path().join("gone.txt");
    write_file(&present, 1).unwrap();

    let output = fshelf(&[
        "rm",
        present.to_str().unwrap(),
        missing.to_str().unwrap(),
        "--json",
    ]);
    assert_eq!(output.status.code(), Some(3));
    assert!(!present.exists());

    let json = stdout_json(&output);
    assert_eq!(json["operation"], "delete");
    assert_eq!(json["success"], false);
    assert_eq!(json["outcome"]["completed"], 1);
    assert_eq!(json["outcome"]["failed"].as_array().unwrap().len(), 1);
}

#[test]
fn test_copy_to_preset() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_storage_fixture(temp_dir.path()).unwrap();
    let song = root.join("Music/song.mp3");

    let output = fshelf(&[
        "cp",
        "--preset",
        "downloads",
        "--root",
        root.to_str().unwrap(),
        song.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(0));
    assert!(root.join("Download/song.mp3").exists());
    assert!(song.exists());
}
