//! End-to-end tests for the `tilecache` binary.
//!
//! Run with: `cargo test -p tilecache-cli --test cli_workflow`

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run the binary against a cache rooted in `temp`, ignoring any user config.
fn tilecache(temp: &TempDir, args: &[&str]) -> Output {
    let root = temp.path().join("cache");
    let config = temp.path().join("no-config.ini");
    Command::new(env!("CARGO_BIN_EXE_tilecache"))
        .arg("--config")
        .arg(&config)
        .arg("--root")
        .arg(&root)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tilecache binary")
}

fn write_input(temp: &TempDir, name: &str, data: &[u8]) -> String {
    let path = temp.path().join(name);
    fs::write(&path, data).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_put_get_delete_workflow() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, "tile.png", b"\x89PNG fake tile");

    let out = tilecache(&temp, &["put", "3/5/7", input.as_str()]);
    assert!(out.status.success(), "put failed: {:?}", out);
    assert!(temp
        .path()
        .join("cache")
        .join("3")
        .join("5")
        .join("7.png")
        .is_file());

    let out = tilecache(&temp, &["get", "3/5/7"]);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"\x89PNG fake tile");

    let out = tilecache(&temp, &["delete", "3/5/7"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Deleted tile 3/5/7"));

    let out = tilecache(&temp, &["get", "3/5/7"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_second_put_keeps_first_tile() {
    let temp = TempDir::new().unwrap();
    let first = write_input(&temp, "a.png", b"first");
    let second = write_input(&temp, "b.png", b"second");

    assert!(tilecache(&temp, &["put", "1/2/3", first.as_str()]).status.success());
    assert!(tilecache(&temp, &["put", "1/2/3", second.as_str()]).status.success());

    let out = tilecache(&temp, &["get", "1/2/3"]);
    assert_eq!(out.stdout, b"first");
}

#[test]
fn test_get_to_output_file() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, "tile.jpg", b"jpeg bytes");
    let output = temp.path().join("out.jpg");

    assert!(tilecache(&temp, &["--format", "jpg", "put", "4/4/4", input.as_str()])
        .status
        .success());
    let out = tilecache(
        &temp,
        &[
            "--format",
            "jpg",
            "get",
            "4/4/4",
            "-o",
            output.to_str().unwrap(),
        ],
    );
    assert!(out.status.success());
    assert_eq!(fs::read(&output).unwrap(), b"jpeg bytes");
}

#[test]
fn test_path_command() {
    let temp = TempDir::new().unwrap();
    let out = tilecache(&temp, &["path", "12/2048/1365"]);
    assert!(out.status.success());

    let printed = String::from_utf8(out.stdout).unwrap();
    let expected = temp
        .path()
        .join("cache")
        .join("12")
        .join("2048")
        .join("1365.png");
    assert_eq!(Path::new(printed.trim_end()), expected.as_path());
}

#[test]
fn test_negative_column_key() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, "tile.png", b"west of origin");

    let out = tilecache(&temp, &["put", "3/-1/5", input.as_str()]);
    assert!(out.status.success(), "put failed: {:?}", out);
    assert!(temp
        .path()
        .join("cache")
        .join("3")
        .join("-1")
        .join("5.png")
        .is_file());

    let out = tilecache(&temp, &["get", "3/-1/5"]);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"west of origin");
}

#[test]
fn test_delete_missing_tile_succeeds() {
    let temp = TempDir::new().unwrap();
    let out = tilecache(&temp, &["--sharded", "4", "delete", "9/9/9"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("was not cached"));
}

#[test]
fn test_invalid_key_is_rejected() {
    let temp = TempDir::new().unwrap();
    let out = tilecache(&temp, &["get", "3/5"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("level/col/row"));
}

#[test]
fn test_invalid_format_fails() {
    let temp = TempDir::new().unwrap();
    let out = tilecache(&temp, &["--format", ".png", "path", "1/1/1"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error:"));
}
