//! Integration tests for the panostitch binary.
//!
//! Only commands that never touch the network are exercised here.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn panostitch(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_panostitch"))
        .args(args)
        .output()
        .expect("failed to run panostitch")
}

/// Write a config file whose log file lives inside `dir`.
fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.ini");
    let contents = format!(
        "[fetch]\ninterval_ms = 0\n\n[logging]\nfile = {}\n",
        dir.join("panostitch.log").display()
    );
    std::fs::write(&path, contents).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_help_lists_subcommands() {
    let output = panostitch(&["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    for command in ["fetch", "plan", "config"] {
        assert!(text.contains(command), "missing {} in help", command);
    }
}

#[test]
fn test_plan_prints_every_tile_url() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let output = panostitch(&[
        "plan",
        "ABC",
        "--zoom",
        "2",
        "--config",
        config.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "# panorama ABC zoom 2: 8 tiles (4x2), canvas 2048x1024");

    let urls: Vec<&str> = lines[1..].to_vec();
    assert_eq!(urls.len(), 8);
    assert_eq!(
        urls[0],
        "0\t0\thttps://cbk0.google.com/cbk?output=tile&panoid=ABC&zoom=2&x=0&y=0"
    );
    assert_eq!(
        urls[1],
        "0\t1\thttps://cbk0.google.com/cbk?output=tile&panoid=ABC&zoom=2&x=0&y=1"
    );
}

#[test]
fn test_plan_rejects_unsupported_zoom() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let output = panostitch(&["plan", "ABC", "--zoom", "9", "--config", config.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Try a lower --zoom"));
}

#[test]
fn test_config_init_and_show() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.ini");

    let output = panostitch(&["config", "init", "--path", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(path.exists());

    let output = panostitch(&["config", "show", "--path", path.to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[stitch]"));
    assert!(text.contains("  zoom = 4"));
    assert!(!text.contains("not found"));
}

#[test]
fn test_config_show_missing_file_shows_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.ini");

    let output = panostitch(&["config", "show", "--path", path.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("not found, showing defaults"));
}

#[test]
fn test_fetch_invalid_zoom_fails_while_planning() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());
    let out = temp_dir.path().join("pano.jpg");

    let output = panostitch(&[
        "fetch",
        "ABC",
        "--zoom",
        "0",
        "--output",
        out.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("Stitching failed while planned"),
        "stderr: {}",
        stderr(&output)
    );
    assert!(!out.exists());
}

#[test]
fn test_fetch_unknown_extension_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());
    let out = temp_dir.path().join("pano.bmp");

    let output = panostitch(&[
        "fetch",
        "ABC",
        "--output",
        out.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cannot infer an image format"));
}

#[test]
fn test_fetch_missing_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.ini");

    let output = panostitch(&["fetch", "ABC", "--config", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("does not exist"));
}

#[test]
fn test_fetch_rejects_out_of_range_rate_flags() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let output = panostitch(&[
        "fetch",
        "ABC",
        "--interval-ms",
        "18446744073709551615",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--interval-ms"));

    let output = panostitch(&[
        "fetch",
        "ABC",
        "--burst",
        "0",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--burst"));
}
