//! End-to-end tests for the bingraph binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bingraph() -> Command {
    Command::cargo_bin("bingraph").expect("binary should be built")
}

fn sample_input(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("input.bin");
    let data: Vec<u8> = (0..4096u32).map(|i| (i * 7 % 251) as u8).collect();
    fs::write(&path, data).expect("Failed to write input");
    path
}

// ==================== Listing ====================

#[test]
fn test_list_modes() {
    bingraph()
        .arg("--list-modes")
        .assert()
        .success()
        .stdout(predicate::str::contains("grayscale"))
        .stdout(predicate::str::contains("entropy-histogram"))
        .stdout(predicate::str::contains("dotplot"));
}

#[test]
fn test_paths_required() {
    bingraph().assert().failure();
}

// ==================== PNG output ====================

#[test]
fn test_png_output() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = sample_input(&dir);
    let output = dir.path().join("out.png");

    bingraph()
        .args(["-m", "entropy", "-w", "16", "-b", "16", "-z", "1"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let bytes = fs::read(&output).expect("Output should exist");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_png_to_stdout() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = sample_input(&dir);

    bingraph()
        .args(["-m", "bigrams"])
        .arg(&input)
        .arg("-")
        .assert()
        .success()
        .stdout(predicate::function(|out: &[u8]| out.starts_with(b"\x89PNG")));
}

#[test]
fn test_hilbert_transform() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = sample_input(&dir);
    let output = dir.path().join("hilbert.png");

    bingraph()
        .args(["-w", "64", "--transform-hilbert", "4", "-z", "1"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success();
    assert!(output.exists());
}

// ==================== Text output ====================

#[test]
fn test_ascii_output_from_stdin() {
    bingraph()
        .args(["-m", "ascii", "-w", "4", "-z", "1", "--output-format", "ascii", "-", "-"])
        .write_stdin("ab\x00\x01")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[48;2;55;126;184m \x1b[0m"))
        .stdout(predicate::str::contains("\x1b[48;2;0;0;0m \x1b[0m"))
        .stdout(predicate::str::ends_with("\n"));
}

#[test]
fn test_offset_window_from_stdin() {
    bingraph()
        .args(["-w", "2", "-z", "1", "--output-format", "ascii"])
        .args(["--offset-start", "0x2", "--offset-end", "0x4", "-", "-"])
        .write_stdin(vec![0u8, 0, 200, 100, 0, 0])
        .assert()
        .success()
        .stdout("\x1b[48;2;200;200;200m \x1b[0m\x1b[48;2;100;100;100m \x1b[0m\n");
}

// ==================== Config file ====================

#[test]
fn test_config_file_with_override() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = dir.path().join("bingraph.toml");
    fs::write(&config, "mode = \"entropy\"\nblock-size = 1\n").expect("Failed to write config");

    // The file alone selects an invalid block size
    bingraph()
        .args(["--output-format", "ascii", "-c"])
        .arg(&config)
        .args(["-", "-"])
        .write_stdin("some bytes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("block size"));

    // The flag overrides it
    bingraph()
        .args(["--output-format", "ascii", "-b", "4", "-c"])
        .arg(&config)
        .args(["-", "-"])
        .write_stdin("some bytes")
        .assert()
        .success();
}

#[test]
fn test_unknown_config_key() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = dir.path().join("bingraph.toml");
    fs::write(&config, "colour = \"red\"\n").expect("Failed to write config");

    bingraph()
        .arg("-c")
        .arg(&config)
        .args(["-", "-"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}

// ==================== Errors ====================

#[test]
fn test_invalid_block_size() {
    bingraph()
        .args(["-m", "entropy", "-b", "1", "-", "-"])
        .write_stdin("data")
        .assert()
        .failure()
        .stderr(predicate::str::contains("block size"));
}

#[test]
fn test_hilbert_width_not_divisible() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = sample_input(&dir);
    let output = dir.path().join("never.png");

    bingraph()
        .args(["-w", "48", "--transform-hilbert", "5"])
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not divisible"));
    assert!(!output.exists());
}

#[test]
fn test_exclusive_transforms() {
    bingraph()
        .args(["--transform-zigzag", "--transform-squares", "4", "-", "-"])
        .assert()
        .failure();
}

#[test]
fn test_bad_offsets() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = sample_input(&dir);

    bingraph()
        .args(["--offset-start", "0x100", "--offset-end", "0x10"])
        .arg(&input)
        .arg(dir.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("offset"));
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    bingraph()
        .arg(dir.path().join("missing.bin"))
        .arg(dir.path().join("out.png"))
        .assert()
        .failure();
}

#[test]
fn test_zero_zoom_rejected_up_front() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let output = dir.path().join("out.png");

    // The input does not exist either; parsing must fail first
    bingraph()
        .args(["-z", "0"])
        .arg(dir.path().join("missing.bin"))
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("zoom"));
    assert!(!output.exists());
}
