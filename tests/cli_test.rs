use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_ascii-hamming");

const ENV_VARS: [&str; 5] = [
    "ASCII_HAMMING_CONFIG",
    "ASCII_HAMMING_PARITY",
    "ASCII_HAMMING_PREFIX",
    "ASCII_HAMMING_MAX_INPUT",
    "ASCII_HAMMING_MAX_PLANE_BYTES",
];

/// A command in `dir` with none of the caller's `ASCII_HAMMING_*` settings.
fn command(dir: &TempDir) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.current_dir(dir.path());
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn run(dir: &TempDir, args: &[&str], stdin: &[u8]) -> Output {
    let mut child = command(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_encode_decode_with_defaults() {
    let dir = TempDir::new().unwrap();
    let enc = run(&dir, &["encode"], b"Hello, planes!\n");
    assert!(enc.status.success(), "{}", String::from_utf8_lossy(&enc.stderr));
    assert!(dir.path().join("file_0.hamming").exists());
    assert!(dir.path().join("file_11.hamming").exists());

    let dec = run(&dir, &["decode"], b"");
    assert!(dec.status.success());
    assert_eq!(dec.stdout, b"Hello, planes!");
}

#[test]
fn test_wrong_case_parity_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let out = run(&dir, &["encode", "--parity", "Even"], b"A\n");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("case sensitive"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_env_and_config_file_sources() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("run.toml"), "parity = \"odd\"\nprefix = \"cfg\"\n").unwrap();

    let enc = run(&dir, &["encode", "-c", "run.toml"], b"configured\n");
    assert!(enc.status.success());
    assert!(dir.path().join("cfg_0.hamming").exists());

    // Environment parity outranks the file.
    let dec = command(&dir)
        .args(["decode", "-c", "run.toml"])
        .env("ASCII_HAMMING_PARITY", "even")
        .output()
        .unwrap();
    assert!(dec.status.success());
    assert!(String::from_utf8_lossy(&dec.stdout).contains("might have been altered"));
    // Flagged characters are logged at the default (warn) level.
    assert!(String::from_utf8_lossy(&dec.stderr).contains("WARN: char 0:"));

    let dec = run(&dir, &["decode", "-c", "run.toml"], b"");
    assert_eq!(dec.stdout, b"configured");
}

#[test]
fn test_missing_planes_fail() {
    let dir = TempDir::new().unwrap();
    let out = run(&dir, &["decode", "-e", "nothing"], b"");
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn test_info_json() {
    let dir = TempDir::new().unwrap();
    assert!(run(&dir, &["encode", "-e", "inf"], b"info\n").status.success());
    let out = run(&dir, &["info", "-e", "inf", "--json"], b"");
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["message_len"], 4);
    assert_eq!(v["uniform"], true);
    assert_eq!(v["planes"].as_array().unwrap().len(), 12);
}

#[test]
fn test_env_limits_apply_and_are_not_inherited() {
    let dir = TempDir::new().unwrap();
    let mut child = command(&dir)
        .args(["encode"])
        .env("ASCII_HAMMING_MAX_INPUT", "4")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"too long\n").unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("4-byte bound"));
    assert!(!dir.path().join("file_0.hamming").exists());

    let out = run(&dir, &["encode"], b"too long\n");
    assert!(out.status.success());
}

#[test]
fn test_max_limits_do_not_overflow() {
    let dir = TempDir::new().unwrap();
    let max = usize::MAX.to_string();
    let out = run(&dir, &["encode", "--max-input", &max], b"limitless\n");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let out = run(&dir, &["decode", "--max-plane-bytes", &max], b"");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(out.stdout, b"limitless");
}
