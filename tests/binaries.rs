//! Exit statuses of the `onefactor` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use onefactor::error::{FORMAT_EXIT_CODE, IO_EXIT_CODE, USAGE_EXIT_CODE};
use onefactor::fixtures::{FIRST_COMPACT, ROUND_ROBIN_COMPACT};
use tempfile::TempDir;

fn onefactor(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_onefactor"))
        .args(args)
        .output()
        .expect("Failed to execute onefactor")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_missing_output_argument_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("survivors.txt");
    fs::write(&input, format!("{ROUND_ROBIN_COMPACT}\n")).unwrap();

    let output = onefactor(&["k4e", path_str(&input)]);
    assert_eq!(output.status.code(), Some(USAGE_EXIT_CODE));
    let entries = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1, "no output file may be created");
}

#[test]
fn test_no_arguments_is_a_usage_error() {
    let output = onefactor(&[]);
    assert_eq!(output.status.code(), Some(USAGE_EXIT_CODE));
}

#[test]
fn test_help_and_version_succeed() {
    let help = onefactor(&["--help"]);
    assert!(help.status.success());
    let stdout = String::from_utf8_lossy(&help.stdout);
    assert!(stdout.contains("validate"));

    let version = onefactor(&["--version"]);
    assert!(version.status.success());
    assert!(String::from_utf8_lossy(&version.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_input_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("final.txt");
    let output = onefactor(&[
        "k4e",
        path_str(&dir.path().join("absent.txt")),
        path_str(&output_path),
    ]);
    assert_eq!(output.status.code(), Some(IO_EXIT_CODE));
}

#[test]
fn test_invalid_utf8_input_is_a_format_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("survivors.txt");
    let mut bytes = format!("{FIRST_COMPACT}\n").into_bytes();
    bytes[3] = 0xFF;
    fs::write(&input, bytes).unwrap();

    let output = onefactor(&[
        "k4e",
        path_str(&input),
        path_str(&dir.path().join("final.txt")),
    ]);
    assert_eq!(output.status.code(), Some(FORMAT_EXIT_CODE));
}

#[test]
fn test_validate_succeeds() {
    let output = onefactor(&["validate"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Validation OK"));
}
