//! Runs the binary and checks output and exit codes.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_month-translate"))
}

#[test]
fn test_success_prints_output_path() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("itinerary.html");
    fs::write(&input, "Oct 12 to Nov 2").unwrap();

    let out = bin().arg(&input).output().unwrap();

    assert_eq!(out.status.code(), Some(0));
    let expected = dir.path().join("itinerary_ar.html");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(&format!("Wrote translated file: {}", expected.display())));
    assert_eq!(fs::read_to_string(expected).unwrap(), "أكتوبر 12 to نوفمبر 2");
}

#[test]
fn test_read_and_write_failures_exit_differently() {
    let dir = TempDir::new().unwrap();

    let missing = bin().arg(dir.path().join("missing.html")).output().unwrap();
    assert_eq!(missing.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("Error reading input file"));

    let input = dir.path().join("in.html");
    fs::write(&input, "May").unwrap();
    let unwritable = bin()
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("nope").join("out.html"))
        .output()
        .unwrap();
    assert_eq!(unwritable.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&unwritable.stderr).contains("Error writing output file"));
}

#[test]
fn test_custom_table_and_strict_conflicts() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    fs::write(&input, "New York in May").unwrap();
    let table = dir.path().join("table.json");
    fs::write(&table, r#"{"York": "Y", "New York": "NY"}"#).unwrap();
    let output = dir.path().join("out.txt");

    let lenient = bin().arg(&input).arg("-t").arg(&table).arg("-o").arg(&output).output().unwrap();
    assert_eq!(lenient.status.code(), Some(0));
    assert_eq!(fs::read_to_string(&output).unwrap(), "New Y in May");

    let strict = bin().arg(&input).arg("-t").arg(&table).arg("--strict").output().unwrap();
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn test_output_with_several_inputs_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.html");
    let b = dir.path().join("b.html");
    fs::write(&a, "Jan").unwrap();
    fs::write(&b, "Feb").unwrap();

    let out = bin().arg(&a).arg(&b).arg("-o").arg(dir.path().join("c.html")).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("c.html").exists());
}
