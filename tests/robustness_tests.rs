mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_event_storm_never_breaks_the_page() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("storm.csv");
    common::generate_storm_script(&script, 2000, 7).expect("Failed to generate script");

    let mut cmd = Command::new(cargo_bin!());
    cmd.arg(&script);

    // Whatever the storm did, the session must end with a full report.
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("item,value"))
        .stdout(predicate::str::contains("price,"))
        .stdout(predicate::str::contains("form_phase,"));
}

#[test]
fn test_storms_with_the_same_seed_replay_identically() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("storm.csv");
    common::generate_storm_script(&script, 500, 42).expect("Failed to generate script");

    let first = Command::new(cargo_bin!())
        .arg(&script)
        .output()
        .unwrap();
    let second = Command::new(cargo_bin!())
        .arg(&script)
        .output()
        .unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_malformed_rows_are_skipped_not_fatal() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "event,target,value").unwrap();
    // Valid toggle
    writeln!(file, "click,menu,").unwrap();
    // Unknown event
    writeln!(file, "drag,menu,").unwrap();
    // Unknown calculator control
    writeln!(file, "change,calc:colour,red").unwrap();
    // Garbage advance interval
    writeln!(file, "advance,,never").unwrap();
    // Valid change still applies
    writeln!(file, "change,calc:work,4500").unwrap();

    let mut cmd = Command::new(cargo_bin!());
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading script"))
        .stdout(predicate::str::contains("menu_open,true"))
        // Thesis floor: max(4500, 75 x 10 x 1.0)
        .stdout(predicate::str::contains("price,4 500 ₽"));
}

#[test]
fn test_generated_storm_has_the_requested_length() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("short.csv");
    common::generate_storm_script(&script, 50, 1).expect("Failed to generate script");

    let content = std::fs::read_to_string(&script).expect("Failed to read file");
    // Header + 50 rows
    assert_eq!(content.lines().count(), 51);
}
