use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn apptrack(store_file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("apptrack").unwrap();
    cmd.arg("--file").arg(store_file);
    cmd
}

#[test]
fn test_add_then_view_roundtrip() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("applications.csv");

    // 1 = add: company, role, date, status (blank -> Applied), notes; 5 = exit
    apptrack(&file)
        .write_stdin("1\nAcme Corp\nEngineer\n2026-08-01\n\nreferral from Sam\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved application #1."));

    apptrack(&file)
        .write_stdin("2\n5\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Acme Corp")
                .and(predicate::str::contains("Engineer"))
                .and(predicate::str::contains("Applied"))
                .and(predicate::str::contains("Notes: referral from Sam")),
        );
}

#[test]
fn test_view_empty_store() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("applications.csv");

    apptrack(&file)
        .write_stdin("2\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No applications yet."));
}

#[test]
fn test_add_rejects_missing_company() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("applications.csv");

    apptrack(&file)
        .write_stdin("1\n\nEngineer\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Company and Role are required."));

    // Nothing was stored
    let contents = std::fs::read_to_string(&file).unwrap();
    assert_eq!(contents, "id,company,role,date_applied,status,notes\n");
}

#[test]
fn test_search_finds_substring_match() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("applications.csv");

    apptrack(&file)
        .write_stdin("1\nAcme Corp\nEngineer\n2026-08-01\n\n\n1\nGlobex\nAnalyst\n2026-08-02\n\n\n5\n")
        .assert()
        .success();

    apptrack(&file)
        .write_stdin("3\nacme\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Corp").and(predicate::str::contains("Globex").not()));

    apptrack(&file)
        .write_stdin("3\nnonexistent\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No matches found."));
}

#[test]
fn test_update_status_flow() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("applications.csv");

    apptrack(&file)
        .write_stdin("1\nAcme Corp\nEngineer\n2026-08-01\n\n\n5\n")
        .assert()
        .success();

    apptrack(&file)
        .write_stdin("4\n1\nInterview\n5\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Current status: Applied")
                .and(predicate::str::contains("Status updated.")),
        );

    apptrack(&file)
        .write_stdin("2\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interview"));
}

#[test]
fn test_update_status_unknown_id() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("applications.csv");

    apptrack(&file)
        .write_stdin("4\n99\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("ID not found."));
}

#[test]
fn test_update_status_blank_makes_no_change() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("applications.csv");

    apptrack(&file)
        .write_stdin("1\nAcme Corp\nEngineer\n2026-08-01\n\n\n5\n")
        .assert()
        .success();
    let before = std::fs::read_to_string(&file).unwrap();

    apptrack(&file)
        .write_stdin("4\n1\n\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No change made."));

    let after = std::fs::read_to_string(&file).unwrap();
    assert_eq!(after, before);
}

#[test]
fn test_invalid_menu_choice_reprompts() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("applications.csv");

    apptrack(&file)
        .write_stdin("9\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please choose 1-5."));
}
