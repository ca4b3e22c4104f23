use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn fieldlog(root: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fieldlog").unwrap();
    cmd.arg("--root").arg(root.path());
    cmd
}

#[test]
fn open_reports_created_then_opened() {
    let root = TempDir::new().unwrap();

    fieldlog(&root)
        .args(["open", "PROJ-001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));

    fieldlog(&root)
        .args(["open", "PROJ-001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("opened"));
}

#[test]
fn log_adds_then_updates_the_same_key() {
    let root = TempDir::new().unwrap();

    fieldlog(&root)
        .args([
            "log",
            "P1",
            "--task",
            "1",
            "--attempt",
            "1",
            "--client",
            "City Council",
            "--asset-id",
            "MH-042",
            "--lidar",
            "--csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1 run 1: added."));

    fieldlog(&root)
        .args(["log", "P1", "--task", "1", "--attempt", "1", "--asset-id", "MH-043"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1 run 1: updated."));

    fieldlog(&root)
        .args(["show", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MH-043"))
        .stdout(predicate::str::contains("MH-042").not());
}

#[test]
fn attempt_auto_fill_and_next_attempt() {
    let root = TempDir::new().unwrap();

    // No --attempt: the CLI auto-fills 1, then 2
    fieldlog(&root)
        .args(["log", "P1", "--task", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 3 run 1: added."));
    fieldlog(&root)
        .args(["log", "P1", "--task", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 3 run 2: added."));

    fieldlog(&root)
        .args(["next-attempt", "P1", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Next attempt for task 3: 3"));
}

#[test]
fn edit_refuses_a_missing_entry() {
    let root = TempDir::new().unwrap();
    fieldlog(&root).args(["open", "P1"]).assert().success();

    fieldlog(&root)
        .args(["edit", "P1", "--task", "7", "--attempt", "1", "--quality", "2 - Good"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry found for task 7, attempt 1"));
}

#[test]
fn edit_keeps_unmentioned_fields() {
    let root = TempDir::new().unwrap();

    fieldlog(&root)
        .args([
            "log",
            "P1",
            "--task",
            "1",
            "--attempt",
            "1",
            "--asset-id",
            "MH-042",
            "--quality",
            "4 - Poor",
        ])
        .assert()
        .success();

    fieldlog(&root)
        .args(["edit", "P1", "--task", "1", "--attempt", "1", "--quality", "2 - Good"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updated"));

    fieldlog(&root)
        .args(["show", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MH-042"))
        .stdout(predicate::str::contains("2"));
}

#[test]
fn delete_last_and_clear() {
    let root = TempDir::new().unwrap();
    fieldlog(&root)
        .args(["log", "P1", "--task", "1", "--attempt", "1"])
        .assert()
        .success();
    fieldlog(&root)
        .args(["log", "P1", "--task", "2", "--attempt", "1"])
        .assert()
        .success();

    fieldlog(&root)
        .args(["delete-last", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: Task 2 Run 1."));

    fieldlog(&root)
        .args(["clear", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 row(s) from P1."));

    fieldlog(&root)
        .args(["delete-last", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries to delete."));
}

#[test]
fn clear_all_requires_confirmation() {
    let root = TempDir::new().unwrap();
    fieldlog(&root).args(["open", "P1"]).assert().success();

    fieldlog(&root)
        .args(["clear-all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"));
    fieldlog(&root)
        .args(["projects"])
        .assert()
        .success()
        .stdout(predicate::str::contains("P1"));

    fieldlog(&root)
        .args(["clear-all", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All 1 project folder(s) deleted."));
}

#[test]
fn export_writes_csv() {
    let root = TempDir::new().unwrap();
    let out = root.path().join("dump.csv");

    fieldlog(&root)
        .args(["log", "P1", "--task", "1", "--attempt", "1", "--observation", "roots, sediment"])
        .assert()
        .success();

    fieldlog(&root)
        .args(["export", "P1", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported P1"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("project_code,client,address"));
    assert!(text.contains("\"roots, sediment\""));

    // Stdout export of an unopened project is header-only
    fieldlog(&root)
        .args(["export", "GHOST"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("project_code,client,address"));
}

#[test]
fn locate_extracts_coordinates() {
    let root = TempDir::new().unwrap();

    fieldlog(&root)
        .args(["locate", "https://arcgis.com/viewer.html?center=-79.3832,43.6532"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lat: 43.653200"))
        .stdout(predicate::str::contains("Lon: -79.383200"));

    fieldlog(&root)
        .args(["locate", "https://arcgis.com/experience/abc"])
        .assert()
        .failure();
}
