use fieldlog::commands::{attempt, clear, delete, open, upsert};
use fieldlog::model::{ProjectMeta, RunData, FIELD_NAMES};
use fieldlog::store::fs::FileStore;
use fieldlog::store::{csv_bytes_to_rows, DataStore, OpenStatus};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FileStore) {
    let root = TempDir::new().unwrap();
    let store = FileStore::new(root.path().to_path_buf());
    (root, store)
}

fn meta(client: &str) -> ProjectMeta {
    ProjectMeta {
        client: client.to_string(),
        ..Default::default()
    }
}

fn data(task: &str, attempt: &str, asset_id: &str) -> RunData {
    RunData {
        task_number: task.to_string(),
        attempt_number: attempt.to_string(),
        asset_id: asset_id.to_string(),
        ..Default::default()
    }
}

#[test]
fn resolve_folder_reuses_most_recent_existing() {
    let (root, store) = setup();
    fs::create_dir(root.path().join("P1_20231231")).unwrap();
    fs::create_dir(root.path().join("P1_20240101")).unwrap();

    // Reopening on a later date must not fork a new dated folder
    assert_eq!(store.resolve_folder("P1"), "P1_20240101");
}

#[test]
fn resolve_folder_ignores_other_project_prefixes() {
    let (root, store) = setup();
    fs::create_dir(root.path().join("P10_20240101")).unwrap();

    let folder = store.resolve_folder("P1");
    assert!(folder.starts_with("P1_"));
    assert_ne!(folder, "P10_20240101");
}

#[test]
fn resolve_folder_stamps_today_when_nothing_exists() {
    let (_root, store) = setup();
    let folder = store.resolve_folder("P1");
    let suffix = folder.strip_prefix("P1_").unwrap();
    assert_eq!(suffix.len(), 8);
    assert!(suffix.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn open_is_idempotent_and_never_truncates() {
    let (_root, mut store) = setup();
    assert_eq!(store.ensure_table("P1").unwrap(), OpenStatus::Created);

    upsert::run(&mut store, "P1", &meta("A"), &data("1", "1", "X")).unwrap();

    assert_eq!(store.ensure_table("P1").unwrap(), OpenStatus::Existed);
    assert_eq!(store.load_rows("P1").unwrap().len(), 1);

    let second = open::run(&mut store, "P1").unwrap();
    assert!(second.messages[0].content.contains("opened"));
    assert_eq!(store.load_rows("P1").unwrap().len(), 1);
}

#[test]
fn upsert_exercises_both_merge_branches_on_disk() {
    let (_root, mut store) = setup();
    upsert::run(&mut store, "P1", &meta("A"), &data("1", "1", "X")).unwrap();
    upsert::run(&mut store, "P1", &meta("B"), &data("1", "1", "Y")).unwrap();

    let rows = store.load_rows("P1").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].asset_id, "Y");
    assert_eq!(rows[0].client, "A");

    // Blank meta branch: a row born without a client picks one up later
    upsert::run(&mut store, "P1", &meta(""), &data("2", "1", "Z")).unwrap();
    upsert::run(&mut store, "P1", &meta("C"), &data("2", "1", "Z")).unwrap();
    let rows = store.load_rows("P1").unwrap();
    assert_eq!(rows[1].client, "C");
}

#[test]
fn next_attempt_number_scans_per_task() {
    let (_root, mut store) = setup();
    upsert::run(&mut store, "P1", &meta(""), &data("2", "1", "")).unwrap();
    upsert::run(&mut store, "P1", &meta(""), &data("2", "3", "")).unwrap();
    upsert::run(&mut store, "P1", &meta(""), &data("1", "5", "")).unwrap();

    assert_eq!(attempt::next_attempt_number(&store, "P1", 2).unwrap(), 4);
    assert_eq!(attempt::next_attempt_number(&store, "P1", 9).unwrap(), 1);
    assert_eq!(attempt::next_attempt_number(&store, "NOPE", 1).unwrap(), 1);
}

#[test]
fn delete_last_is_position_based() {
    let (_root, mut store) = setup();
    upsert::run(&mut store, "P1", &meta(""), &data("1", "1", "A")).unwrap();
    upsert::run(&mut store, "P1", &meta(""), &data("9", "9", "B")).unwrap();
    upsert::run(&mut store, "P1", &meta(""), &data("5", "5", "C")).unwrap();

    let first = delete::run(&mut store, "P1").unwrap();
    assert_eq!(first.affected_rows[0].asset_id, "C");
    let second = delete::run(&mut store, "P1").unwrap();
    assert_eq!(second.affected_rows[0].asset_id, "B");
    assert_eq!(store.load_rows("P1").unwrap()[0].asset_id, "A");
}

#[test]
fn export_round_trips_byte_exact_header() {
    let (_root, mut store) = setup();
    let tricky = RunData {
        task_number: "1".into(),
        attempt_number: "1".into(),
        observation_summary: "sediment, roots at 12 m\n\"heavy\" build-up".into(),
        ..Default::default()
    };
    upsert::run(&mut store, "P1", &meta("City, Council"), &tricky).unwrap();

    let bytes = store.export_bytes("P1").unwrap();
    let text = String::from_utf8(bytes.clone()).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(header, FIELD_NAMES.join(","));

    let rows = csv_bytes_to_rows(&bytes).unwrap();
    assert_eq!(rows, store.load_rows("P1").unwrap());
}

#[test]
fn unopened_project_reads_empty_and_exports_header_only() {
    let (_root, store) = setup();
    assert!(store.load_rows("GHOST").unwrap().is_empty());

    let bytes = store.export_bytes("GHOST").unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("project_code,client,address"));
}

#[test]
fn list_projects_skips_foreign_entries() {
    let (root, store) = setup();
    fs::create_dir(root.path().join("P1_20240101")).unwrap();
    fs::create_dir(root.path().join("P1_20240301")).unwrap();
    fs::create_dir(root.path().join("B_2024")).unwrap();
    fs::create_dir(root.path().join("no-date-suffix")).unwrap();
    fs::write(root.path().join("A_20240101"), "a file, not a folder").unwrap();

    assert_eq!(store.list_projects().unwrap(), vec!["P1".to_string()]);
}

#[test]
fn writes_leave_no_temp_files_behind() {
    let (root, mut store) = setup();
    upsert::run(&mut store, "P1", &meta("A"), &data("1", "1", "X")).unwrap();

    let dir = root.path().join(store.resolve_folder("P1"));
    for entry in fs::read_dir(dir).unwrap() {
        let name = entry.unwrap().file_name().into_string().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn set_storage_root_applies_to_subsequent_operations_only() {
    let (_root_a, mut store) = setup();
    upsert::run(&mut store, "P1", &meta("A"), &data("1", "1", "X")).unwrap();

    let root_b = TempDir::new().unwrap();
    store.set_storage_root(root_b.path().to_path_buf());

    // Old data is not moved; the project reads as empty under the new root
    assert!(store.load_rows("P1").unwrap().is_empty());
    assert!(store.list_projects().unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn clear_all_collects_partial_failures() {
    use std::os::unix::fs::PermissionsExt;

    let (root, mut store) = setup();
    for code in ["P1", "P2", "P3"] {
        upsert::run(&mut store, code, &meta(""), &data("1", "1", "")).unwrap();
    }

    let locked = root.path().join(store.resolve_folder("P2"));
    let probe = locked.join("probe");
    fs::write(&probe, "x").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users bypass permission bits; nothing to assert then
    if fs::remove_file(&probe).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = clear::all(&mut store).unwrap();
    assert!(result.messages[0].content.contains("Cleared 2 folder(s)"));
    assert!(result.messages[0].content.contains("P2"));
    assert_eq!(store.list_projects().unwrap(), vec!["P2".to_string()]);

    // Restore so TempDir can clean up
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}
