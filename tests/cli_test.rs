use assert_cmd::Command;
use pinpoint::history::{HistoryRecord, HistoryStore, SqliteHistoryStore};
use tempfile::tempdir;

fn pinpoint(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("pinpoint").unwrap();
    cmd.env("HOME", home).env("PINPOINT_LOG", "off");
    cmd
}

#[test]
fn history_flag_on_empty_database() {
    let dir = tempdir().unwrap();
    let out = pinpoint(dir.path())
        .args(["--history", "--db"])
        .arg(dir.path().join("pinpoint.db"))
        .arg("--config")
        .arg(dir.path().join("config.json"))
        .assert()
        .success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout, "No sessions recorded yet.\n");
}

#[test]
fn history_flag_lists_stored_results() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("pinpoint.db");
    {
        let mut store = SqliteHistoryStore::open(&db).unwrap();
        store
            .save(&[HistoryRecord::new(8.5, 3), HistoryRecord::new(20.0, 0)])
            .unwrap();
    }

    let out = pinpoint(dir.path())
        .arg("--history")
        .arg("--db")
        .arg(&db)
        .arg("--config")
        .arg(dir.path().join("config.json"))
        .assert()
        .success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("8.50"));
    assert!(lines[2].contains("20.00"));
}

#[test]
fn rejects_board_too_small_for_targets() {
    let dir = tempdir().unwrap();
    let out = pinpoint(dir.path())
        .args(["--cols", "2", "--rows", "2", "--history", "--config"])
        .arg(dir.path().join("config.json"))
        .assert()
        .failure();
    let stderr = String::from_utf8(out.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("invalid configuration"));
}

#[test]
fn refuses_to_run_without_a_tty() {
    let dir = tempdir().unwrap();
    let out = pinpoint(dir.path())
        .arg("--db")
        .arg(dir.path().join("pinpoint.db"))
        .arg("--config")
        .arg(dir.path().join("config.json"))
        .assert()
        .failure();
    let stderr = String::from_utf8(out.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("stdin must be a tty"));
}

#[test]
fn save_config_persists_overrides() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    pinpoint(dir.path())
        .args(["--rounds", "4", "--save-config", "--history", "--config"])
        .arg(&config)
        .arg("--db")
        .arg(dir.path().join("pinpoint.db"))
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(saved["total_rounds"], 4);
    assert_eq!(saved["cols"], 12);
}
