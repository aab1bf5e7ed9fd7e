//! Integration tests for `export` and `import`.

mod common;

use common::{days_from_today, TestEnv};
use predicates::prelude::*;
use serde_json::Value;

fn export(env: &TestEnv, id: &str, extra: &[&str]) -> String {
    let output = env
        .command()
        .args(["export", id])
        .args(extra)
        .output()
        .expect("Failed to run export command");
    assert!(
        output.status.success(),
        "Export failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_export_writes_individual_keys_and_whole_object() {
    let env = TestEnv::new();
    let date = days_from_today(4);
    let id = env.add("Budi Santoso", 6, &date, &["--time", "19:00"]);

    let bag: Value = serde_json::from_str(&export(&env, &id, &[])).unwrap();

    assert_eq!(bag["reservation_id"], id.as_str());
    assert_eq!(bag["name"], "Budi Santoso");
    assert_eq!(bag["party_size"], 6);
    assert_eq!(bag["date"], date.as_str());
    assert_eq!(bag["status"], "Confirmed");
    assert_eq!(bag["action"], "view");
    assert_eq!(bag["reservation_data"]["id"], id.as_str());
}

#[test]
fn test_export_with_action() {
    let env = TestEnv::new();
    let id = env.add_simple("Budi Santoso");

    let bag: Value = serde_json::from_str(&export(&env, &id, &["--action", "edit"])).unwrap();
    assert_eq!(bag["action"], "edit");
}

#[test]
fn test_export_unknown_id() {
    let env = TestEnv::new();
    env.command()
        .args(["export", "RES_404"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_export_then_import_into_other_data_dir() {
    let source = TestEnv::new();
    let target = TestEnv::new();
    let id = source.add(
        "Budi Santoso",
        6,
        &days_from_today(4),
        &["--time", "19:00", "--table", "Table 4", "--note", "Birthday"],
    );
    let bag_path = source.path().join("bag.json");
    std::fs::write(&bag_path, export(&source, &id, &[])).unwrap();

    target
        .command()
        .arg("import")
        .arg(&bag_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()))
        .stderr(predicate::str::contains("WARN").not());

    assert_eq!(target.list_json(), source.list_json());
}

#[test]
fn test_import_from_stdin_with_individual_keys() {
    let env = TestEnv::new();
    let bag = serde_json::json!({
        "name": "Siti Rahma",
        "party_size": 3,
        "date": days_from_today(7),
        "time": "18:30",
        "table": "Patio",
        "status": "pending"
    });

    env.command()
        .arg("import")
        .write_stdin(bag.to_string())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("RES_"));

    let listed = env.list_json();
    assert_eq!(listed[0]["name"], "Siti Rahma");
    assert_eq!(listed[0]["status"], "Pending");
}

#[test]
fn test_import_warns_about_missing_fields() {
    let env = TestEnv::new();
    let bag = serde_json::json!({
        "name": "Ana Lopez",
        "party_size": 2,
        "date": days_from_today(1)
    });

    env.command()
        .args(["import", "-"])
        .write_stdin(bag.to_string())
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN: time"));

    assert_eq!(env.list_json().len(), 1);
}

#[test]
fn test_import_without_reservation() {
    let env = TestEnv::new();
    env.command()
        .arg("import")
        .write_stdin(r#"{"action": "view"}"#)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not carry a reservation"));
}

#[test]
fn test_import_placeholder_when_bag_is_empty() {
    let env = TestEnv::new();
    env.command()
        .args(["import", "--placeholder"])
        .write_stdin(r#"{"action": "view"}"#)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("RES_"));

    let listed = env.list_json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "Guest");
    assert_eq!(listed[0]["party_size"], 2);
    assert_eq!(listed[0]["date"], "01/01/2024");
    assert_eq!(listed[0]["table"], "Table 1");
    assert_eq!(listed[0]["status"], "Pending");
}

#[test]
fn test_export_records_provenance() {
    let env = TestEnv::new();
    let id = env.add_simple("Budi Santoso");

    let bag: Value = serde_json::from_str(&export(&env, &id, &[])).unwrap();
    assert_eq!(bag["source"], "tablebook");
    assert_eq!(bag["data_version"], 1);
    assert!(bag["timestamp"].as_i64().unwrap() > 0);
}

#[test]
fn test_verbose_import_reports_provenance() {
    let env = TestEnv::new();
    let bag = serde_json::json!({
        "name": "Ana Lopez",
        "party_size": 2,
        "date": days_from_today(1),
        "time": "12:00",
        "table": "Table 2"
    });

    env.command()
        .args(["--verbose", "import", "-"])
        .write_stdin(bag.to_string())
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO: Bag from unknown (version 1"));
}

#[test]
fn test_import_rejects_non_object() {
    let env = TestEnv::new();
    env.command()
        .arg("import")
        .write_stdin("[1, 2, 3]")
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_import_missing_file() {
    let env = TestEnv::new();
    env.command()
        .arg("import")
        .arg(env.path().join("absent.json"))
        .assert()
        .failure()
        .code(5);
}
