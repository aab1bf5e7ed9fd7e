//! Integration tests for the `add` and `validate` commands.

mod common;

use chrono::{Local, Months};
use common::{days_from_today, TestEnv};
use predicates::prelude::*;

#[test]
fn test_add_prints_id_and_persists() {
    let env = TestEnv::new();
    let date = days_from_today(5);

    let id = env.add(
        "Budi Santoso",
        6,
        &date,
        &["--time", "19:30", "--table", "Table 4", "--note", "Window seat"],
    );

    let listed = env.list_json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());
    assert_eq!(listed[0]["name"], "Budi Santoso");
    assert_eq!(listed[0]["partySize"], 6);
    assert_eq!(listed[0]["date"], date.as_str());
    assert_eq!(listed[0]["time"], "19:30");
    assert_eq!(listed[0]["table"], "Table 4");
    assert_eq!(listed[0]["note"], "Window seat");
    assert_eq!(listed[0]["status"], "Confirmed");
    assert_eq!(listed[0]["createdAt"], listed[0]["updatedAt"]);
}

#[test]
fn test_add_creates_data_dir() {
    let env = TestEnv::new();
    assert!(!env.data_dir.exists());

    env.add_simple("Jane Doe");

    assert!(env.data_dir.join("tablebook.db").exists());
}

#[test]
fn test_add_with_explicit_status() {
    let env = TestEnv::new();
    env.add("Jane Doe", 2, &days_from_today(1), &["--status", "pending"]);

    assert_eq!(env.list_json()[0]["status"], "Pending");
}

#[test]
fn test_add_uses_configured_default_status() {
    let env = TestEnv::new();
    env.write_config("default_status: Pending\n");

    env.add_simple("Jane Doe");

    assert_eq!(env.list_json()[0]["status"], "Pending");
}

#[test]
fn test_add_rejects_short_name() {
    let env = TestEnv::new();
    env.command()
        .args(["add", "--name", "Jo", "--party-size", "4", "--date"])
        .arg(days_from_today(1))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("name too short"));

    assert!(!env.data_dir.exists());
}

#[test]
fn test_add_rejects_party_size_zero() {
    let env = TestEnv::new();
    env.command()
        .args(["add", "--name", "John", "--party-size", "0", "--date"])
        .arg(days_from_today(1))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("party_size"));
}

#[test]
fn test_add_rejects_negative_party_size() {
    let env = TestEnv::new();
    env.command()
        .args(["add", "--name", "John", "--party-size", "-1", "--date"])
        .arg(days_from_today(1))
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_add_rejects_past_date() {
    let env = TestEnv::new();
    let yesterday = Local::now()
        .date_naive()
        .pred_opt()
        .unwrap()
        .format("%d/%m/%Y")
        .to_string();

    env.command()
        .args(["add", "--name", "John", "--party-size", "2", "--date", &yesterday])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("date in the past"));
}

#[test]
fn test_add_rejects_bad_time() {
    let env = TestEnv::new();
    env.command()
        .args(["add", "--name", "John", "--party-size", "2", "--time", "25:00", "--date"])
        .arg(days_from_today(1))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("time"));
}

#[test]
fn test_validate_accepts_today_and_horizon() {
    let env = TestEnv::new();
    let today = Local::now().date_naive();
    let horizon = today.checked_add_months(Months::new(12)).unwrap();

    for date in [today, horizon] {
        env.command()
            .args(["validate", "--name", "John Doe", "--party-size", "4", "--date"])
            .arg(date.format("%d/%m/%Y").to_string())
            .assert()
            .success()
            .stdout(predicate::str::contains("OK"));
    }
}

#[test]
fn test_validate_reports_first_failure() {
    let env = TestEnv::new();
    env.command()
        .args([
            "validate",
            "--name",
            "Jo",
            "--party-size",
            "4",
            "--date",
            "01/01/2025",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("name too short"));
}

#[test]
fn test_validate_does_not_touch_store() {
    let env = TestEnv::new();
    env.command()
        .args(["validate", "--name", "John", "--party-size", "2", "--date"])
        .arg(days_from_today(2))
        .assert()
        .success();

    assert!(!env.data_dir.exists());
}
