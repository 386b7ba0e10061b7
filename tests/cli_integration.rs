//! Integration tests for the `dose` CLI.
//!
//! Each test creates a temp store directory, runs `dose` as a subprocess,
//! and verifies stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use pretty_assertions::assert_eq;

/// Get the path to the built `dose` binary.
fn dose_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("dose");
    path
}

/// Create a test store with known medicines and tags.
fn create_test_store(root: &Path) {
    let dosette_dir = root.join("dosette");
    fs::create_dir_all(&dosette_dir).unwrap();

    fs::write(
        dosette_dir.join("dosette.toml"),
        r#"[store]
name = "test-store"

[display]
language = "en"
"#,
    )
    .unwrap();

    fs::write(
        dosette_dir.join("cabinet.json"),
        r#"{
  "medicines": [
    {
      "id": 1,
      "name": "Aspirin",
      "time_tags": ["Before breakfast", "With dinner"],
      "purpose_tag": "Pain relief",
      "level": "enough",
      "amount_left": 20,
      "unit_price": 0.5,
      "daily_needed": 2
    },
    {
      "id": 2,
      "name": "Ibuprofen",
      "time_tags": ["After lunch"],
      "purpose_tag": "Pain relief",
      "level": "half",
      "amount_left": 20,
      "unit_price": 0.25,
      "daily_needed": 8
    },
    {
      "id": 3,
      "name": "Loratadine",
      "time_tags": ["Before bed"],
      "purpose_tag": "Allergy",
      "level": "empty",
      "amount_left": 0,
      "unit_price": 1.1,
      "daily_needed": 1
    }
  ],
  "time_tags": [
    { "id": 1, "name": "Before breakfast" },
    { "id": 2, "name": "After lunch" },
    { "id": 3, "name": "With dinner" },
    { "id": 4, "name": "Before bed" }
  ],
  "purpose_tags": [
    { "id": 1, "name": "Pain relief" },
    { "id": 2, "name": "Allergy" }
  ]
}
"#,
    )
    .unwrap();
}

fn read_cabinet(root: &Path) -> serde_json::Value {
    let text = fs::read_to_string(root.join("dosette/cabinet.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

/// Run `dose` with the given args in the given directory, returning (stdout, stderr, success).
fn run_dose(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(dose_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run dose");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `dose` expecting success, return stdout.
fn run_dose_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_dose(dir, args);
    if !success {
        panic!(
            "dose {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn test_init_creates_store() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_dose_ok(tmp.path(), &["init", "--name", "Home"]);
    assert!(out.contains("Home"));
    assert!(tmp.path().join("dosette/dosette.toml").exists());
    assert!(tmp.path().join("dosette/cabinet.json").exists());

    let cabinet = read_cabinet(tmp.path());
    assert_eq!(cabinet["medicines"].as_array().unwrap().len(), 0);
}

#[test]
fn test_init_sample_seeds_cabinet() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dose_ok(tmp.path(), &["init", "--sample"]);

    let cabinet = read_cabinet(tmp.path());
    assert_eq!(cabinet["medicines"].as_array().unwrap().len(), 4);
    assert_eq!(cabinet["time_tags"].as_array().unwrap().len(), 5);
    assert_eq!(cabinet["purpose_tags"].as_array().unwrap().len(), 4);
}

#[test]
fn test_init_refuses_existing_store() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_dose_ok(tmp.path(), &["init"]);
    let (_, stderr, success) = run_dose(tmp.path(), &["init"]);
    assert!(!success);
    assert!(stderr.contains("already exists"));
    // --force reinitializes
    run_dose_ok(tmp.path(), &["init", "--force"]);
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_list_shows_all_medicines() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    let out = run_dose_ok(tmp.path(), &["list"]);
    assert!(out.contains("Aspirin"));
    assert!(out.contains("Ibuprofen"));
    assert!(out.contains("Loratadine"));
}

#[test]
fn test_list_tag_and_level_filters() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    let out = run_dose_ok(tmp.path(), &["list", "--tag", "Allergy"]);
    assert!(out.contains("Loratadine"));
    assert!(!out.contains("Aspirin"));

    let out = run_dose_ok(tmp.path(), &["list", "--level", "empty"]);
    assert!(out.contains("Loratadine"));
    assert!(!out.contains("Ibuprofen"));

    let out = run_dose_ok(tmp.path(), &["list", "--purpose", "Pain relief"]);
    assert!(out.contains("Aspirin"));
    assert!(out.contains("Ibuprofen"));
    assert!(!out.contains("Loratadine"));
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    let out = run_dose_ok(tmp.path(), &["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let meds = parsed["medicines"].as_array().unwrap();
    assert_eq!(meds.len(), 3);
    assert_eq!(meds[0]["name"], "Aspirin");
    assert_eq!(meds[0]["level"], "enough");
}

#[test]
fn test_show_medicine() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    let out = run_dose_ok(tmp.path(), &["show", "1"]);
    assert!(out.contains("Aspirin"));
    assert!(out.contains("20 units"));

    // Unknown id is a no-op, not a failure
    let out = run_dose_ok(tmp.path(), &["show", "99"]);
    assert!(out.contains("no medicine with id 99"));
}

#[test]
fn test_due_at_hour() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    // 7:00 is in the morning window — only Aspirin has a morning tag
    let out = run_dose_ok(tmp.path(), &["due", "--at", "7"]);
    assert!(out.contains("Aspirin"));
    assert!(!out.contains("Ibuprofen"));
    assert!(!out.contains("Loratadine"));

    // 12:00 is the afternoon window
    let out = run_dose_ok(tmp.path(), &["due", "--at", "12"]);
    assert!(out.contains("Ibuprofen"));
    assert!(!out.contains("Aspirin"));

    // 23:00 wraps into the night window
    let out = run_dose_ok(tmp.path(), &["due", "--at", "23"]);
    assert!(out.contains("Loratadine"));

    // 15:00 falls in no window
    let out = run_dose_ok(tmp.path(), &["due", "--at", "15"]);
    assert!(out.contains("nothing due"));

    let (_, stderr, success) = run_dose(tmp.path(), &["due", "--at", "24"]);
    assert!(!success);
    assert!(stderr.contains("invalid hour"));
}

#[test]
fn test_due_respects_window_overrides() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    fs::write(
        tmp.path().join("dosette/dosette.toml"),
        r#"[store]
name = "test-store"

[windows]
morning = { start = 4, end = 6 }
afternoon = { start = 11, end = 14 }
evening = { start = 17, end = 21 }
night = { start = 21, end = 2 }
"#,
    )
    .unwrap();

    // 7:00 is outside the overridden morning window now
    let out = run_dose_ok(tmp.path(), &["due", "--at", "7"]);
    assert!(out.contains("nothing due"));
    let out = run_dose_ok(tmp.path(), &["due", "--at", "5"]);
    assert!(out.contains("Aspirin"));
}

#[test]
fn test_search() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    // Name, tag, and purpose are all searched, case-insensitively
    let out = run_dose_ok(tmp.path(), &["search", "ASPIR"]);
    assert!(out.contains("Aspirin"));

    let out = run_dose_ok(tmp.path(), &["search", "bed"]);
    assert!(out.contains("Loratadine"));

    let out = run_dose_ok(tmp.path(), &["search", "pain"]);
    assert!(out.contains("Aspirin"));
    assert!(out.contains("Ibuprofen"));
    assert!(!out.contains("Loratadine"));
}

#[test]
fn test_costs_fixture() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    // total = 0.5*20 + 0.25*20 + 1.1*0 = 15.0
    // daily = 0.5*2 + 0.25*8 + 1.1*1 = 4.1
    // June has 30 days: monthly = 123.0
    let out = run_dose_ok(tmp.path(), &["costs", "--month", "2024-06", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["month"], "2024-06");
    assert!((parsed["total"].as_f64().unwrap() - 15.0).abs() < 1e-9);
    assert!((parsed["daily"].as_f64().unwrap() - 4.1).abs() < 1e-9);
    assert!((parsed["monthly"].as_f64().unwrap() - 123.0).abs() < 1e-9);

    // January has 31 days
    let out = run_dose_ok(tmp.path(), &["costs", "--month", "2024-01", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!((parsed["monthly"].as_f64().unwrap() - 127.1).abs() < 1e-6);
}

#[test]
fn test_calc() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_dose_ok(tmp.path(), &["calc", "3 * 0.5 + 1"]);
    assert_eq!(out.trim(), "2.5");

    let out = run_dose_ok(tmp.path(), &["calc", "(2 + 3) * 4"]);
    assert_eq!(out.trim(), "20");

    let (_, stderr, success) = run_dose(tmp.path(), &["calc", "1 / 0"]);
    assert!(!success);
    assert!(stderr.contains("division by zero"));
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn test_add_and_show() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    let out = run_dose_ok(
        tmp.path(),
        &[
            "add",
            "Vitamin D",
            "--time",
            "Before breakfast",
            "--purpose",
            "Allergy",
            "--amount",
            "60",
            "--price",
            "0.1",
            "--daily",
            "1",
        ],
    );
    assert_eq!(out.trim(), "4");

    let out = run_dose_ok(tmp.path(), &["show", "4"]);
    assert!(out.contains("Vitamin D"));
    assert!(out.contains("60 units"));
}

#[test]
fn test_add_registers_unknown_tags() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    run_dose_ok(
        tmp.path(),
        &[
            "add",
            "Melatonin",
            "--time",
            "With evening tea",
            "--purpose",
            "Sleep",
        ],
    );

    let cabinet = read_cabinet(tmp.path());
    let time_names: Vec<&str> = cabinet["time_tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(time_names.contains(&"With evening tea"));
    let purpose_names: Vec<&str> = cabinet["purpose_tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(purpose_names.contains(&"Sleep"));

    // Re-using a registered tag does not duplicate it
    run_dose_ok(tmp.path(), &["add", "Valerian", "--purpose", "Sleep"]);
    let cabinet = read_cabinet(tmp.path());
    assert_eq!(cabinet["purpose_tags"].as_array().unwrap().len(), 3);
}

#[test]
fn test_take_decrements_and_undo_restores() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    let out = run_dose_ok(tmp.path(), &["take", "1"]);
    assert!(out.contains("taken from Aspirin (19 left)"));
    let cabinet = read_cabinet(tmp.path());
    assert_eq!(cabinet["medicines"][0]["amount_left"], 19);

    let out = run_dose_ok(tmp.path(), &["take", "1", "--undo"]);
    assert!(out.contains("returned to Aspirin (20 left)"));
    let cabinet = read_cabinet(tmp.path());
    assert_eq!(cabinet["medicines"][0]["amount_left"], 20);
}

#[test]
fn test_take_floors_at_zero_and_rederives_level() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    // Loratadine is already empty; taking again stays at 0
    run_dose_ok(tmp.path(), &["take", "3"]);
    let cabinet = read_cabinet(tmp.path());
    assert_eq!(cabinet["medicines"][2]["amount_left"], 0);
    assert_eq!(cabinet["medicines"][2]["level"], "empty");

    // Un-taking brings it to 1: within 3 days of daily dose 1 → half
    run_dose_ok(tmp.path(), &["take", "3", "--undo"]);
    let cabinet = read_cabinet(tmp.path());
    assert_eq!(cabinet["medicines"][2]["amount_left"], 1);
    assert_eq!(cabinet["medicines"][2]["level"], "half");
}

#[test]
fn test_take_unknown_id_is_silent_noop() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    let out = run_dose_ok(tmp.path(), &["take", "99"]);
    assert!(out.contains("no medicine with id 99"));

    // Cabinet unchanged
    let cabinet = read_cabinet(tmp.path());
    assert_eq!(cabinet["medicines"][0]["amount_left"], 20);
}

#[test]
fn test_edit_rederives_level() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    run_dose_ok(tmp.path(), &["edit", "1", "--amount", "0"]);
    let cabinet = read_cabinet(tmp.path());
    assert_eq!(cabinet["medicines"][0]["amount_left"], 0);
    assert_eq!(cabinet["medicines"][0]["level"], "empty");

    // Manual level override sticks
    run_dose_ok(tmp.path(), &["edit", "1", "--level", "half"]);
    let cabinet = read_cabinet(tmp.path());
    assert_eq!(cabinet["medicines"][0]["level"], "half");
}

#[test]
fn test_rm_medicine() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    let out = run_dose_ok(tmp.path(), &["rm", "2"]);
    assert!(out.contains("Ibuprofen"));
    let cabinet = read_cabinet(tmp.path());
    assert_eq!(cabinet["medicines"].as_array().unwrap().len(), 2);

    // New medicine ids never reuse a deleted one's successor
    let out = run_dose_ok(tmp.path(), &["add", "New Med"]);
    assert_eq!(out.trim(), "4");
}

// ---------------------------------------------------------------------------
// Tag commands
// ---------------------------------------------------------------------------

#[test]
fn test_tag_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    let out = run_dose_ok(tmp.path(), &["tag", "list"]);
    assert!(out.contains("Before bed"));
    assert!(out.contains("Pain relief"));

    let out = run_dose_ok(tmp.path(), &["tag", "list", "--kind", "purpose"]);
    assert!(out.contains("Allergy"));
    assert!(!out.contains("Before bed"));
}

#[test]
fn test_tag_rename_cascades_to_medicines() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    run_dose_ok(
        tmp.path(),
        &["tag", "rename", "--kind", "time", "4", "At bedtime"],
    );

    let cabinet = read_cabinet(tmp.path());
    assert_eq!(cabinet["time_tags"][3]["name"], "At bedtime");
    assert_eq!(cabinet["medicines"][2]["time_tags"][0], "At bedtime");

    // The due list follows the renamed tag ("bed" still classifies as night)
    let out = run_dose_ok(tmp.path(), &["due", "--at", "23"]);
    assert!(out.contains("Loratadine"));
}

#[test]
fn test_tag_rename_to_taken_name_is_noop() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    let out = run_dose_ok(
        tmp.path(),
        &["tag", "rename", "--kind", "time", "4", "After lunch"],
    );
    assert!(out.contains("nothing renamed"));

    let cabinet = read_cabinet(tmp.path());
    assert_eq!(cabinet["time_tags"][3]["name"], "Before bed");
}

#[test]
fn test_tag_rm_time_scrubs_medicine_lists() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    run_dose_ok(tmp.path(), &["tag", "rm", "--kind", "time", "1"]);
    let cabinet = read_cabinet(tmp.path());
    // Aspirin loses "Before breakfast" but keeps "With dinner"
    let aspirin_tags = cabinet["medicines"][0]["time_tags"].as_array().unwrap();
    assert_eq!(aspirin_tags.len(), 1);
    assert_eq!(aspirin_tags[0], "With dinner");
}

#[test]
fn test_tag_rm_purpose_leaves_medicine_unclassified() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    run_dose_ok(tmp.path(), &["tag", "rm", "--kind", "purpose", "2"]);
    let cabinet = read_cabinet(tmp.path());
    assert_eq!(cabinet["purpose_tags"].as_array().unwrap().len(), 1);
    assert_eq!(cabinet["medicines"][2]["purpose_tag"], "");
    // Other purposes untouched
    assert_eq!(cabinet["medicines"][0]["purpose_tag"], "Pain relief");
}

#[test]
fn test_tag_add_rejects_duplicate() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    let out = run_dose_ok(tmp.path(), &["tag", "add", "--kind", "time", "On empty stomach"]);
    assert_eq!(out.trim(), "5");

    let out = run_dose_ok(tmp.path(), &["tag", "add", "--kind", "time", "On empty stomach"]);
    assert!(out.contains("nothing added"));
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn test_config_show_and_window() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    let out = run_dose_ok(tmp.path(), &["config"]);
    assert!(out.contains("test-store"));

    run_dose_ok(tmp.path(), &["config", "window", "morning", "5", "9"]);
    let text = fs::read_to_string(tmp.path().join("dosette/dosette.toml")).unwrap();
    assert!(text.contains("morning"));

    // The new window is live
    let out = run_dose_ok(tmp.path(), &["due", "--at", "9"]);
    assert!(out.contains("nothing due"));
    let out = run_dose_ok(tmp.path(), &["due", "--at", "5"]);
    assert!(out.contains("Aspirin"));
}

#[test]
fn test_config_rejects_bad_window() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());

    let (_, stderr, success) = run_dose(tmp.path(), &["config", "window", "noon", "5", "9"]);
    assert!(!success);
    assert!(stderr.contains("unknown window"));
}

// ---------------------------------------------------------------------------
// Store discovery
// ---------------------------------------------------------------------------

#[test]
fn test_discovers_store_from_subdirectory() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());
    let sub = tmp.path().join("some/nested/dir");
    fs::create_dir_all(&sub).unwrap();

    let out = run_dose_ok(&sub, &["list"]);
    assert!(out.contains("Aspirin"));
}

#[test]
fn test_store_dir_flag() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_store(tmp.path());
    let elsewhere = tempfile::TempDir::new().unwrap();

    let store_path = tmp.path().to_str().unwrap();
    let out = run_dose_ok(elsewhere.path(), &["-C", store_path, "list"]);
    assert!(out.contains("Aspirin"));
}

#[test]
fn test_missing_store_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_dose(tmp.path(), &["list"]);
    assert!(!success);
    assert!(stderr.contains("not a dosette store"));
}
