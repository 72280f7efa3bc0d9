//! End-to-end runs of the `opp` binary over the built-in demo catalog.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn opp() -> Command {
    let mut cmd = Command::cargo_bin("opp").unwrap();
    cmd.env_remove("MAPBOX_ACCESS_TOKEN").env_remove("RUST_LOG");
    cmd
}

#[test]
fn departments_in_catalog_order() {
    let out = opp().arg("departments").assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.first(), Some(&"Mining"));
    assert!(lines.contains(&"Public Sector"));
    assert_eq!(lines.iter().filter(|l| **l == "Healthcare").count(), 1);
}

#[test]
fn branches_listing() {
    opp()
        .arg("branches")
        .assert()
        .success()
        .stdout(predicate::str::contains("104\tCape Town\tVALIDATED"));
}

#[test]
fn national_view_without_token_reports_map_failure() {
    opp()
        .arg("view")
        .assert()
        .success()
        .stdout(predicate::str::contains("Analysis for National View"))
        .stdout(predicate::str::contains("Results: 24 (page 1/4)"))
        .stdout(predicate::str::contains("Map unavailable: Mapbox token is missing"));
}

#[test]
fn branch_view_with_token_places_markers() {
    opp()
        .env("MAPBOX_ACCESS_TOKEN", "pk.test")
        .args(["view", "--branch", "104", "--select", "opp-016"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analysis for Cape Town"))
        .stdout(predicate::str::contains("Results: 5 (page 1/1)"))
        .stdout(predicate::str::contains("* opp-016"))
        .stdout(predicate::str::contains("Branch 104 Cape Town: VALIDATED"))
        .stdout(predicate::str::contains("Map: 10 markers"));
}

#[test]
fn require_map_turns_missing_token_into_exit_5() {
    opp()
        .args(["view", "--require-map"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Mapbox token is missing"));
}

#[test]
fn page_beyond_range_is_clamped() {
    opp()
        .args(["view", "--page", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Results: 24 (page 4/4)"));
}

#[test]
fn url_catalog_is_rejected() {
    opp()
        .args(["view", "--catalog", "https://example.invalid/catalog.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no scheme"));
}

#[test]
fn malformed_catalog_is_a_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, "{ not json").unwrap();
    opp().arg("branches").arg("--catalog").arg(&path).assert().code(2);
}

#[test]
fn config_file_changes_page_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"page_size": 10}"#).unwrap();
    opp()
        .arg("view")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Results: 24 (page 1/3)"));
}

#[test]
fn renders_json_and_html_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    opp()
        .args(["view", "--quiet", "--department", "Healthcare", "--render", "json", "html", "--out"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let json = fs::read_to_string(dir.path().join("snapshot.json")).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["page"]["totalResults"], 5);
    assert_eq!(v["filters"]["hasActiveFilters"], true);
    assert_eq!(v["insight"]["isLoading"], false);

    let html = fs::read_to_string(dir.path().join("snapshot.html")).unwrap();
    assert!(html.starts_with("<!doctype html>"));
    assert!(html.contains("Map unavailable"));
}

#[test]
fn diagnostics_reports_token_presence() {
    opp()
        .arg("diagnostics")
        .assert()
        .success()
        .stdout(predicate::str::contains("Access token: Missing"))
        .stdout(predicate::str::contains("Page size: 6"))
        .stdout(predicate::str::contains("Insight debounce: 500 ms"));
    opp()
        .env("MAPBOX_ACCESS_TOKEN", "pk.test")
        .arg("diagnostics")
        .assert()
        .success()
        .stdout(predicate::str::contains("Access token: Set"));
}

#[test]
fn json_flag_prints_snapshot() {
    let out = opp()
        .args(["view", "--json", "--branch", "105"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["insight"]["title"], "Analysis for Rustenburg");
    assert_eq!(v["page"]["totalResults"], 4);
    assert_eq!(v["branchPanel"]["code"], "105");
    assert_eq!(v["map"]["status"]["state"], "failed");
}
