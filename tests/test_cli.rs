//! Tests for CLI argument parsing and end-to-end runs of the binary

use assert_cmd::Command;
use clap::Parser;
use genus::cli::Cli;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["genus", "-i", "de_fr.txt"]);

    assert_eq!(cli.skip_lines, 8, "Default should skip the dict.cc header");
    assert_eq!(cli.category, "noun");
    assert!(cli.config.is_none());
    assert!(!cli.no_export);
    assert!(cli.correction(), "Yates' correction should be on by default");
}

#[test]
fn test_cli_custom_values() {
    let cli = Cli::parse_from([
        "genus",
        "-i",
        "de_fr.txt",
        "--skip-lines",
        "0",
        "--category",
        "verb",
        "--no-correction",
    ]);

    assert_eq!(cli.skip_lines, 0);
    assert_eq!(cli.category, "verb");
    assert!(!cli.correction());
}

#[test]
fn test_cli_report_path_derivation() {
    let cli = Cli::parse_from(["genus", "-i", "/path/to/de_fr.txt"]);

    assert_eq!(
        cli.report_path(),
        Some(PathBuf::from("/path/to/de_fr_gender_analysis.json"))
    );
}

#[test]
fn test_cli_explicit_report_path() {
    let cli = Cli::parse_from(["genus", "-i", "de_fr.txt", "-o", "report.json"]);

    assert_eq!(cli.report_path(), Some(PathBuf::from("report.json")));
}

#[test]
fn test_cli_no_export() {
    let cli = Cli::parse_from(["genus", "-i", "de_fr.txt", "-o", "report.json", "--no-export"]);

    assert_eq!(cli.report_path(), None);
}

#[test]
fn test_cli_requires_input() {
    assert!(Cli::try_parse_from(["genus"]).is_err());
}

#[test]
fn test_binary_runs_on_fixture() {
    let (_temp_dir, path) = common::create_fixture_dictionary();

    Command::cargo_bin("genus")
        .unwrap()
        .arg("-i")
        .arg(&path)
        .arg("--no-export")
        .assert()
        .success()
        .stdout(predicate::str::contains("FULL GENDER SYSTEMS"))
        .stdout(predicate::str::contains("GROUPED GENDER SYSTEMS"));
}

#[test]
fn test_binary_writes_report() {
    let (temp_dir, path) = common::create_fixture_dictionary();
    let report = temp_dir.path().join("report.json");

    Command::cargo_bin("genus")
        .unwrap()
        .arg("-i")
        .arg(&path)
        .arg("-o")
        .arg(&report)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&report).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();

    assert_eq!(json["summary"]["extraction"]["retained"], 10);
    assert_eq!(
        json["analyses"][1]["table"]["counts"],
        serde_json::json!([[3, 3], [3, 1]])
    );
    assert_eq!(json["metadata"]["skip_lines"], 8);
    assert_eq!(json["metadata"]["correction"], true);
}

#[test]
fn test_binary_default_report_next_to_input() {
    let (temp_dir, path) = common::create_fixture_dictionary();

    Command::cargo_bin("genus")
        .unwrap()
        .arg("-i")
        .arg(&path)
        .assert()
        .success();

    assert!(temp_dir.path().join("de_fr_gender_analysis.json").exists());
}

#[test]
fn test_binary_missing_input() {
    Command::cargo_bin("genus")
        .unwrap()
        .args(["-i", "/nonexistent/de_fr.txt", "--no-export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_binary_rejects_non_total_grouping() {
    let (temp_dir, path) = common::create_fixture_dictionary();
    let config = temp_dir.path().join("genus.json");
    std::fs::write(&config, r#"{"grouping": {"m": "m", "f": "f"}}"#).unwrap();

    Command::cargo_bin("genus")
        .unwrap()
        .arg("-i")
        .arg(&path)
        .arg("-c")
        .arg(&config)
        .arg("--no-export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not total"));
}

#[test]
fn test_binary_empty_category() {
    let (_temp_dir, path) = common::create_fixture_dictionary();

    Command::cargo_bin("genus")
        .unwrap()
        .arg("-i")
        .arg(&path)
        .args(["--category", "prep", "--no-export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entries with category 'prep'"));
}

#[test]
fn test_binary_reports_table_with_unobserved_label() {
    let temp_dir = TempDir::new().unwrap();
    let path = common::write_dictionary(
        &temp_dir,
        "no_neuter.txt",
        0,
        &[
            ["Baum {m}", "arbre {m}", "noun", ""],
            ["Tür {f}", "porte {f}", "noun", ""],
            ["Mond {m}", "lune {f}", "noun", ""],
            ["Sonne {f}", "soleil {m}", "noun", ""],
        ],
    );
    let report = temp_dir.path().join("report.json");

    Command::cargo_bin("genus")
        .unwrap()
        .arg("-i")
        .arg(&path)
        .args(["--skip-lines", "0", "-o"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("GROUPED GENDER SYSTEMS"))
        .stderr(predicate::str::contains("skipped"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();

    assert!(json["analyses"][0]["chi_squared"].is_null());
    assert!(json["analyses"][0]["skipped"].is_string());
    assert_eq!(json["analyses"][0]["matthews"], 0.0);
    assert!(json["analyses"][1]["chi_squared"].is_object());
    assert!(json["analyses"][1]["fisher"]["p_value"].is_number());
}

#[test]
fn test_binary_records_undeclared_pairs() {
    let temp_dir = TempDir::new().unwrap();
    let path = common::write_dictionary(
        &temp_dir,
        "common_gender.txt",
        0,
        &[
            ["Baum {m}", "arbre {m}", "noun", ""],
            ["Tür {f}", "porte {f}", "noun", ""],
            ["Haus {n}", "maison {f}", "noun", ""],
            ["Mond {m}", "lune {f}", "noun", ""],
            ["Buch {n}", "livre {m}", "noun", ""],
            ["Sonne {f}", "soleil {m}", "noun", ""],
            ["Kater {c}", "matou {m}", "noun", ""],
        ],
    );
    let report = temp_dir.path().join("report.json");

    Command::cargo_bin("genus")
        .unwrap()
        .arg("-i")
        .arg(&path)
        .args(["--skip-lines", "0", "-o"])
        .arg(&report)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();

    assert_eq!(json["summary"]["extraction"]["retained"], 7);
    assert_eq!(json["summary"]["undeclared_pairs"], 1);
    let counts = json["analyses"][0]["table"]["counts"].as_array().unwrap();
    let total: u64 = counts
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .map(|c| c.as_u64().unwrap())
        .sum();
    assert_eq!(total, 6);
}
