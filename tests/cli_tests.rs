//! Command-line tests against the built binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> Command {
    Command::cargo_bin("ticker-resolver").unwrap()
}

fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_resolve_text_output() {
    cmd()
        .args(["resolve", "microsft"])
        .assert()
        .success()
        .stdout(predicate::str::contains("microsft -> MSFT"));

    cmd()
        .args(["resolve", "xyz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xyz -> no match"));
}

#[test]
fn test_resolve_strict_fails_on_miss() {
    cmd()
        .args(["resolve", "--strict", "apple", "xyz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 queries could not be resolved"));
}

#[test]
fn test_resolve_json_output() {
    let output = cmd()
        .args(["resolve", "--format", "json", "aapl", "xyz"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["ticker"], "AAPL");
    assert_eq!(json[0]["confidence"], 1.0);
    assert!(json[1]["ticker"].is_null());
}

#[test]
fn test_resolve_from_stdin() {
    cmd()
        .args(["resolve", "-", "--format", "tsv"])
        .write_stdin("microsft\n\ndisney\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("query\trank\tticker\tconfidence\tlevel"))
        .stdout(predicate::str::contains("microsft\t1\tMSFT\t"))
        .stdout(predicate::str::contains("disney\t1\tDIS\t"));
}

#[test]
fn test_resolve_candidates() {
    cmd()
        .args(["resolve", "microsft", "-n", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1: MSFT"));
}

#[test]
fn test_invalid_tuning_is_rejected() {
    cmd()
        .args(["resolve", "apple", "--min-confidence", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Minimum confidence"));

    cmd()
        .args(["resolve", "apple", "--weight-cosine", "150"])
        .assert()
        .failure();

    cmd()
        .args(["resolve", "apple", "--ngram-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("n-gram size"));
}

#[test]
fn test_score_breakdown() {
    let output = cmd()
        .args(["score", "microsft", "msft", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ticker"], "MSFT");
    assert_eq!(json["above_floor"], true);
    assert!(json["score"]["cosine"].as_f64().unwrap() > 0.0);

    cmd()
        .args(["score", "apple", "NOPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_catalog_list_and_show() {
    cmd()
        .args(["catalog", "list", "--format", "tsv", "--filter", "micro"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ticker\tname\n"))
        .stdout(predicate::str::contains("MSFT\tMICROSOFT"))
        .stdout(predicate::str::contains("MU\tMICRON"))
        .stdout(predicate::str::contains("AAPL").not());

    cmd()
        .args(["catalog", "show", "aapl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:         APPLE"));
}

#[test]
fn test_catalog_import_and_resolve() {
    let input = write_temp(
        ".csv",
        "ticker,name\nACME,Acme Rockets\nWID,Widget Works\n,Nameless\n",
    );
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("custom.json");

    cmd()
        .args(["catalog", "import"])
        .arg(input.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("2 entries"));

    cmd()
        .args(["resolve", "acme rocket", "--catalog"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("-> ACME"));
}

#[test]
fn test_catalog_import_listing_files() {
    let nasdaq = write_temp(
        ".txt",
        "Symbol|Security Name|Market Category|Test Issue|Financial Status|Round Lot Size|ETF|NextShares\n\
         AAPL|Apple Inc. - Common Stock|Q|N|N|100|N|N\n\
         File Creation Time: 0101202600:00|||||||\n",
    );
    let other = write_temp(
        ".txt",
        "ACT Symbol|Security Name|Exchange|CQS Symbol|ETF|Round Lot Size|Test Issue|NASDAQ Symbol\n\
         IBM|International Business Machines Corporation Common Stock|N|IBM|N|100|N|IBM\n\
         File Creation Time: 0101202600:00|||||||\n",
    );

    let output = cmd()
        .args(["catalog", "import"])
        .arg(nasdaq.path())
        .arg(other.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = json["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["ticker"], "AAPL");
    assert_eq!(records[0]["name"], "APPLE");
    assert_eq!(records[1]["name"], "INTERNATIONAL BUSINESS MACHINES");
}

#[test]
fn test_catalog_import_sqlite() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("tickers.db");
    let conn = rusqlite::Connection::open(&db).unwrap();
    conn.execute_batch(
        "CREATE TABLE tickers (ticker TEXT, company TEXT);
         INSERT INTO tickers VALUES ('ORCL', 'ORACLE'), ('NULLNAME', NULL);",
    )
    .unwrap();
    drop(conn);

    cmd()
        .args(["resolve", "oracel", "--catalog"])
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("-> ORCL"));
}

#[test]
fn test_missing_catalog_file() {
    cmd()
        .args(["resolve", "apple", "--catalog", "/nonexistent/catalog.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog"));
}
