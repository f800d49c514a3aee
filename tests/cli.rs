//! End-to-end runs of the binary against an offline price book.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PORTFOLIO: &str = r#"
VTI:
  market cap: 100
  date: 2021-01-04
BND:
  market cap: 100
  close price: 80.0
"#;

const PRICES: &str = r#"
current:
  VTI: 380.0
  BND: 80.0
history:
  VTI:
    2021-01-04: 190.0
"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("market_proportions").unwrap();
    cmd.env_remove("PROPORTIONS_FORMAT")
        .env_remove("PROPORTIONS_PRICES")
        .env_remove("PROPORTIONS_JOBS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_percent_output() {
    let dir = TempDir::new().unwrap();
    let portfolio = write(&dir, "portfolio.yaml", PORTFOLIO);
    let prices = write(&dir, "prices.yaml", PRICES);

    cmd()
        .arg(&portfolio)
        .arg("--prices")
        .arg(&prices)
        .assert()
        .success()
        .stdout("VTI: 66.67%\nBND: 33.33%\n");
}

#[test]
fn test_fraction_output_with_jobs() {
    let dir = TempDir::new().unwrap();
    let portfolio = write(&dir, "portfolio.yaml", PORTFOLIO);
    let prices = write(&dir, "prices.yaml", PRICES);

    cmd()
        .arg(&portfolio)
        .args(["--format", "fraction", "--jobs", "4"])
        .env("PROPORTIONS_PRICES", &prices)
        .assert()
        .success()
        .stdout("\"VTI\": 0.6667\n\"BND\": 0.3333\n");
}

#[test]
fn test_malformed_portfolio_reports_parse_error() {
    let dir = TempDir::new().unwrap();
    let portfolio = write(&dir, "portfolio.yaml", "VTI:\n  market cap: [1,\n");
    let prices = write(&dir, "prices.yaml", PRICES);

    cmd()
        .arg(&portfolio)
        .arg("--prices")
        .arg(&prices)
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::starts_with("error: failed to parse portfolio"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_unknown_ticker_fails_run() {
    let dir = TempDir::new().unwrap();
    let portfolio = write(
        &dir,
        "portfolio.yaml",
        "ZZZZ:\n  market cap: 1\n  close price: 1.0\n",
    );
    let prices = write(&dir, "prices.yaml", PRICES);

    cmd()
        .arg(&portfolio)
        .arg("--prices")
        .arg(&prices)
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("quote lookup for ZZZZ failed"));
}

#[test]
fn test_zero_close_price_is_invalid_reference() {
    let dir = TempDir::new().unwrap();
    let portfolio = write(
        &dir,
        "portfolio.yaml",
        "BND:\n  market cap: 100\n  close price: 0.0\n",
    );
    let prices = write(&dir, "prices.yaml", PRICES);

    cmd()
        .arg(&portfolio)
        .arg("--prices")
        .arg(&prices)
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("invalid reference price 0 for BND"));
}

#[test]
fn test_empty_portfolio_fails() {
    let dir = TempDir::new().unwrap();
    let portfolio = write(&dir, "portfolio.yaml", "");
    let prices = write(&dir, "prices.yaml", PRICES);

    cmd()
        .arg(&portfolio)
        .arg("--prices")
        .arg(&prices)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("portfolio has no assets"));
}

#[test]
fn test_missing_file() {
    cmd()
        .arg("/nonexistent/portfolio.yaml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read /nonexistent/portfolio.yaml"));
}
