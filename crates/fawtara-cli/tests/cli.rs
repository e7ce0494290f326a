use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ARABIC_BILL: &str = "شركة الكهرباء الوطنية
فاتورة كهرباء
التاريخ: ٢٠٢٤/٠٣/١٥
الإجمالي: ٦٧,٥٠٠ دينار
";

const ENGLISH_BILL: &str = "SuperNet Internet Services
Invoice Date: Jan 15, 2024
Grand Total: $30.00
";

/// Workspace with an empty config file, so a user config never leaks in.
fn workspace() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();
    (dir, config)
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn fawtara(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fawtara").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn process_arabic_bill_as_json() {
    let (dir, config) = workspace();
    let bill = write(dir.path(), "bill.txt", ARABIC_BILL);

    let output = fawtara(&config).arg("process").arg(&bill).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["filename"], "bill.txt");
    assert_eq!(json["invoice_date"], "2024-03-15");
    assert_eq!(json["total_amount"], 67500.0);
    assert_eq!(json["currency"], "IQD");
    assert_eq!(json["category"], "Electricity");
    assert_eq!(json["language"], "ar");
    assert_eq!(json["status"], "Processed");
}

#[test]
fn process_joins_pages_in_order() {
    let (dir, config) = workspace();
    let first = write(dir.path(), "page-1.txt", "Water utility\nDate 2024-02-01\n");
    let second = write(dir.path(), "page-2.txt", "TOTAL 250.50\n");

    let output = fawtara(&config)
        .arg("process")
        .arg(&first)
        .arg(&second)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["filename"], "page-1.txt");
    assert_eq!(json["invoice_date"], "2024-02-01");
    assert_eq!(json["total_amount"], 250.5);
    assert_eq!(json["category"], "Water");
}

#[test]
fn process_reads_stdin() {
    let (_dir, config) = workspace();

    let output = fawtara(&config)
        .args(["process", "-"])
        .write_stdin(ENGLISH_BILL)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["filename"], "stdin");
    assert_eq!(json["invoice_date"], "Not Found");
    assert_eq!(json["total_amount"], 30.0);
    assert_eq!(json["category"], "Internet");
}

#[test]
fn process_csv_uses_arabic_labels() {
    let (dir, config) = workspace();
    let bill = write(dir.path(), "bill.txt", ARABIC_BILL);

    fawtara(&config)
        .arg("process")
        .arg(&bill)
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("اسم الملف,تاريخ الفاتورة"))
        .stdout(predicate::str::contains("2024-03-15,67500,دينار عراقي,Electricity"));
}

#[test]
fn process_writes_output_file() {
    let (dir, config) = workspace();
    let bill = write(dir.path(), "bill.txt", ENGLISH_BILL);
    let out = dir.path().join("out.txt");

    fawtara(&config)
        .arg("process")
        .arg(&bill)
        .args(["--format", "text", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("Invoice Date: Not Found\n"));
    assert!(text.contains("Currency: USD\n"));
}

#[test]
fn process_shows_warnings() {
    let (dir, config) = workspace();
    let bill = write(dir.path(), "note.txt", "thank you");

    fawtara(&config)
        .arg("process")
        .arg(&bill)
        .arg("--show-warnings")
        .assert()
        .success()
        .stderr(predicate::str::contains("Could not extract invoice date"))
        .stderr(predicate::str::contains("No category keyword matched, defaulting to General"));
}

#[test]
fn process_rejects_images() {
    let (dir, config) = workspace();
    let scan = write(dir.path(), "scan.png", "not really a png");

    fawtara(&config)
        .arg("process")
        .arg(&scan)
        .assert()
        .failure()
        .stderr(predicate::str::contains("run OCR first"));
}

#[test]
fn process_missing_file() {
    let (dir, config) = workspace();

    fawtara(&config)
        .arg("process")
        .arg(dir.path().join("absent.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let (dir, config) = workspace();
    let inputs = dir.path().join("inputs");
    fs::create_dir(&inputs).unwrap();
    write(&inputs, "a.txt", ARABIC_BILL);
    write(&inputs, "b.txt", ENGLISH_BILL);
    write(&inputs, "c.txt", "Grocery shop receipt\nTOTAL 20000\n");
    let out = dir.path().join("out");

    fawtara(&config)
        .arg("batch")
        .arg(format!("{}/*.txt", inputs.display()))
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--jobs", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"))
        .stdout(predicate::str::contains("USD total: 30.00"))
        .stdout(predicate::str::contains("IQD total: 87500"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());
    assert!(out.join("c.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let rows: Vec<&str> = summary.lines().collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[1].starts_with("a.txt,success,2024-03-15,67500,IQD,Electricity,ar,"));
    assert!(rows[2].starts_with("b.txt,success,Not Found,30.00,USD,Internet,en,"));
    assert!(rows[3].starts_with("c.txt,success,Not Found,20000,IQD,Shopping,en,"));
}

#[test]
fn batch_continues_on_error() {
    let (dir, config) = workspace();
    write(dir.path(), "good.txt", ENGLISH_BILL);
    write(dir.path(), "empty.txt", "   \n");

    let pattern = format!("{}/*.txt", dir.path().display());

    fawtara(&config)
        .arg("batch")
        .arg(&pattern)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));

    fawtara(&config)
        .arg("batch")
        .arg(&pattern)
        .arg("--continue-on-error")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"))
        .stdout(predicate::str::contains("empty.txt"));
}

#[test]
fn batch_without_matches() {
    let (dir, config) = workspace();

    fawtara(&config)
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn config_init_get_and_validate() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("fawtara.json");

    fawtara(&config)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    fawtara(&config)
        .args(["config", "get", "extraction.currency.default"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"USD\""));

    fawtara(&config)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));

    fawtara(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_validate_rejects_bad_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(
        dir.path(),
        "config.json",
        r#"{"extraction": {"dates": {"rules": [{"name": "broken", "pattern": "[0-9"}]}}}"#,
    );

    fawtara(&config)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid pattern for date rule broken"));
}

#[test]
fn custom_vocabulary_changes_results() {
    let (dir, _) = workspace();
    let config = write(
        dir.path(),
        "custom.json",
        r#"{"extraction": {"categories": {"rules": [{"category": "Internet", "keywords": ["fiber"]}]}}}"#,
    );
    let bill = write(dir.path(), "bill.txt", "Fiber plan\nTOTAL 45\n");

    let output = fawtara(&config).arg("process").arg(&bill).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["category"], "Internet");
    assert_eq!(json["total_amount"], 45.0);
}

#[test]
fn month_name_dates_need_opt_in() {
    let (dir, default_config) = workspace();
    let bill = write(dir.path(), "bill.txt", ENGLISH_BILL);
    let config = write(
        dir.path(),
        "months.json",
        r#"{"extraction": {"dates": {"rules": [{
            "name": "month_name",
            "pattern": "(?P<month>jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\\s+(?P<day>\\d{1,2}),\\s+(?P<year>20\\d{2})",
            "kind": "month_name"
        }]}}}"#,
    );

    let output = fawtara(&default_config).arg("process").arg(&bill).output().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["invoice_date"], "Not Found");

    let output = fawtara(&config).arg("process").arg(&bill).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["invoice_date"], "2024-01-15");
}
