use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the user's configuration directory.
fn budgetbee(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("budgetbee").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .current_dir(dir.path());
    cmd
}

fn write_tokens(dir: &Path, name: &str, tokens: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, tokens).unwrap();
    path.display().to_string()
}

const KFC_TOKENS: &str = r#"[
    {"text": "KFC", "confidence": 0.92, "order": 0},
    {"text": "Zinger 5.49", "confidence": 0.81, "order": 1},
    {"text": "Fries", "confidence": 0.77, "order": 2},
    {"text": "2.50", "confidence": 0.88, "order": 3},
    {"text": "TOTAL 7.99", "confidence": 0.9, "order": 4}
]"#;

#[test]
fn test_classify_description() {
    let dir = TempDir::new().unwrap();
    budgetbee(&dir)
        .args(["classify", "Coffee", "Shop"])
        .assert()
        .success()
        .stdout("Food\n");
}

#[test]
fn test_classify_unknown_is_other() {
    let dir = TempDir::new().unwrap();
    budgetbee(&dir)
        .args(["classify", "Random Thing"])
        .assert()
        .success()
        .stdout("Other\n");
}

#[test]
fn test_add_then_list_and_summary() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("expenses.csv");
    let ledger_arg = ledger.display().to_string();

    budgetbee(&dir)
        .args(["--ledger", &ledger_arg, "add", "-d", "Uber ride", "-a", "12.5"])
        .args(["--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transport"));

    budgetbee(&dir)
        .args(["--ledger", &ledger_arg, "add", "-d", "Lunch", "-a", "7.5"])
        .args(["--date", "2024-03-02", "-c", "food"])
        .assert()
        .success();

    let csv = fs::read_to_string(&ledger).unwrap();
    assert_eq!(
        csv,
        "Date,Description,Amount,Category\n\
         2024-03-01,Uber ride,12.50,Transport\n\
         2024-03-02,Lunch,7.50,Food\n"
    );

    budgetbee(&dir)
        .args(["--ledger", &ledger_arg, "ledger", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Uber ride").and(predicate::str::contains("$7.50")));

    let output = budgetbee(&dir)
        .args(["--ledger", &ledger_arg, "ledger", "summary", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["count"], 2);
    assert_eq!(summary["total"], "20.00");
    assert_eq!(summary["by_category"]["Food"], "7.50");
}

#[test]
fn test_add_rejects_non_positive_amount() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("expenses.csv");

    budgetbee(&dir)
        .args(["--ledger", &ledger.display().to_string()])
        .args(["add", "-d", "Nothing", "-a", "0"])
        .assert()
        .failure();

    assert!(!ledger.exists());
}

#[test]
fn test_scan_tokens_text() {
    let dir = TempDir::new().unwrap();
    let input = write_tokens(dir.path(), "kfc.json", KFC_TOKENS);

    budgetbee(&dir)
        .args(["scan", &input])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Vendor: KFC")
                .and(predicate::str::contains("Total: $7.99"))
                .and(predicate::str::contains("Category: Food"))
                .and(predicate::str::contains("  - Zinger: $5.49"))
                .and(predicate::str::contains("  - Fries: $2.50")),
        );
}

#[test]
fn test_scan_tokens_json() {
    let dir = TempDir::new().unwrap();
    let input = write_tokens(dir.path(), "kfc.json", KFC_TOKENS);

    let output = budgetbee(&dir)
        .args(["scan", &input, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["status"], "extracted");
    assert_eq!(report["category"], "Food");
    assert_eq!(report["receipt"]["vendor"], "KFC");
    assert_eq!(report["receipt"]["total"], "7.99");
    assert_eq!(report["token_count"], 5);
}

#[test]
fn test_scan_commit_appends_total() {
    let dir = TempDir::new().unwrap();
    let input = write_tokens(dir.path(), "kfc.json", KFC_TOKENS);
    let ledger = dir.path().join("ledger.csv");

    budgetbee(&dir)
        .args(["--ledger", &ledger.display().to_string()])
        .args(["scan", &input, "--commit", "--date", "2024-06-15"])
        .assert()
        .success();

    let csv = fs::read_to_string(&ledger).unwrap();
    assert_eq!(
        csv,
        "Date,Description,Amount,Category\n2024-06-15,KFC (Receipt),7.99,Food\n"
    );
}

#[test]
fn test_scan_no_data_prompts_manual_entry() {
    let dir = TempDir::new().unwrap();
    let input = write_tokens(
        dir.path(),
        "blurry.json",
        r#"[{"text": "???", "confidence": 0.1}, {"text": "~~", "confidence": 0.2}]"#,
    );
    let ledger = dir.path().join("ledger.csv");

    budgetbee(&dir)
        .args(["--ledger", &ledger.display().to_string()])
        .args(["scan", &input, "--commit"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Enter it manually"));

    assert!(!ledger.exists());
}

#[test]
fn test_scan_image_without_models() {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("receipt.png");
    fs::write(&image, b"not really a png").unwrap();
    let models = dir.path().join("no-models");

    budgetbee(&dir)
        .args(["scan", &image.display().to_string()])
        .args(["--model-dir", &models.display().to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Receipt scanning is not available"));
}

#[test]
fn test_scan_missing_input() {
    let dir = TempDir::new().unwrap();
    budgetbee(&dir)
        .args(["scan", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_ledger_clear_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("expenses.csv");
    let ledger_arg = ledger.display().to_string();

    budgetbee(&dir)
        .args(["--ledger", &ledger_arg, "add", "-d", "Netflix", "-a", "9.99"])
        .assert()
        .success();

    budgetbee(&dir)
        .args(["--ledger", &ledger_arg, "ledger", "clear"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    budgetbee(&dir)
        .args(["--ledger", &ledger_arg, "ledger", "clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 expenses"));

    assert_eq!(
        fs::read_to_string(&ledger).unwrap(),
        "Date,Description,Amount,Category\n"
    );
}

#[test]
fn test_ledger_delete_out_of_range() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("expenses.csv");

    budgetbee(&dir)
        .args(["--ledger", &ledger.display().to_string()])
        .args(["ledger", "delete", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No expense at index 3"));
}

#[test]
fn test_config_init_and_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bee.json");
    let config_arg = config.display().to_string();

    budgetbee(&dir)
        .args(["--config", &config_arg, "config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    budgetbee(&dir)
        .args(["--config", &config_arg, "config", "set", "extraction.vendor_window", "5"])
        .assert()
        .success();

    budgetbee(&dir)
        .args(["--config", &config_arg, "config", "get", "extraction.vendor_window"])
        .assert()
        .success()
        .stdout("5\n");

    budgetbee(&dir)
        .args(["--config", &config_arg, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_batch_writes_per_file_outputs() {
    let dir = TempDir::new().unwrap();
    write_tokens(dir.path(), "a.json", KFC_TOKENS);
    let out = dir.path().join("out");
    let pattern = dir.path().join("*.json").display().to_string();

    budgetbee(&dir)
        .args(["batch", &pattern, "--output-dir", &out.display().to_string(), "--summary"])
        .assert()
        .success();

    let report = fs::read_to_string(out.join("a.json.scan.json")).unwrap();
    assert!(report.contains("\"vendor\": \"KFC\""));
    assert!(out.join("summary.csv").exists());
}
