//! Scan command - extract receipt data from an image or token file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use budgetbee_core::{load_tokens, Category, ReceiptScanner, ScanError, ScanReport};

use super::{extension, Context, IMAGE_EXTENSIONS};
use crate::ledger::Ledger;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Receipt image, or a JSON file of OCR tokens
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// OCR model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Add the receipt total to the ledger
    #[arg(long)]
    commit: bool,

    /// Expense date for --commit (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV of line items
    Csv,
    /// Plain text summary
    Text,
}

/// A scan report together with its suggested category.
#[derive(Serialize)]
pub struct ScanOutput<'a> {
    #[serde(flatten)]
    pub report: &'a ScanReport,
    pub category: Category,
}

pub async fn run(args: ScanArgs, ctx: &Context) -> anyhow::Result<()> {
    let start = Instant::now();

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Scanning file: {}", args.input.display());

    let scanner = if extension(&args.input) == "json" {
        ctx.scanner_with(budgetbee_core::Capabilities::none())
    } else {
        ctx.scanner(args.model_dir.as_deref())
    };

    let report = scan_file(&args.input, &scanner)?;
    let category = scanner.categorize(&report.receipt);
    let output = format_report(&ScanOutput { report: &report, category }, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if report.is_empty() {
        eprintln!(
            "{} Could not extract any data from this receipt. Enter it manually with 'budgetbee add'.",
            style("!").yellow()
        );
    } else if args.commit {
        commit(&scanner, &report, args.date, ctx)?;
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Scan one receipt, choosing the input kind from the file extension.
pub fn scan_file(input: &Path, scanner: &ReceiptScanner) -> anyhow::Result<ScanReport> {
    let ext = extension(input);

    if ext == "json" {
        let tokens = load_tokens(input)?;
        debug!("Loaded {} tokens from {}", tokens.len(), input.display());
        return Ok(scanner.scan_tokens(&tokens));
    }

    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        anyhow::bail!("Unsupported file format: {}", ext);
    }

    let data = fs::read(input)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Running OCR...");

    let result = scanner.scan_image(&data);
    pb.finish_and_clear();

    match result {
        Ok(report) => Ok(report),
        Err(ScanError::OcrUnavailable) => anyhow::bail!(
            "Receipt scanning is not available: OCR models could not be loaded.\n\
             Place the models in the configured model directory, or enter the receipt manually with 'budgetbee add'."
        ),
        Err(e) => Err(e.into()),
    }
}

fn commit(
    scanner: &ReceiptScanner,
    report: &ScanReport,
    date: Option<NaiveDate>,
    ctx: &Context,
) -> anyhow::Result<()> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());

    let Some(entry) = scanner.ledger_entry(&report.receipt, date) else {
        eprintln!(
            "{} No total detected; nothing added to the ledger.",
            style("!").yellow()
        );
        return Ok(());
    };

    let mut ledger = Ledger::load(&ctx.ledger_path)?;
    println!(
        "{} Added ${} for {} ({})",
        style("✓").green(),
        entry.amount,
        entry.description,
        entry.category
    );
    ledger.append(entry);
    ledger.save()?;

    Ok(())
}

pub fn format_report(output: &ScanOutput<'_>, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(output)?),
        OutputFormat::Csv => format_csv(output.report),
        OutputFormat::Text => Ok(format_text(output)),
    }
}

fn format_csv(report: &ScanReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["item", "price"])?;
    for item in &report.receipt.items {
        let price = item.price.to_string();
        wtr.write_record([item.description.as_str(), price.as_str()])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(output: &ScanOutput<'_>) -> String {
    let receipt = &output.report.receipt;
    let mut text = String::new();

    text.push_str(&format!(
        "Vendor: {}\n",
        receipt.vendor.as_deref().unwrap_or("Unknown")
    ));
    match receipt.total {
        Some(total) => text.push_str(&format!("Total: ${}\n", total)),
        None => text.push_str("Total: could not detect\n"),
    }
    text.push_str(&format!("Category: {}\n", output.category));

    if !receipt.items.is_empty() {
        text.push_str("\nItems:\n");
        for item in &receipt.items {
            text.push_str(&format!("  - {}: ${}\n", item.description, item.price));
        }
        text.push_str(&format!("Items total: ${}\n", receipt.items_total()));
    }

    text.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetbee_core::{Capabilities, ReceiptScanner, Token};

    fn report() -> ScanReport {
        ReceiptScanner::new(Capabilities::none()).scan_tokens(&Token::sequence([
            ("Walmart", 0.9),
            ("Milk 2.50", 0.8),
            ("TOTAL 2.50", 0.8),
        ]))
    }

    #[test]
    fn test_format_text() {
        let report = report();
        let text = format_text(&ScanOutput {
            report: &report,
            category: Category::Other,
        });
        assert!(text.starts_with("Vendor: Walmart\nTotal: $2.50\nCategory: Other"));
        assert!(text.contains("  - Milk: $2.50"));
        assert!(text.ends_with("Items total: $5.00"));
    }

    #[test]
    fn test_format_csv() {
        let csv = format_csv(&report()).unwrap();
        assert_eq!(csv, "item,price\nMilk,2.50\nTOTAL,2.50\n");
    }

    #[test]
    fn test_format_json_includes_category() {
        let report = report();
        let json = format_report(
            &ScanOutput {
                report: &report,
                category: Category::Shopping,
            },
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["category"], "Shopping");
        assert_eq!(value["status"], "extracted");
        assert_eq!(value["receipt"]["vendor"], "Walmart");
    }
}
