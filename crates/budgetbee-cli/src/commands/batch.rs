//! Batch command - scan many receipts at once.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use budgetbee_core::{Category, ReceiptScanner, ScanReport};

use super::scan::{format_report, scan_file, OutputFormat, ScanOutput};
use super::{extension, Context, IMAGE_EXTENSIONS};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write a summary CSV (to the output directory, or stdout)
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// OCR model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Result of scanning a single file.
struct FileResult {
    path: PathBuf,
    outcome: Result<(ScanReport, Category), String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, ctx: &Context) -> anyhow::Result<()> {
    let start = Instant::now();

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = extension(p);
            ext == "json" || IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let needs_ocr = files.iter().any(|p| extension(p) != "json");
    let scanner = if needs_ocr {
        ctx.scanner(args.model_dir.as_deref())
    } else {
        ctx.scanner_with(budgetbee_core::Capabilities::none())
    };

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = scan_one(&path, &scanner);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        if let Err(ref msg) = outcome {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", path.display(), msg);
            } else {
                pb.abandon();
                error!("Failed to process {}: {}", path.display(), msg);
                anyhow::bail!("Processing failed for {}: {}", path.display(), msg);
            }
        }

        if let (Ok((report, category)), Some(output_dir)) = (&outcome, &args.output_dir) {
            let output = format_report(
                &ScanOutput {
                    report,
                    category: *category,
                },
                args.format,
            )?;
            fs::write(output_dir.join(output_name(&path, args.format)), output)?;
        }

        results.push(FileResult {
            path,
            outcome,
            processing_time_ms,
        });
        pb.inc(1);
    }

    pb.finish_and_clear();

    let succeeded = results.iter().filter(|r| r.outcome.is_ok()).count();
    let empty = results
        .iter()
        .filter(|r| matches!(&r.outcome, Ok((report, _)) if report.is_empty()))
        .count();
    let failed = results.len() - succeeded;

    println!(
        "{} Processed {} files in {:.1}s: {} extracted, {} with no data, {} failed",
        style("✓").green(),
        results.len(),
        start.elapsed().as_secs_f64(),
        succeeded - empty,
        empty,
        failed
    );

    if args.summary {
        let csv = summary_csv(&results)?;
        match &args.output_dir {
            Some(dir) => {
                let path = dir.join("summary.csv");
                fs::write(&path, csv)?;
                println!("{} Summary written to {}", style("✓").green(), path.display());
            }
            None => print!("{}", csv),
        }
    }

    Ok(())
}

/// Per-file output name. The source extension is kept so `a.json` and `a.png` do not collide.
fn output_name(path: &Path, format: OutputFormat) -> String {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("receipt");
    let ext = match format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Text => "txt",
    };
    format!("{}.scan.{}", name, ext)
}

fn scan_one(path: &Path, scanner: &ReceiptScanner) -> Result<(ScanReport, Category), String> {
    let report = scan_file(path, scanner).map_err(|e| e.to_string())?;
    let category = scanner.categorize(&report.receipt);
    Ok((report, category))
}

fn summary_csv(results: &[FileResult]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "file",
        "status",
        "vendor",
        "total",
        "items",
        "category",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let file = result.path.display().to_string();
        let time = result.processing_time_ms.to_string();
        match &result.outcome {
            Ok((report, category)) => {
                let status = if report.is_empty() { "no_data" } else { "extracted" };
                let total = report.receipt.total.map(|t| t.to_string()).unwrap_or_default();
                let items = report.receipt.items.len().to_string();
                wtr.write_record([
                    file.as_str(),
                    status,
                    report.receipt.vendor.as_deref().unwrap_or(""),
                    total.as_str(),
                    items.as_str(),
                    category.as_str(),
                    time.as_str(),
                    "",
                ])?;
            }
            Err(msg) => {
                wtr.write_record([
                    file.as_str(),
                    "failed",
                    "",
                    "",
                    "",
                    "",
                    time.as_str(),
                    msg.as_str(),
                ])?;
            }
        }
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}
