//! CLI expense tracker with receipt scanning and automatic categorization.

mod commands;
mod ledger;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{add, batch, classify, config, ledger as ledger_cmd, scan, Context};

/// BudgetBee - track expenses and scan receipts
#[derive(Parser)]
#[command(name = "budgetbee")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Ledger CSV file (overrides config)
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a receipt image or token file
    Scan(scan::ScanArgs),

    /// Scan multiple receipts
    Batch(batch::BatchArgs),

    /// Categorize an expense description
    Classify(classify::ClassifyArgs),

    /// Add an expense manually
    Add(add::AddArgs),

    /// Inspect and edit the expense ledger
    Ledger(ledger_cmd::LedgerArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    let ledger_path = cli.ledger.as_deref();

    // Execute command
    match cli.command {
        Commands::Scan(args) => scan::run(args, &Context::load(config_path, ledger_path)?).await,
        Commands::Batch(args) => batch::run(args, &Context::load(config_path, ledger_path)?).await,
        Commands::Classify(args) => classify::run(args).await,
        Commands::Add(args) => add::run(args, &Context::load(config_path, ledger_path)?).await,
        Commands::Ledger(args) => {
            ledger_cmd::run(args, &Context::load(config_path, ledger_path)?).await
        }
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
