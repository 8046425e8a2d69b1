//! Add command - record an expense manually.

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::debug;

use budgetbee_core::{classify, Category, LedgerEntry};

use super::Context;
use crate::ledger::Ledger;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// What the money was spent on
    #[arg(short, long)]
    description: String,

    /// Amount spent
    #[arg(short, long)]
    amount: Decimal,

    /// Expense date (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Category (default: derived from the description)
    #[arg(short, long)]
    category: Option<Category>,
}

pub async fn run(args: AddArgs, ctx: &Context) -> anyhow::Result<()> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let category = args
        .category
        .unwrap_or_else(|| classify(&args.description));
    debug!("Category for {:?}: {}", args.description, category);

    let entry = LedgerEntry::new(date, args.description, args.amount, category)?;

    let mut ledger = Ledger::load(&ctx.ledger_path)?;
    println!(
        "{} Expense added: ${} for {} ({})",
        style("✓").green(),
        entry.amount,
        entry.description,
        entry.category
    );
    ledger.append(entry);
    ledger.save()?;

    Ok(())
}
