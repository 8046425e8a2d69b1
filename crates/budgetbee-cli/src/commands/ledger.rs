//! Ledger command - list, summarize, and edit recorded expenses.

use clap::{Args, Subcommand};
use console::style;

use budgetbee_core::LedgerSummary;

use super::Context;
use crate::ledger::Ledger;

/// Arguments for the ledger command.
#[derive(Args)]
pub struct LedgerArgs {
    #[command(subcommand)]
    command: LedgerCommand,
}

#[derive(Subcommand)]
enum LedgerCommand {
    /// List all expenses
    List,

    /// Show totals per category
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an expense by its index in 'ledger list'
    Delete {
        index: usize,
    },

    /// Remove every expense
    Clear {
        /// Confirm clearing the ledger
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run(args: LedgerArgs, ctx: &Context) -> anyhow::Result<()> {
    let mut ledger = Ledger::load(&ctx.ledger_path)?;

    match args.command {
        LedgerCommand::List => list(&ledger),
        LedgerCommand::Summary { json } => summary(&ledger, json),
        LedgerCommand::Delete { index } => delete(&mut ledger, index),
        LedgerCommand::Clear { yes } => clear(&mut ledger, yes),
    }
}

fn list(ledger: &Ledger) -> anyhow::Result<()> {
    if ledger.entries().is_empty() {
        println!(
            "{} No expenses recorded yet. Add some with 'budgetbee add'.",
            style("ℹ").blue()
        );
        return Ok(());
    }

    for (i, entry) in ledger.entries().iter().enumerate() {
        println!(
            "{:>4}  {}  {:<40} {:>10}  {}",
            i, entry.date, entry.description, format!("${}", entry.amount), entry.category
        );
    }

    Ok(())
}

fn summary(ledger: &Ledger, json: bool) -> anyhow::Result<()> {
    let summary = LedgerSummary::from_entries(ledger.entries());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Total expenses:     ${}", summary.total);
    println!("Transactions:       {}", summary.count);
    if let Some(average) = summary.average {
        println!("Average expense:    ${}", average);
    }

    if !summary.by_category.is_empty() {
        println!();
        println!("Spending by category:");
        for (category, amount) in &summary.by_category {
            println!("  {:<15} ${}", category.as_str(), amount);
        }
    }

    Ok(())
}

fn delete(ledger: &mut Ledger, index: usize) -> anyhow::Result<()> {
    let Some(entry) = ledger.remove(index) else {
        anyhow::bail!(
            "No expense at index {} (ledger has {} entries)",
            index,
            ledger.entries().len()
        );
    };

    ledger.save()?;
    println!(
        "{} Deleted: {} (${})",
        style("✓").green(),
        entry.description,
        entry.amount
    );

    Ok(())
}

fn clear(ledger: &mut Ledger, yes: bool) -> anyhow::Result<()> {
    if !yes {
        anyhow::bail!(
            "Refusing to clear {} without --yes",
            ledger.path().display()
        );
    }

    let count = ledger.entries().len();
    ledger.clear();
    ledger.save()?;
    println!("{} Cleared {} expenses", style("✓").green(), count);

    Ok(())
}
