//! Classify command - categorize an expense description.

use clap::Args;

use budgetbee_core::classify;

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// Expense description (words are joined with spaces)
    #[arg(required = true)]
    description: Vec<String>,
}

pub async fn run(args: ClassifyArgs) -> anyhow::Result<()> {
    let description = args.description.join(" ");
    println!("{}", classify(&description));
    Ok(())
}
