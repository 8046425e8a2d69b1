//! Expense ledger rows and summary analytics.
//!
//! Rows follow the flat ledger layout `Date, Description, Amount, Category`.
//! Reading and writing the ledger file is left to the caller.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ExpenseError;
use crate::models::category::Category;

/// One committed expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(rename = "Date")]
    pub date: NaiveDate,

    #[serde(rename = "Description")]
    pub description: String,

    /// Amount with two fractional digits.
    #[serde(rename = "Amount", deserialize_with = "deserialize_amount")]
    pub amount: Decimal,

    #[serde(rename = "Category")]
    pub category: Category,
}

impl LedgerEntry {
    /// Create a validated entry. The description must be non-blank and the amount positive.
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        category: Category,
    ) -> Result<Self, ExpenseError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ExpenseError::EmptyDescription);
        }
        if amount <= Decimal::ZERO {
            return Err(ExpenseError::NonPositiveAmount(amount.to_string()));
        }

        let mut amount = amount.round_dp(2);
        amount.rescale(2);

        Ok(Self {
            date,
            description: description.trim().to_string(),
            amount,
            category,
        })
    }
}

/// Ledger files store amounts as text; read them back at two decimals.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let mut amount = Decimal::from_str(raw.trim()).map_err(serde::de::Error::custom)?;
    amount.rescale(2);
    Ok(amount)
}

/// Dashboard figures over a set of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    /// Sum of all amounts.
    pub total: Decimal,

    /// Number of entries.
    pub count: usize,

    /// Mean amount, absent for an empty ledger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<Decimal>,

    /// Spending per category. Categories with no entries are omitted.
    pub by_category: BTreeMap<Category, Decimal>,
}

impl LedgerSummary {
    pub fn from_entries(entries: &[LedgerEntry]) -> Self {
        let mut by_category = BTreeMap::new();
        for entry in entries {
            *by_category.entry(entry.category).or_insert(Decimal::ZERO) += entry.amount;
        }

        let total: Decimal = entries.iter().map(|e| e.amount).sum();
        let count = entries.len();
        let average = (count > 0).then(|| (total / Decimal::from(count)).round_dp(2));

        Self {
            total,
            count,
            average,
            by_category,
        }
    }
}
