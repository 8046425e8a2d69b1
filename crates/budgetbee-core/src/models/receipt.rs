//! Structured receipt produced by the parser.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A receipt reconstructed from one token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReceipt {
    /// Merchant name, taken from the leading tokens.
    pub vendor: Option<String>,

    /// Total amount next to the first "TOTAL" marker.
    pub total: Option<Decimal>,

    /// Purchased items in recognition order.
    pub items: Vec<LineItem>,
}

/// A single purchased good or service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description.
    pub description: String,

    /// Price, always with two fractional digits.
    pub price: Decimal,
}

impl LineItem {
    pub fn new(description: impl Into<String>, price: Decimal) -> Self {
        let mut price = price.round_dp(2);
        price.rescale(2);
        Self {
            description: description.into(),
            price,
        }
    }
}

/// Whether an assembly produced anything the user can confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    /// A vendor or at least one line item was found.
    Extracted,
    /// Neither vendor nor items were found; the caller should prompt for manual entry.
    NoData,
}

impl ParsedReceipt {
    /// Extraction signal: `NoData` only when both vendor and items are missing.
    ///
    /// A total alone does not count as extracted data.
    pub fn status(&self) -> ExtractionStatus {
        if self.vendor.is_none() && self.items.is_empty() {
            ExtractionStatus::NoData
        } else {
            ExtractionStatus::Extracted
        }
    }

    /// Names of the fields that could not be extracted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.vendor.is_none() {
            missing.push("vendor");
        }
        if self.total.is_none() {
            missing.push("total");
        }
        if self.items.is_empty() {
            missing.push("items");
        }
        missing
    }

    /// Sum of item prices.
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|i| i.price).sum()
    }
}
