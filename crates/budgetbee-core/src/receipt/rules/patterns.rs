//! Common patterns for receipt extraction.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

lazy_static! {
    // Monetary figure: digits, a dot, exactly two digits
    pub static ref MONEY: Regex = Regex::new(r"[0-9]+\.[0-9]{2}").unwrap();

    // A token that is nothing but a monetary figure
    pub static ref MONEY_EXACT: Regex = Regex::new(r"^[0-9]+\.[0-9]{2}$").unwrap();
}

/// Currency symbols stripped during normalization.
pub const CURRENCY_SYMBOLS: [char; 5] = ['$', '€', '£', '¥', '₹'];

/// Marker identifying the total line.
pub const TOTAL_MARKER: &str = "TOTAL";

/// Upper-case the text and drop spaces and currency symbols.
pub fn normalize(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .filter(|c| *c != ' ' && !CURRENCY_SYMBOLS.contains(c))
        .collect()
}

/// Parse a matched monetary figure.
pub fn parse_money(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.trim()).ok()
}
