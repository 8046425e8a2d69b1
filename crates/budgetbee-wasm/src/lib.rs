//! WASM bindings for BudgetBee.
//!
//! OCR runs on the JavaScript side; these bindings parse the recognized tokens
//! and categorize expenses in browsers and Node.js.

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use budgetbee_core::models::token::sort_tokens;
use budgetbee_core::{Capabilities, Category, LedgerEntry, ReceiptScanner, ScanReport, Token};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Category name for an expense description.
#[wasm_bindgen]
pub fn classify(description: &str) -> String {
    budgetbee_core::classify(description).to_string()
}

/// Names of all categories, `Other` last.
#[wasm_bindgen]
pub fn categories() -> js_sys::Array {
    Category::ALL
        .iter()
        .map(|c| JsValue::from_str(c.as_str()))
        .collect()
}

/// Parse an array of `{ text, confidence, order? }` tokens into a scan report.
#[wasm_bindgen]
pub fn parse_receipt(tokens: JsValue) -> Result<JsValue, JsValue> {
    let mut tokens: Vec<Token> = serde_wasm_bindgen::from_value(tokens)?;
    sort_tokens(&mut tokens);
    to_js(&scan(&tokens))
}

/// Ledger row for a token stream, or `undefined` when no total was found.
///
/// `date` is an ISO date (`YYYY-MM-DD`).
#[wasm_bindgen]
pub fn receipt_ledger_entry(tokens: JsValue, date: &str) -> Result<JsValue, JsValue> {
    let mut tokens: Vec<Token> = serde_wasm_bindgen::from_value(tokens)?;
    sort_tokens(&mut tokens);
    let date = parse_date(date)?;

    let scanner = ReceiptScanner::new(Capabilities::none());
    let report = scanner.scan_tokens(&tokens);
    match scanner.ledger_entry(&report.receipt, date) {
        Some(entry) => to_js(&entry),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Validate a manually entered expense and return it as a ledger row.
///
/// The category is derived from the description when `category` is omitted.
#[wasm_bindgen]
pub fn expense_entry(
    date: &str,
    description: &str,
    amount: &str,
    category: Option<String>,
) -> Result<JsValue, JsValue> {
    let date = parse_date(date)?;
    let amount = amount
        .trim()
        .parse()
        .map_err(|e| JsValue::from_str(&format!("invalid amount {:?}: {}", amount, e)))?;
    let category = match category {
        Some(name) => name
            .parse::<Category>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => budgetbee_core::classify(description),
    };

    let entry = LedgerEntry::new(date, description, amount, category)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&entry)
}

/// Token collector for browser-side OCR results.
#[wasm_bindgen]
pub struct ReceiptTokens {
    tokens: Vec<Token>,
}

#[wasm_bindgen]
impl ReceiptTokens {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Append a recognized fragment in reading order.
    #[wasm_bindgen]
    pub fn add_token(&mut self, text: &str, confidence: f32) {
        let order = self.tokens.len() as u32;
        self.tokens.push(Token::new(text, confidence, order));
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.tokens.len()
    }

    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Parse the collected tokens into a scan report.
    #[wasm_bindgen]
    pub fn parse(&self) -> Result<JsValue, JsValue> {
        to_js(&scan(&self.tokens))
    }
}

impl Default for ReceiptTokens {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan report plus the category suggested for its vendor.
#[derive(Serialize)]
struct ScanOutput {
    #[serde(flatten)]
    report: ScanReport,
    category: Category,
}

fn scan(tokens: &[Token]) -> ScanOutput {
    let scanner = ReceiptScanner::new(Capabilities::none());
    let report = scanner.scan_tokens(tokens);
    if report.is_empty() {
        web_sys::console::warn_1(&JsValue::from_str(
            "No receipt data found; ask for manual entry",
        ));
    }

    let category = scanner.categorize(&report.receipt);
    ScanOutput { report, category }
}

fn parse_date(date: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("invalid date {:?}: {}", date, e)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
