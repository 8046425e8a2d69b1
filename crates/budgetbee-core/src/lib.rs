//! Core library for BudgetBee receipt scanning and expense tracking.
//!
//! This crate provides:
//! - Receipt parsing from OCR token streams (vendor, total, line items)
//! - Rule-based expense categorization
//! - The OCR collaborator boundary and a pure-Rust OCR backend
//! - Expense ledger value types and summary analytics

pub mod classify;
pub mod error;
pub mod models;
pub mod ocr;
pub mod receipt;
pub mod scanner;

pub use classify::{classify, CategoryRule, Classifier};
pub use error::{BeeError, ExpenseError, OcrError, ParseCategoryError, Result, ScanError};
pub use models::category::Category;
pub use models::config::BeeConfig;
pub use models::ledger::{LedgerEntry, LedgerSummary};
pub use models::receipt::{ExtractionStatus, LineItem, ParsedReceipt};
pub use models::token::{load_tokens, tokens_from_json, Token};
pub use ocr::{Capabilities, OcrCollaborator};
#[cfg(feature = "native")]
pub use ocr::PureOcrCollaborator;
pub use receipt::{assemble, ReceiptExtractor, ReceiptParser};
pub use scanner::{ReceiptScanner, ScanReport, RECEIPT_PURCHASE};
