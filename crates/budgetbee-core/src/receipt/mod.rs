//! Receipt field extraction from OCR token streams.

mod parser;
pub mod rules;

pub use parser::{assemble, ReceiptParser};

use crate::models::receipt::ParsedReceipt;
use crate::models::token::Token;

/// Trait for turning a token stream into a receipt.
pub trait ReceiptExtractor {
    /// Extract a receipt. Never fails; missing fields stay absent.
    fn extract(&self, tokens: &[Token]) -> ParsedReceipt;
}
