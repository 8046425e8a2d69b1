//! Receipt assembly combining the field extractors.

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::receipt::ParsedReceipt;
use crate::models::token::Token;

use super::rules::{ItemParser, TokenExtractor, TotalExtractor, VendorLocator};
use super::ReceiptExtractor;

/// Rule-based receipt parser.
///
/// The extractors only read the token slice, so a parser can be shared freely
/// and the same tokens always produce the same receipt.
#[derive(Debug, Clone, Default)]
pub struct ReceiptParser {
    vendor: VendorLocator,
    total: TotalExtractor,
    items: ItemParser,
}

impl ReceiptParser {
    /// Create a parser with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from configured thresholds.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_vendor_window(config.vendor_window)
            .with_vendor_confidence(config.vendor_min_confidence)
            .with_total_confidence(config.total_min_confidence)
            .with_item_confidence(config.item_min_confidence)
    }

    /// Set how many leading tokens may hold the vendor name.
    pub fn with_vendor_window(mut self, window: usize) -> Self {
        self.vendor = self.vendor.with_window(window);
        self
    }

    /// Set the confidence a vendor token must exceed.
    pub fn with_vendor_confidence(mut self, confidence: f32) -> Self {
        self.vendor = self.vendor.with_min_confidence(confidence);
        self
    }

    /// Set the confidence a TOTAL marker must exceed.
    pub fn with_total_confidence(mut self, confidence: f32) -> Self {
        self.total = TotalExtractor::new(confidence);
        self
    }

    /// Set the confidence an item description token must exceed.
    pub fn with_item_confidence(mut self, confidence: f32) -> Self {
        self.items = ItemParser::new(confidence);
        self
    }

    /// Run all extractors over the tokens and compose the receipt.
    pub fn assemble(&self, tokens: &[Token]) -> ParsedReceipt {
        let receipt = ParsedReceipt {
            vendor: self.vendor.extract(tokens),
            total: self.total.extract(tokens),
            items: self.items.extract(tokens),
        };

        debug!(
            "Assembled receipt from {} tokens: vendor={:?}, total={:?}, {} items",
            tokens.len(),
            receipt.vendor,
            receipt.total,
            receipt.items.len()
        );

        receipt
    }
}

impl ReceiptExtractor for ReceiptParser {
    fn extract(&self, tokens: &[Token]) -> ParsedReceipt {
        self.assemble(tokens)
    }
}

/// Assemble a receipt with the default policy.
pub fn assemble(tokens: &[Token]) -> ParsedReceipt {
    ReceiptParser::default().assemble(tokens)
}
