//! Receipt scanning front end: OCR capability, parsing, categorization.

use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classify::Classifier;
use crate::error::ScanError;
use crate::models::category::Category;
use crate::models::ledger::LedgerEntry;
use crate::models::receipt::{ExtractionStatus, ParsedReceipt};
use crate::models::token::Token;
use crate::ocr::Capabilities;
use crate::receipt::{ReceiptExtractor, ReceiptParser};

/// Description used when a receipt has no vendor.
pub const RECEIPT_PURCHASE: &str = "Receipt Purchase";

/// Result of one scan attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Extracted receipt data.
    pub receipt: ParsedReceipt,
    /// Whether anything worth confirming was found.
    pub status: ExtractionStatus,
    /// Number of tokens examined.
    pub token_count: usize,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// OCR and parsing time in milliseconds. Zero for token input, which is never timed.
    pub processing_time_ms: u64,
}

impl ScanReport {
    fn new(receipt: ParsedReceipt, token_count: usize, processing_time_ms: u64) -> Self {
        let warnings = receipt
            .missing_fields()
            .into_iter()
            .map(|field| format!("{} not detected", field))
            .collect();

        Self {
            status: receipt.status(),
            receipt,
            token_count,
            warnings,
            processing_time_ms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status == ExtractionStatus::NoData
    }
}

/// Scans receipts and categorizes them.
#[derive(Debug, Clone)]
pub struct ReceiptScanner<E = ReceiptParser> {
    extractor: E,
    classifier: Classifier,
    capabilities: Capabilities,
}

impl ReceiptScanner<ReceiptParser> {
    /// Create a scanner with the default parser and classifier.
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            extractor: ReceiptParser::default(),
            classifier: Classifier::default(),
            capabilities,
        }
    }
}

impl<E: ReceiptExtractor> ReceiptScanner<E> {
    /// Replace the receipt extractor.
    pub fn with_extractor<F: ReceiptExtractor>(self, extractor: F) -> ReceiptScanner<F> {
        ReceiptScanner {
            extractor,
            classifier: self.classifier,
            capabilities: self.capabilities,
        }
    }

    /// Replace the classifier.
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn ocr_available(&self) -> bool {
        self.capabilities.ocr_available()
    }

    /// Run OCR on an encoded image and parse the resulting tokens.
    pub fn scan_image(&self, image: &[u8]) -> Result<ScanReport, ScanError> {
        let ocr = self.capabilities.ocr().ok_or(ScanError::OcrUnavailable)?;

        let start = Instant::now();
        let tokens = ocr.recognize(image).map_err(|e| {
            warn!("{} failed: {}", ocr.name(), e);
            ScanError::from(e)
        })?;

        let mut report = self.report(&tokens);
        report.processing_time_ms = start.elapsed().as_millis() as u64;
        Ok(report)
    }

    /// Parse an already recognized token stream.
    ///
    /// Does not read the system clock, so it also runs on `wasm32-unknown-unknown`.
    pub fn scan_tokens(&self, tokens: &[Token]) -> ScanReport {
        self.report(tokens)
    }

    fn report(&self, tokens: &[Token]) -> ScanReport {
        let receipt = self.extractor.extract(tokens);
        let report = ScanReport::new(receipt, tokens.len(), 0);

        match report.status {
            ExtractionStatus::Extracted => info!(
                "Scanned {} tokens: {} items, total {:?}",
                report.token_count,
                report.receipt.items.len(),
                report.receipt.total
            ),
            ExtractionStatus::NoData => {
                warn!("No receipt data in {} tokens", report.token_count)
            }
        }

        report
    }

    /// Categorize a free-text description.
    pub fn classify(&self, description: &str) -> Category {
        self.classifier.classify(description)
    }

    /// Categorize a receipt by its vendor.
    pub fn categorize(&self, receipt: &ParsedReceipt) -> Category {
        self.classifier
            .classify(receipt.vendor.as_deref().unwrap_or(RECEIPT_PURCHASE))
    }

    /// Ledger row for the receipt total, if a positive total was detected.
    pub fn ledger_entry(&self, receipt: &ParsedReceipt, date: NaiveDate) -> Option<LedgerEntry> {
        let total = receipt.total?;
        let description = match &receipt.vendor {
            Some(vendor) if !vendor.trim().is_empty() => format!("{} (Receipt)", vendor.trim()),
            _ => RECEIPT_PURCHASE.to_string(),
        };

        LedgerEntry::new(date, description, total, self.categorize(receipt)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use crate::ocr::OcrCollaborator;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;

    struct StubOcr(Result<Vec<Token>, fn() -> OcrError>);

    impl OcrCollaborator for StubOcr {
        fn name(&self) -> &str {
            "stub"
        }

        fn recognize(&self, _image: &[u8]) -> Result<Vec<Token>, OcrError> {
            match &self.0 {
                Ok(tokens) => Ok(tokens.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn scanner_with(ocr: StubOcr) -> ReceiptScanner {
        ReceiptScanner::new(Capabilities::with_ocr(Arc::new(ocr)))
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_scan_without_ocr() {
        let scanner = ReceiptScanner::new(Capabilities::none());
        assert!(!scanner.ocr_available());
        assert_eq!(scanner.scan_image(b"jpeg").err(), Some(ScanError::OcrUnavailable));
    }

    #[test]
    fn test_scan_image_outcomes() {
        let scanner = scanner_with(StubOcr(Err(|| OcrError::ImageUnavailable("bad".into()))));
        assert_eq!(
            scanner.scan_image(b"").err(),
            Some(ScanError::ImageUnavailable("bad".into()))
        );

        let scanner = scanner_with(StubOcr(Err(|| OcrError::Recognition("boom".into()))));
        assert!(matches!(scanner.scan_image(b"").err(), Some(ScanError::ExtractionFailed(_))));

        let scanner = scanner_with(StubOcr(Ok(Vec::new())));
        let report = scanner.scan_image(b"").unwrap();
        assert!(report.is_empty());
        assert_eq!(report.warnings, ["vendor not detected", "total not detected", "items not detected"]);

        let scanner = scanner_with(StubOcr(Ok(Token::sequence([
            ("Shell Station", 0.9),
            ("TOTAL 40.00", 0.8),
        ]))));
        let report = scanner.scan_image(b"").unwrap();
        assert_eq!(report.status, ExtractionStatus::Extracted);
        assert_eq!(report.token_count, 2);
        assert_eq!(scanner.categorize(&report.receipt), Category::Transport);
    }

    #[test]
    fn test_scan_tokens_is_untimed() {
        let scanner = ReceiptScanner::new(Capabilities::none());
        let tokens = Token::sequence([("Walmart", 0.9), ("TOTAL 23.45", 0.5)]);

        let first = scanner.scan_tokens(&tokens);
        let second = scanner.scan_tokens(&tokens);
        assert_eq!(first.processing_time_ms, 0);
        assert_eq!(first.receipt, second.receipt);
        assert_eq!(first.receipt.total, Some(Decimal::from_str("23.45").unwrap()));
    }

    #[test]
    fn test_ledger_entry_from_receipt() {
        let scanner = ReceiptScanner::new(Capabilities::none());
        let report = scanner.scan_tokens(&Token::sequence([
            ("Corner Cafe", 0.9),
            ("Latte 4.50", 0.8),
            ("TOTAL 4.50", 0.8),
        ]));

        let entry = scanner.ledger_entry(&report.receipt, date()).unwrap();
        assert_eq!(entry.description, "Corner Cafe (Receipt)");
        assert_eq!(entry.amount, Decimal::from_str("4.50").unwrap());
        assert_eq!(entry.category, Category::Food);
        assert_eq!(entry.date, date());
    }

    #[test]
    fn test_ledger_entry_without_vendor_or_total() {
        let scanner = ReceiptScanner::new(Capabilities::none());

        let receipt = ParsedReceipt {
            total: Some(Decimal::from(12)),
            ..Default::default()
        };
        let entry = scanner.ledger_entry(&receipt, date()).unwrap();
        assert_eq!(entry.description, RECEIPT_PURCHASE);
        assert_eq!(entry.category, Category::Other);

        let receipt = ParsedReceipt {
            vendor: Some("Walmart".into()),
            ..Default::default()
        };
        assert!(scanner.ledger_entry(&receipt, date()).is_none());

        let receipt = ParsedReceipt {
            total: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert!(scanner.ledger_entry(&receipt, date()).is_none());
    }
}
