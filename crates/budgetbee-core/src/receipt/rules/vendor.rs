//! Vendor name detection.

use tracing::debug;

use super::TokenExtractor;
use crate::models::token::Token;

/// Picks the store name from the top of the receipt.
#[derive(Debug, Clone)]
pub struct VendorLocator {
    /// Only this many leading tokens are considered.
    window: usize,
    /// A candidate must exceed this confidence.
    min_confidence: f32,
}

impl VendorLocator {
    pub fn new(window: usize, min_confidence: f32) -> Self {
        Self {
            window,
            min_confidence,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }
}

impl Default for VendorLocator {
    fn default() -> Self {
        Self::new(3, 0.4)
    }
}

impl TokenExtractor for VendorLocator {
    type Output = Option<String>;

    fn extract(&self, tokens: &[Token]) -> Option<String> {
        let vendor = tokens
            .iter()
            .take(self.window)
            .find(|t| t.confidence > self.min_confidence)
            .map(|t| t.text.clone());

        match &vendor {
            Some(name) => debug!("Vendor candidate: {:?}", name),
            None => debug!(
                "No vendor above {} in first {} tokens",
                self.min_confidence, self.window
            ),
        }

        vendor
    }
}

/// Locate the vendor with the default policy.
pub fn locate_vendor(tokens: &[Token]) -> Option<String> {
    VendorLocator::default().extract(tokens)
}
