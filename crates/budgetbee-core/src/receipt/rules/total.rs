//! Total amount extraction.

use rust_decimal::Decimal;
use tracing::debug;

use super::patterns::{normalize, parse_money, MONEY, TOTAL_MARKER};
use super::TokenExtractor;
use crate::models::token::Token;

/// Finds the amount printed on the first "TOTAL" line.
///
/// The first confident token containing the marker decides the result. If that
/// token carries no amount of its own the total is absent: neighbouring tokens
/// and later markers are not consulted.
#[derive(Debug, Clone)]
pub struct TotalExtractor {
    min_confidence: f32,
}

impl TotalExtractor {
    pub fn new(min_confidence: f32) -> Self {
        Self { min_confidence }
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl TokenExtractor for TotalExtractor {
    type Output = Option<Decimal>;

    fn extract(&self, tokens: &[Token]) -> Option<Decimal> {
        let (index, normalized) = tokens.iter().enumerate().find_map(|(i, t)| {
            let normalized = normalize(&t.text);
            (normalized.contains(TOTAL_MARKER) && t.confidence > self.min_confidence)
                .then_some((i, normalized))
        })?;

        let total = MONEY
            .find(&normalized)
            .and_then(|m| parse_money(m.as_str()));

        match total {
            Some(amount) => debug!("Total {} from token {}", amount, index),
            None => debug!("Total marker at token {} has no amount: {:?}", index, normalized),
        }

        total
    }
}

/// Extract the total with the default policy.
pub fn extract_total(tokens: &[Token]) -> Option<Decimal> {
    TotalExtractor::default().extract(tokens)
}
