//! Line-item reconstruction.
//!
//! Each confident token is examined on its own:
//!
//! 1. A token longer than three characters with an embedded amount becomes an
//!    item; the amounts are cut out of the text to form the description.
//! 2. Otherwise, if the next token is exactly an amount, the token's full text
//!    is paired with it.
//!
//! A token that is nothing but an amount is a price and yields no item itself.
//! Items are not deduplicated and prices are not sanity-checked, so a `TOTAL`
//! line followed by its amount, or a price with a stray symbol, shows up as an
//! item too.

use rust_decimal::Decimal;
use tracing::debug;

use super::patterns::{parse_money, MONEY, MONEY_EXACT};
use super::TokenExtractor;
use crate::models::receipt::LineItem;
use crate::models::token::Token;

/// Pairs descriptions with prices.
#[derive(Debug, Clone)]
pub struct ItemParser {
    min_confidence: f32,
}

impl ItemParser {
    pub fn new(min_confidence: f32) -> Self {
        Self { min_confidence }
    }

    /// Rule 1. `Some(None)` means the token carries an amount but yields no item
    /// of its own: it is a bare price, or the amount is out of range.
    fn embedded_item(text: &str) -> Option<Option<LineItem>> {
        let amount = MONEY.find(text)?;
        if text.chars().count() <= 3 {
            return None;
        }

        let Some(price) = parse_money(amount.as_str()) else {
            debug!("Unrepresentable amount {:?}; skipping token", amount.as_str());
            return Some(None);
        };
        let description = MONEY.replace_all(text, "");
        let description = description.trim();
        if description.is_empty() {
            return Some(None);
        }

        Some(Some(LineItem::new(description, price)))
    }

    /// Rule 2.
    fn following_price(next: Option<&Token>) -> Option<Decimal> {
        let text = next?.text.trim();
        if MONEY_EXACT.is_match(text) {
            parse_money(text)
        } else {
            None
        }
    }
}

impl Default for ItemParser {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl TokenExtractor for ItemParser {
    type Output = Vec<LineItem>;

    fn extract(&self, tokens: &[Token]) -> Vec<LineItem> {
        let mut items = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            if token.confidence <= self.min_confidence {
                continue;
            }

            match Self::embedded_item(&token.text) {
                Some(Some(item)) => {
                    debug!("Item from token {}: {:?} {}", i, item.description, item.price);
                    items.push(item);
                }
                Some(None) => {}
                None => {
                    if let Some(price) = Self::following_price(tokens.get(i + 1)) {
                        debug!("Item from tokens {}-{}: {:?} {}", i, i + 1, token.text, price);
                        items.push(LineItem::new(token.text.clone(), price));
                    }
                }
            }
        }

        items
    }
}

/// Parse line items with the default policy.
pub fn parse_items(tokens: &[Token]) -> Vec<LineItem> {
    ItemParser::default().extract(tokens)
}
