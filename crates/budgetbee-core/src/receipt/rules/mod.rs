//! Rule-based field extractors for receipt token streams.

pub mod items;
pub mod patterns;
pub mod total;
pub mod vendor;

pub use items::{parse_items, ItemParser};
pub use patterns::{normalize, parse_money};
pub use total::{extract_total, TotalExtractor};
pub use vendor::{locate_vendor, VendorLocator};

use crate::models::token::Token;

/// Trait for extractors that read a whole token stream.
pub trait TokenExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from the tokens, in recognition order.
    fn extract(&self, tokens: &[Token]) -> Self::Output;
}
