//! OCR token stream.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One recognized text fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Recognized text.
    pub text: String,

    /// Recognition confidence (0.0 - 1.0).
    pub confidence: f32,

    /// Index in the recognition sequence.
    #[serde(default)]
    pub order: u32,
}

impl Token {
    pub fn new(text: impl Into<String>, confidence: f32, order: u32) -> Self {
        Self {
            text: text.into(),
            confidence,
            order,
        }
    }

    /// Build a token stream from `(text, confidence)` pairs, numbering them in sequence.
    pub fn sequence<'a, I>(pairs: I) -> Vec<Token>
    where
        I: IntoIterator<Item = (&'a str, f32)>,
    {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (text, confidence))| Token::new(text, confidence, i as u32))
            .collect()
    }
}

/// Stable sort by recognition order. Tokens sharing an index keep their relative position.
pub fn sort_tokens(tokens: &mut [Token]) {
    tokens.sort_by_key(|t| t.order);
}

/// Parse a JSON array of tokens and put it in recognition order.
pub fn tokens_from_json(json: &str) -> Result<Vec<Token>> {
    let mut tokens: Vec<Token> = serde_json::from_str(json)?;
    sort_tokens(&mut tokens);
    Ok(tokens)
}

/// Read a JSON token file.
pub fn load_tokens(path: &Path) -> Result<Vec<Token>> {
    let content = std::fs::read_to_string(path)?;
    tokens_from_json(&content)
}
