//! Data models for receipts, tokens, categories, the ledger, and configuration.

pub mod category;
pub mod config;
pub mod ledger;
pub mod receipt;
pub mod token;
