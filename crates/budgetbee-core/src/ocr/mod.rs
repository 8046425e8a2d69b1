//! Boundary to the OCR engine that produces token streams.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrCollaborator;

use std::fmt;
use std::sync::Arc;

use crate::error::OcrError;
use crate::models::token::Token;

/// An engine turning an encoded image into recognized tokens.
///
/// Calls are synchronous and may be slow. Retries and timeouts belong to the caller.
pub trait OcrCollaborator: Send + Sync {
    /// Short engine name for logs and reports.
    fn name(&self) -> &str;

    /// Recognize text in an encoded image (PNG, JPEG, ...).
    ///
    /// Tokens are returned in reading order with consecutive `order` values.
    fn recognize(&self, image: &[u8]) -> Result<Vec<Token>, OcrError>;
}

/// Optional capabilities handed to a scanner at construction.
#[derive(Clone, Default)]
pub struct Capabilities {
    ocr: Option<Arc<dyn OcrCollaborator>>,
}

impl Capabilities {
    /// No optional capabilities; image scanning is unavailable.
    pub fn none() -> Self {
        Self::default()
    }

    /// Enable image scanning with the given engine.
    pub fn with_ocr(ocr: Arc<dyn OcrCollaborator>) -> Self {
        Self { ocr: Some(ocr) }
    }

    pub fn ocr(&self) -> Option<&dyn OcrCollaborator> {
        self.ocr.as_deref()
    }

    pub fn ocr_available(&self) -> bool {
        self.ocr.is_some()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("ocr", &self.ocr.as_ref().map(|o| o.name().to_string()))
            .finish()
    }
}
