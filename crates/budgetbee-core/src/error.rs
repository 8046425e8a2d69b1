//! Error types for the budgetbee-core library.

use thiserror::Error;

/// Error type for the file-backed parts of the library (token files, configuration).
///
/// Scanning and expense validation report their own [`ScanError`] and [`ExpenseError`].
#[derive(Error, Debug)]
pub enum BeeError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by an OCR collaborator.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The source image could not be decoded.
    #[error("image unavailable: {0}")]
    ImageUnavailable(String),

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Outcomes where no receipt could be produced at all.
///
/// "Nothing found" is not one of these: an empty or partial receipt is a
/// successful scan with [`ExtractionStatus::NoData`](crate::ExtractionStatus).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// No OCR collaborator was configured for this scanner.
    #[error("receipt scanning is not available: no OCR engine configured")]
    OcrUnavailable,

    /// The collaborator could not decode the image.
    #[error("image unavailable: {0}")]
    ImageUnavailable(String),

    /// The collaborator failed after decoding.
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}

impl From<OcrError> for ScanError {
    fn from(err: OcrError) -> Self {
        match err {
            OcrError::ImageUnavailable(reason) => ScanError::ImageUnavailable(reason),
            other => ScanError::ExtractionFailed(other.to_string()),
        }
    }
}

/// Errors related to expense records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpenseError {
    /// Description is empty.
    #[error("description must not be empty")]
    EmptyDescription,

    /// Amount is zero or negative.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(String),
}

/// Error returned when a category name is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

/// Result type for the budgetbee library.
pub type Result<T> = std::result::Result<T, BeeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ocr_error_maps_to_scan_error() {
        let err: ScanError = OcrError::ImageUnavailable("truncated JPEG".into()).into();
        assert_eq!(err, ScanError::ImageUnavailable("truncated JPEG".into()));

        let err: ScanError = OcrError::Recognition("bad tensor".into()).into();
        assert!(matches!(err, ScanError::ExtractionFailed(msg) if msg.contains("bad tensor")));
    }

    #[test]
    fn test_token_file_errors() {
        let missing = std::env::temp_dir().join("budgetbee-no-such-tokens.json");
        assert!(matches!(crate::load_tokens(&missing), Err(BeeError::Io(_))));
        assert!(matches!(crate::tokens_from_json("[{\"text\": 1}]"), Err(BeeError::Json(_))));
    }
}
