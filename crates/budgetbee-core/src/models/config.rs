//! Configuration structures for BudgetBee.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BeeError, Result};

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeeConfig {
    /// OCR collaborator configuration.
    pub ocr: OcrConfig,

    /// Receipt extraction thresholds.
    pub extraction: ExtractionConfig,

    /// Expense ledger location.
    pub ledger: LedgerConfig,
}

/// OCR collaborator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` markers in recognized text instead of replacing them with spaces.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

/// Receipt extraction thresholds. All confidence comparisons are strict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of leading tokens considered for the vendor name.
    pub vendor_window: usize,

    /// Confidence a vendor token must exceed.
    pub vendor_min_confidence: f32,

    /// Confidence a TOTAL marker token must exceed.
    pub total_min_confidence: f32,

    /// Confidence a line-item token must exceed.
    pub item_min_confidence: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            vendor_window: 3,
            vendor_min_confidence: 0.4,
            total_min_confidence: 0.3,
            item_min_confidence: 0.3,
        }
    }
}

/// Ledger file configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// CSV file holding committed expenses.
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("expenses.csv"),
        }
    }
}

impl OcrConfig {
    /// Full path to a model file.
    pub fn model_path(&self, file_name: &str) -> PathBuf {
        self.model_dir.join(file_name)
    }
}

impl BeeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| BeeError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
