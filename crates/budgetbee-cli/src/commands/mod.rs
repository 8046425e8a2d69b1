//! CLI subcommands.

pub mod add;
pub mod batch;
pub mod classify;
pub mod config;
pub mod ledger;
pub mod scan;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use budgetbee_core::models::config::BeeConfig;
use budgetbee_core::{Capabilities, PureOcrCollaborator, ReceiptParser, ReceiptScanner};

/// Settings shared by the commands that touch receipts or the ledger.
pub struct Context {
    pub config: BeeConfig,
    pub ledger_path: PathBuf,
}

impl Context {
    /// Resolve configuration: explicit file, then the user config file, then defaults.
    pub fn load(config_path: Option<&str>, ledger_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = load_config(config_path)?;
        let ledger_path = ledger_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.ledger.path.clone());

        Ok(Self {
            config,
            ledger_path,
        })
    }

    /// Build a scanner. OCR is enabled only if the models load.
    pub fn scanner(&self, model_dir: Option<&Path>) -> ReceiptScanner {
        let mut ocr_config = self.config.ocr.clone();
        if let Some(dir) = model_dir {
            ocr_config.model_dir = dir.to_path_buf();
        }

        let capabilities = match PureOcrCollaborator::from_config(&ocr_config) {
            Ok(engine) => {
                debug!("OCR models loaded from {}", ocr_config.model_dir.display());
                Capabilities::with_ocr(Arc::new(engine))
            }
            Err(e) => {
                warn!("Receipt OCR disabled: {}", e);
                Capabilities::none()
            }
        };

        self.scanner_with(capabilities)
    }

    /// Build a scanner with explicit capabilities.
    pub fn scanner_with(&self, capabilities: Capabilities) -> ReceiptScanner {
        ReceiptScanner::new(capabilities)
            .with_extractor(ReceiptParser::from_config(&self.config.extraction))
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("budgetbee")
        .join("config.json")
}

pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BeeConfig> {
    if let Some(path) = config_path {
        return Ok(BeeConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        Ok(BeeConfig::from_file(&default_path)?)
    } else {
        Ok(BeeConfig::default())
    }
}

/// File extensions handled as images.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "tiff"];

/// Lower-cased extension of a path.
pub fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
