//! Pure Rust OCR collaborator using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::GenericImageView;
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;
use crate::models::token::Token;

use super::OcrCollaborator;

/// Height of a text row when ordering regions top-to-bottom, in pixels.
const ROW_HEIGHT: f32 = 20.0;

/// OCR collaborator backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrCollaborator {
    engine: pure_onnx_ocr::engine::OcrEngine,
    keep_unk: bool,
}

impl PureOcrCollaborator {
    /// Load the detection and recognition models named in the config.
    pub fn from_config(config: &OcrConfig) -> Result<Self, OcrError> {
        Self::from_paths(
            &config.model_path(&config.detection_model),
            &config.model_path(&config.recognition_model),
            &config.model_path(&config.dictionary),
            config.keep_unk,
        )
    }

    /// Load models from a directory using the default file names.
    pub fn from_dir(model_dir: &Path) -> Result<Self, OcrError> {
        let config = OcrConfig {
            model_dir: model_dir.to_path_buf(),
            ..OcrConfig::default()
        };
        Self::from_config(&config)
    }

    fn from_paths(
        det_path: &Path,
        rec_path: &Path,
        dict_path: &Path,
        keep_unk: bool,
    ) -> Result<Self, OcrError> {
        for path in [det_path, rec_path, dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!("missing {}", path.display())));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(det_path)
            .rec_model_path(rec_path)
            .dictionary_path(dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", det_path.display());

        Ok(Self { engine, keep_unk })
    }
}

impl OcrCollaborator for PureOcrCollaborator {
    fn name(&self) -> &str {
        "pure-onnx-ocr"
    }

    fn recognize(&self, image: &[u8]) -> Result<Vec<Token>, OcrError> {
        let start = Instant::now();

        let image = image::load_from_memory(image)
            .map_err(|e| OcrError::ImageUnavailable(e.to_string()))?;
        let (width, height) = image.dimensions();
        info!("Recognizing image: {}x{}", width, height);

        let results = self
            .engine
            .run_from_image(&image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let mut regions: Vec<(f32, f32, String, f32)> = results
            .iter()
            .map(|r| {
                let (x, y) = top_left(&r.bounding_box);
                let text = if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                (x, y, text, r.confidence)
            })
            .collect();

        // Reading order: rows top to bottom, then left to right
        regions.sort_by(|a, b| {
            let row_a = (a.1 / ROW_HEIGHT) as i32;
            let row_b = (b.1 / ROW_HEIGHT) as i32;
            row_a
                .cmp(&row_b)
                .then_with(|| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        });

        let tokens: Vec<Token> = regions
            .into_iter()
            .enumerate()
            .map(|(i, (_, _, text, confidence))| {
                Token::new(text, confidence.clamp(0.0, 1.0), i as u32)
            })
            .collect();

        info!(
            "OCR complete: {} tokens in {}ms",
            tokens.len(),
            start.elapsed().as_millis()
        );

        Ok(tokens)
    }
}

/// Minimum x and y over the region's exterior points.
fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32) {
    polygon
        .exterior()
        .coords()
        .fold((f32::INFINITY, f32::INFINITY), |(x, y), c| {
            (x.min(c.x as f32), y.min(c.y as f32))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_models_reported() {
        let dir = std::env::temp_dir().join("budgetbee-no-models-here");
        let err = PureOcrCollaborator::from_dir(&dir).err();
        assert!(matches!(err, Some(OcrError::ModelLoad(msg)) if msg.contains("det.onnx")));
    }
}
