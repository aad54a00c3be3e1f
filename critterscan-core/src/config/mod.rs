//! Configuration structures and constants for the critterscan-core library.
//!
//! This module provides the configuration for a scan run (confidence
//! threshold, verbosity, progress display) and for the ONNX detector
//! adapter (model path, input size, NMS parameters).

mod builder;

use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};

pub use builder::ScanConfigBuilder;

// Default constants

/// Class id the detector assigns to animals. Every other id is a non-animal.
pub const ANIMAL_CLASS_ID: u32 = 0;

/// Default minimum confidence. Any first-ranked animal detection is accepted.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.0;

/// Default location of the detector weights.
pub const DEFAULT_MODEL_PATH: &str = "models/md_v6-yolov9-c.onnx";

/// Square input resolution of the MegaDetector v6 exports.
pub const DEFAULT_INPUT_SIZE: u32 = 640;

/// Overlap above which two boxes of the same class are merged by NMS.
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.45;

/// Candidates scoring below this never leave the detector.
pub const DEFAULT_CANDIDATE_CONFIDENCE: f32 = 0.2;

/// Settings for a single scan run.
///
/// Created by the consumer of the library (e.g., critterscan-cli) and passed
/// to [`crate::scan_video`]. Use [`ScanConfigBuilder`] for a fluent API.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Minimum confidence (inclusive) a first-ranked detection needs before
    /// it is accepted or rejected. Range: 0.0-1.0.
    pub min_confidence: f64,

    /// Suppress the metadata banner, skip diagnostics and the full summary.
    pub quiet: bool,

    /// Show a progress bar advancing once per attempted second.
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            quiet: false,
            show_progress: false,
        }
    }
}

impl ScanConfig {
    /// Checks that the confidence threshold lies in `[0.0, 1.0]`.
    pub fn validate(&self) -> CoreResult<()> {
        validate_confidence(self.min_confidence)
    }
}

/// Returns an error unless `value` is a finite number in `[0.0, 1.0]`.
pub fn validate_confidence(value: f64) -> CoreResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidConfig(
            "Confidence threshold must be between 0.0 and 1.0".to_string(),
        ))
    }
}

/// Settings for the ONNX detector adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Path to the ONNX weights
    pub model_path: PathBuf,

    /// Side length of the square model input in pixels
    pub input_size: u32,

    /// IoU threshold used by non-maximum suppression
    pub iou_threshold: f32,

    /// Candidate floor applied before NMS
    pub candidate_confidence: f32,
}

impl DetectorConfig {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            input_size: DEFAULT_INPUT_SIZE,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            candidate_confidence: DEFAULT_CANDIDATE_CONFIDENCE,
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.input_size == 0 || self.input_size % 32 != 0 {
            return Err(CoreError::InvalidConfig(format!(
                "Model input size must be a positive multiple of 32, got {}",
                self.input_size
            )));
        }
        if !(self.iou_threshold > 0.0 && self.iou_threshold <= 1.0) {
            return Err(CoreError::InvalidConfig(format!(
                "IoU threshold must be in (0.0, 1.0], got {}",
                self.iou_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.candidate_confidence) {
            return Err(CoreError::InvalidConfig(format!(
                "Candidate confidence must be in [0.0, 1.0], got {}",
                self.candidate_confidence
            )));
        }
        Ok(())
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_PATH)
    }
}
