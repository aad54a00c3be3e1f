// critterscan-cli/src/config.rs
//
// Defines default configuration constants for the `critterscan-cli`
// application. Detector defaults come from critterscan-core.

use critterscan_core::config;

pub const DEFAULT_CONFIDENCE: f64 = config::DEFAULT_MIN_CONFIDENCE;
pub const DEFAULT_MODEL_PATH: &str = config::DEFAULT_MODEL_PATH;
pub const DEFAULT_INPUT_SIZE: u32 = config::DEFAULT_INPUT_SIZE;
pub const DEFAULT_IOU: f32 = config::DEFAULT_IOU_THRESHOLD;
