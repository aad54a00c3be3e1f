// critterscan-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_CONFIDENCE, DEFAULT_INPUT_SIZE, DEFAULT_IOU, DEFAULT_MODEL_PATH};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "CritterScan: Detect animals in video file",
    long_about = "Samples one frame per second of a video, runs an animal detector on it \
                  and exits with 0 when at least one frame shows an animal."
)]
pub struct Cli {
    /// Path to the video file
    #[arg(required = true, value_name = "VIDEO_PATH")]
    pub video_path: PathBuf,

    /// Quiet mode - only show frames with detections
    #[arg(short, long)]
    pub quiet: bool,

    /// Show progress bar
    #[arg(short, long)]
    pub progress: bool,

    /// Minimum confidence threshold (0.0 to 1.0)
    #[arg(
        short,
        long,
        value_name = "THRESHOLD",
        default_value_t = DEFAULT_CONFIDENCE,
        allow_negative_numbers = true
    )]
    pub confidence: f64,

    // --- Detector ---
    /// ONNX detector weights.
    /// Can also be set via the CRITTERSCAN_MODEL environment variable.
    #[arg(short, long, value_name = "MODEL_PATH", env = "CRITTERSCAN_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Square input resolution the model expects (multiple of 32)
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_INPUT_SIZE)]
    pub input_size: u32,

    /// Overlap threshold for merging boxes of the same class
    #[arg(long, value_name = "IOU", default_value_t = DEFAULT_IOU)]
    pub iou: f32,
}
