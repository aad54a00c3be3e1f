//! Core library for scanning videos for animals.
//!
//! This crate samples one frame per second of a video, hands each frame to a
//! [`Detector`], keeps the frames whose first-ranked detection is an animal
//! at or above the confidence threshold, and reports the run through a
//! [`ScanReporter`].
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use critterscan_core::{ConsoleReporter, ScanConfigBuilder, ScriptedDetector, scan_video};
//! use std::path::Path;
//!
//! let config = ScanConfigBuilder::new()
//!     .min_confidence(0.5)
//!     .quiet(true)
//!     .build()
//!     .unwrap();
//!
//! let mut detector = ScriptedDetector::new();
//! let mut reporter = ConsoleReporter::stdout(&config);
//!
//! let summary = scan_video(
//!     Path::new("/path/to/clip.mp4"),
//!     640,
//!     &config,
//!     &mut detector,
//!     &mut reporter,
//! )
//! .unwrap();
//!
//! std::process::exit(if summary.animals_found() { 0 } else { 1 });
//! ```

pub mod config;
pub mod detection;
pub mod error;
pub mod media;
pub mod processing;
pub mod reporting;

// Re-exports for public API
pub use config::{DetectorConfig, ScanConfig, ScanConfigBuilder, validate_confidence};
pub use detection::{Detector, RawDetection, ScriptedDetector};
#[cfg(feature = "backend-tract")]
pub use detection::OnnxDetector;
pub use error::{CoreError, CoreResult};
pub use media::{FfmpegFrameSource, Frame, FrameSource, VideoMetadata, probe_metadata};
pub use processing::{AcceptedDetection, FrameOutcome, RunSummary, Verdict, run_sampler};
pub use reporting::{ConsoleReporter, NullReporter, ScanReporter};

use std::path::Path;

/// Scans the video at `path` and returns the run statistics.
///
/// Frames are decoded letterboxed to `frame_size` x `frame_size`, which must
/// match the input size `detector` expects. The config is validated before
/// the video is opened; an unreadable or unprobeable video is an error, while
/// individual frames that fail to decode are skipped.
pub fn scan_video<D, R>(
    path: &Path,
    frame_size: u32,
    config: &ScanConfig,
    detector: &mut D,
    reporter: &mut R,
) -> CoreResult<RunSummary>
where
    D: Detector + ?Sized,
    R: ScanReporter + ?Sized,
{
    config.validate()?;

    log::info!("Scanning {}", path.display());
    let mut source = FfmpegFrameSource::open(path, frame_size)?;
    log::debug!("Opened {:?} with {}", source.metadata(), detector.name());

    run_sampler(&mut source, detector, config, reporter)
}
