//! Run reporting.
//!
//! The sampler notifies a [`ScanReporter`] of every step of a run. The
//! [`ConsoleReporter`] renders the banner, per-frame detection lines and the
//! end-of-run summary; [`NullReporter`] discards everything.

mod terminal;
mod progress;

pub use terminal::{ConsoleReporter, format_detection_line, format_verdict_line};
pub use progress::sample_progress_bar;

use crate::media::VideoMetadata;
use crate::processing::{FrameOutcome, RunSummary};

/// Receives the events of a scan run, in order.
pub trait ScanReporter {
    /// Called once before the first sample.
    fn run_started(&mut self, _metadata: &VideoMetadata, _min_confidence: f64) {}

    /// A sample whose frame could not be decoded.
    fn frame_skipped(&mut self, _second: u64, _frame_pos: u64) {}

    /// A sample that was decoded and judged, whatever the verdict.
    fn frame_outcome(&mut self, _outcome: &FrameOutcome) {}

    /// Called after every attempted sample, skipped or not.
    fn sample_finished(&mut self) {}

    /// Called once with the final statistics.
    fn run_finished(&mut self, _summary: &RunSummary) {}
}

/// Reporter that discards all updates.
pub struct NullReporter;

impl ScanReporter for NullReporter {}
