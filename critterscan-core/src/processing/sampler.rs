//! Per-second sampling loop.
//!
//! One sample is attempted per whole second of video, from second 0 up to and
//! including `duration_seconds`. The loop ends early at the first second
//! whose frame position falls past the last frame.

use super::aggregate::{RunAccumulator, RunSummary};
use super::filter::{FrameOutcome, classify_detections};
use crate::config::ScanConfig;
use crate::detection::Detector;
use crate::error::CoreResult;
use crate::media::{FrameSource, VideoMetadata};
use crate::reporting::ScanReporter;

/// A second offset and the frame index it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleIndex {
    pub second: u64,
    pub frame_pos: u64,
}

/// Samples that will be attempted for `metadata`, in chronological order.
///
/// Yields `min(duration_seconds + 1, N)` entries, where `N` is the first
/// second whose frame position is `>= total_frames`.
pub fn sample_schedule(metadata: &VideoMetadata) -> impl Iterator<Item = SampleIndex> + '_ {
    (0..=metadata.duration_seconds())
        .map(|second| SampleIndex {
            second,
            frame_pos: metadata.frame_position(second),
        })
        .take_while(|sample| sample.frame_pos < metadata.total_frames())
}

/// Length of the progress indicator for `metadata`: one unit per scheduled
/// second, including the ones the schedule cuts off.
pub fn total_progress_units(metadata: &VideoMetadata) -> u64 {
    metadata.duration_seconds() + 1
}

/// Drives one run: decode, detect, filter, aggregate and report every sample.
///
/// Frames that fail to decode are skipped. Detector failures count as "no
/// detections" for that frame. No single sample can abort the run.
pub fn run_sampler<S, D, R>(
    source: &mut S,
    detector: &mut D,
    config: &ScanConfig,
    reporter: &mut R,
) -> CoreResult<RunSummary>
where
    S: FrameSource + ?Sized,
    D: Detector + ?Sized,
    R: ScanReporter + ?Sized,
{
    let metadata = *source.metadata();
    reporter.run_started(&metadata, config.min_confidence);

    let mut accumulator = RunAccumulator::new();

    for SampleIndex { second, frame_pos } in sample_schedule(&metadata) {
        accumulator.record_attempt();

        match source.seek_and_decode(frame_pos) {
            Ok(Some(frame)) => {
                let detections = detector.detect(&frame, second).unwrap_or_else(|e| {
                    log::warn!(
                        "{} detector failed at second {} (frame {}): {}",
                        detector.name(),
                        second,
                        frame_pos,
                        e
                    );
                    Vec::new()
                });
                let outcome = FrameOutcome {
                    second,
                    frame_pos,
                    verdict: classify_detections(&detections, config.min_confidence),
                };
                accumulator.record_outcome(&outcome);
                reporter.frame_outcome(&outcome);
            }
            Ok(None) => {
                accumulator.record_skip();
                reporter.frame_skipped(second, frame_pos);
            }
            Err(e) => {
                log::debug!("Decode failed at second {second} (frame {frame_pos}): {e}");
                accumulator.record_skip();
                reporter.frame_skipped(second, frame_pos);
            }
        }

        reporter.sample_finished();
    }

    let summary = accumulator.finish(metadata.duration_seconds());
    log::debug!(
        "Run finished: {} attempted, {} processed, {} skipped, {} accepted",
        summary.samples_attempted,
        summary.samples_processed,
        summary.samples_skipped,
        summary.count_accepted()
    );
    reporter.run_finished(&summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(frame_rate: f64, total_frames: u64) -> Vec<SampleIndex> {
        let metadata = VideoMetadata::new(frame_rate, total_frames).unwrap();
        sample_schedule(&metadata).collect()
    }

    #[test]
    fn test_schedule_one_per_second() {
        let samples = schedule(30.0, 305);
        assert_eq!(samples.len(), 11);
        assert_eq!(samples[0], SampleIndex { second: 0, frame_pos: 0 });
        assert_eq!(samples[10], SampleIndex { second: 10, frame_pos: 300 });
    }

    #[test]
    fn test_schedule_stops_at_last_frame() {
        // duration 10, but second 10 maps to frame 10 == total_frames
        let samples = schedule(1.0, 10);
        assert_eq!(samples.len(), 10);
        assert_eq!(samples.last().unwrap().second, 9);
    }

    #[test]
    fn test_schedule_fractional_frame_rate() {
        let samples = schedule(29.97, 300);
        let positions: Vec<u64> = samples.iter().map(|s| s.frame_pos).collect();
        assert_eq!(positions, vec![0, 29, 59, 89, 119, 149, 179, 209, 239, 269, 299]);
    }

    #[test]
    fn test_progress_units_cover_whole_seconds() {
        let metadata = VideoMetadata::new(1.0, 10).unwrap();
        assert_eq!(total_progress_units(&metadata), 11);
        let metadata = VideoMetadata::new(25.0, 0).unwrap();
        assert_eq!(total_progress_units(&metadata), 1);
    }

    #[test]
    fn test_schedule_empty_video() {
        assert!(schedule(25.0, 0).is_empty());
        assert_eq!(schedule(25.0, 1).len(), 1);
    }
}
