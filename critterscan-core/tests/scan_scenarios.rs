// critterscan-core/tests/scan_scenarios.rs

use critterscan_core::detection::RawDetection;
use critterscan_core::processing::{FrameOutcome, RunSummary, run_sampler, total_progress_units};
use critterscan_core::reporting::{ConsoleReporter, NullReporter, ScanReporter};
use critterscan_core::{
    CoreError, CoreResult, Frame, FrameSource, ScanConfig, ScanConfigBuilder, ScriptedDetector,
    VideoMetadata,
};
use std::collections::HashSet;

// In-memory source: every frame is a 2x2 black image unless listed as broken.
struct MemorySource {
    metadata: VideoMetadata,
    unreadable: HashSet<u64>,
    missing: HashSet<u64>,
    decoded: Vec<u64>,
}

impl MemorySource {
    fn new(frame_rate: f64, total_frames: u64) -> Self {
        Self {
            metadata: VideoMetadata::new(frame_rate, total_frames).unwrap(),
            unreadable: HashSet::new(),
            missing: HashSet::new(),
            decoded: Vec::new(),
        }
    }

    fn with_unreadable(mut self, frame_index: u64) -> Self {
        self.unreadable.insert(frame_index);
        self
    }

    fn with_missing(mut self, frame_index: u64) -> Self {
        self.missing.insert(frame_index);
        self
    }
}

impl FrameSource for MemorySource {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn seek_and_decode(&mut self, frame_index: u64) -> CoreResult<Option<Frame>> {
        self.decoded.push(frame_index);
        if self.unreadable.contains(&frame_index) {
            return Err(CoreError::Decode(format!("corrupt packet at {frame_index}")));
        }
        if self.missing.contains(&frame_index) {
            return Ok(None);
        }
        Frame::new(2, 2, vec![0; 12]).map(Some)
    }
}

fn config(min_confidence: f64, quiet: bool) -> ScanConfig {
    ScanConfigBuilder::new()
        .min_confidence(min_confidence)
        .quiet(quiet)
        .build()
        .unwrap()
}

// Runs a scan and returns its summary together with the rendered output.
fn scan(
    source: &mut MemorySource,
    detector: &mut ScriptedDetector,
    config: &ScanConfig,
) -> (RunSummary, String) {
    let mut reporter = ConsoleReporter::new(Vec::new(), config);
    let summary = run_sampler(source, detector, config, &mut reporter).unwrap();
    let output = String::from_utf8(reporter.into_inner()).unwrap();
    (summary, output)
}

#[test]
fn test_single_animal_is_accepted() {
    let mut source = MemorySource::new(1.0, 10);
    let mut detector = ScriptedDetector::new().with_detections(3, vec![RawDetection::new(0, 0.9)]);

    let (summary, output) = scan(&mut source, &mut detector, &config(0.5, false));

    // second 10 maps to frame 10, past the last frame
    assert_eq!(summary.samples_attempted, 10);
    assert_eq!(summary.samples_processed, 10);
    assert_eq!(detector.calls(), (0..10).collect::<Vec<u64>>().as_slice());

    assert!(summary.animals_found());
    assert_eq!(summary.count_accepted(), 1);
    assert_eq!(summary.accepted[0].second, 3);
    assert_eq!(summary.accepted[0].frame_pos, 3);
    assert_eq!(summary.mean_confidence, Some(0.9));

    assert!(output.contains("Total seconds: 10"));
    assert!(output.contains("Detection at second 3 (frame 3) - class: 0 (animal) - confidence: 0.90"));
    assert!(output.contains("Detection seems to be animal, accept"));
    assert!(output.contains("Mean confidence of detected frames: 0.90"));
    assert!(output.contains("Found animals at 1 timestamps:"));
    assert!(output.contains("- Second 3 (frame 3) - confidence: 0.90"));
}

#[test]
fn test_non_animal_is_rejected() {
    let mut source = MemorySource::new(1.0, 10);
    let mut detector = ScriptedDetector::new().with_detections(3, vec![RawDetection::new(1, 0.9)]);

    let (summary, output) = scan(&mut source, &mut detector, &config(0.5, false));

    assert!(!summary.animals_found());
    assert_eq!(summary.mean_confidence, None);
    assert_eq!(
        output
            .matches("Detection seems *NOT* to be animal (1), reject")
            .count(),
        1
    );
    assert!(!output.contains("Mean confidence"));
    assert!(output.contains("No animals detected in video"));
}

#[test]
fn test_below_threshold_is_ignored() {
    let mut source = MemorySource::new(1.0, 10);
    let mut detector = ScriptedDetector::new().with_detections(3, vec![RawDetection::new(0, 0.9)]);

    let (summary, output) = scan(&mut source, &mut detector, &config(0.95, false));

    assert!(!summary.animals_found());
    assert!(!output.contains("Detection at second"));
}

#[test]
fn test_threshold_is_inclusive() {
    let mut source = MemorySource::new(1.0, 5);
    let mut detector = ScriptedDetector::new().with_detections(2, vec![RawDetection::new(0, 0.5)]);

    let (summary, _) = scan(&mut source, &mut detector, &config(0.5, true));

    assert_eq!(summary.count_accepted(), 1);
}

#[test]
fn test_only_first_detection_counts() {
    let mut source = MemorySource::new(1.0, 5);
    // A confident animal ranked second never rescues the frame.
    let mut detector = ScriptedDetector::new()
        .with_detections(1, vec![RawDetection::new(2, 0.6), RawDetection::new(0, 0.99)])
        .with_detections(2, vec![RawDetection::new(0, 0.3), RawDetection::new(1, 0.99)]);

    let (summary, output) = scan(&mut source, &mut detector, &config(0.5, false));

    assert!(!summary.animals_found());
    assert!(output.contains("Detection seems *NOT* to be animal (2), reject"));
    assert!(!output.contains("Detection at second 2"));
}

#[test]
fn test_mean_over_accepted_frames() {
    let mut source = MemorySource::new(25.0, 250);
    let mut detector = ScriptedDetector::new()
        .with_detections(1, vec![RawDetection::new(0, 0.6)])
        .with_detections(4, vec![RawDetection::new(1, 0.95)])
        .with_detections(8, vec![RawDetection::new(0, 0.8)]);

    let (summary, output) = scan(&mut source, &mut detector, &config(0.0, true));

    let seconds: Vec<u64> = summary.accepted.iter().map(|d| d.second).collect();
    assert_eq!(seconds, vec![1, 8]);
    let positions: Vec<u64> = summary.accepted.iter().map(|d| d.frame_pos).collect();
    assert_eq!(positions, vec![25, 200]);
    assert!((summary.mean_confidence.unwrap() - 0.7).abs() < 1e-9);

    // Quiet output keeps detection lines and the mean only.
    assert!(!output.contains("Video properties:"));
    assert!(!output.contains("Processing complete!"));
    assert!(output.contains("Mean confidence of detected frames: 0.70"));
}

#[test]
fn test_unreadable_frames_are_skipped() {
    let mut source = MemorySource::new(1.0, 10).with_unreadable(2).with_missing(5);
    let mut detector = ScriptedDetector::new()
        .with_detections(2, vec![RawDetection::new(0, 0.9)])
        .with_detections(6, vec![RawDetection::new(0, 0.7)]);

    let (summary, output) = scan(&mut source, &mut detector, &config(0.0, false));

    assert_eq!(summary.samples_attempted, 10);
    assert_eq!(summary.samples_skipped, 2);
    assert_eq!(summary.samples_processed, 8);
    assert_eq!(summary.count_accepted(), 1);
    assert_eq!(summary.accepted[0].second, 6);
    assert!(!detector.calls().contains(&2));
    assert!(!detector.calls().contains(&5));

    assert!(output.contains("Failed to read frame at second 2 (frame 2)"));
    assert!(output.contains("Failed to read frame at second 5 (frame 5)"));
    assert!(output.contains("Processed 8 seconds of video out of 10 total seconds"));
    assert!(output.contains("Skipped 2 unreadable frame(s)"));
}

#[test]
fn test_detector_failure_counts_as_no_detection() {
    let mut source = MemorySource::new(1.0, 6);
    let mut detector = ScriptedDetector::new()
        .with_failure(1)
        .with_detections(4, vec![RawDetection::new(0, 0.8)]);

    let (summary, _) = scan(&mut source, &mut detector, &config(0.0, true));

    assert_eq!(summary.samples_processed, 6);
    assert_eq!(summary.samples_skipped, 0);
    assert_eq!(summary.count_accepted(), 1);
    assert_eq!(detector.calls().len(), 6);
}

// Records every reporter event as counts.
#[derive(Default)]
struct CountingReporter {
    total_units: u64,
    ticks: u64,
    outcomes: u64,
    skips: u64,
    finished: bool,
}

impl ScanReporter for CountingReporter {
    fn run_started(&mut self, metadata: &VideoMetadata, _min_confidence: f64) {
        self.total_units = total_progress_units(metadata);
    }

    fn frame_skipped(&mut self, _second: u64, _frame_pos: u64) {
        self.skips += 1;
    }

    fn frame_outcome(&mut self, _outcome: &FrameOutcome) {
        self.outcomes += 1;
    }

    fn sample_finished(&mut self) {
        self.ticks += 1;
    }

    fn run_finished(&mut self, _summary: &RunSummary) {
        self.finished = true;
    }
}

#[test]
fn test_progress_advances_once_per_attempt() {
    let mut source = MemorySource::new(1.0, 10).with_unreadable(2).with_missing(5);
    let mut detector = ScriptedDetector::new()
        .with_failure(4)
        .with_detections(3, vec![RawDetection::new(1, 0.9)])
        .with_detections(7, vec![RawDetection::new(0, 0.8)]);
    let mut reporter = CountingReporter::default();

    let summary = run_sampler(&mut source, &mut detector, &config(0.0, true), &mut reporter).unwrap();

    // second 10 is scheduled but never attempted
    assert_eq!(reporter.total_units, 11);
    assert_eq!(reporter.ticks, 10);
    assert_eq!(reporter.ticks, summary.samples_attempted);
    assert_eq!(reporter.outcomes, 8);
    assert_eq!(reporter.skips, 2);
    assert_eq!(reporter.outcomes + reporter.skips, reporter.ticks);
    assert!(reporter.finished);
    assert_eq!(summary.count_accepted(), 1);
}

#[test]
fn test_frame_positions_follow_frame_rate() {
    let mut source = MemorySource::new(29.97, 300);
    let mut detector = ScriptedDetector::new();

    run_sampler(&mut source, &mut detector, &config(0.0, true), &mut NullReporter).unwrap();

    assert_eq!(
        source.decoded,
        vec![0, 29, 59, 89, 119, 149, 179, 209, 239, 269, 299]
    );
}

#[test]
fn test_empty_video_attempts_nothing() {
    let mut source = MemorySource::new(30.0, 0);
    let mut detector = ScriptedDetector::new();

    let (summary, output) = scan(&mut source, &mut detector, &config(0.0, false));

    assert_eq!(summary.samples_attempted, 0);
    assert!(source.decoded.is_empty());
    assert!(!summary.animals_found());
    assert!(output.contains("Processed 0 seconds of video out of 0 total seconds"));
    assert!(output.contains("No animals detected in video"));
}

#[test]
fn test_scan_video_rejects_missing_file() {
    let config = config(0.5, true);
    let mut detector = ScriptedDetector::new();
    let result = critterscan_core::scan_video(
        std::path::Path::new("surely/this/does/not/exist.mp4"),
        640,
        &config,
        &mut detector,
        &mut NullReporter,
    );
    assert!(matches!(result, Err(CoreError::VideoNotFound(_))));
    assert!(detector.calls().is_empty());
}

#[test]
fn test_scan_video_validates_config_first() {
    let config = ScanConfig {
        min_confidence: 1.5,
        ..ScanConfig::default()
    };
    let mut detector = ScriptedDetector::new();
    let result = critterscan_core::scan_video(
        std::path::Path::new("surely/this/does/not/exist.mp4"),
        640,
        &config,
        &mut detector,
        &mut NullReporter,
    );
    assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
}
