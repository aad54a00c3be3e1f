//! Implementation of the scan command.
//!
//! Validates the arguments in a fixed order (confidence, video path, model),
//! then delegates the run to critterscan-core.

use crate::cli::Cli;
use crate::error::CliResult;

use critterscan_core::{
    ConsoleReporter, CoreError, DetectorConfig, OnnxDetector, ScanConfig, ScanConfigBuilder,
    scan_video, validate_confidence,
};

use std::process::ExitCode;
use std::time::Instant;

use log::info;
use supports_color::Stream;

/// Verdict of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    AnimalsFound,
    NothingFound,
}

impl ScanOutcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            ScanOutcome::AnimalsFound => ExitCode::SUCCESS,
            ScanOutcome::NothingFound => ExitCode::from(1),
        }
    }
}

/// Builds the run configuration from the parsed arguments.
pub fn scan_config(args: &Cli) -> CliResult<ScanConfig> {
    ScanConfigBuilder::new()
        .min_confidence(args.confidence)
        .quiet(args.quiet)
        .show_progress(args.progress)
        .build()
}

/// Builds the detector configuration from the parsed arguments.
pub fn detector_config(args: &Cli) -> DetectorConfig {
    DetectorConfig {
        input_size: args.input_size,
        iou_threshold: args.iou,
        ..DetectorConfig::new(&args.model)
    }
}

/// Runs a full scan for `args`.
///
/// Returns an error for invalid input before any video is opened; a run that
/// completes without accepted detections is `Ok(ScanOutcome::NothingFound)`.
pub fn run_scan(args: &Cli) -> CliResult<ScanOutcome> {
    validate_confidence(args.confidence)?;

    if !args.video_path.is_file() {
        return Err(CoreError::VideoNotFound(
            args.video_path.display().to_string(),
        ));
    }

    let config = scan_config(args)?;
    let mut detector = OnnxDetector::load(detector_config(args))?;

    let color = supports_color::on(Stream::Stdout).is_some();
    let mut reporter = ConsoleReporter::stdout(&config).with_color(color);

    let start = Instant::now();
    let summary = scan_video(
        &args.video_path,
        args.input_size,
        &config,
        &mut detector,
        &mut reporter,
    )?;
    info!(
        "Scanned {} in {:.1}s ({} accepted)",
        args.video_path.display(),
        start.elapsed().as_secs_f64(),
        summary.count_accepted()
    );

    Ok(if summary.animals_found() {
        ScanOutcome::AnimalsFound
    } else {
        ScanOutcome::NothingFound
    })
}
