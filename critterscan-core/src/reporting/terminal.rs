// ============================================================================
// critterscan-core/src/reporting/terminal.rs
// ============================================================================
//
// CONSOLE REPORTER: Human-readable run output
//
// Renders the metadata banner, one line pair per accepted or rejected frame,
// skip diagnostics and the end-of-run summary. Quiet mode keeps only the
// detection lines and the mean confidence. Lines are written as they happen;
// while a progress bar is visible they are printed above it.

use std::io::{self, Write};

use console::style;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;

use super::ScanReporter;
use super::progress::sample_progress_bar;
use crate::config::ScanConfig;
use crate::detection::class_label;
use crate::media::VideoMetadata;
use crate::processing::{FrameOutcome, RunSummary, Verdict, total_progress_units};

/// Reporter writing plain text lines to `W` (stdout in the CLI).
pub struct ConsoleReporter<W: Write> {
    out: W,
    quiet: bool,
    show_progress: bool,
    color: bool,
    progress: Option<ProgressBar>,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(config: &ScanConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, config: &ScanConfig) -> Self {
        Self {
            out,
            quiet: config.quiet,
            show_progress: config.show_progress,
            color: false,
            progress: None,
        }
    }

    /// Enables ANSI styling of headings and verdicts.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) {
        let out = &mut self.out;
        let result = match &self.progress {
            Some(pb) => pb.suspend(|| writeln!(out, "{line}")),
            None => writeln!(out, "{line}"),
        };
        if let Err(e) = result {
            log::debug!("Failed to write report line: {e}");
        }
    }

    fn heading(&self, text: &str) -> String {
        style(text).bold().force_styling(self.color).to_string()
    }

    fn finish_progress(&mut self) {
        if let Some(pb) = self.progress.take() {
            pb.finish_and_clear();
        }
    }
}

impl<W: Write> ScanReporter for ConsoleReporter<W> {
    fn run_started(&mut self, metadata: &VideoMetadata, min_confidence: f64) {
        if !self.quiet {
            let heading = self.heading("Video properties:");
            self.emit(&heading);
            self.emit(&format!("FPS: {}", metadata.frame_rate()));
            self.emit(&format!("Total frames: {}", metadata.total_frames()));
            self.emit(&format!("Total seconds: {}", metadata.duration_seconds()));
            self.emit(&format!("Minimum confidence threshold: {min_confidence}"));
        }
        if self.show_progress {
            self.progress = Some(sample_progress_bar(total_progress_units(metadata)));
        }
    }

    fn frame_skipped(&mut self, second: u64, frame_pos: u64) {
        if !self.quiet {
            self.emit(&format!(
                "Failed to read frame at second {second} (frame {frame_pos})"
            ));
        }
    }

    fn frame_outcome(&mut self, outcome: &FrameOutcome) {
        let Some(line) = format_detection_line(outcome) else {
            return;
        };
        self.emit(&line);
        if let Some(verdict) = format_verdict_line(&outcome.verdict) {
            let verdict = match outcome.verdict {
                Verdict::Accepted { .. } if self.color => verdict.green().to_string(),
                Verdict::Rejected { .. } if self.color => verdict.yellow().to_string(),
                _ => verdict,
            };
            self.emit(&verdict);
        }
    }

    fn sample_finished(&mut self) {
        if let Some(pb) = &self.progress {
            pb.inc(1);
        }
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        self.finish_progress();

        if let Some(mean) = summary.mean_confidence {
            self.emit("");
            self.emit(&format!("Mean confidence of detected frames: {mean:.2}"));
        }

        if self.quiet {
            return;
        }

        self.emit("");
        let heading = self.heading("Processing complete!");
        self.emit(&heading);
        self.emit(&format!(
            "Processed {} seconds of video out of {} total seconds",
            summary.samples_processed, summary.duration_seconds
        ));
        if summary.samples_skipped > 0 {
            self.emit(&format!(
                "Skipped {} unreadable frame(s)",
                summary.samples_skipped
            ));
        }

        if summary.animals_found() {
            self.emit(&format!(
                "Found animals at {} timestamps:",
                summary.count_accepted()
            ));
            let lines: Vec<String> = summary
                .accepted
                .iter()
                .map(|d| {
                    format!(
                        "- Second {} (frame {}) - confidence: {:.2}",
                        d.second, d.frame_pos, d.confidence
                    )
                })
                .collect();
            for line in lines {
                self.emit(&line);
            }
        } else {
            self.emit("No animals detected in video");
        }
    }
}

/// First line printed for an accepted or rejected frame.
pub fn format_detection_line(outcome: &FrameOutcome) -> Option<String> {
    let (class_id, confidence) = outcome.detection()?;
    Some(format!(
        "Detection at second {} (frame {}) - class: {} ({}) - confidence: {:.2}",
        outcome.second,
        outcome.frame_pos,
        class_id,
        class_label(class_id),
        confidence
    ))
}

/// Verdict line following [`format_detection_line`].
pub fn format_verdict_line(verdict: &Verdict) -> Option<String> {
    match verdict {
        Verdict::NoDetection => None,
        Verdict::Accepted { .. } => Some("Detection seems to be animal, accept".to_string()),
        Verdict::Rejected { class_id, .. } => Some(format!(
            "Detection seems *NOT* to be animal ({class_id}), reject"
        )),
    }
}
