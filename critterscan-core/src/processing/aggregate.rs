//! Cross-frame accumulation of accepted detections.

use super::filter::{FrameOutcome, Verdict};

/// One accepted sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptedDetection {
    pub second: u64,
    pub frame_pos: u64,
    pub confidence: f64,
}

/// Mutable run state. Created empty at run start and consumed once by
/// [`RunAccumulator::finish`].
#[derive(Debug, Default)]
pub struct RunAccumulator {
    accepted: Vec<AcceptedDetection>,
    attempted: u64,
    processed: u64,
    skipped: u64,
}

impl RunAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a sample whose frame position was in range.
    pub fn record_attempt(&mut self) {
        self.attempted += 1;
    }

    /// Counts a sample whose frame could not be decoded.
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Counts a processed sample; only accepted verdicts feed the statistics.
    pub fn record_outcome(&mut self, outcome: &FrameOutcome) {
        self.processed += 1;
        if let Verdict::Accepted { confidence } = outcome.verdict {
            self.accepted.push(AcceptedDetection {
                second: outcome.second,
                frame_pos: outcome.frame_pos,
                confidence,
            });
        }
    }

    pub fn finish(self, duration_seconds: u64) -> RunSummary {
        let mean_confidence = mean(self.accepted.iter().map(|d| d.confidence));
        RunSummary {
            accepted: self.accepted,
            mean_confidence,
            samples_attempted: self.attempted,
            samples_processed: self.processed,
            samples_skipped: self.skipped,
            duration_seconds,
        }
    }
}

/// End-of-run statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Accepted samples in chronological order
    pub accepted: Vec<AcceptedDetection>,
    /// Absent when nothing was accepted
    pub mean_confidence: Option<f64>,
    pub samples_attempted: u64,
    pub samples_processed: u64,
    pub samples_skipped: u64,
    pub duration_seconds: u64,
}

impl RunSummary {
    pub fn count_accepted(&self) -> usize {
        self.accepted.len()
    }

    /// True iff at least one sample was accepted.
    pub fn animals_found(&self) -> bool {
        !self.accepted.is_empty()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0u64), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
