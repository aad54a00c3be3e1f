//! Per-frame detection filter.
//!
//! Only the first entry of a frame's detections is consulted. Acceptance is
//! decided on that entry alone, never on "most confident" or "any matching"
//! semantics.

use crate::config::ANIMAL_CLASS_ID;
use crate::detection::RawDetection;

/// Classification of one sampled frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Nothing usable: no detections, or the first one is below the threshold.
    NoDetection,
    /// First detection is an animal at or above the threshold.
    Accepted { confidence: f64 },
    /// First detection is a non-animal class at or above the threshold.
    Rejected { class_id: u32, confidence: f64 },
}

/// Verdict for one sample, tagged with where it was taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    pub second: u64,
    pub frame_pos: u64,
    pub verdict: Verdict,
}

impl FrameOutcome {
    /// Class id and confidence of the detection behind a non-empty verdict.
    pub fn detection(&self) -> Option<(u32, f64)> {
        match self.verdict {
            Verdict::NoDetection => None,
            Verdict::Accepted { confidence } => Some((ANIMAL_CLASS_ID, confidence)),
            Verdict::Rejected {
                class_id,
                confidence,
            } => Some((class_id, confidence)),
        }
    }
}

/// Classifies a frame from its ranked detections.
///
/// The threshold is inclusive: a first-ranked animal whose confidence equals
/// `min_confidence` is accepted.
pub fn classify_detections(detections: &[RawDetection], min_confidence: f64) -> Verdict {
    let Some(first) = detections.first() else {
        return Verdict::NoDetection;
    };
    if first.confidence < min_confidence {
        return Verdict::NoDetection;
    }
    if first.is_animal() {
        Verdict::Accepted {
            confidence: first.confidence,
        }
    } else {
        Verdict::Rejected {
            class_id: first.class_id,
            confidence: first.confidence,
        }
    }
}
