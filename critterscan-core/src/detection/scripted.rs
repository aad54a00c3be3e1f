use std::collections::{HashMap, HashSet};

use super::{Detector, RawDetection};
use crate::error::{CoreError, CoreResult};
use crate::media::Frame;

/// Detector that replays a fixed script keyed by frame id.
///
/// Frames without a script entry yield no detections. Used to exercise the
/// pipeline without model weights.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDetector {
    script: HashMap<u64, Vec<RawDetection>>,
    failing: HashSet<u64>,
    calls: Vec<u64>,
}

impl ScriptedDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `detections`, in this order, for `frame_id`.
    pub fn with_detections(mut self, frame_id: u64, detections: Vec<RawDetection>) -> Self {
        self.script.insert(frame_id, detections);
        self
    }

    /// Makes the call for `frame_id` fail.
    pub fn with_failure(mut self, frame_id: u64) -> Self {
        self.failing.insert(frame_id);
        self
    }

    /// Frame ids passed to `detect`, in call order.
    pub fn calls(&self) -> &[u64] {
        &self.calls
    }
}

impl Detector for ScriptedDetector {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn detect(&mut self, _frame: &Frame, frame_id: u64) -> CoreResult<Vec<RawDetection>> {
        self.calls.push(frame_id);
        if self.failing.contains(&frame_id) {
            return Err(CoreError::Detector(format!(
                "scripted failure for frame {frame_id}"
            )));
        }
        Ok(self.script.get(&frame_id).cloned().unwrap_or_default())
    }
}
