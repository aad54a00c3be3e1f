//! Detector seam and detector backends.
//!
//! A detector receives one decoded frame and returns its detections in the
//! detector's own ranking order. The core never re-sorts that order: the
//! frame filter only ever looks at the first entry.

mod postprocess;
mod scripted;

#[cfg(feature = "backend-tract")]
mod onnx;

pub use postprocess::{decode_yolo_output, non_max_suppression};
pub use scripted::ScriptedDetector;

#[cfg(feature = "backend-tract")]
pub use onnx::OnnxDetector;

use crate::config::ANIMAL_CLASS_ID;
use crate::error::CoreResult;
use crate::media::Frame;

/// Axis-aligned box in normalized `[0, 1]` image coordinates (x1, y1, x2, y2).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn area(&self) -> f32 {
        (self.x2 - self.x1).max(0.0) * (self.y2 - self.y1).max(0.0)
    }

    /// Intersection over union with `other`; zero when either box is empty.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let ix1 = self.x1.max(other.x1);
        let iy1 = self.y1.max(other.y1);
        let ix2 = self.x2.min(other.x2);
        let iy2 = self.y2.min(other.y2);
        let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
        let union = self.area() + other.area() - inter;
        if union <= 0.0 { 0.0 } else { inter / union }
    }
}

/// One entry of a detector's output for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawDetection {
    pub class_id: u32,
    /// Score in `[0, 1]`.
    pub confidence: f64,
    pub bbox: BoundingBox,
}

impl RawDetection {
    /// A detection without a meaningful box.
    pub fn new(class_id: u32, confidence: f64) -> Self {
        Self {
            class_id,
            confidence,
            bbox: BoundingBox::default(),
        }
    }

    pub fn is_animal(&self) -> bool {
        self.class_id == ANIMAL_CLASS_ID
    }
}

/// Single-image object detector.
///
/// The model behind a detector is loaded once and reused for every frame of
/// a run. `frame_id` is opaque to the detector and only used for logging.
pub trait Detector {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Runs detection on one frame, returning detections in ranking order.
    fn detect(&mut self, frame: &Frame, frame_id: u64) -> CoreResult<Vec<RawDetection>>;
}

/// Human-readable name of a MegaDetector class id.
pub fn class_label(class_id: u32) -> String {
    match class_id {
        0 => "animal".to_string(),
        1 => "person".to_string(),
        2 => "vehicle".to_string(),
        other => format!("class {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iou() {
        let a = BoundingBox { x1: 0.0, y1: 0.0, x2: 0.5, y2: 0.5 };
        let b = BoundingBox { x1: 0.25, y1: 0.0, x2: 0.75, y2: 0.5 };
        assert!((a.iou(&a) - 1.0).abs() < 1e-6);
        assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-6);

        let far = BoundingBox { x1: 0.8, y1: 0.8, x2: 0.9, y2: 0.9 };
        assert_eq!(a.iou(&far), 0.0);
        assert_eq!(BoundingBox::default().iou(&BoundingBox::default()), 0.0);
    }

    #[test]
    fn test_class_label() {
        assert_eq!(class_label(0), "animal");
        assert_eq!(class_label(2), "vehicle");
        assert_eq!(class_label(7), "class 7");
        assert!(RawDetection::new(0, 0.5).is_animal());
        assert!(!RawDetection::new(1, 0.5).is_animal());
    }
}
