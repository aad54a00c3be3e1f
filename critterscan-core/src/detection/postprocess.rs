//! Decoding of YOLO detection heads and non-maximum suppression.
//!
//! Kept free of any inference runtime so it can be tested on hand-built
//! tensors.

use std::cmp::Ordering;

use super::{BoundingBox, RawDetection};
use crate::error::{CoreError, CoreResult};

/// Decodes a YOLO head of shape `[1, 4 + classes, anchors]` (or the
/// transposed `[1, anchors, 4 + classes]`) into ranked detections.
///
/// Box coordinates are centre/size in input pixels and come back normalized
/// to `[0, 1]`. Each anchor keeps its best class; anchors scoring below
/// `candidate_confidence` are dropped, the rest go through per-class NMS and
/// are returned by descending confidence.
pub fn decode_yolo_output(
    data: &[f32],
    shape: &[usize],
    input_size: u32,
    candidate_confidence: f32,
    iou_threshold: f32,
) -> CoreResult<Vec<RawDetection>> {
    let (rows, cols) = match shape {
        [1, a, b] | [a, b] => (*a, *b),
        _ => {
            return Err(CoreError::Detector(format!(
                "unexpected detector output shape {shape:?}"
            )));
        }
    };
    if data.len() != rows * cols {
        return Err(CoreError::Detector(format!(
            "output holds {} values, shape {shape:?} needs {}",
            data.len(),
            rows * cols
        )));
    }

    // Heads carry far more anchors than channels.
    let channels_first = rows <= cols;
    let (channels, anchors) = if channels_first { (rows, cols) } else { (cols, rows) };
    if channels < 5 {
        return Err(CoreError::Detector(format!(
            "output shape {shape:?} has no class scores"
        )));
    }
    let value = |anchor: usize, channel: usize| -> f32 {
        if channels_first {
            data[channel * anchors + anchor]
        } else {
            data[anchor * channels + channel]
        }
    };

    let scale = input_size as f32;
    let mut candidates = Vec::new();
    for anchor in 0..anchors {
        let (class_id, score) = (4..channels)
            .map(|c| (c - 4, value(anchor, c)))
            .fold((0usize, f32::NEG_INFINITY), |best, cur| {
                if cur.1 > best.1 { cur } else { best }
            });
        if !score.is_finite() || score < candidate_confidence {
            continue;
        }

        let (cx, cy, w, h) = (
            value(anchor, 0),
            value(anchor, 1),
            value(anchor, 2),
            value(anchor, 3),
        );
        let bbox = BoundingBox {
            x1: ((cx - w / 2.0) / scale).clamp(0.0, 1.0),
            y1: ((cy - h / 2.0) / scale).clamp(0.0, 1.0),
            x2: ((cx + w / 2.0) / scale).clamp(0.0, 1.0),
            y2: ((cy + h / 2.0) / scale).clamp(0.0, 1.0),
        };
        candidates.push(RawDetection {
            class_id: class_id as u32,
            confidence: f64::from(score.clamp(0.0, 1.0)),
            bbox,
        });
    }

    log::trace!("{} candidates above {}", candidates.len(), candidate_confidence);
    Ok(non_max_suppression(candidates, iou_threshold))
}

/// Greedy per-class NMS. Returns survivors by descending confidence; ties
/// keep their input order.
pub fn non_max_suppression(mut detections: Vec<RawDetection>, iou_threshold: f32) -> Vec<RawDetection> {
    detections.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    let mut kept: Vec<RawDetection> = Vec::with_capacity(detections.len());
    for det in detections {
        let suppressed = kept
            .iter()
            .any(|k| k.class_id == det.class_id && k.bbox.iou(&det.bbox) > iou_threshold);
        if !suppressed {
            kept.push(det);
        }
    }
    kept
}
