// ============================================================================
// critterscan-core/src/detection/onnx.rs
// ============================================================================
//
// ONNX DETECTOR: MegaDetector-style YOLO inference on tract
//
// Loads a local ONNX export once, then runs it on letterboxed RGB frames.
// The raw head is decoded by `postprocess::decode_yolo_output`, which returns
// detections ranked by confidence.

use std::path::Path;

use anyhow::{Context, anyhow};
use tract_onnx::prelude::*;

use super::{Detector, RawDetection, decode_yolo_output};
use crate::config::DetectorConfig;
use crate::error::{CoreError, CoreResult};
use crate::media::Frame;

/// Tract-backed detector for YOLO ONNX exports.
pub struct OnnxDetector {
    model: TypedRunnableModel<TypedModel>,
    config: DetectorConfig,
}

impl OnnxDetector {
    /// Loads and optimizes the model described by `config`.
    pub fn load(config: DetectorConfig) -> CoreResult<Self> {
        config.validate()?;
        let model = load_model(&config.model_path, config.input_size)
            .map_err(|e| CoreError::Detector(format!("{e:#}")))?;
        log::info!(
            "Loaded detector model {} ({}x{})",
            config.model_path.display(),
            config.input_size,
            config.input_size
        );
        Ok(Self { model, config })
    }

    fn build_input(&self, frame: &Frame) -> anyhow::Result<Tensor> {
        let size = self.config.input_size;
        if frame.width != size || frame.height != size {
            return Err(anyhow!(
                "frame size {}x{} does not match model input {}x{}",
                frame.width,
                frame.height,
                size,
                size
            ));
        }

        let width = frame.width as usize;
        let pixels = &frame.pixels;
        let input = tract_ndarray::Array4::from_shape_fn(
            (1, 3, frame.height as usize, width),
            |(_, channel, y, x)| pixels[(y * width + x) * 3 + channel] as f32 / 255.0,
        );
        Ok(input.into_tensor())
    }

    fn infer(&self, frame: &Frame) -> anyhow::Result<Vec<RawDetection>> {
        let input = self.build_input(frame)?;
        let outputs = self
            .model
            .run(tvec!(input.into()))
            .context("ONNX inference failed")?;
        let output = outputs
            .first()
            .ok_or_else(|| anyhow!("model produced no outputs"))?;
        let view = output
            .to_array_view::<f32>()
            .context("model output tensor was not f32")?;
        let shape = view.shape().to_vec();
        let data: Vec<f32> = view.iter().copied().collect();

        decode_yolo_output(
            &data,
            &shape,
            self.config.input_size,
            self.config.candidate_confidence,
            self.config.iou_threshold,
        )
        .map_err(|e| anyhow!(e))
    }
}

impl Detector for OnnxDetector {
    fn name(&self) -> &'static str {
        "onnx"
    }

    fn detect(&mut self, frame: &Frame, frame_id: u64) -> CoreResult<Vec<RawDetection>> {
        let detections = self
            .infer(frame)
            .map_err(|e| CoreError::Detector(format!("frame {frame_id}: {e:#}")))?;
        log::debug!("Frame {}: {} detection(s)", frame_id, detections.len());
        Ok(detections)
    }
}

fn load_model(model_path: &Path, input_size: u32) -> anyhow::Result<TypedRunnableModel<TypedModel>> {
    let side = input_size as usize;
    tract_onnx::onnx()
        .model_for_path(model_path)
        .with_context(|| format!("failed to load ONNX model from {}", model_path.display()))?
        .with_input_fact(
            0,
            InferenceFact::dt_shape(f32::datum_type(), tvec!(1, 3, side, side)),
        )
        .context("failed to set input fact")?
        .into_optimized()
        .context("failed to optimize ONNX model")?
        .into_runnable()
        .context("failed to build runnable ONNX model")
}
