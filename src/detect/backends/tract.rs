#![cfg(feature = "backend-tract")]

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use tract_onnx::prelude::*;

use crate::detect::backend::DetectorBackend;
use crate::detect::result::DetectionResult;
use crate::detect::yolo::{
    decode_end_to_end, Letterbox, DEFAULT_CONFIDENCE_THRESHOLD, MODEL_INPUT_SIZE, PAD_VALUE,
};
use crate::frame::Frame;

/// Tract-based backend for YOLOv10 ONNX exports.
///
/// Loads a local model file once and runs it on letterboxed RGB frames.
pub struct TractBackend {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>>,
    input_size: u32,
    confidence_threshold: f32,
}

impl TractBackend {
    /// Load an ONNX model from disk and prepare it for inference.
    pub fn new<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();
        let input_size = MODEL_INPUT_SIZE as usize;
        let model = tract_onnx::onnx()
            .model_for_path(model_path)
            .with_context(|| format!("failed to load ONNX model from {}", model_path.display()))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, 3, input_size, input_size)),
            )
            .context("failed to set input fact")?
            .into_optimized()
            .context("failed to optimize ONNX model")?
            .into_runnable()
            .context("failed to build runnable ONNX model")?;

        Ok(Self {
            model,
            input_size: MODEL_INPUT_SIZE,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        })
    }

    fn build_input(&self, frame: &Frame, letterbox: &Letterbox) -> Result<Tensor> {
        let source = RgbImage::from_raw(frame.width, frame.height, frame.pixels().to_vec())
            .ok_or_else(|| anyhow!("frame buffer does not match {}x{}", frame.width, frame.height))?;
        let resized = imageops::resize(
            &source,
            letterbox.resized_width,
            letterbox.resized_height,
            FilterType::Triangle,
        );
        let mut canvas = RgbImage::from_pixel(
            self.input_size,
            self.input_size,
            Rgb([PAD_VALUE, PAD_VALUE, PAD_VALUE]),
        );
        imageops::replace(
            &mut canvas,
            &resized,
            letterbox.pad_x as i64,
            letterbox.pad_y as i64,
        );

        let size = self.input_size as usize;
        let input = tract_ndarray::Array4::from_shape_fn((1, 3, size, size), |(_, c, y, x)| {
            canvas.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
        });
        Ok(input.into_tensor())
    }
}

impl DetectorBackend for TractBackend {
    type Output = DetectionResult;

    fn name(&self) -> &'static str {
        "tract"
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<DetectionResult>> {
        let letterbox = Letterbox::fit(frame.width, frame.height, self.input_size)?;
        let input = self.build_input(frame, &letterbox)?;
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
        let flat: Vec<f32> = view.iter().copied().collect();

        let result = decode_end_to_end(
            &flat,
            &letterbox,
            frame.width,
            frame.height,
            self.confidence_threshold,
        )?;
        log::debug!("tract: {}", result.summary());
        Ok(vec![result])
    }

    fn warm_up(&mut self) -> Result<()> {
        let blank = Frame::filled(self.input_size, self.input_size, [PAD_VALUE; 3])?;
        self.detect(&blank).map(|_| ())
    }
}
