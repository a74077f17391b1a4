//! YOLOv10 geometry and output decoding.
//!
//! YOLOv10 exports are end-to-end: the head already applies NMS-free one-to-one
//! matching, so the output is `[1, N, 6]` with rows `(x1, y1, x2, y2, score, class)`
//! in letterboxed model coordinates. No NMS pass is needed here.

use anyhow::{anyhow, Result};

use super::result::{Detection, DetectionResult};

/// Square model input edge.
pub const MODEL_INPUT_SIZE: u32 = 640;
/// Values per output row.
pub const ROW_LEN: usize = 6;
/// Rows scoring below this are dropped.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.25;
/// Gray used for letterbox padding.
pub const PAD_VALUE: u8 = 114;

/// Aspect-preserving fit of a frame into the square model input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub resized_width: u32,
    pub resized_height: u32,
    pub pad_x: u32,
    pub pad_y: u32,
    pub input_size: u32,
}

impl Letterbox {
    pub fn fit(width: u32, height: u32, input_size: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(anyhow!("cannot letterbox an empty {}x{} frame", width, height));
        }
        let scale = (input_size as f32 / width as f32).min(input_size as f32 / height as f32);
        let resized_width = ((width as f32 * scale).round() as u32).clamp(1, input_size);
        let resized_height = ((height as f32 * scale).round() as u32).clamp(1, input_size);
        Ok(Self {
            scale,
            resized_width,
            resized_height,
            pad_x: (input_size - resized_width) / 2,
            pad_y: (input_size - resized_height) / 2,
            input_size,
        })
    }

    /// Map a model-space point back to frame pixels.
    pub fn to_frame(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.pad_x as f32) / self.scale,
            (y - self.pad_y as f32) / self.scale,
        )
    }
}

/// Decode a flat end-to-end output into frame-space detections.
pub fn decode_end_to_end(
    output: &[f32],
    letterbox: &Letterbox,
    frame_width: u32,
    frame_height: u32,
    confidence_threshold: f32,
) -> Result<DetectionResult> {
    if output.len() % ROW_LEN != 0 {
        return Err(anyhow!(
            "model output length {} is not a multiple of {}",
            output.len(),
            ROW_LEN
        ));
    }

    let max_x = frame_width as f32;
    let max_y = frame_height as f32;
    let mut detections = Vec::new();
    for row in output.chunks_exact(ROW_LEN) {
        let confidence = row[4];
        if !confidence.is_finite() || confidence < confidence_threshold {
            continue;
        }
        let class = row[5];
        if !class.is_finite() || class < 0.0 {
            continue;
        }
        let (x1, y1) = letterbox.to_frame(row[0], row[1]);
        let (x2, y2) = letterbox.to_frame(row[2], row[3]);
        let detection = Detection {
            x1: x1.clamp(0.0, max_x),
            y1: y1.clamp(0.0, max_y),
            x2: x2.clamp(0.0, max_x),
            y2: y2.clamp(0.0, max_y),
            confidence,
            class_id: class.round() as usize,
        };
        if detection.width() > 0.0 && detection.height() > 0.0 {
            detections.push(detection);
        }
    }

    Ok(DetectionResult::new(detections))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letterbox_pads_short_axis() {
        let lb = Letterbox::fit(1280, 720, 640).unwrap();
        assert_eq!(lb.scale, 0.5);
        assert_eq!((lb.resized_width, lb.resized_height), (640, 360));
        assert_eq!((lb.pad_x, lb.pad_y), (0, 140));

        let lb = Letterbox::fit(480, 640, 640).unwrap();
        assert_eq!((lb.resized_width, lb.resized_height), (480, 640));
        assert_eq!((lb.pad_x, lb.pad_y), (80, 0));
    }

    #[test]
    fn letterbox_rejects_empty_frames() {
        assert!(Letterbox::fit(0, 480, 640).is_err());
    }

    #[test]
    fn decodes_rows_back_to_frame_space() {
        let lb = Letterbox::fit(1280, 720, 640).unwrap();
        let output = [
            100.0, 240.0, 300.0, 440.0, 0.9, 2.0, // kept
            10.0, 150.0, 20.0, 160.0, 0.1, 0.0, // below threshold
        ];
        let result = decode_end_to_end(&output, &lb, 1280, 720, 0.25).unwrap();

        assert_eq!(result.len(), 1);
        let d = &result.detections[0];
        assert_eq!((d.x1, d.y1, d.x2, d.y2), (200.0, 200.0, 600.0, 600.0));
        assert_eq!(d.class_id, 2);
        assert_eq!(d.label(), "car");
    }

    #[test]
    fn clamps_boxes_in_padding() {
        let lb = Letterbox::fit(1280, 720, 640).unwrap();
        // top edge sits in the padding band
        let output = [0.0, 100.0, 640.0, 300.0, 0.8, 0.0];
        let result = decode_end_to_end(&output, &lb, 1280, 720, 0.25).unwrap();
        let d = &result.detections[0];
        assert_eq!(d.y1, 0.0);
        assert_eq!(d.x2, 1280.0);
    }

    #[test]
    fn drops_boxes_entirely_in_padding() {
        let lb = Letterbox::fit(1280, 720, 640).unwrap();
        let output = [0.0, 0.0, 640.0, 100.0, 0.8, 0.0];
        let result = decode_end_to_end(&output, &lb, 1280, 720, 0.25).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn rejects_ragged_output() {
        let lb = Letterbox::fit(640, 640, 640).unwrap();
        assert!(decode_end_to_end(&[0.0; 7], &lb, 640, 640, 0.25).is_err());
    }
}
