use anyhow::Result;
use sha2::{Digest, Sha256};

use crate::detect::backend::DetectorBackend;
use crate::detect::result::{Detection, DetectionResult, COCO_CLASSES};
use crate::frame::Frame;

/// Stub backend for demos and tests. Derives boxes from a pixel hash, so the
/// same frame always yields the same detections.
#[derive(Default)]
pub struct StubBackend {
    frames_seen: u64,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }
}

impl DetectorBackend for StubBackend {
    type Output = DetectionResult;

    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<DetectionResult>> {
        self.frames_seen += 1;

        let mut hasher = Sha256::new();
        hasher.update(frame.width.to_le_bytes());
        hasher.update(frame.height.to_le_bytes());
        hasher.update(frame.pixels());
        let digest: [u8; 32] = hasher.finalize().into();

        // 0, 1 or 2 boxes; each box consumes 6 digest bytes after the count byte.
        let count = (digest[0] % 3) as usize;
        let width = frame.width as f32;
        let height = frame.height as f32;
        let detections = digest[1..]
            .chunks_exact(6)
            .take(count)
            .map(|b| {
                let box_w = width * (0.1 + 0.3 * unit(b[0]));
                let box_h = height * (0.1 + 0.3 * unit(b[1]));
                let x1 = (width - box_w) * unit(b[2]);
                let y1 = (height - box_h) * unit(b[3]);
                Detection {
                    x1,
                    y1,
                    x2: x1 + box_w,
                    y2: y1 + box_h,
                    confidence: 0.25 + 0.75 * unit(b[4]),
                    class_id: b[5] as usize % COCO_CLASSES.len(),
                }
            })
            .collect();

        let result = DetectionResult::new(detections);
        log::trace!("stub: frame {} {}", self.frames_seen, result.summary());
        Ok(vec![result])
    }
}

fn unit(byte: u8) -> f32 {
    byte as f32 / 255.0
}
