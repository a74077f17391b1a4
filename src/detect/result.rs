use anyhow::Result;

use super::backend::Annotate;
use super::overlay;
use crate::frame::Frame;

/// COCO-80 class names, indexed by class id.
pub const COCO_CLASSES: [&str; 80] = [
    "person",
    "bicycle",
    "car",
    "motorcycle",
    "airplane",
    "bus",
    "train",
    "truck",
    "boat",
    "traffic light",
    "fire hydrant",
    "stop sign",
    "parking meter",
    "bench",
    "bird",
    "cat",
    "dog",
    "horse",
    "sheep",
    "cow",
    "elephant",
    "bear",
    "zebra",
    "giraffe",
    "backpack",
    "umbrella",
    "handbag",
    "tie",
    "suitcase",
    "frisbee",
    "skis",
    "snowboard",
    "sports ball",
    "kite",
    "baseball bat",
    "baseball glove",
    "skateboard",
    "surfboard",
    "tennis racket",
    "bottle",
    "wine glass",
    "cup",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
    "chair",
    "couch",
    "potted plant",
    "bed",
    "dining table",
    "toilet",
    "tv",
    "laptop",
    "mouse",
    "remote",
    "keyboard",
    "cell phone",
    "microwave",
    "oven",
    "toaster",
    "sink",
    "refrigerator",
    "book",
    "clock",
    "vase",
    "scissors",
    "teddy bear",
    "hair drier",
    "toothbrush",
];

/// Result of running detection on one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectionResult {
    /// Boxes in frame pixel coordinates.
    pub detections: Vec<Detection>,
}

/// One bounding box. Corners are `(x1, y1)` top-left and `(x2, y2)` bottom-right.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub confidence: f32,
    pub class_id: usize,
}

impl Detection {
    pub fn label(&self) -> &'static str {
        COCO_CLASSES.get(self.class_id).copied().unwrap_or("unknown")
    }

    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).max(0.0)
    }
}

impl DetectionResult {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    /// Short `label score` listing for log lines.
    pub fn summary(&self) -> String {
        if self.detections.is_empty() {
            return "no detections".to_string();
        }
        self.detections
            .iter()
            .map(|d| format!("{} {:.2}", d.label(), d.confidence))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Annotate for DetectionResult {
    fn render_overlay(&self, base: &Frame) -> Result<Frame> {
        let mut annotated = base.clone();
        for detection in &self.detections {
            overlay::draw_detection(&mut annotated, detection);
        }
        Ok(annotated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(class_id: usize, confidence: f32) -> Detection {
        Detection {
            x1: 2.0,
            y1: 2.0,
            x2: 12.0,
            y2: 10.0,
            confidence,
            class_id,
        }
    }

    #[test]
    fn labels_fall_back_for_unknown_classes() {
        assert_eq!(detection(0, 0.9).label(), "person");
        assert_eq!(detection(79, 0.9).label(), "toothbrush");
        assert_eq!(detection(80, 0.9).label(), "unknown");
    }

    #[test]
    fn summary_lists_each_box() {
        let result = DetectionResult::new(vec![detection(0, 0.91), detection(2, 0.5)]);
        assert_eq!(result.summary(), "person 0.91, car 0.50");
        assert_eq!(DetectionResult::default().summary(), "no detections");
    }

    #[test]
    fn render_overlay_leaves_base_untouched() {
        let base = Frame::filled(32, 24, [0, 0, 0]).unwrap();
        let result = DetectionResult::new(vec![detection(0, 0.9)]);
        let annotated = result.render_overlay(&base).unwrap();

        assert!(base.pixels().iter().all(|&b| b == 0));
        assert_eq!((annotated.width, annotated.height), (32, 24));
        assert_ne!(annotated, base);
    }

    #[test]
    fn empty_result_renders_identical_frame() {
        let base = Frame::filled(8, 8, [10, 20, 30]).unwrap();
        let annotated = DetectionResult::default().render_overlay(&base).unwrap();
        assert_eq!(annotated, base);
    }
}
