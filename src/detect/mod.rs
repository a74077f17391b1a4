//! Detection backends and their results.
//!
//! - `stub://...` model paths select the hash-driven `StubBackend`
//! - anything else is loaded as a YOLOv10 ONNX export (feature: backend-tract)

mod backend;
mod backends;
pub mod overlay;
mod result;
pub mod yolo;

use anyhow::Result;

pub use backend::{Annotate, DetectorBackend};
pub use backends::StubBackend;
#[cfg(feature = "backend-tract")]
pub use backends::TractBackend;
pub use result::{Detection, DetectionResult, COCO_CLASSES};

/// Boxed backend producing the crate's own `DetectionResult`.
pub type DynBackend = Box<dyn DetectorBackend<Output = DetectionResult>>;

/// Load the backend for `model_path` and warm it up.
pub fn open_backend(model_path: &str) -> Result<DynBackend> {
    let mut backend: DynBackend = if model_path.starts_with("stub://") {
        Box::new(StubBackend::new())
    } else {
        load_model(model_path)?
    };
    backend.warm_up()?;
    log::info!("detector: {} backend ready ({})", backend.name(), model_path);
    Ok(backend)
}

#[cfg(feature = "backend-tract")]
fn load_model(model_path: &str) -> Result<DynBackend> {
    Ok(Box::new(TractBackend::new(model_path)?))
}

#[cfg(not(feature = "backend-tract"))]
fn load_model(model_path: &str) -> Result<DynBackend> {
    Err(anyhow::anyhow!(
        "loading model '{}' requires the backend-tract feature",
        model_path
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;

    #[test]
    fn stub_scheme_selects_stub_backend() {
        let mut backend = open_backend("stub://yolo").unwrap();
        assert_eq!(backend.name(), "stub");
        let frame = Frame::filled(16, 16, [0, 0, 0]).unwrap();
        assert_eq!(backend.detect(&frame).unwrap().len(), 1);
    }

    #[cfg(not(feature = "backend-tract"))]
    #[test]
    fn model_files_need_tract() {
        let err = open_backend("demo/yolov10b.onnx").err().unwrap();
        assert!(err.to_string().contains("backend-tract"));
    }

    #[cfg(feature = "backend-tract")]
    #[test]
    fn missing_model_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.onnx");
        assert!(open_backend(path.to_str().unwrap()).is_err());
    }
}
