use anyhow::{anyhow, Result};

pub const DEFAULT_MODEL_PATH: &str = "demo/yolov10b.onnx";
pub const DEFAULT_SOURCE_PATH: &str = "demo/demo.mp4";
pub const DEFAULT_WINDOW_TITLE: &str = "Object Detection";
pub const DEFAULT_QUIT_KEY: char = 'q';

/// Startup configuration for the frame loop.
///
/// The defaults are the fixed values the viewer ships with; there is no file or
/// environment layer on top of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    /// Detection model location. `stub://` selects the synthetic detector.
    pub model_path: String,
    /// Local video file. `stub://` selects the synthetic source.
    pub source_path: String,
    /// Title of the display surface frames are shown in.
    pub window_title: String,
    /// Key that stops the loop when pressed.
    pub quit_key: char,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            source_path: DEFAULT_SOURCE_PATH.to_string(),
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            quit_key: DEFAULT_QUIT_KEY,
        }
    }
}

impl LoopConfig {
    pub fn validate(&self) -> Result<()> {
        if self.model_path.trim().is_empty() {
            return Err(anyhow!("model path must not be empty"));
        }
        if self.source_path.trim().is_empty() {
            return Err(anyhow!("source path must not be empty"));
        }
        if !is_local_path(&self.source_path) {
            return Err(anyhow!(
                "source '{}' must be a local file path (no URL schemes)",
                self.source_path
            ));
        }
        if self.quit_key.is_control() || self.quit_key.is_whitespace() {
            return Err(anyhow!(
                "quit key {:?} must be a printable character",
                self.quit_key
            ));
        }
        Ok(())
    }
}

pub(crate) fn is_local_path(path: &str) -> bool {
    if path.trim().is_empty() {
        return false;
    }
    if path.starts_with("stub://") {
        return true;
    }
    !path.contains("://")
}
