//! Video object-detection viewer
//!
//! Decodes a video file frame by frame, runs an object detector on each frame,
//! burns the detections into the image and shows it in a window until the video
//! ends or the quit key is pressed.
//!
//! # Module Structure
//!
//! - `frame`: RGB24 frames
//! - `ingest`: frame sources (local files, synthetic `stub://`)
//! - `detect`: detector backends, results and overlays
//! - `display`: display sinks (native window, headless)
//! - `pipeline`: the frame processing loop
//! - `config`: startup configuration

pub mod config;
pub mod detect;
pub mod display;
pub mod frame;
pub mod ingest;
pub mod pipeline;

pub use config::LoopConfig;
pub use detect::{Annotate, Detection, DetectionResult, DetectorBackend, StubBackend};
pub use display::{DisplaySink, HeadlessDisplay};
pub use frame::Frame;
pub use ingest::{FileConfig, FileSource, FrameSource};
pub use pipeline::{FrameLoop, LoopState, LoopSummary, StopReason, KEY_POLL_WAIT};
