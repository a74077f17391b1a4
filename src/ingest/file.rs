//! Local file frame source.
//!
//! This module provides `FileSource` for ingesting frames from local video files.
//! The file source is responsible for:
//! - Reading frames from a local video file (no network access)
//! - Decoding video frames in-memory to RGB24
//! - Reporting end of stream as `None`
//!
//! A file that cannot be opened does not fail construction: the source comes up
//! closed (`is_open() == false`) and the frame loop never starts.

use anyhow::{anyhow, Result};

use super::FrameSource;
#[cfg(feature = "ingest-file-ffmpeg")]
use super::file_ffmpeg::FfmpegFileSource;
use crate::config::is_local_path;
use crate::frame::Frame;

/// Synthetic frames are 640x480.
pub const SYNTHETIC_WIDTH: u32 = 640;
pub const SYNTHETIC_HEIGHT: u32 = 480;

/// Configuration for a local file source.
#[derive(Clone, Debug)]
pub struct FileConfig {
    /// Local file path (e.g., "demo/demo.mp4"), or `stub://<name>`.
    pub path: String,
    /// Frames the synthetic source yields before reporting end of stream.
    pub synthetic_frames: u64,
}

impl FileConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            synthetic_frames: 120,
        }
    }
}

/// Local file frame source.
pub struct FileSource {
    backend: FileBackend,
    path: String,
    frames_read: u64,
}

enum FileBackend {
    Synthetic(SyntheticFileSource),
    #[cfg(feature = "ingest-file-ffmpeg")]
    Ffmpeg(FfmpegFileSource),
    Closed,
}

impl FileSource {
    pub fn new(config: FileConfig) -> Result<Self> {
        if !is_local_path(&config.path) {
            return Err(anyhow!(
                "file ingestion only supports local paths (no URL schemes)"
            ));
        }
        let path = config.path.clone();
        let backend = match open_backend(config) {
            Ok(backend) => {
                log::info!("FileSource: opened {}", path);
                backend
            }
            Err(e) => {
                log::error!("FileSource: cannot open {}: {:#}", path, e);
                FileBackend::Closed
            }
        };
        Ok(Self {
            backend,
            path,
            frames_read: 0,
        })
    }

    /// Decode the next frame. `Ok(None)` is a clean end of stream.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        let frame = match &mut self.backend {
            FileBackend::Synthetic(source) => source.next_frame()?,
            #[cfg(feature = "ingest-file-ffmpeg")]
            FileBackend::Ffmpeg(source) => source.next_frame()?,
            FileBackend::Closed => None,
        };
        if frame.is_some() {
            self.frames_read += 1;
        }
        Ok(frame)
    }

    /// Get frame statistics.
    pub fn stats(&self) -> FileStats {
        FileStats {
            frames_read: self.frames_read,
            path: self.path.clone(),
        }
    }
}

impl FrameSource for FileSource {
    fn is_open(&self) -> bool {
        !matches!(self.backend, FileBackend::Closed)
    }

    fn read(&mut self) -> Option<Frame> {
        match self.next_frame() {
            Ok(Some(frame)) => Some(frame),
            Ok(None) => {
                log::info!("FileSource: end of stream after {} frames", self.frames_read);
                None
            }
            Err(e) => {
                log::warn!(
                    "FileSource: read failed after {} frames: {:#}",
                    self.frames_read,
                    e
                );
                None
            }
        }
    }

    fn release(&mut self) {
        if matches!(self.backend, FileBackend::Closed) {
            return;
        }
        self.backend = FileBackend::Closed;
        log::info!("FileSource: released {}", self.path);
    }
}

/// Statistics for a file source.
#[derive(Clone, Debug)]
pub struct FileStats {
    pub frames_read: u64,
    pub path: String,
}

fn open_backend(config: FileConfig) -> Result<FileBackend> {
    if config.path.starts_with("stub://") {
        return Ok(FileBackend::Synthetic(SyntheticFileSource::new(config)));
    }
    #[cfg(feature = "ingest-file-ffmpeg")]
    {
        Ok(FileBackend::Ffmpeg(FfmpegFileSource::new(&config.path)?))
    }
    #[cfg(not(feature = "ingest-file-ffmpeg"))]
    {
        Err(anyhow!(
            "file ingestion requires the ingest-file-ffmpeg feature"
        ))
    }
}

// ----------------------------------------------------------------------------
// Synthetic source (stub://) for tests
// ----------------------------------------------------------------------------

struct SyntheticFileSource {
    remaining: u64,
    frame_count: u64,
}

impl SyntheticFileSource {
    fn new(config: FileConfig) -> Self {
        Self {
            remaining: config.synthetic_frames,
            frame_count: 0,
        }
    }

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        self.frame_count += 1;
        let pixels = self.generate_synthetic_pixels();
        Ok(Some(Frame::new(pixels, SYNTHETIC_WIDTH, SYNTHETIC_HEIGHT)?))
    }

    fn generate_synthetic_pixels(&self) -> Vec<u8> {
        let pixel_count = (SYNTHETIC_WIDTH * SYNTHETIC_HEIGHT * 3) as usize;
        let mut pixels = vec![0u8; pixel_count];
        for (i, pixel) in pixels.iter_mut().enumerate() {
            *pixel = ((i as u64 + self.frame_count * 4) % 256) as u8;
        }
        pixels
    }
}
