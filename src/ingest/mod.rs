//! Frame ingestion sources.
//!
//! This module provides sources of decoded frames:
//! - Local video files (feature: ingest-file-ffmpeg)
//! - Synthetic `stub://` source (demos and tests)
//!
//! A source yields frames strictly in order. End of stream and read errors both
//! surface as `None` from `FrameSource::read`; sources log the difference.

pub mod file;
#[cfg(feature = "ingest-file-ffmpeg")]
pub(crate) mod file_ffmpeg;

pub use file::{FileConfig, FileSource, FileStats};

use crate::frame::Frame;

/// Sequential frame source owned by the frame loop.
pub trait FrameSource {
    /// True once the underlying handle opened successfully and until release.
    fn is_open(&self) -> bool;

    /// Next frame, or `None` when the stream is exhausted or unreadable.
    fn read(&mut self) -> Option<Frame>;

    /// Release the underlying handle. Calls after the first are no-ops.
    fn release(&mut self);
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn read(&mut self) -> Option<Frame> {
        (**self).read()
    }

    fn release(&mut self) {
        (**self).release()
    }
}
