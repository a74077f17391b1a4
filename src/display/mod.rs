//! Display sinks.
//!
//! - `HeadlessDisplay`: logs what would be shown, never reports a key
//! - `MinifbDisplay`: native window (feature: display-minifb)

#[cfg(feature = "display-minifb")]
mod window;

#[cfg(feature = "display-minifb")]
pub use window::MinifbDisplay;

use anyhow::Result;
use std::time::Duration;

use crate::frame::Frame;

/// Something that shows frames in named surfaces and reports key presses.
pub trait DisplaySink {
    /// Show `frame` in the surface titled `title`, creating it on first use.
    fn show(&mut self, title: &str, frame: &Frame) -> Result<()>;

    /// Service pending window events for up to `wait` and return the key
    /// pressed meanwhile, if any.
    fn poll_key(&mut self, wait: Duration) -> Result<Option<char>>;

    /// False once the user closed the surface through the window manager.
    fn is_open(&self) -> bool {
        true
    }

    /// Close every surface. Calls after the first are no-ops.
    fn close_all(&mut self);
}

impl<D: DisplaySink + ?Sized> DisplaySink for Box<D> {
    fn show(&mut self, title: &str, frame: &Frame) -> Result<()> {
        (**self).show(title, frame)
    }

    fn poll_key(&mut self, wait: Duration) -> Result<Option<char>> {
        (**self).poll_key(wait)
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn close_all(&mut self) {
        (**self).close_all()
    }
}

/// Display sink for machines without a window system.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    frames_shown: u64,
    closed: bool,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_shown(&self) -> u64 {
        self.frames_shown
    }
}

impl DisplaySink for HeadlessDisplay {
    fn show(&mut self, title: &str, frame: &Frame) -> Result<()> {
        self.frames_shown += 1;
        log::trace!(
            "headless display '{}': frame #{} {}x{}",
            title,
            self.frames_shown,
            frame.width,
            frame.height
        );
        Ok(())
    }

    fn poll_key(&mut self, _wait: Duration) -> Result<Option<char>> {
        Ok(None)
    }

    fn close_all(&mut self) {
        if !self.closed {
            self.closed = true;
            log::debug!("headless display closed after {} frames", self.frames_shown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_counts_frames_and_never_quits() {
        let mut display = HeadlessDisplay::new();
        let frame = Frame::filled(4, 4, [1, 2, 3]).unwrap();
        display.show("test", &frame).unwrap();
        display.show("test", &frame).unwrap();
        assert_eq!(display.frames_shown(), 2);
        assert_eq!(display.poll_key(Duration::from_millis(1)).unwrap(), None);
        assert!(display.is_open());
        display.close_all();
        display.close_all();
    }
}
