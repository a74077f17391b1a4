use anyhow::Result;

use crate::frame::Frame;

/// A detection output that can draw itself onto a frame.
pub trait Annotate {
    /// Render this result's overlays onto a copy of `base`.
    ///
    /// The returned frame has the same dimensions as `base`; `base` is untouched.
    fn render_overlay(&self, base: &Frame) -> Result<Frame>;
}

/// Detector backend trait.
///
/// A backend turns one frame into zero or more results. Most models produce a
/// single result holding every box; backends that batch may return more.
pub trait DetectorBackend {
    type Output: Annotate;

    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Run detection on a frame.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Self::Output>>;

    /// Optional warm-up hook.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<B: DetectorBackend + ?Sized> DetectorBackend for Box<B> {
    type Output = B::Output;

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<Self::Output>> {
        (**self).detect(frame)
    }

    fn warm_up(&mut self) -> Result<()> {
        (**self).warm_up()
    }
}
