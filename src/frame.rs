//! In-memory frames.
//!
//! - `Frame`: a tightly packed RGB24 raster produced by a frame source.
//!
//! Frames are owned by a single loop iteration. An annotated frame is a new
//! `Frame` of identical dimensions; the raw frame is never mutated in place.

use anyhow::{anyhow, Result};

/// Bytes per pixel for RGB24.
pub const CHANNELS: usize = 3;

/// One decoded image, `height` rows of `width` RGB24 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    /// Wrap an RGB24 buffer. The buffer length must be exactly `width * height * 3`.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(anyhow!(
                "expected {} RGB bytes for {}x{} frame, received {}",
                expected,
                width,
                height,
                data.len()
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A frame filled with a single color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self> {
        let len = expected_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / CHANNELS {
            data.extend_from_slice(&rgb);
        }
        Self::new(data, width, height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    /// RGB value at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn put_pixel(&mut self, x: i32, y: i32, rgb: [u8; 3]) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        self.data[idx..idx + CHANNELS].copy_from_slice(&rgb);
    }

    /// Pack as `0x00RRGGBB` words, the layout window surfaces expect.
    pub fn to_argb(&self) -> Vec<u32> {
        self.data
            .chunks_exact(CHANNELS)
            .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32)
            .collect()
    }
}

fn expected_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or_else(|| anyhow!("frame dimensions overflow"))
}
