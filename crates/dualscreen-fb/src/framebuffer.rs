//! In-memory framebuffer for one screen.

use core::convert::TryFrom;

use crate::{Canvas, HEIGHT, PIXELS, Rgb15, WIDTH};

/// 16bpp surface, row-major with a stride of [`WIDTH`] pixels.
#[derive(Clone)]
pub struct FrameBuffer {
    pixels: [u16; PIXELS],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Creates a zeroed (transparent) framebuffer.
    pub const fn new() -> Self {
        Self {
            pixels: [0u16; PIXELS],
        }
    }

    /// Returns the underlying pixel words.
    pub fn pixels(&self) -> &[u16; PIXELS] {
        &self.pixels
    }

    /// Reads a pixel.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb15> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }

        Some(Rgb15(self.pixels[y * WIDTH + x]))
    }

    /// Returns one row (0-based).
    pub fn row(&self, y: usize) -> Option<&[u16; WIDTH]> {
        if y >= HEIGHT {
            return None;
        }

        let start = y * WIDTH;
        <&[u16; WIDTH]>::try_from(&self.pixels[start..start + WIDTH]).ok()
    }

    /// Counts pixels equal to `color`.
    pub fn count(&self, color: Rgb15) -> usize {
        self.pixels.iter().filter(|p| **p == color.0).count()
    }
}

impl Canvas for FrameBuffer {
    fn size(&self) -> (usize, usize) {
        (WIDTH, HEIGHT)
    }

    fn put_pixel(&mut self, x: usize, y: usize, color: Rgb15) {
        self.pixels[y * WIDTH + x] = color.0;
    }

    fn clear(&mut self, color: Rgb15) {
        self.pixels.fill(color.0);
    }
}
