#![cfg_attr(not(test), no_std)]

//! Dual-screen 256x192 16bpp raster surfaces.
//!
//! The top screen is double-buffered: every draw lands in the back buffer and
//! [`DualRaster::flip`] is the only point where front and back exchange. After
//! a flip the new back buffer holds stale pixels until it is fully redrawn.
//! The bottom screen is a single buffer that is drawn in place.

mod canvas;
mod color;
mod framebuffer;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use canvas::Canvas;
pub use color::{CHANNEL_MAX, Rgb15};
pub use framebuffer::FrameBuffer;

/// Screen width in pixels.
pub const WIDTH: usize = 256;
/// Screen height in pixels.
pub const HEIGHT: usize = 192;
/// Pixels in one screen.
pub const PIXELS: usize = WIDTH * HEIGHT;

const HEARTBEAT_SIZE: usize = 4;

/// Physical screen selector.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Screen {
    Top,
    Bottom,
}

/// Both screens plus the current draw selection.
#[derive(Clone)]
pub struct DualRaster {
    top: [FrameBuffer; 2],
    top_back: usize,
    bottom: FrameBuffer,
    selected: Screen,
    flips: u32,
}

impl Default for DualRaster {
    fn default() -> Self {
        Self::new()
    }
}

impl DualRaster {
    /// Creates zeroed surfaces with the top screen selected.
    pub const fn new() -> Self {
        Self {
            top: [FrameBuffer::new(), FrameBuffer::new()],
            top_back: 1,
            bottom: FrameBuffer::new(),
            selected: Screen::Top,
            flips: 0,
        }
    }

    /// Routes subsequent draws to `screen`.
    pub fn select(&mut self, screen: Screen) {
        self.selected = screen;
    }

    pub fn selected(&self) -> Screen {
        self.selected
    }

    /// Presents the top back buffer and hands out the old front as new back.
    pub fn flip(&mut self) {
        self.top_back ^= 1;
        self.flips = self.flips.wrapping_add(1);
    }

    /// Number of flips since construction.
    pub fn flip_count(&self) -> u32 {
        self.flips
    }

    /// Buffer currently shown on `screen`.
    pub fn front(&self, screen: Screen) -> &FrameBuffer {
        match screen {
            Screen::Top => &self.top[self.top_back ^ 1],
            Screen::Bottom => &self.bottom,
        }
    }

    /// Buffer draws currently land in.
    pub fn target(&self) -> &FrameBuffer {
        match self.selected {
            Screen::Top => &self.top[self.top_back],
            Screen::Bottom => &self.bottom,
        }
    }

    pub fn target_mut(&mut self) -> &mut FrameBuffer {
        match self.selected {
            Screen::Top => &mut self.top[self.top_back],
            Screen::Bottom => &mut self.bottom,
        }
    }

    /// Blinks a small marker in the top-right corner of the top front buffer.
    ///
    /// Writes to the visible buffer directly so it stays live between flips.
    pub fn draw_heartbeat(&mut self, frame: u32) {
        let color = if frame & 1 != 0 {
            Rgb15::WHITE
        } else {
            Rgb15::RED
        };
        let front = &mut self.top[self.top_back ^ 1];
        let x0 = WIDTH - HEARTBEAT_SIZE - 1;
        for dy in 0..HEARTBEAT_SIZE {
            for dx in 0..HEARTBEAT_SIZE {
                front.put_pixel(x0 + dx, dy, color);
            }
        }
    }
}

impl Canvas for DualRaster {
    fn size(&self) -> (usize, usize) {
        (WIDTH, HEIGHT)
    }

    fn put_pixel(&mut self, x: usize, y: usize, color: Rgb15) {
        self.target_mut().put_pixel(x, y, color);
    }

    fn clear(&mut self, color: Rgb15) {
        self.target_mut().clear(color);
    }
}
