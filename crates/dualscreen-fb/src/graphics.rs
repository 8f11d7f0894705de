use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::{Rgb555, RgbColor},
};

use crate::{Canvas, DualRaster, FrameBuffer, HEIGHT, Rgb15, WIDTH};

fn to_rgb15(color: Rgb555) -> Rgb15 {
    Rgb15::compose(color.r() as i32, color.g() as i32, color.b() as i32)
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb555;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let _ = self.set_pixel(point.x, point.y, to_rgb15(color));
        }

        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for DualRaster {
    type Color = Rgb555;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.target_mut().draw_iter(pixels)
    }
}

impl OriginDimensions for DualRaster {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}
