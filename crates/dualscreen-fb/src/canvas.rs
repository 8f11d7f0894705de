//! Clipped drawing primitives shared by every raster target.

use crate::Rgb15;

/// A fixed-size raster target.
///
/// Implementors provide bounds and an unchecked pixel store; every other
/// primitive clips against [`Canvas::size`] and never writes outside it.
pub trait Canvas {
    /// Raster size as `(width, height)`.
    fn size(&self) -> (usize, usize);

    /// Stores one pixel. `x < width` and `y < height` are guaranteed by callers.
    fn put_pixel(&mut self, x: usize, y: usize, color: Rgb15);

    /// Sets a pixel state.
    ///
    /// Returns `true` when pixel is in bounds, `false` otherwise.
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb15) -> bool {
        let (width, height) = self.size();
        if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
            return false;
        }

        self.put_pixel(x as usize, y as usize, color);
        true
    }

    /// Fills a horizontal run of `w` pixels starting at `(x, y)`.
    fn hline(&mut self, x: i32, y: i32, w: i32, color: Rgb15) {
        let (width, height) = self.size();
        if y < 0 || y as usize >= height || w <= 0 {
            return;
        }

        let start = (x as i64).max(0);
        let end = (x as i64 + w as i64).min(width as i64);
        for px in start..end {
            self.put_pixel(px as usize, y as usize, color);
        }
    }

    /// Fills a rectangle row by row.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb15) {
        if w <= 0 || h <= 0 {
            return;
        }

        let (_, height) = self.size();
        let top = (y as i64).max(0);
        let bottom = (y as i64 + h as i64).min(height as i64);
        for row in top..bottom {
            self.hline(x, row as i32, w, color);
        }
    }

    /// Integer Bresenham line, both endpoints inclusive.
    ///
    /// The segment is clipped to the raster first, so only on-screen points
    /// are stepped.
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb15) {
        let (width, height) = self.size();
        let Some((x0, y0, x1, y1)) = clip_segment(
            (x0 as i64, y0 as i64),
            (x1 as i64, y1 as i64),
            width as i64 - 1,
            height as i64 - 1,
        ) else {
            return;
        };

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x as i32, y as i32, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fills the whole target.
    fn clear(&mut self, color: Rgb15) {
        let (width, height) = self.size();
        self.fill_rect(0, 0, width as i32, height as i32, color);
    }
}

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

fn outcode(x: i64, y: i64, max_x: i64, max_y: i64) -> u8 {
    let mut code = 0;
    if x < 0 {
        code |= LEFT;
    } else if x > max_x {
        code |= RIGHT;
    }
    if y < 0 {
        code |= TOP;
    } else if y > max_y {
        code |= BOTTOM;
    }
    code
}

/// `a + (b - a) * num / den`, widened so far off-screen input cannot overflow.
fn lerp(a: i64, b: i64, num: i64, den: i64) -> i64 {
    (a as i128 + (b - a) as i128 * num as i128 / den as i128) as i64
}

/// Cohen-Sutherland clip of a segment to `[0, max_x] x [0, max_y]`.
fn clip_segment(
    mut p0: (i64, i64),
    mut p1: (i64, i64),
    max_x: i64,
    max_y: i64,
) -> Option<(i64, i64, i64, i64)> {
    if max_x < 0 || max_y < 0 {
        return None;
    }

    // Each pass pins one coordinate of one endpoint to an edge.
    for _ in 0..8 {
        let c0 = outcode(p0.0, p0.1, max_x, max_y);
        let c1 = outcode(p1.0, p1.1, max_x, max_y);
        if c0 | c1 == 0 {
            return Some((p0.0, p0.1, p1.0, p1.1));
        }
        if c0 & c1 != 0 {
            return None;
        }

        let code = if c0 != 0 { c0 } else { c1 };
        let (a, b) = (p0, p1);
        let point = if code & BOTTOM != 0 {
            (lerp(a.0, b.0, max_y - a.1, b.1 - a.1), max_y)
        } else if code & TOP != 0 {
            (lerp(a.0, b.0, -a.1, b.1 - a.1), 0)
        } else if code & RIGHT != 0 {
            (max_x, lerp(a.1, b.1, max_x - a.0, b.0 - a.0))
        } else {
            (0, lerp(a.1, b.1, -a.0, b.0 - a.0))
        };

        if code == c0 {
            p0 = point;
        } else {
            p1 = point;
        }
    }
    None
}
