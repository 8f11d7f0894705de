//! Measuring, wrapping, drawing and hit-testing text in a bitmap font.

mod wrap;

#[cfg(test)]
mod tests;

use dualscreen_fb::{Canvas, Rgb15};

use crate::{
    font::{FALLBACK_ADVANCE, Font, GlyphEntry},
    utf8::{self, Codepoints},
};

pub use wrap::{WordSpan, Wrap, WrapArea};

/// Codepoints drawn by one [`draw_text`] call at most.
pub const MAX_DRAW_CHARS: usize = 512;

/// Sum of glyph advances, no wrapping.
pub fn measure_width(font: &Font, text: &[u8]) -> i32 {
    Codepoints::new(wrap::until_nul(text))
        .map(|(_, cp)| font.advance(cp))
        .sum()
}

/// Blits one glyph with its top-left corner at `(x, y)`.
///
/// Rows above the target and columns left of it are skipped; the glyph stops
/// at the right and bottom edges.
pub fn draw_glyph<C: Canvas + ?Sized>(
    canvas: &mut C,
    font: &Font,
    glyph: &GlyphEntry,
    x: i32,
    y: i32,
    color: Rgb15,
) {
    let Some(bitmap) = font.glyph_bitmap(glyph) else {
        return;
    };
    let (width, height) = canvas.size();
    let (width, height) = (width as i32, height as i32);
    let row_bytes = font.row_bytes();

    for (row, rowdata) in bitmap.chunks_exact(row_bytes.max(1)).enumerate() {
        let py = y + row as i32;
        if py < 0 {
            continue;
        }
        if py >= height {
            break;
        }

        for col in 0..font.glyph_width() as usize {
            let px = x + col as i32;
            if px < 0 {
                continue;
            }
            if px >= width {
                break;
            }
            if rowdata[col >> 3] & (0x80 >> (col & 7)) != 0 {
                canvas.put_pixel(px as usize, py as usize, color);
            }
        }
    }
}

/// Draws one codepoint and returns the advanced cursor.
fn draw_codepoint<C: Canvas + ?Sized>(
    canvas: &mut C,
    font: &Font,
    cp: u32,
    x: i32,
    y: i32,
    color: Rgb15,
) -> i32 {
    match font.lookup(cp) {
        Some(glyph) => {
            draw_glyph(canvas, font, glyph, x, y, color);
            x + glyph.advance as i32
        }
        None => x + FALLBACK_ADVANCE,
    }
}

/// Single-line draw; returns the cursor x after the last glyph.
///
/// Stops after [`MAX_DRAW_CHARS`] codepoints or once the cursor reaches the
/// right edge of the target.
pub fn draw_text<C: Canvas + ?Sized>(
    canvas: &mut C,
    font: &Font,
    mut x: i32,
    y: i32,
    text: &[u8],
    color: Rgb15,
) -> i32 {
    let (width, _) = canvas.size();
    let text = wrap::until_nul(text);
    let mut pos = 0;
    let mut chars = 0;

    while pos < text.len() && chars < MAX_DRAW_CHARS {
        let (cp, used) = utf8::decode_one(&text[pos..]);
        pos += used.max(1);
        chars += 1;

        x = draw_codepoint(canvas, font, cp, x, y, color);
        if x >= width as i32 {
            break;
        }
    }
    x
}

/// Wraps and draws `text`, returning the number of rows used.
pub fn wrap_and_draw<C: Canvas + ?Sized>(
    canvas: &mut C,
    font: &Font,
    area: WrapArea,
    text: &[u8],
    color: Rgb15,
) -> usize {
    let mut wrap = Wrap::new(font, text, area);
    let source = wrap.text();
    for span in wrap.by_ref() {
        let mut x = span.x;
        for (_, cp) in Codepoints::new(&source[span.start..span.end]) {
            x = draw_codepoint(canvas, font, cp, x, span.y, color);
        }
    }
    wrap.rows()
}

/// Rows [`wrap_and_draw`] would use for the same arguments.
pub fn count_wrapped_rows(font: &Font, area: WrapArea, text: &[u8]) -> usize {
    let mut wrap = Wrap::new(font, text, area);
    wrap.by_ref().for_each(drop);
    wrap.rows()
}

/// The placed word whose box `[x, x + width) x [y, y + line_height)`
/// contains `(px, py)`.
pub fn word_span_at(
    font: &Font,
    area: WrapArea,
    text: &[u8],
    px: i32,
    py: i32,
) -> Option<WordSpan> {
    let line_height = font.line_height();
    Wrap::new(font, text, area).find(|span| span.contains(px, py, line_height))
}

/// Copies the raw bytes of the word under `(px, py)` into `out`.
///
/// The word is cut to `out.len()` bytes. An empty `out` never matches.
pub fn word_at<'a>(
    font: &Font,
    area: WrapArea,
    text: &[u8],
    px: i32,
    py: i32,
    out: &'a mut [u8],
) -> Option<&'a [u8]> {
    if out.is_empty() {
        return None;
    }
    let span = word_span_at(font, area, text, px, py)?;
    let word = &text[span.start..span.end];
    let len = word.len().min(out.len());
    out[..len].copy_from_slice(&word[..len]);
    Some(&out[..len])
}
