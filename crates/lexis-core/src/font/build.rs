use alloc::vec::Vec;

use super::{FONT_HEADER_BYTES, FONT_MAGIC};

struct PendingGlyph {
    codepoint: u32,
    advance: u8,
    atlas_index: u16,
}

/// Encoder for PFNT images.
///
/// Glyphs may be added in any order; the table is sorted on [`build`].
///
/// [`build`]: FontBuilder::build
pub struct FontBuilder {
    glyph_width: u8,
    glyph_height: u8,
    baseline: u8,
    glyphs: Vec<PendingGlyph>,
    atlas: Vec<u8>,
}

impl FontBuilder {
    pub fn new(glyph_width: u8, glyph_height: u8, baseline: u8) -> Self {
        Self {
            glyph_width,
            glyph_height,
            baseline,
            glyphs: Vec::new(),
            atlas: Vec::new(),
        }
    }

    fn stride(&self) -> usize {
        self.glyph_height as usize * (self.glyph_width as usize).div_ceil(8)
    }

    /// Adds a glyph with its own atlas slot.
    ///
    /// `bitmap` is padded with zeros or cut to exactly one glyph.
    pub fn glyph(mut self, codepoint: u32, advance: u8, bitmap: &[u8]) -> Self {
        let stride = self.stride();
        let slot = self.atlas.len() / stride.max(1);
        let start = self.atlas.len();
        self.atlas.resize(start + stride, 0);
        let n = bitmap.len().min(stride);
        self.atlas[start..start + n].copy_from_slice(&bitmap[..n]);

        self.glyphs.push(PendingGlyph {
            codepoint,
            advance,
            atlas_index: slot as u16,
        });
        self
    }

    /// Adds a glyph whose every pixel is set.
    pub fn filled(self, codepoint: u32, advance: u8) -> Self {
        let bitmap = self.solid_rows();
        self.glyph(codepoint, advance, &bitmap)
    }

    /// Adds a glyph that points at an existing atlas slot.
    pub fn alias(mut self, codepoint: u32, advance: u8, atlas_index: u16) -> Self {
        self.glyphs.push(PendingGlyph {
            codepoint,
            advance,
            atlas_index,
        });
        self
    }

    fn solid_rows(&self) -> Vec<u8> {
        let row_bytes = (self.glyph_width as usize).div_ceil(8);
        let mut row = Vec::with_capacity(row_bytes);
        for byte in 0..row_bytes {
            let cols = (self.glyph_width as usize).saturating_sub(byte * 8).min(8);
            row.push((0xFF00u16 >> cols) as u8);
        }

        let mut rows = Vec::with_capacity(self.stride());
        for _ in 0..self.glyph_height {
            rows.extend_from_slice(&row);
        }
        rows
    }

    /// Encodes the header, sorted table, and atlas.
    ///
    /// Alias entries do not add atlas slots, so the stored atlas may hold
    /// fewer slots than the glyph count; it is padded with blank slots to
    /// match the fixed `count * stride` size.
    pub fn build(mut self) -> Vec<u8> {
        self.glyphs.sort_by_key(|g| g.codepoint);
        let stride = self.stride();
        let count = self.glyphs.len();
        self.atlas.resize(count * stride, 0);

        let mut out = Vec::with_capacity(FONT_HEADER_BYTES + count * 8 + self.atlas.len());
        out.extend_from_slice(&FONT_MAGIC);
        out.push(self.glyph_width);
        out.push(self.glyph_height);
        out.extend_from_slice(&(count as u16).to_le_bytes());
        out.push(self.baseline);
        out.resize(FONT_HEADER_BYTES, 0);

        for glyph in &self.glyphs {
            out.extend_from_slice(&glyph.codepoint.to_le_bytes());
            out.push(glyph.advance);
            out.push(0);
            out.extend_from_slice(&glyph.atlas_index.to_le_bytes());
        }
        out.extend_from_slice(&self.atlas);
        out
    }
}
