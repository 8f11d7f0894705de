//! PFNT bitmap fonts.
//!
//! Layout (little-endian):
//! - 16-byte header: `"PFNT"`, glyph width `u8`, glyph height `u8`,
//!   glyph count `u16`, baseline `u8`, 7 bytes padding
//! - glyph table: `count` x 8 bytes (`codepoint u32`, `advance u8`,
//!   `reserved i8`, `atlas index u16`), sorted by codepoint
//! - bitmap atlas: `count * height * ceil(width / 8)` bytes, 1bpp MSB-first,
//!   one contiguous block of rows per atlas index

mod build;
mod set;


use alloc::vec::Vec;
use core::fmt;

use log::info;

use crate::store::{ByteStore, StoreError, try_copy};

pub use build::FontBuilder;
pub use set::{FAMILY_NAMES, FontSet, FontSetConfig, FontSetError, PATH_BYTES, ZOOM_SIZES};

pub const FONT_MAGIC: [u8; 4] = *b"PFNT";
pub const FONT_HEADER_BYTES: usize = 16;
pub const GLYPH_ENTRY_BYTES: usize = 8;
/// Advance used for codepoints missing from the glyph table.
pub const FALLBACK_ADVANCE: i32 = 4;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FontError {
    NotFound,
    BadMagic,
    Truncated,
    AllocFailed,
    /// The file name does not fit the path buffer.
    PathTooLong,
}

impl From<StoreError> for FontError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            StoreError::Truncated => Self::Truncated,
            StoreError::AllocFailed => Self::AllocFailed,
        }
    }
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("font file not found"),
            Self::BadMagic => f.write_str("not a PFNT font"),
            Self::Truncated => f.write_str("font file truncated"),
            Self::AllocFailed => f.write_str("out of memory loading font"),
            Self::PathTooLong => f.write_str("font path too long"),
        }
    }
}

/// One glyph table row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GlyphEntry {
    pub codepoint: u32,
    pub advance: u8,
    pub reserved: i8,
    pub atlas_index: u16,
}

impl GlyphEntry {
    fn decode(raw: &[u8]) -> Self {
        Self {
            codepoint: u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
            advance: raw[4],
            reserved: raw[5] as i8,
            atlas_index: u16::from_le_bytes([raw[6], raw[7]]),
        }
    }
}

/// Immutable bitmap font.
#[derive(Clone, Debug)]
pub struct Font {
    glyph_width: u8,
    glyph_height: u8,
    baseline: u8,
    row_bytes: usize,
    glyphs: Vec<GlyphEntry>,
    bitmaps: Vec<u8>,
}

impl Font {
    /// Loads and parses the font stored at `path`.
    pub fn load<S: ByteStore>(store: &S, path: &str) -> Result<Self, FontError> {
        let bytes = store.read(path)?;
        let font = Self::parse(&bytes)?;
        info!(
            "font {}: {}x{} px, baseline {}, {} glyphs",
            path,
            font.glyph_width,
            font.glyph_height,
            font.baseline,
            font.glyphs.len()
        );
        Ok(font)
    }

    /// Parses a PFNT image.
    ///
    /// The glyph table must already be sorted by codepoint; order is not
    /// re-checked here.
    pub fn parse(bytes: &[u8]) -> Result<Self, FontError> {
        if bytes.len() < FONT_HEADER_BYTES {
            return Err(FontError::Truncated);
        }
        if bytes[0..4] != FONT_MAGIC {
            return Err(FontError::BadMagic);
        }

        let glyph_width = bytes[4];
        let glyph_height = bytes[5];
        let count = u16::from_le_bytes([bytes[6], bytes[7]]) as usize;
        let baseline = bytes[8];
        let row_bytes = (glyph_width as usize).div_ceil(8);

        let table_end = FONT_HEADER_BYTES + count * GLYPH_ENTRY_BYTES;
        let bitmap_end = table_end + count * glyph_height as usize * row_bytes;
        if bytes.len() < bitmap_end {
            return Err(FontError::Truncated);
        }

        let mut glyphs = Vec::new();
        glyphs
            .try_reserve_exact(count)
            .map_err(|_| FontError::AllocFailed)?;
        glyphs.extend(
            bytes[FONT_HEADER_BYTES..table_end]
                .chunks_exact(GLYPH_ENTRY_BYTES)
                .map(GlyphEntry::decode),
        );
        let bitmaps = try_copy(&bytes[table_end..bitmap_end])?;

        Ok(Self {
            glyph_width,
            glyph_height,
            baseline,
            row_bytes,
            glyphs,
            bitmaps,
        })
    }

    pub fn glyph_width(&self) -> u8 {
        self.glyph_width
    }

    pub fn glyph_height(&self) -> u8 {
        self.glyph_height
    }

    pub fn baseline(&self) -> u8 {
        self.baseline
    }

    /// Bytes per bitmap row, `ceil(width / 8)`.
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Vertical distance between wrapped rows.
    pub fn line_height(&self) -> i32 {
        self.glyph_height as i32 + 1
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn glyphs(&self) -> &[GlyphEntry] {
        &self.glyphs
    }

    /// Binary search on the codepoint-sorted table.
    pub fn lookup(&self, codepoint: u32) -> Option<&GlyphEntry> {
        self.glyphs
            .binary_search_by_key(&codepoint, |g| g.codepoint)
            .ok()
            .map(|idx| &self.glyphs[idx])
    }

    /// Horizontal advance of `codepoint`, or [`FALLBACK_ADVANCE`] when absent.
    pub fn advance(&self, codepoint: u32) -> i32 {
        self.lookup(codepoint)
            .map_or(FALLBACK_ADVANCE, |g| g.advance as i32)
    }

    /// Bitmap rows for `glyph`, `None` if its atlas slot is out of range.
    pub fn glyph_bitmap(&self, glyph: &GlyphEntry) -> Option<&[u8]> {
        let stride = self.glyph_height as usize * self.row_bytes;
        let start = glyph.atlas_index as usize * stride;
        self.bitmaps.get(start..start + stride)
    }
}
