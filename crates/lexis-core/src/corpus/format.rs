//! PRDB layout constants and field-at-a-time decoding.

use super::CorpusError;

pub const CORPUS_MAGIC: [u8; 4] = *b"PRDB";
pub const CORPUS_VERSION: u32 = 1;
/// Entries in the per-book max-line table; book 0 is unused.
pub const MAX_BOOKS: usize = 30;
pub const HEADER_BYTES: usize = 4 + 9 * 4 + MAX_BOOKS * 4;
pub const TEXT_ENTRY_BYTES: usize = 8;
pub const MORPH_ENTRY_BYTES: usize = 12;
pub const LEX_ENTRY_BYTES: usize = 12;

pub(crate) fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

pub(crate) fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
    pub version: u32,
    pub text_count: u32,
    pub morph_count: u32,
    pub lex_count: u32,
    pub book_count: u32,
    pub text_offset: u32,
    pub morph_offset: u32,
    pub lex_offset: u32,
    pub strings_offset: u32,
    pub book_max: [u32; MAX_BOOKS],
}

impl Header {
    /// Decodes and checks magic and version; section bounds are checked by
    /// [`Header::validate`].
    pub fn decode(bytes: &[u8]) -> Result<Self, CorpusError> {
        if bytes.len() < HEADER_BYTES {
            return Err(CorpusError::Truncated);
        }
        if bytes[0..4] != CORPUS_MAGIC {
            return Err(CorpusError::BadMagic);
        }
        let version = read_u32(bytes, 4);
        if version != CORPUS_VERSION {
            return Err(CorpusError::BadVersion);
        }

        let mut book_max = [0u32; MAX_BOOKS];
        for (i, slot) in book_max.iter_mut().enumerate() {
            *slot = read_u32(bytes, 40 + i * 4);
        }

        Ok(Self {
            version,
            text_count: read_u32(bytes, 8),
            morph_count: read_u32(bytes, 12),
            lex_count: read_u32(bytes, 16),
            book_count: read_u32(bytes, 20),
            text_offset: read_u32(bytes, 24),
            morph_offset: read_u32(bytes, 28),
            lex_offset: read_u32(bytes, 32),
            strings_offset: read_u32(bytes, 36),
            book_max,
        })
    }

    /// Every index section and the string pool start must lie inside a block
    /// of `len` bytes.
    pub fn validate(&self, len: usize) -> Result<(), CorpusError> {
        let sections = [
            (self.text_offset, self.text_count, TEXT_ENTRY_BYTES),
            (self.morph_offset, self.morph_count, MORPH_ENTRY_BYTES),
            (self.lex_offset, self.lex_count, LEX_ENTRY_BYTES),
        ];
        for (offset, count, entry_bytes) in sections {
            let end = (count as usize)
                .checked_mul(entry_bytes)
                .and_then(|size| size.checked_add(offset as usize))
                .ok_or(CorpusError::Truncated)?;
            if end > len {
                return Err(CorpusError::Truncated);
            }
        }
        if self.strings_offset as usize > len {
            return Err(CorpusError::Truncated);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TextEntry {
    pub book: u16,
    pub line: u16,
    pub text: u32,
}

impl TextEntry {
    pub fn decode(bytes: &[u8], at: usize) -> Self {
        Self {
            book: read_u16(bytes, at),
            line: read_u16(bytes, at + 2),
            text: read_u32(bytes, at + 4),
        }
    }
}

/// Morph and lex rows share one shape: three pool offsets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TripleEntry {
    pub key: u32,
    pub second: u32,
    pub third: u32,
}

impl TripleEntry {
    pub fn decode(bytes: &[u8], at: usize) -> Self {
        Self {
            key: read_u32(bytes, at),
            second: read_u32(bytes, at + 4),
            third: read_u32(bytes, at + 8),
        }
    }
}
