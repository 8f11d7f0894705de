//! Lenient UTF-8 decoding for layout.
//!
//! Malformed input never stops decoding: a bad lead byte, a continuation byte
//! outside `10xxxxxx`, or input ending mid-sequence yields
//! [`REPLACEMENT`]. The cursor then moves past the bytes already accepted
//! (the lead and any valid continuations) and resumes at the byte that broke
//! the sequence, so at least one byte is always consumed.

/// U+FFFD.
pub const REPLACEMENT: u32 = 0xFFFD;

/// Decodes one codepoint from the front of `bytes`.
///
/// Returns `(codepoint, consumed)`. `consumed` is at least 1 for non-empty
/// input and 0 only when `bytes` is empty.
pub fn decode_one(bytes: &[u8]) -> (u32, usize) {
    let Some(&lead) = bytes.first() else {
        return (REPLACEMENT, 0);
    };

    let (mut cp, extra) = match lead {
        0x00..=0x7F => return (lead as u32, 1),
        _ if lead & 0xE0 == 0xC0 => ((lead & 0x1F) as u32, 1usize),
        _ if lead & 0xF0 == 0xE0 => ((lead & 0x0F) as u32, 2),
        _ if lead & 0xF8 == 0xF0 => ((lead & 0x07) as u32, 3),
        _ => return (REPLACEMENT, 1),
    };

    for i in 1..=extra {
        match bytes.get(i) {
            Some(&b) if b & 0xC0 == 0x80 => cp = (cp << 6) | (b & 0x3F) as u32,
            _ => return (REPLACEMENT, i),
        }
    }

    (cp, 1 + extra)
}

/// Iterator over `(byte_offset, codepoint)` pairs.
#[derive(Clone, Debug)]
pub struct Codepoints<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Codepoints<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl Iterator for Codepoints<'_> {
    type Item = (usize, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.bytes.get(self.pos..)?;
        if rest.is_empty() {
            return None;
        }
        let start = self.pos;
        let (cp, used) = decode_one(rest);
        self.pos += used.max(1);
        Some((start, cp))
    }
}
