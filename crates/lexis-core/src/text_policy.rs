//! Shared truncation and label policies for fixed-capacity text.

use core::str;

use heapless::String;

/// Bytes needed for a gutter label: up to 5 digits plus the trailing space.
pub const GUTTER_LABEL_BYTES: usize = 6;

/// Largest prefix of `source` that fits in `max_bytes` without splitting a
/// character.
pub fn truncate_at_boundary(source: &str, max_bytes: usize) -> &str {
    if source.len() <= max_bytes {
        return source;
    }
    let mut end = max_bytes;
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    &source[..end]
}

/// Longest prefix of `bytes` that is valid UTF-8.
pub fn valid_prefix(bytes: &[u8]) -> &str {
    match str::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => str::from_utf8(&bytes[..err.valid_up_to()]).unwrap_or_default(),
    }
}

/// Appends as much of `source` as fits; returns `false` if anything was cut.
pub fn push_truncated<const N: usize>(out: &mut String<N>, source: &str) -> bool {
    let room = N - out.len();
    let piece = truncate_at_boundary(source, room);
    // `piece` fits by construction.
    let _ = out.push_str(piece);
    piece.len() == source.len()
}

/// Bounded copy of `source`.
pub fn copy_truncated<const N: usize>(source: &str) -> String<N> {
    let mut out = String::new();
    push_truncated(&mut out, source);
    out
}

/// Right-aligned line number in three columns followed by a space, `"%3d "`.
///
/// Numbers wider than three digits keep all their digits.
pub fn line_number_label(line: u16, out: &mut [u8; GUTTER_LABEL_BYTES]) -> &str {
    let mut digits = [0u8; 5];
    let n = write_u16_ascii(line, &mut digits);
    let pad = 3usize.saturating_sub(n);

    out[..pad].fill(b' ');
    out[pad..pad + n].copy_from_slice(&digits[..n]);
    out[pad + n] = b' ';
    str::from_utf8(&out[..pad + n + 1]).unwrap_or("")
}

pub fn write_u16_ascii(mut value: u16, out: &mut [u8]) -> usize {
    if out.is_empty() {
        return 0;
    }

    if value == 0 {
        out[0] = b'0';
        return 1;
    }

    let mut tmp = [0u8; 5];
    let mut n = 0usize;
    while value > 0 && n < tmp.len() {
        tmp[n] = b'0' + (value % 10) as u8;
        value /= 10;
        n += 1;
    }

    let len = n.min(out.len());
    for i in 0..len {
        out[i] = tmp[n - 1 - i];
    }
    len
}
