use crate::{font::Font, utf8};

/// Where a wrapped block starts and how far it may run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WrapArea {
    /// Cursor x of the first row.
    pub x_start: i32,
    /// Cursor x after every wrap or hard break.
    pub x_indent: i32,
    /// Top of the first row.
    pub y: i32,
    /// A word may not end past this x unless it starts a row.
    pub max_x: i32,
}

impl WrapArea {
    pub const fn new(x_start: i32, x_indent: i32, y: i32, max_x: i32) -> Self {
        Self {
            x_start,
            x_indent,
            y,
            max_x,
        }
    }

    /// Same area with both x origins at `x`.
    pub const fn flush(x: i32, y: i32, max_x: i32) -> Self {
        Self::new(x, x, y, max_x)
    }
}

/// One placed word.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WordSpan {
    /// Byte range in the source text.
    pub start: usize,
    pub end: usize,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    /// 1-based row the word lands on.
    pub row: usize,
}

impl WordSpan {
    pub fn contains(&self, px: i32, py: i32, line_height: i32) -> bool {
        py >= self.y && py < self.y + line_height && px >= self.x && px < self.x + self.width
    }
}

pub(crate) fn is_blank(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

fn is_word_end(byte: u8) -> bool {
    is_blank(byte) || byte == b'\n'
}

/// Text up to the first NUL.
pub(crate) fn until_nul(text: &[u8]) -> &[u8] {
    match text.iter().position(|&b| b == 0) {
        Some(end) => &text[..end],
        None => text,
    }
}

/// Greedy word wrap over UTF-8 bytes.
///
/// Drawing, row counting and hit-testing all walk this iterator, so a point
/// resolves to exactly the word that was painted under it.
#[derive(Clone, Debug)]
pub struct Wrap<'a> {
    font: &'a Font,
    text: &'a [u8],
    pos: usize,
    x: i32,
    y: i32,
    x_indent: i32,
    max_x: i32,
    line_height: i32,
    rows: usize,
}

impl<'a> Wrap<'a> {
    pub fn new(font: &'a Font, text: &'a [u8], area: WrapArea) -> Self {
        Self {
            font,
            text: until_nul(text),
            pos: 0,
            x: area.x_start,
            y: area.y,
            x_indent: area.x_indent,
            max_x: area.max_x,
            line_height: font.line_height(),
            rows: 1,
        }
    }

    /// Rows started so far; counts the first row even before any word.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn text(&self) -> &'a [u8] {
        self.text
    }

    fn break_row(&mut self) {
        self.x = self.x_indent;
        self.y += self.line_height;
        self.rows += 1;
    }

    /// Width of the word at `pos` and the byte offset where it ends.
    fn measure_word(&self) -> (i32, usize) {
        let mut width = 0;
        let mut end = self.pos;
        while end < self.text.len() && !is_word_end(self.text[end]) {
            let (cp, used) = utf8::decode_one(&self.text[end..]);
            width += self.font.advance(cp);
            end += used.max(1);
        }
        (width, end)
    }
}

impl Iterator for Wrap<'_> {
    type Item = WordSpan;

    fn next(&mut self) -> Option<WordSpan> {
        loop {
            while self.pos < self.text.len() && is_blank(self.text[self.pos]) {
                self.x += self.font.advance(self.text[self.pos] as u32);
                self.pos += 1;
            }

            match self.text.get(self.pos) {
                None => return None,
                Some(b'\n') => {
                    self.pos += 1;
                    self.break_row();
                }
                Some(_) => break,
            }
        }

        let (width, end) = self.measure_word();
        if self.x + width > self.max_x && self.x > self.x_indent {
            self.break_row();
        }

        let span = WordSpan {
            start: self.pos,
            end,
            x: self.x,
            y: self.y,
            width,
            row: self.rows,
        };
        self.x += width;
        self.pos = end;
        Some(span)
    }
}
