//! Numbered corpus lines placed on a screen, and the map back from screen
//! coordinates to lines and words.

use core::fmt::Write as _;

use dualscreen_fb::Canvas;
use heapless::{String, Vec};
use log::debug;

use crate::{
    corpus::LineRef,
    font::Font,
    layout::{self, WrapArea},
    render::Palette,
    text_policy::{GUTTER_LABEL_BYTES, line_number_label},
};

/// Most lines one page can hold.
pub const MAX_PAGE_LINES: usize = 40;
pub const HEADER_LABEL_BYTES: usize = 80;
const NO_LINES: &[u8] = b"(no lines)";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageConfig {
    /// Gutter x.
    pub margin_left: i32,
    /// Wrapped text stops this far from the right edge.
    pub margin_right: i32,
    /// Upper bound for [`PageConfig::lines_per_screen`], at most [`MAX_PAGE_LINES`].
    pub max_page_lines: usize,
    /// Lines fetched beyond one screen so long pages still fill.
    pub fetch_extra: usize,
    pub show_header: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            margin_left: 2,
            margin_right: 2,
            max_page_lines: MAX_PAGE_LINES,
            fetch_extra: 10,
            show_header: false,
        }
    }
}

impl PageConfig {
    fn page_cap(&self) -> usize {
        self.max_page_lines.clamp(1, MAX_PAGE_LINES)
    }

    /// Unwrapped lines that fit below a header, `1..=max_page_lines`.
    pub fn lines_per_screen(&self, font: &Font, height: usize) -> usize {
        let line_h = font.line_height();
        let header_h = line_h + 2;
        let n = (height as i32 - header_h) / line_h;
        (n.max(1) as usize).min(self.page_cap())
    }

    /// Lines to request from the corpus for one page.
    pub fn fetch_count(&self, lines_per_screen: usize) -> usize {
        (lines_per_screen + self.fetch_extra).min(self.page_cap())
    }
}

/// Lines shown as context above reading position `line`: up to two screens'
/// worth, never before line 1. Returns `(first_line, count)`.
pub fn context_window(lines_per_screen: usize, line: u16) -> (u16, usize) {
    let back = (lines_per_screen * 2).min(u16::MAX as usize) as u16;
    let start = line.saturating_sub(back).max(1);
    (start, line.saturating_sub(start) as usize)
}

/// Status line drawn above a windowed page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageHeader {
    pub book: u16,
    pub book_count: u32,
    pub first_line: u16,
    pub last_line: u16,
    pub max_line: u32,
    pub font_px: u8,
    pub fullscreen: bool,
}

impl PageHeader {
    /// `Book 1/24  [1-12 / 611]  10px`
    pub fn label(&self) -> String<HEADER_LABEL_BYTES> {
        let mut out = String::new();
        let _ = write!(
            out,
            "Book {}/{}  [{}-{} / {}]  {}px{}",
            self.book,
            self.book_count,
            self.first_line,
            self.last_line,
            self.max_line,
            self.font_px,
            if self.fullscreen { "  [FS]" } else { "" }
        );
        out
    }
}

/// Line number and top edge of one placed line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LayoutRow {
    pub line: u16,
    pub y: i32,
}

/// A line as drawn: enough to replay its wrap for hit-testing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlacedLine<'a> {
    pub line: u16,
    pub y: i32,
    pub text_x: i32,
    pub rows: usize,
    pub text: &'a str,
}

/// Where each line of the last drawn page landed.
#[derive(Clone, Debug)]
pub struct PageMap<'a> {
    font: &'a Font,
    placed: Vec<PlacedLine<'a>, MAX_PAGE_LINES>,
    max_x: i32,
    height: i32,
}

impl<'a> PageMap<'a> {
    fn new(font: &'a Font, max_x: i32, height: i32) -> Self {
        Self {
            font,
            placed: Vec::new(),
            max_x,
            height,
        }
    }

    pub fn placed(&self) -> &[PlacedLine<'a>] {
        &self.placed
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn layout_rows(&self) -> impl Iterator<Item = LayoutRow> + '_ {
        self.placed.iter().map(|p| LayoutRow {
            line: p.line,
            y: p.y,
        })
    }

    /// Line whose band `[y_i, y_{i+1})` holds `sy`, with the offset into it.
    ///
    /// The last band runs to the bottom of the screen; points outside every
    /// band resolve against the last line.
    pub fn screen_to_line(&self, sy: i32) -> Option<(u16, i32)> {
        let bottoms = self
            .placed
            .iter()
            .skip(1)
            .map(|p| p.y)
            .chain(core::iter::once(self.height));
        for (placed, bottom) in self.placed.iter().zip(bottoms) {
            if sy >= placed.y && sy < bottom {
                return Some((placed.line, sy - placed.y));
            }
        }
        self.placed.last().map(|last| (last.line, sy - last.y))
    }

    /// Screen y of `y_off` pixels into `line`, `None` if it is not on the page.
    pub fn line_to_screen(&self, line: u16, y_off: i32) -> Option<i32> {
        self.placed
            .iter()
            .find(|p| p.line == line)
            .map(|p| p.y + y_off)
    }

    /// The placed line whose wrapped rows cover `ty`.
    pub fn line_at(&self, ty: i32) -> Option<&PlacedLine<'a>> {
        let line_h = self.font.line_height();
        self.placed
            .iter()
            .find(|p| ty >= p.y && ty < p.y + p.rows as i32 * line_h)
    }

    /// Raw bytes of the word under a touch, copied into `out`.
    pub fn touch_to_word<'b>(&self, tx: i32, ty: i32, out: &'b mut [u8]) -> Option<&'b [u8]> {
        let placed = self.line_at(ty)?;
        let area = WrapArea::flush(placed.text_x, placed.y, self.max_x);
        layout::word_at(self.font, area, placed.text.as_bytes(), tx, ty, out)
    }
}

/// Draws the `"%3d "` gutter and returns the x where the text starts.
fn draw_gutter<C: Canvas + ?Sized>(
    canvas: &mut C,
    font: &Font,
    palette: &Palette,
    config: &PageConfig,
    line: u16,
    y: i32,
) -> i32 {
    let text_x = gutter_text_x(font, config, line);
    let mut buf = [0u8; GUTTER_LABEL_BYTES];
    let label = line_number_label(line, &mut buf);
    layout::draw_text(canvas, font, config.margin_left, y, label.as_bytes(), palette.num);
    text_x
}

fn gutter_text_x(font: &Font, config: &PageConfig, line: u16) -> i32 {
    let mut buf = [0u8; GUTTER_LABEL_BYTES];
    let label = line_number_label(line, &mut buf);
    config.margin_left + layout::measure_width(font, label.as_bytes())
}

/// Clears the target and lays out `lines` top-down.
///
/// Lines are placed while a full row still fits; a line's wrapped rows may run
/// past the bottom and are clipped.
pub fn draw_page<'a, C, I>(
    canvas: &mut C,
    font: &'a Font,
    palette: &Palette,
    config: &PageConfig,
    header: Option<&str>,
    lines: I,
) -> PageMap<'a>
where
    C: Canvas + ?Sized,
    I: IntoIterator<Item = LineRef<'a>>,
{
    let (width, height) = canvas.size();
    let (width, height) = (width as i32, height as i32);
    let line_h = font.line_height();
    let max_x = width - config.margin_right;
    let mut map = PageMap::new(font, max_x, height);

    canvas.clear(palette.bg);

    let mut y = 0;
    if let Some(header) = header {
        let header_h = line_h + 2;
        layout::draw_text(canvas, font, 2, 1, header.as_bytes(), palette.hl);
        canvas.hline(0, header_h - 1, width, palette.num);
        y = header_h;
    }

    for line in lines.into_iter().take(config.page_cap()) {
        if y + line_h > height {
            break;
        }
        let text_x = draw_gutter(canvas, font, palette, config, line.line, y);
        let rows = layout::wrap_and_draw(
            canvas,
            font,
            WrapArea::flush(text_x, y, max_x),
            line.text.as_bytes(),
            palette.text,
        );
        let _ = map.placed.push(PlacedLine {
            line: line.line,
            y,
            text_x,
            rows,
            text: line.text,
        });
        y += rows as i32 * line_h;
    }

    if map.is_empty() {
        layout::draw_text(canvas, font, 8, y + 4, NO_LINES, palette.num);
    }

    debug!("page: {} lines placed, bottom at y {}", map.len(), y);
    map
}

/// Clears the target and draws the longest tail of `lines` that fits, flush
/// with the bottom edge.
pub fn draw_context<'a, C, I>(
    canvas: &mut C,
    font: &'a Font,
    palette: &Palette,
    config: &PageConfig,
    lines: I,
) -> PageMap<'a>
where
    C: Canvas + ?Sized,
    I: IntoIterator<Item = LineRef<'a>>,
{
    let (width, height) = canvas.size();
    let (width, height) = (width as i32, height as i32);
    let line_h = font.line_height();
    let max_x = width - config.margin_right;
    let mut map = PageMap::new(font, max_x, height);

    canvas.clear(palette.bg);

    let mut measured: Vec<(LineRef<'a>, usize), MAX_PAGE_LINES> = Vec::new();
    for line in lines {
        let text_x = gutter_text_x(font, config, line.line);
        let rows = layout::count_wrapped_rows(
            font,
            WrapArea::flush(text_x, 0, max_x),
            line.text.as_bytes(),
        )
        .max(1);
        if measured.is_full() {
            measured.remove(0);
        }
        let _ = measured.push((line, rows));
    }

    let row_budget = (height / line_h).max(0) as usize;
    let mut rows_fit = 0;
    let mut first = measured.len();
    for (idx, (_, rows)) in measured.iter().enumerate().rev() {
        if rows_fit + rows > row_budget {
            break;
        }
        rows_fit += rows;
        first = idx;
    }

    let mut y = height - rows_fit as i32 * line_h;
    for (line, rows) in &measured[first..] {
        let text_x = draw_gutter(canvas, font, palette, config, line.line, y);
        layout::wrap_and_draw(
            canvas,
            font,
            WrapArea::flush(text_x, y, max_x),
            line.text.as_bytes(),
            palette.text,
        );
        let _ = map.placed.push(PlacedLine {
            line: line.line,
            y,
            text_x,
            rows: *rows,
            text: line.text,
        });
        y += *rows as i32 * line_h;
    }

    debug!("context: {} of {} lines fit", map.len(), measured.len());
    map
}
