use dualscreen_fb::{FrameBuffer, HEIGHT, WIDTH};

use super::*;
use crate::fixtures::{LETTER_ADVANCE, SPACE_ADVANCE, reader_font};

const INK: Rgb15 = Rgb15::WHITE;

/// Target wider than a screen, for runs that must not hit the edge.
struct Strip {
    width: usize,
    plotted: usize,
}

impl Canvas for Strip {
    fn size(&self) -> (usize, usize) {
        (self.width, 16)
    }

    fn put_pixel(&mut self, _x: usize, _y: usize, _color: Rgb15) {
        self.plotted += 1;
    }
}

const SAMPLES: &[&str] = &[
    "",
    "   ",
    "ἄνδρα μοι ἔννεπε μοῦσα πολύτροπον ὃς μάλα πολλὰ",
    "short words wrap onto the next row when the row fills",
    "anunbreakablewordthatiswiderthanthewholerow and more",
    "first\nsecond\n\nfourth ",
    "tabs\tbetween\twords and  double  spaces",
];

#[test]
fn measure_sums_advances() {
    let font = reader_font();
    assert_eq!(measure_width(&font, b"abc"), 3 * LETTER_ADVANCE);
    assert_eq!(
        measure_width(&font, "ab c".as_bytes()),
        3 * LETTER_ADVANCE + SPACE_ADVANCE
    );
    // Missing glyph and malformed bytes both fall back to 4 px.
    assert_eq!(measure_width(&font, "a€".as_bytes()), LETTER_ADVANCE + 4);
    assert_eq!(measure_width(&font, &[0xE1, 0xBC, b'a']), 4 + LETTER_ADVANCE);
    assert_eq!(measure_width(&font, b"ab\0cd"), 2 * LETTER_ADVANCE);
}

#[test]
fn counted_rows_match_drawn_rows() {
    let font = reader_font();
    for max_x in [40, 90, 200, 254] {
        for (i, text) in SAMPLES.iter().enumerate() {
            let area = WrapArea::new(20, 8, 3, max_x);
            let mut fb = FrameBuffer::new();
            let drawn = wrap_and_draw(&mut fb, &font, area, text.as_bytes(), INK);
            let counted = count_wrapped_rows(&font, area, text.as_bytes());
            assert_eq!(drawn, counted, "sample {i} at max_x {max_x}");
        }
    }
}

#[test]
fn rows_stay_within_max_x_unless_word_starts_row() {
    let font = reader_font();
    for max_x in [40, 90, 200] {
        for text in SAMPLES {
            let area = WrapArea::flush(10, 0, max_x);
            for span in Wrap::new(&font, text.as_bytes(), area) {
                let starts_row = span.x == area.x_indent;
                assert!(
                    starts_row || span.x + span.width <= max_x,
                    "{:?} overflows max_x {max_x}",
                    &text.as_bytes()[span.start..span.end]
                );
            }
        }
    }
}

#[test]
fn oversized_word_is_placed_unbroken() {
    let font = reader_font();
    let area = WrapArea::flush(2, 0, 30);
    let spans: Vec<WordSpan> = Wrap::new(&font, b"abcdefghij", area).collect();

    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].x, 2);
    assert_eq!(spans[0].width, 10 * LETTER_ADVANCE);
    assert_eq!(count_wrapped_rows(&font, area, b"abcdefghij"), 1);
}

#[test]
fn wrap_moves_word_to_indent() {
    let font = reader_font();
    // "aaaa" is 24 px: the second word no longer fits before x = 40.
    let area = WrapArea::new(10, 4, 0, 40);
    let spans: Vec<WordSpan> = Wrap::new(&font, b"aaaa bbbb", area).collect();

    assert_eq!(spans[0].x, 10);
    assert_eq!(spans[0].row, 1);
    assert_eq!(spans[1].x, 4);
    assert_eq!(spans[1].y, font.line_height());
    assert_eq!(spans[1].row, 2);
}

#[test]
fn hard_breaks_reset_to_indent() {
    let font = reader_font();
    let area = WrapArea::new(30, 6, 10, 250);
    let spans: Vec<WordSpan> = Wrap::new(&font, b"ab\ncd\n\nef", area).collect();

    assert_eq!(spans.len(), 3);
    assert_eq!((spans[0].x, spans[0].y), (30, 10));
    assert_eq!((spans[1].x, spans[1].y), (6, 10 + font.line_height()));
    assert_eq!((spans[2].x, spans[2].y), (6, 10 + 3 * font.line_height()));
    assert_eq!(count_wrapped_rows(&font, area, b"ab\ncd\n\nef"), 4);
}

#[test]
fn trailing_spaces_never_wrap() {
    let font = reader_font();
    let area = WrapArea::flush(0, 0, 14);
    assert_eq!(count_wrapped_rows(&font, area, b"ab          "), 1);
}

#[test]
fn word_at_matches_every_pixel_of_the_word() {
    let font = reader_font();
    let area = WrapArea::flush(4, 20, 100);
    let text = "λόγος ἄνδρα word".as_bytes();
    let mut buf = [0u8; 64];

    for span in Wrap::new(&font, text, area) {
        let expected = &text[span.start..span.end];
        for py in span.y..span.y + font.line_height() {
            for px in span.x..span.x + span.width {
                let found = word_at(&font, area, text, px, py, &mut buf);
                assert_eq!(found, Some(expected), "point ({px}, {py})");
            }
        }
    }
}

#[test]
fn word_at_misses_whitespace_and_empty_space() {
    let font = reader_font();
    let area = WrapArea::flush(0, 0, 200);
    let mut buf = [0u8; 32];

    // The space between "ab" and "cd" starts at x = 12.
    assert_eq!(word_at(&font, area, b"ab cd", 12, 2, &mut buf), None);
    // Past the last word on its row.
    assert_eq!(word_at(&font, area, b"ab cd", 40, 2, &mut buf), None);
    // Below the only row.
    assert_eq!(
        word_at(&font, area, b"ab cd", 2, font.line_height(), &mut buf),
        None
    );
    assert_eq!(
        word_at(&font, area, b"ab cd", 2, 2, &mut buf),
        Some(&b"ab"[..])
    );
}

#[test]
fn word_at_truncates_to_buffer() {
    let font = reader_font();
    let area = WrapArea::flush(0, 0, 200);

    let mut small = [0u8; 3];
    assert_eq!(
        word_at(&font, area, b"abcdef", 1, 1, &mut small),
        Some(&b"abc"[..])
    );
    let mut empty = [0u8; 0];
    assert_eq!(word_at(&font, area, b"abcdef", 1, 1, &mut empty), None);
}

#[test]
fn word_span_reports_byte_range() {
    let font = reader_font();
    let area = WrapArea::flush(0, 0, 200);
    let span = word_span_at(&font, area, "μῆνιν ἄειδε".as_bytes(), 60, 0).unwrap();

    assert_eq!(span.start, "μῆνιν ".len());
    assert_eq!(span.end, "μῆνιν ἄειδε".len());
}

#[test]
fn draw_text_stops_at_right_edge() {
    let font = reader_font();
    let mut fb = FrameBuffer::new();
    let end = draw_text(&mut fb, &font, WIDTH as i32 - 6, 0, b"aaaa", INK);

    assert_eq!(end, WIDTH as i32);
    assert_eq!(fb.count(INK), 6 * 8);
}

#[test]
fn draw_text_caps_codepoints() {
    let font = reader_font();
    let mut strip = Strip {
        width: 8192,
        plotted: 0,
    };
    let text = [b'#'; MAX_DRAW_CHARS + 100];

    let end = draw_text(&mut strip, &font, 0, 0, &text, INK);
    assert_eq!(end, MAX_DRAW_CHARS as i32 * 4);
    assert_eq!(strip.plotted, 0);
}

#[test]
fn glyphs_clip_at_top_left() {
    let font = reader_font();
    let mut fb = FrameBuffer::new();
    draw_text(&mut fb, &font, -3, -2, b"a", INK);

    assert_eq!(fb.count(INK), 3 * 6);
    assert_eq!(fb.pixel(0, 0), Some(INK));
    assert_eq!(fb.pixel(3, 0), Some(Rgb15::from_raw(0)));
}

#[test]
fn glyphs_clip_at_bottom() {
    let font = reader_font();
    let mut fb = FrameBuffer::new();
    let rows = wrap_and_draw(
        &mut fb,
        &font,
        WrapArea::flush(0, HEIGHT as i32 - 3, 250),
        b"a",
        INK,
    );

    assert_eq!(rows, 1);
    assert_eq!(fb.count(INK), 6 * 3);
}
