//! Word lookup report: what a tapped word is, composed from corpus queries.

use core::fmt::Write as _;

use dualscreen_fb::Canvas;
use heapless::{String, Vec};
use log::debug;

use crate::{
    corpus::Corpus,
    font::Font,
    layout::{self, WrapArea},
    render::{Palette, Role},
    text_policy::{copy_truncated, push_truncated},
};

pub const MAX_RESULT_LINES: usize = 60;
pub const RESULT_LINE_BYTES: usize = 128;
pub const TITLE_BYTES: usize = 64;
pub const MAX_LEX_RESULTS: usize = 4;
pub const MAX_MORPH_RESULTS: usize = 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LookupMode {
    /// Form first: every analysis with its parse and gloss.
    Morphology,
    /// Lemma first, falling back to the analyses of a form.
    Dictionary,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LookupConfig {
    pub max_lex: usize,
    pub max_morph: usize,
    pub heading_indent: i32,
    pub body_indent: i32,
    /// Extra indent for wrapped continuation rows.
    pub wrap_indent: i32,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            max_lex: MAX_LEX_RESULTS,
            max_morph: MAX_MORPH_RESULTS,
            heading_indent: 4,
            body_indent: 12,
            wrap_indent: 8,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResultLine {
    pub text: String<RESULT_LINE_BYTES>,
    pub role: Role,
    pub indent: i32,
}

#[derive(Clone, Debug, Default)]
pub struct LookupReport {
    title: String<TITLE_BYTES>,
    lines: Vec<ResultLine, MAX_RESULT_LINES>,
    scroll: usize,
}

impl LookupReport {
    pub fn build(corpus: &Corpus, word: &str, mode: LookupMode, config: &LookupConfig) -> Self {
        let mut report = Self {
            title: copy_truncated(word),
            ..Self::default()
        };
        match mode {
            LookupMode::Morphology => report.fill_morphology(corpus, word, config),
            LookupMode::Dictionary => report.fill_dictionary(corpus, word, config),
        }
        debug!(
            "lookup {:?} ({:?}): {} report lines",
            word,
            mode,
            report.lines.len()
        );
        report
    }

    fn push(&mut self, text: &str, role: Role, indent: i32) {
        let _ = self.lines.push(ResultLine {
            text: copy_truncated(text),
            role,
            indent,
        });
    }

    fn push_fmt(&mut self, role: Role, indent: i32, args: core::fmt::Arguments<'_>) {
        let mut text: String<RESULT_LINE_BYTES> = String::new();
        if text.write_fmt(args).is_err() {
            // Too long for one line: keep what fits.
            let mut full: alloc::string::String = alloc::string::String::new();
            let _ = full.write_fmt(args);
            text.clear();
            push_truncated(&mut text, &full);
        }
        let _ = self.lines.push(ResultLine { text, role, indent });
    }

    fn blank(&mut self) {
        self.push("", Role::Background, 0);
    }

    fn fill_morphology(&mut self, corpus: &Corpus, word: &str, config: &LookupConfig) {
        let morphs = corpus.morph_lookup::<MAX_MORPH_RESULTS>(word, config.max_morph);
        if morphs.is_empty() {
            self.push_fmt(
                Role::Number,
                config.heading_indent,
                format_args!("No data for: {}", word),
            );
            return;
        }

        for morph in &morphs {
            self.push_fmt(
                Role::Highlight,
                config.heading_indent,
                format_args!("{} -> {}", morph.form, morph.lemma),
            );
            self.push(&morph.parse, Role::Highlight, config.body_indent);

            let lex = corpus.lex_lookup::<1>(&morph.lemma, 1);
            if let Some(entry) = lex.first().filter(|e| !e.short_def.is_empty()) {
                self.push(&entry.short_def, Role::Text, config.body_indent);
            }
            self.blank();
        }
    }

    fn fill_dictionary(&mut self, corpus: &Corpus, word: &str, config: &LookupConfig) {
        let entries = corpus.lex_lookup::<MAX_LEX_RESULTS>(word, config.max_lex);
        if !entries.is_empty() {
            for entry in &entries {
                self.push(&entry.lemma, Role::Highlight, config.heading_indent);
                if !entry.short_def.is_empty() {
                    self.push(&entry.short_def, Role::Text, config.body_indent);
                }
                self.blank();
            }
            return;
        }

        let morphs = corpus.morph_lookup::<MAX_MORPH_RESULTS>(word, config.max_morph);
        if morphs.is_empty() {
            self.push_fmt(
                Role::Number,
                config.heading_indent,
                format_args!("Not found: {}", word),
            );
            return;
        }

        for morph in &morphs {
            let lex = corpus.lex_lookup::<1>(&morph.lemma, 1);
            let Some(entry) = lex.first() else {
                continue;
            };
            self.push_fmt(
                Role::Highlight,
                config.heading_indent,
                format_args!("{} ({})", entry.lemma, morph.parse),
            );
            if !entry.short_def.is_empty() {
                self.push(&entry.short_def, Role::Text, config.body_indent);
            }
            self.blank();
        }
    }

    /// The looked-up word.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[ResultLine] {
        &self.lines
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Moves down one line; the next draw clamps to the last line.
    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Clears the target and draws the lines from the scroll position, with an
    /// optional footer. Returns how many result lines were drawn.
    pub fn draw<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        font: &Font,
        palette: &Palette,
        footer: Option<&str>,
    ) -> usize {
        let (width, height) = canvas.size();
        let (width, height) = (width as i32, height as i32);
        let line_h = font.line_height();
        let header_h = line_h + 2;
        let footer_h = line_h + 4;
        let y_max = height - footer_h;

        self.scroll = self.scroll.min(self.lines.len().saturating_sub(1));

        canvas.clear(palette.bg);
        canvas.hline(0, header_h - 1, width, palette.num);

        let mut y = header_h;
        let mut drawn = 0;
        for line in self.lines.iter().skip(self.scroll) {
            if y + line_h > y_max {
                break;
            }
            let area = WrapArea::new(line.indent, line.indent + 8, y, width - 2);
            let rows = layout::wrap_and_draw(
                canvas,
                font,
                area,
                line.text.as_bytes(),
                palette.color(line.role),
            );
            y += rows as i32 * line_h;
            drawn += 1;
        }

        if let Some(footer) = footer {
            let footer_y = height - font.glyph_height() as i32 - 2;
            canvas.hline(0, footer_y - 2, width, palette.num);
            layout::draw_text(canvas, font, 4, footer_y, footer.as_bytes(), palette.hl);
        }

        drawn
    }
}
