//! PRDB corpus: text lines, inflected forms and lexicon entries in one
//! immutable block.
//!
//! All queries are binary searches over the fixed-width indices followed by a
//! forward scan of the matching run. Strings are read from the NUL-terminated
//! pool by offset and copied into bounded results.

mod build;
pub mod format;

#[cfg(test)]
mod tests;

use alloc::{boxed::Box, vec::Vec};
use core::fmt;

use heapless::{String, Vec as BoundedVec};
use log::{debug, info, warn};

use crate::{
    postag,
    store::{ByteStore, StoreError, try_copy},
    text_policy::{copy_truncated, valid_prefix},
};
use format::{
    Header, LEX_ENTRY_BYTES, MAX_BOOKS, MORPH_ENTRY_BYTES, TEXT_ENTRY_BYTES, TextEntry,
    TripleEntry,
};

pub use build::CorpusBuilder;

pub const LINE_TEXT_BYTES: usize = 2048;
pub const FORM_BYTES: usize = 256;
pub const LEMMA_BYTES: usize = 256;
pub const POSTAG_BYTES: usize = 16;
pub const SHORT_DEF_BYTES: usize = 1024;
pub const DEFINITION_BYTES: usize = 8192;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CorpusError {
    NotFound,
    Truncated,
    BadMagic,
    BadVersion,
    AllocFailed,
}

impl From<StoreError> for CorpusError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            StoreError::Truncated => Self::Truncated,
            StoreError::AllocFailed => Self::AllocFailed,
        }
    }
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("corpus file not found"),
            Self::Truncated => f.write_str("corpus file truncated"),
            Self::BadMagic => f.write_str("not a PRDB corpus"),
            Self::BadVersion => f.write_str("unsupported PRDB version"),
            Self::AllocFailed => f.write_str("out of memory loading corpus"),
        }
    }
}

/// Owned copy of one corpus line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Line {
    pub book: u16,
    pub line: u16,
    pub text: String<LINE_TEXT_BYTES>,
}

/// Borrowed view of one corpus line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LineRef<'a> {
    pub book: u16,
    pub line: u16,
    pub text: &'a str,
}

impl LineRef<'_> {
    pub fn to_line(&self) -> Line {
        Line {
            book: self.book,
            line: self.line,
            text: copy_truncated(self.text),
        }
    }
}

/// One analysis of an inflected form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MorphResult {
    pub form: String<FORM_BYTES>,
    pub lemma: String<LEMMA_BYTES>,
    pub postag: String<POSTAG_BYTES>,
    /// Readable label decoded from `postag`.
    pub parse: String<{ postag::PARSE_BYTES }>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LexResult {
    pub lemma: String<LEMMA_BYTES>,
    pub short_def: String<SHORT_DEF_BYTES>,
    pub definition: String<DEFINITION_BYTES>,
}

/// Smallest index in `0..len` for which `is_before` is false.
fn partition_point(len: usize, mut is_before: impl FnMut(usize) -> bool) -> usize {
    let (mut lo, mut hi) = (0usize, len);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if is_before(mid) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Loaded corpus.
pub struct Corpus {
    block: Box<[u8]>,
    header: Header,
}

impl fmt::Debug for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Corpus")
            .field("bytes", &self.block.len())
            .field("header", &self.header)
            .finish()
    }
}

impl Corpus {
    /// Reads the whole file at `path` and validates it.
    pub fn load<S: ByteStore>(store: &S, path: &str) -> Result<Self, CorpusError> {
        let bytes = store.read(path).inspect_err(|err| {
            warn!("corpus {}: read failed: {}", path, err);
        })?;
        let corpus = Self::from_block(bytes)?;
        info!(
            "corpus {}: {} bytes, {} lines, {} forms, {} lemmas, {} books",
            path,
            corpus.block.len(),
            corpus.header.text_count,
            corpus.header.morph_count,
            corpus.header.lex_count,
            corpus.header.book_count
        );
        Ok(corpus)
    }

    /// Validates and copies an in-memory PRDB image.
    pub fn parse(bytes: &[u8]) -> Result<Self, CorpusError> {
        Self::from_block(try_copy(bytes)?)
    }

    fn from_block(block: Vec<u8>) -> Result<Self, CorpusError> {
        let header = Header::decode(&block)
            .and_then(|header| header.validate(block.len()).map(|()| header))
            .inspect_err(|err| warn!("corpus rejected: {}", err))?;
        Ok(Self {
            block: block.into_boxed_slice(),
            header,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Size of the backing block in bytes.
    pub fn block_len(&self) -> usize {
        self.block.len()
    }

    pub fn text_count(&self) -> usize {
        self.header.text_count as usize
    }

    pub fn morph_count(&self) -> usize {
        self.header.morph_count as usize
    }

    pub fn lex_count(&self) -> usize {
        self.header.lex_count as usize
    }

    /// Highest book number present.
    pub fn book_count(&self) -> u32 {
        self.header.book_count
    }

    /// Last line of `book`, 0 for books outside `1..30`.
    pub fn max_line(&self, book: u16) -> u32 {
        let book = book as usize;
        if (1..MAX_BOOKS).contains(&book) {
            self.header.book_max[book]
        } else {
            0
        }
    }

    fn text_entry(&self, idx: usize) -> TextEntry {
        let at = self.header.text_offset as usize + idx * TEXT_ENTRY_BYTES;
        TextEntry::decode(&self.block, at)
    }

    fn morph_entry(&self, idx: usize) -> TripleEntry {
        let at = self.header.morph_offset as usize + idx * MORPH_ENTRY_BYTES;
        TripleEntry::decode(&self.block, at)
    }

    fn lex_entry(&self, idx: usize) -> TripleEntry {
        let at = self.header.lex_offset as usize + idx * LEX_ENTRY_BYTES;
        TripleEntry::decode(&self.block, at)
    }

    /// Raw pool bytes at `offset` up to the terminator.
    ///
    /// Offsets past the pool read as empty; a missing terminator ends the
    /// string at the end of the block.
    fn pool_bytes(&self, offset: u32) -> &[u8] {
        let rest = (self.header.strings_offset as usize)
            .checked_add(offset as usize)
            .and_then(|start| self.block.get(start..));
        let Some(rest) = rest else {
            return &[];
        };
        match rest.iter().position(|&b| b == 0) {
            Some(end) => &rest[..end],
            None => rest,
        }
    }

    /// Pool string at `offset`, cut back to its valid UTF-8 prefix.
    pub fn pool_str(&self, offset: u32) -> &str {
        valid_prefix(self.pool_bytes(offset))
    }

    /// Lines of `book` from the first line `>= start_line` to the end of the
    /// book.
    pub fn lines(&self, book: u16, start_line: u16) -> Lines<'_> {
        let next = partition_point(self.text_count(), |idx| {
            let entry = self.text_entry(idx);
            (entry.book, entry.line) < (book, start_line)
        });
        Lines {
            corpus: self,
            next,
            book,
        }
    }

    /// Up to `count` lines (and at most `N`) starting at `start_line`.
    pub fn get_lines<const N: usize>(
        &self,
        book: u16,
        start_line: u16,
        count: usize,
    ) -> BoundedVec<Line, N> {
        let mut out = BoundedVec::new();
        for line in self.lines(book, start_line).take(count) {
            if out.push(line.to_line()).is_err() {
                break;
            }
        }
        debug!(
            "corpus: book {} from line {}: {} lines",
            book,
            start_line,
            out.len()
        );
        out
    }

    /// Index range of the run of entries whose key equals `key`.
    fn key_run(
        &self,
        count: usize,
        key: &[u8],
        entry: impl Fn(usize) -> TripleEntry,
    ) -> core::ops::Range<usize> {
        let first = partition_point(count, |idx| self.pool_bytes(entry(idx).key) < key);
        let mut end = first;
        while end < count && self.pool_bytes(entry(end).key) == key {
            end += 1;
        }
        first..end
    }

    /// All analyses of `form`, capped at `max_results` and `N`.
    pub fn morph_lookup<const N: usize>(
        &self,
        form: &str,
        max_results: usize,
    ) -> BoundedVec<MorphResult, N> {
        let mut out = BoundedVec::new();
        let run = self.key_run(self.morph_count(), form.as_bytes(), |idx| self.morph_entry(idx));
        for idx in run.take(max_results) {
            let entry = self.morph_entry(idx);
            let postag: String<POSTAG_BYTES> = copy_truncated(self.pool_str(entry.third));
            let result = MorphResult {
                form: copy_truncated(self.pool_str(entry.key)),
                lemma: copy_truncated(self.pool_str(entry.second)),
                parse: postag::decode(&postag),
                postag,
            };
            if out.push(result).is_err() {
                break;
            }
        }
        debug!("corpus: morph {:?}: {} results", form, out.len());
        out
    }

    fn lex_run<const N: usize>(&self, lemma: &str, max_results: usize) -> BoundedVec<LexResult, N> {
        let mut out = BoundedVec::new();
        let run = self.key_run(self.lex_count(), lemma.as_bytes(), |idx| self.lex_entry(idx));
        for idx in run.take(max_results) {
            let entry = self.lex_entry(idx);
            let result = LexResult {
                lemma: copy_truncated(self.pool_str(entry.key)),
                short_def: copy_truncated(self.pool_str(entry.second)),
                definition: copy_truncated(self.pool_str(entry.third)),
            };
            if out.push(result).is_err() {
                break;
            }
        }
        out
    }

    /// Lexicon entries for `lemma`.
    ///
    /// When nothing matches and the lemma carries a numeric disambiguation
    /// suffix (`μῆνις1`), the suffix is stripped and the search runs once
    /// more. Lemmas of [`LEMMA_BYTES`] or longer never fall back.
    pub fn lex_lookup<const N: usize>(
        &self,
        lemma: &str,
        max_results: usize,
    ) -> BoundedVec<LexResult, N> {
        let out = self.lex_run(lemma, max_results);
        if !out.is_empty() {
            debug!("corpus: lex {:?}: {} results", lemma, out.len());
            return out;
        }

        let ends_in_digit = lemma.as_bytes().last().is_some_and(u8::is_ascii_digit);
        if lemma.len() > 1 && lemma.len() < LEMMA_BYTES && ends_in_digit {
            let stripped = lemma.trim_end_matches(|c: char| c.is_ascii_digit());
            if !stripped.is_empty() {
                let out = self.lex_run(stripped, max_results);
                debug!(
                    "corpus: lex {:?} -> {:?}: {} results",
                    lemma,
                    stripped,
                    out.len()
                );
                return out;
            }
        }

        debug!("corpus: lex {:?}: no entry", lemma);
        out
    }
}

/// Forward scan of one book's lines.
#[derive(Clone)]
pub struct Lines<'a> {
    corpus: &'a Corpus,
    next: usize,
    book: u16,
}

impl<'a> Iterator for Lines<'a> {
    type Item = LineRef<'a>;

    fn next(&mut self) -> Option<LineRef<'a>> {
        if self.next >= self.corpus.text_count() {
            return None;
        }
        let entry = self.corpus.text_entry(self.next);
        if entry.book != self.book {
            return None;
        }
        self.next += 1;
        Some(LineRef {
            book: entry.book,
            line: entry.line,
            text: self.corpus.pool_str(entry.text),
        })
    }
}
