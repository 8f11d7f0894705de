use alloc::{collections::BTreeMap, string::String, vec::Vec};

use super::format::{
    CORPUS_MAGIC, CORPUS_VERSION, HEADER_BYTES, LEX_ENTRY_BYTES, MAX_BOOKS, MORPH_ENTRY_BYTES,
    TEXT_ENTRY_BYTES,
};

/// Deduplicating NUL-terminated string pool; offset 0 is `""`.
struct Pool {
    bytes: Vec<u8>,
    seen: BTreeMap<String, u32>,
}

impl Pool {
    fn new() -> Self {
        let mut seen = BTreeMap::new();
        seen.insert(String::new(), 0);
        Self {
            bytes: alloc::vec![0],
            seen,
        }
    }

    fn intern(&mut self, s: &str) -> u32 {
        if let Some(&offset) = self.seen.get(s) {
            return offset;
        }
        let offset = self.bytes.len() as u32;
        self.seen.insert(String::from(s), offset);
        self.bytes.extend_from_slice(s.as_bytes());
        self.bytes.push(0);
        offset
    }
}

/// Encoder for PRDB images.
///
/// Rows may be added in any order: lines are sorted by `(book, line)`, forms
/// and lemmas by their UTF-8 bytes, keeping insertion order among equal keys.
#[derive(Default)]
pub struct CorpusBuilder {
    lines: Vec<(u16, u16, String)>,
    morphs: Vec<(String, String, String)>,
    lexicon: Vec<(String, String, String)>,
    skip_definitions: bool,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, book: u16, line: u16, text: &str) -> Self {
        self.lines.push((book, line, String::from(text)));
        self
    }

    pub fn morph(mut self, form: &str, lemma: &str, postag: &str) -> Self {
        self.morphs
            .push((String::from(form), String::from(lemma), String::from(postag)));
        self
    }

    pub fn lex(mut self, lemma: &str, short_def: &str, definition: &str) -> Self {
        self.lexicon.push((
            String::from(lemma),
            String::from(short_def),
            String::from(definition),
        ));
        self
    }

    /// Points every full definition at the empty string.
    pub fn skip_definitions(mut self, skip: bool) -> Self {
        self.skip_definitions = skip;
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.lines.sort_by_key(|(book, line, _)| (*book, *line));
        self.morphs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        self.lexicon.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

        let mut pool = Pool::new();
        let mut book_max = [0u32; MAX_BOOKS];
        let mut book_count = 0u32;

        let texts: Vec<(u16, u16, u32)> = self
            .lines
            .iter()
            .map(|(book, line, text)| {
                if (1..MAX_BOOKS).contains(&(*book as usize)) {
                    let slot = &mut book_max[*book as usize];
                    *slot = (*slot).max(*line as u32);
                }
                book_count = book_count.max(*book as u32);
                (*book, *line, pool.intern(text))
            })
            .collect();
        let morphs: Vec<[u32; 3]> = self
            .morphs
            .iter()
            .map(|(form, lemma, postag)| [pool.intern(form), pool.intern(lemma), pool.intern(postag)])
            .collect();
        let skip = self.skip_definitions;
        let lexicon: Vec<[u32; 3]> = self
            .lexicon
            .iter()
            .map(|(lemma, short_def, definition)| {
                let lemma = pool.intern(lemma);
                let short_def = pool.intern(short_def);
                let definition = if skip { 0 } else { pool.intern(definition) };
                [lemma, short_def, definition]
            })
            .collect();

        let text_offset = HEADER_BYTES;
        let morph_offset = text_offset + texts.len() * TEXT_ENTRY_BYTES;
        let lex_offset = morph_offset + morphs.len() * MORPH_ENTRY_BYTES;
        let strings_offset = lex_offset + lexicon.len() * LEX_ENTRY_BYTES;

        let mut out = Vec::with_capacity(strings_offset + pool.bytes.len());
        out.extend_from_slice(&CORPUS_MAGIC);
        for field in [
            CORPUS_VERSION,
            texts.len() as u32,
            morphs.len() as u32,
            lexicon.len() as u32,
            book_count,
            text_offset as u32,
            morph_offset as u32,
            lex_offset as u32,
            strings_offset as u32,
        ] {
            out.extend_from_slice(&field.to_le_bytes());
        }
        for max in book_max {
            out.extend_from_slice(&max.to_le_bytes());
        }

        for (book, line, text) in texts {
            out.extend_from_slice(&book.to_le_bytes());
            out.extend_from_slice(&line.to_le_bytes());
            out.extend_from_slice(&text.to_le_bytes());
        }
        for row in morphs.iter().chain(&lexicon) {
            for offset in row {
                out.extend_from_slice(&offset.to_le_bytes());
            }
        }
        out.extend_from_slice(&pool.bytes);
        out
    }
}
