use super::*;
use crate::{
    fixtures::{sample_corpus, sample_corpus_bytes},
    store::MemStore,
};

fn texts<const N: usize>(lines: &BoundedVec<Line, N>) -> Vec<(u16, u16, &str)> {
    lines
        .iter()
        .map(|l| (l.book, l.line, l.text.as_str()))
        .collect()
}

#[test]
fn get_lines_returns_requested_window() {
    let corpus = sample_corpus();
    let lines = corpus.get_lines::<16>(2, 50, 5);

    assert_eq!(
        texts(&lines),
        vec![
            (2, 50, "book two line 50"),
            (2, 51, "book two line 51"),
            (2, 52, "book two line 52"),
            (2, 53, "book two line 53"),
            (2, 54, "book two line 54"),
        ]
    );
}

#[test]
fn get_lines_stops_at_book_boundary() {
    let corpus = sample_corpus();

    let tail = corpus.get_lines::<16>(1, 4, 10);
    assert_eq!(tail.iter().map(|l| l.line).collect::<Vec<_>>(), vec![4, 5]);
    assert!(tail.iter().all(|l| l.book == 1));

    assert!(corpus.get_lines::<16>(1, 6, 10).is_empty());
    assert!(corpus.get_lines::<16>(3, 1, 10).is_empty());
    assert!(corpus.get_lines::<16>(2, 40, 0).is_empty());
}

#[test]
fn get_lines_from_before_first_line() {
    let corpus = sample_corpus();
    let lines = corpus.get_lines::<4>(2, 0, 3);
    assert_eq!(lines.iter().map(|l| l.line).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn get_lines_is_capped_by_capacity() {
    let corpus = sample_corpus();
    let lines = corpus.get_lines::<3>(2, 1, 40);
    assert_eq!(lines.len(), 3);
}

#[test]
fn borrowed_lines_iterate_to_end_of_book() {
    let corpus = sample_corpus();
    let lines: Vec<LineRef<'_>> = corpus.lines(2, 98).collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2].text, "book two line 100");
    assert_eq!(lines[0].to_line().text.as_str(), "book two line 98");
}

#[test]
fn book_metadata() {
    let corpus = sample_corpus();

    assert_eq!(corpus.book_count(), 2);
    assert_eq!(corpus.max_line(1), 5);
    assert_eq!(corpus.max_line(2), 100);
    assert_eq!(corpus.max_line(3), 0);
    assert_eq!(corpus.max_line(0), 0);
    assert_eq!(corpus.max_line(30), 0);

    assert_eq!(corpus.text_count(), 105);
    assert_eq!(corpus.morph_count(), 6);
    assert_eq!(corpus.lex_count(), 5);
}

#[test]
fn form_resolves_to_definition() {
    let corpus = sample_corpus();

    let morphs = corpus.morph_lookup::<8>("ἄνδρα", 8);
    assert_eq!(morphs.len(), 1);
    assert_eq!(morphs[0].form.as_str(), "ἄνδρα");
    assert_eq!(morphs[0].lemma.as_str(), "ἀνήρ");
    assert_eq!(morphs[0].postag.as_str(), "n-s---ma-");
    assert_eq!(morphs[0].parse.as_str(), "noun sg masc acc");

    for morph in &morphs {
        let lex = corpus.lex_lookup::<4>(&morph.lemma, 4);
        assert!(!lex.is_empty());
        assert_eq!(lex[0].short_def.as_str(), "a man");
    }
}

#[test]
fn ambiguous_form_returns_whole_run() {
    let corpus = sample_corpus();

    let morphs = corpus.morph_lookup::<8>("ἄειδε", 8);
    let parses: Vec<&str> = morphs.iter().map(|m| m.parse.as_str()).collect();
    assert_eq!(
        parses,
        vec!["verb 2nd sg pres imper act", "verb 3rd sg imperf ind act"]
    );

    assert_eq!(corpus.morph_lookup::<8>("ἄειδε", 1).len(), 1);
    assert_eq!(corpus.morph_lookup::<1>("ἄειδε", 8).len(), 1);
}

#[test]
fn duplicate_lemmas_are_contiguous() {
    let corpus = sample_corpus();
    let lex = corpus.lex_lookup::<4>("ἀείδω", 4);

    assert_eq!(lex.len(), 2);
    assert_eq!(lex[0].short_def.as_str(), "sing");
    assert_eq!(lex[1].short_def.as_str(), "celebrate in song");
}

#[test]
fn missing_keys_are_empty_results() {
    let corpus = sample_corpus();
    assert!(corpus.morph_lookup::<8>("λόγος", 8).is_empty());
    assert!(corpus.morph_lookup::<8>("", 8).is_empty());
    assert!(corpus.lex_lookup::<4>("λόγος", 4).is_empty());
}

#[test]
fn numbered_lemma_falls_back_to_bare_lemma() {
    let corpus = sample_corpus();

    let morphs = corpus.morph_lookup::<8>("μῆνιν", 8);
    assert_eq!(morphs[0].lemma.as_str(), "μῆνις1");

    let lex = corpus.lex_lookup::<4>(&morphs[0].lemma, 4);
    assert_eq!(lex.len(), 1);
    assert_eq!(lex[0].lemma.as_str(), "μῆνις");
    assert_eq!(lex[0].short_def.as_str(), "wrath");
}

#[test]
fn digit_suffix_fallback_rules() {
    let bytes = CorpusBuilder::new()
        .lex("lemma", "bare", "")
        .lex("7", "seven", "")
        .build();
    let corpus = Corpus::parse(&bytes).unwrap();

    let lex = corpus.lex_lookup::<4>("lemma2", 4);
    assert_eq!(lex.len(), 1);
    assert_eq!(lex[0].lemma.as_str(), "lemma");
    assert_eq!(corpus.lex_lookup::<4>("lemma123", 4).len(), 1);

    // Exact matches win over stripping.
    assert_eq!(corpus.lex_lookup::<4>("7", 4)[0].short_def.as_str(), "seven");
    // Nothing left after stripping.
    assert!(corpus.lex_lookup::<4>("77", 4).is_empty());
    assert!(corpus.lex_lookup::<4>("other2", 4).is_empty());
}

#[test]
fn digit_suffix_fallback_stops_at_lemma_capacity() {
    let short = "a".repeat(LEMMA_BYTES - 2);
    let full = "a".repeat(LEMMA_BYTES - 1);
    let bytes = CorpusBuilder::new()
        .lex(&short, "below capacity", "")
        .lex(&full, "at capacity", "")
        .build();
    let corpus = Corpus::parse(&bytes).unwrap();

    let lex = corpus.lex_lookup::<1>(&format!("{short}1"), 1);
    assert_eq!(lex.len(), 1);
    assert_eq!(lex[0].short_def.as_str(), "below capacity");

    let key = format!("{full}1");
    assert_eq!(key.len(), LEMMA_BYTES);
    assert!(corpus.lex_lookup::<1>(&key, 1).is_empty());
}

#[test]
fn skipped_definitions_read_empty() {
    let bytes = CorpusBuilder::new()
        .lex("ἀνήρ", "a man", "a long entry")
        .skip_definitions(true)
        .build();
    let corpus = Corpus::parse(&bytes).unwrap();

    let lex = corpus.lex_lookup::<1>("ἀνήρ", 1);
    assert_eq!(lex[0].short_def.as_str(), "a man");
    assert_eq!(lex[0].definition.as_str(), "");
}

#[test]
fn builder_writes_expected_layout() {
    let bytes = sample_corpus_bytes();
    let header = format::Header::decode(&bytes).unwrap();

    assert_eq!(header.text_offset as usize, format::HEADER_BYTES);
    assert_eq!(header.morph_offset, header.text_offset + 105 * 8);
    assert_eq!(header.lex_offset, header.morph_offset + 6 * 12);
    assert_eq!(header.strings_offset, header.lex_offset + 5 * 12);
    assert_eq!(bytes[header.strings_offset as usize], 0);

    // Pool strings are interned once.
    let needle = "ἀνήρ\0".as_bytes();
    let hits = bytes.windows(needle.len()).filter(|w| *w == needle).count();
    assert_eq!(hits, 1);
}

#[test]
fn rejects_bad_magic() {
    let mut bytes = sample_corpus_bytes();
    bytes[0..4].copy_from_slice(b"XRDB");
    assert_eq!(Corpus::parse(&bytes).unwrap_err(), CorpusError::BadMagic);
}

#[test]
fn rejects_other_versions() {
    let mut bytes = sample_corpus_bytes();
    bytes[4..8].copy_from_slice(&2u32.to_le_bytes());
    assert_eq!(Corpus::parse(&bytes).unwrap_err(), CorpusError::BadVersion);
}

#[test]
fn rejects_short_header() {
    let bytes = sample_corpus_bytes();
    assert_eq!(
        Corpus::parse(&bytes[..format::HEADER_BYTES - 1]).unwrap_err(),
        CorpusError::Truncated
    );
}

#[test]
fn rejects_sections_past_end() {
    let bytes = sample_corpus_bytes();
    let header = format::Header::decode(&bytes).unwrap();

    // Cut inside the lex index.
    let cut = header.lex_offset as usize + 4;
    assert_eq!(
        Corpus::parse(&bytes[..cut]).unwrap_err(),
        CorpusError::Truncated
    );

    let mut huge = bytes.clone();
    huge[8..12].copy_from_slice(&u32::MAX.to_le_bytes());
    assert_eq!(Corpus::parse(&huge).unwrap_err(), CorpusError::Truncated);

    let mut pool_past_end = bytes.clone();
    pool_past_end[36..40].copy_from_slice(&(bytes.len() as u32 + 1).to_le_bytes());
    assert_eq!(
        Corpus::parse(&pool_past_end).unwrap_err(),
        CorpusError::Truncated
    );
}

#[test]
fn bad_pool_offsets_read_empty() {
    let mut bytes = CorpusBuilder::new().line(1, 1, "text").build();
    let text_offset = format::HEADER_BYTES;
    bytes[text_offset + 4..text_offset + 8].copy_from_slice(&u32::MAX.to_le_bytes());
    let corpus = Corpus::parse(&bytes).unwrap();

    let lines = corpus.get_lines::<2>(1, 1, 2);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text.as_str(), "");
}

#[test]
fn invalid_utf8_is_cut_to_valid_prefix() {
    let mut bytes = CorpusBuilder::new().line(1, 1, "abc").build();
    let at = bytes
        .windows(4)
        .position(|w| w == b"abc\0")
        .unwrap();
    bytes[at + 2] = 0xFF;
    let corpus = Corpus::parse(&bytes).unwrap();

    assert_eq!(corpus.lines(1, 1).next().unwrap().text, "ab");
}

#[test]
fn unterminated_pool_string_ends_at_block_end() {
    let mut bytes = CorpusBuilder::new().line(1, 1, "abc").build();
    bytes.pop();
    let corpus = Corpus::parse(&bytes).unwrap();

    assert_eq!(corpus.lines(1, 1).next().unwrap().text, "abc");
}

#[test]
fn long_text_is_truncated_on_char_boundary() {
    let text = "ω".repeat(LINE_TEXT_BYTES);
    let bytes = CorpusBuilder::new().line(1, 1, &text).build();
    let corpus = Corpus::parse(&bytes).unwrap();

    let lines = corpus.get_lines::<1>(1, 1, 1);
    assert_eq!(lines[0].text.len(), LINE_TEXT_BYTES);
    assert!(lines[0].text.chars().all(|c| c == 'ω'));
}

#[test]
fn load_reads_through_store() {
    let mut store = MemStore::new();
    store.insert("lexis.dat", sample_corpus_bytes());

    let corpus = Corpus::load(&store, "lexis.dat").unwrap();
    assert_eq!(corpus.block_len(), sample_corpus_bytes().len());
    assert_eq!(
        Corpus::load(&store, "missing.dat").unwrap_err(),
        CorpusError::NotFound
    );
}

#[test]
fn corpus_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Corpus>();
}
