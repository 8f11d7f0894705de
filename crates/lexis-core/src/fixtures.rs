//! Fixtures shared by the unit tests.

use crate::{
    corpus::{Corpus, CorpusBuilder},
    font::{Font, FontBuilder},
};

/// Glyph advance of every letter in [`reader_font`].
pub const LETTER_ADVANCE: i32 = 6;
/// Advance of the space glyph in [`reader_font`].
pub const SPACE_ADVANCE: i32 = 3;

/// 6x8 font with solid Latin and Greek letters, digits and a blank space.
pub fn reader_font() -> Font {
    let mut builder = FontBuilder::new(6, 8, 6).glyph(' ' as u32, SPACE_ADVANCE as u8, &[]);
    let letters = ('a'..='z')
        .chain('A'..='Z')
        .chain('0'..='9')
        .chain("(),.-:>".chars())
        .chain('α'..='ω')
        .chain("ἄἀ".chars());
    for ch in letters {
        builder = builder.filled(ch as u32, LETTER_ADVANCE as u8);
    }
    Font::parse(&builder.build()).unwrap()
}

/// Two books: the proem of book 1 and a hundred numbered lines in book 2,
/// plus a handful of forms and lemmas around them.
pub fn sample_corpus_bytes() -> Vec<u8> {
    let mut builder = CorpusBuilder::new()
        .line(1, 1, "μῆνιν ἄειδε θεὰ Πηληϊάδεω Ἀχιλῆος")
        .line(1, 2, "οὐλομένην, ἣ μυρί᾽ Ἀχαιοῖς ἄλγε᾽ ἔθηκε,")
        .line(1, 3, "πολλὰς δ᾽ ἰφθίμους ψυχὰς Ἄϊδι προΐαψεν")
        .line(1, 4, "ἡρώων, αὐτοὺς δὲ ἑλώρια τεῦχε κύνεσσιν")
        .line(1, 5, "οἰωνοῖσί τε πᾶσι, Διὸς δ᾽ ἐτελείετο βουλή,")
        .morph("ἄνδρα", "ἀνήρ", "n-s---ma-")
        .morph("μῆνιν", "μῆνις1", "n-s---fa-")
        .morph("ἄειδε", "ἀείδω", "v2spma---")
        .morph("ἄειδε", "ἀείδω", "v3siia---")
        .morph("θεὰ", "θεά", "n-s---fv-")
        .morph("οὐλομένην", "οὐλόμενος", "a-s---fa-")
        .lex("ἀνήρ", "a man", "ἀνήρ, ὁ: a man, as opposed to a woman")
        .lex("μῆνις", "wrath", "μῆνις, ιος, ἡ: wrath, anger")
        .lex("ἀείδω", "sing", "ἀείδω: to sing")
        .lex("ἀείδω", "celebrate in song", "ἀείδω: to celebrate")
        .lex("θεά", "", "θεά, ἡ: goddess");
    for line in 1..=100u16 {
        builder = builder.line(2, line, &format!("book two line {line}"));
    }
    builder.build()
}

pub fn sample_corpus() -> Corpus {
    Corpus::parse(&sample_corpus_bytes()).unwrap()
}
