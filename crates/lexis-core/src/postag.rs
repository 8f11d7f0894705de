//! Positional morphology tags (`n-s---mn-` style) to readable labels.

use heapless::String;

/// Number of positional fields in a tag.
pub const POSTAG_FIELDS: usize = 9;
/// Capacity of a decoded label.
pub const PARSE_BYTES: usize = 256;

/// Placeholder for tags too short to decode.
pub const UNKNOWN_LABEL: &str = "?";

type Table = &'static [(u8, &'static str)];

const POS: Table = &[
    (b'n', "noun"),
    (b'v', "verb"),
    (b'a', "adj"),
    (b'd', "adv"),
    (b'l', "art"),
    (b'g', "particle"),
    (b'c', "conj"),
    (b'r', "prep"),
    (b'p', "pron"),
    (b'm', "num"),
    (b'i', "interj"),
    (b'x', "irreg"),
];
const PERSON: Table = &[(b'1', "1st"), (b'2', "2nd"), (b'3', "3rd")];
const NUMBER: Table = &[(b's', "sg"), (b'p', "pl"), (b'd', "dual")];
const TENSE: Table = &[
    (b'p', "pres"),
    (b'i', "imperf"),
    (b'f', "fut"),
    (b'a', "aor"),
    (b'r', "perf"),
    (b'l', "plup"),
    (b't', "futperf"),
];
const MOOD: Table = &[
    (b'i', "ind"),
    (b's', "subj"),
    (b'o', "opt"),
    (b'n', "inf"),
    (b'm', "imper"),
    (b'p', "ptcp"),
];
const VOICE: Table = &[(b'a', "act"), (b'p', "pass"), (b'm', "mid"), (b'e', "mp")];
const GENDER: Table = &[(b'm', "masc"), (b'f', "fem"), (b'n', "neut")];
const CASE: Table = &[
    (b'n', "nom"),
    (b'g', "gen"),
    (b'd', "dat"),
    (b'a', "acc"),
    (b'v', "voc"),
];
const DEGREE: Table = &[(b'c', "comp"), (b's', "super")];

const FIELDS: [Table; POSTAG_FIELDS] = [POS, PERSON, NUMBER, TENSE, MOOD, VOICE, GENDER, CASE, DEGREE];

fn label(table: Table, code: u8) -> Option<&'static str> {
    table
        .iter()
        .find_map(|(key, label)| (*key == code).then_some(*label))
}

/// Decodes a 9-position tag.
///
/// Unmapped positions (usually `-`) are skipped; mapped ones are joined with
/// single spaces in field order.
pub fn decode(postag: &str) -> String<PARSE_BYTES> {
    let mut out = String::new();
    let bytes = postag.as_bytes();
    if bytes.len() < POSTAG_FIELDS {
        let _ = out.push_str(UNKNOWN_LABEL);
        return out;
    }

    for (table, code) in FIELDS.iter().zip(bytes) {
        let Some(label) = label(*table, *code) else {
            continue;
        };
        if !out.is_empty() && out.push(' ').is_err() {
            break;
        }
        if out.push_str(label).is_err() {
            break;
        }
    }

    out
}
