// Pronominal and verbal suffix stripping.
//
// Works on consonant text with nikud removed but final forms intact: a final
// mem or nun at the end of a word is a suffix candidate in its own right.

use crate::normalize::consonant_count;
use crate::types::SuffixCode;

// Compound (plural + pronominal) endings first, then two-letter endings,
// then single letters. The first candidate that leaves a long enough stem
// wins.
const SUFFIXES: &[(&str, SuffixCode)] = &[
    ("יהם", SuffixCode::S3mp),
    ("יהן", SuffixCode::S3fp),
    ("ינו", SuffixCode::S1cp),
    ("יכם", SuffixCode::S2mp),
    ("יכן", SuffixCode::S2fp),
    ("ים", SuffixCode::S3mp),
    ("ות", SuffixCode::S3fp),
    ("יך", SuffixCode::S2),
    ("יו", SuffixCode::S3ms),
    ("נו", SuffixCode::S1cp),
    ("כם", SuffixCode::S2mp),
    ("כן", SuffixCode::S2fp),
    ("הם", SuffixCode::S3mp),
    ("הן", SuffixCode::S3fp),
    ("תי", SuffixCode::S1cs),
    ("תם", SuffixCode::S2mp),
    ("תן", SuffixCode::S2fp),
    ("ך", SuffixCode::S2),
    ("כ", SuffixCode::S2),
    ("ה", SuffixCode::S3fs),
    ("ו", SuffixCode::S3ms),
    ("ם", SuffixCode::S3mp),
    ("מ", SuffixCode::S3mp),
    ("ן", SuffixCode::S3fp),
    ("נ", SuffixCode::S3fp),
    ("ת", SuffixCode::S2),
];

// Suffixes that can stand directly after a preposition with no noun between
// them (לָהֶם "to them", בּוֹ "in him").
const BARE_SUFFIXES: &[(&str, SuffixCode)] = &[
    ("ו", SuffixCode::S3ms),
    ("י", SuffixCode::S1cs),
    ("ה", SuffixCode::S3fs),
    ("ם", SuffixCode::S3mp),
    ("ן", SuffixCode::S3fp),
    ("ך", SuffixCode::S2),
    ("נו", SuffixCode::S1cp),
    ("כם", SuffixCode::S2mp),
    ("כן", SuffixCode::S2fp),
    ("הם", SuffixCode::S3mp),
    ("הן", SuffixCode::S3fp),
];

const DEFAULT_MIN_STEM: usize = 2;

/// Remove one suffix, requiring at least two consonants to remain.
pub fn strip_suffix(stem: &str) -> (&str, Option<SuffixCode>) {
    strip_suffix_with(stem, DEFAULT_MIN_STEM)
}

/// Remove one suffix, requiring `min_stem` consonants to remain.
pub fn strip_suffix_with(stem: &str, min_stem: usize) -> (&str, Option<SuffixCode>) {
    for (suffix, code) in SUFFIXES {
        if let Some(reduced) = stem.strip_suffix(suffix) {
            if !reduced.is_empty() && consonant_count(reduced) >= min_stem {
                return (reduced, Some(*code));
            }
        }
    }
    (stem, None)
}

/// Identify text that is nothing but a pronominal suffix.
pub fn bare_suffix(consonants: &str) -> Option<SuffixCode> {
    BARE_SUFFIXES
        .iter()
        .find(|(spelling, _)| *spelling == consonants)
        .map(|(_, code)| *code)
}
