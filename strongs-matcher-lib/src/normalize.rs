// Hebrew text normalization: nikud removal, final-form folding, and cleanup
// of the stray shin/sin dots that appear in the source encoding.

/// Shin dot. Shows up detached from its letter in the source text.
pub const SHIN_DOT: char = '\u{05C1}';
/// Sin dot. Same corruption as the shin dot.
pub const SIN_DOT: char = '\u{05C2}';
/// Hebrew hyphen joining words into one accent unit.
pub const MAQAF: char = '\u{05BE}';

// Trailing punctuation dropped before matching: sof pasuq, paseq, maqaf,
// geresh, gershayim.
const TRAILING_PUNCTUATION: &[char] = &['\u{05C3}', '\u{05C0}', MAQAF, '\u{05F3}', '\u{05F4}'];

// (final, medial)
const FINAL_FORMS: &[(char, char)] = &[
    ('\u{05DA}', '\u{05DB}'), // ך -> כ
    ('\u{05DD}', '\u{05DE}'), // ם -> מ
    ('\u{05DF}', '\u{05E0}'), // ן -> נ
    ('\u{05E3}', '\u{05E4}'), // ף -> פ
    ('\u{05E5}', '\u{05E6}'), // ץ -> צ
];

/// True for vowel points, accents and other combining marks in the Hebrew
/// block. The maqaf is punctuation and is not included.
pub fn is_nikud(c: char) -> bool {
    matches!(c, '\u{0591}'..='\u{05BD}' | '\u{05BF}'..='\u{05C7}')
}

/// True for the 27 Hebrew letters, final forms included.
pub fn is_hebrew_letter(c: char) -> bool {
    matches!(c, '\u{05D0}'..='\u{05EA}')
}

/// Remove nikud, keeping final letter forms.
pub fn strip_nikud(text: &str) -> String {
    text.chars().filter(|&c| !is_nikud(c)).collect()
}

/// Replace the five final letter forms with their medial counterparts.
pub fn fold_finals(text: &str) -> String {
    text.chars().map(fold_final).collect()
}

fn fold_final(c: char) -> char {
    FINAL_FORMS
        .iter()
        .find(|(fin, _)| *fin == c)
        .map_or(c, |(_, medial)| *medial)
}

/// Produce the consonant skeleton used as a lexicon key.
///
/// Misplaced shin/sin dots are dropped first, then all nikud, then final
/// forms are folded. `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let consonants: String = text
        .chars()
        .filter(|&c| c != SHIN_DOT && c != SIN_DOT && !is_nikud(c))
        .collect();
    fold_finals(&consonants)
}

/// Number of characters that are not nikud.
pub fn consonant_count(text: &str) -> usize {
    text.chars().filter(|&c| !is_nikud(c)).count()
}

/// Prepare a raw token for matching: drop misplaced shin/sin dots, trailing
/// punctuation and surrounding whitespace.
pub fn clean_word(word: &str) -> String {
    let without_dots: String = word.chars().filter(|&c| c != SHIN_DOT && c != SIN_DOT).collect();
    without_dots
        .trim()
        .trim_end_matches(TRAILING_PUNCTUATION)
        .trim()
        .to_string()
}

/// Split verse text into words on whitespace and maqaf.
pub fn tokenize_verse(verse: &str) -> Vec<&str> {
    verse
        .split(|c: char| c.is_whitespace() || c == MAQAF)
        .filter(|w| !w.trim().is_empty())
        .collect()
}
