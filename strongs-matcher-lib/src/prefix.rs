// Grammar-validated prefix detection.
//
// Hebrew stacks at most one prefix from each category, always in the order
//   1. conjunction   ו
//   2. preposition   ב ל כ, or the ambiguous מ
//   3. article       ה
// Each category is tried once, in that order. A candidate is accepted only
// when enough consonants remain for a plausible stem; otherwise the word is
// left as it was and the next category is tried.
//
// The vowel under a leading consonant is what separates look-alikes: מִ is
// the preposition "from" but מַ is the participle prefix of a verb, and הִ
// opens a verb stem rather than the article.

use crate::config::PrefixThresholds;
use crate::normalize::{consonant_count, is_nikud};
use crate::types::PrefixCode;

const VAV: char = '\u{05D5}';
const BET: char = '\u{05D1}';
const LAMED: char = '\u{05DC}';
const KAF: char = '\u{05DB}';
const MEM: char = '\u{05DE}';
const HE: char = '\u{05D4}';

// Prepositions whose consonant has only one prefix reading.
const PREPOSITIONS: &[(char, PrefixCode)] = &[
    (BET, PrefixCode::In),
    (LAMED, PrefixCode::To),
    (KAF, PrefixCode::Like),
];

/// Letters the matcher may drop from a word without grammar checks when the
/// whole-word lookup fails.
pub const SPECULATIVE_PREFIXES: &[(char, PrefixCode)] = &[
    (LAMED, PrefixCode::To),
    (BET, PrefixCode::In),
    (KAF, PrefixCode::Like),
    (MEM, PrefixCode::VerbalMem),
];

/// The vowel marks that matter for prefix decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VowelMark {
    Hiriq,
    Tzere,
    Patach,
    Cholam,
    /// Any other point or accent.
    Other,
}

/// Classify a combining mark. Returns `None` for anything that is not nikud.
pub fn classify_mark(c: char) -> Option<VowelMark> {
    match c {
        '\u{05B4}' => Some(VowelMark::Hiriq),
        '\u{05B5}' => Some(VowelMark::Tzere),
        '\u{05B7}' => Some(VowelMark::Patach),
        // Cholam, and the cholam-haser-for-vav variant.
        '\u{05B9}' | '\u{05BA}' => Some(VowelMark::Cholam),
        c if is_nikud(c) => Some(VowelMark::Other),
        _ => None,
    }
}

/// How a vowel under a leading mem reads.
fn mem_reading(mark: VowelMark) -> Option<PrefixCode> {
    match mark {
        VowelMark::Hiriq | VowelMark::Tzere => Some(PrefixCode::From),
        VowelMark::Patach | VowelMark::Cholam => Some(PrefixCode::VerbalMem),
        VowelMark::Other => None,
    }
}

/// Split a word into its first letter, the marks attached to it, and the
/// rest of the word.
fn split_leading(word: &str) -> Option<(char, &str, &str)> {
    let first = word.chars().next()?;
    if is_nikud(first) {
        return None;
    }
    let after = &word[first.len_utf8()..];
    let marks_len = after
        .char_indices()
        .find(|&(_, c)| !is_nikud(c))
        .map_or(after.len(), |(i, _)| i);
    Some((first, &after[..marks_len], &after[marks_len..]))
}

fn long_enough(stem: &str, min_stem: usize) -> bool {
    consonant_count(stem) >= min_stem
}

fn match_conjunction(word: &str, min_stem: usize) -> Option<(PrefixCode, &str)> {
    let (letter, _, rest) = split_leading(word)?;
    (letter == VAV && long_enough(rest, min_stem)).then_some((PrefixCode::Conjunction, rest))
}

fn match_preposition(word: &str, min_stem: usize) -> Option<(PrefixCode, &str)> {
    let (letter, _, rest) = split_leading(word)?;
    let code = PREPOSITIONS
        .iter()
        .find(|(c, _)| *c == letter)
        .map(|(_, code)| *code)?;
    long_enough(rest, min_stem).then_some((code, rest))
}

fn match_mem(word: &str, min_stem: usize) -> Option<(PrefixCode, &str)> {
    let (letter, marks, rest) = split_leading(word)?;
    if letter != MEM {
        return None;
    }
    let (code, rest) = match marks.chars().filter_map(classify_mark).find_map(mem_reading) {
        Some(code) => (code, rest),
        None => (PrefixCode::VerbalMem, strip_cholam_vav(rest)?),
    };
    long_enough(rest, min_stem).then_some((code, rest))
}

/// Consume a vav carrying cholam (the מוֹ spelling), returning what follows.
fn strip_cholam_vav(word: &str) -> Option<&str> {
    let (letter, marks, rest) = split_leading(word)?;
    let first_mark = marks.chars().next().and_then(classify_mark);
    (letter == VAV && first_mark == Some(VowelMark::Cholam)).then_some(rest)
}

fn match_article(word: &str, min_stem: usize) -> Option<(PrefixCode, &str)> {
    let (letter, marks, rest) = split_leading(word)?;
    if letter != HE {
        return None;
    }
    // הִ is a Hiphil/Hitpael stem, not the article.
    if marks.chars().next().and_then(classify_mark) == Some(VowelMark::Hiriq) {
        return None;
    }
    long_enough(rest, min_stem).then_some((PrefixCode::Article, rest))
}

/// Peel validated prefixes from a pointed word using the default thresholds.
///
/// `conservative` is for words with no outside corroboration: mem is not
/// considered and the article needs a longer stem.
pub fn detect(word: &str, conservative: bool) -> (Vec<PrefixCode>, &str) {
    let thresholds = if conservative {
        PrefixThresholds::conservative()
    } else {
        PrefixThresholds::standard()
    };
    detect_with(word, &thresholds)
}

/// Peel validated prefixes using explicit thresholds. Returns the prefixes in
/// grammatical order and the remaining pointed stem.
pub fn detect_with<'a>(word: &'a str, thresholds: &PrefixThresholds) -> (Vec<PrefixCode>, &'a str) {
    let mut prefixes = Vec::new();
    let mut remaining = word;

    if let Some((code, rest)) = match_conjunction(remaining, thresholds.min_stem) {
        prefixes.push(code);
        remaining = rest;
    }

    let preposition = match_preposition(remaining, thresholds.min_stem).or_else(|| {
        if thresholds.detect_from {
            match_mem(remaining, thresholds.from_min_stem)
        } else {
            None
        }
    });
    if let Some((code, rest)) = preposition {
        prefixes.push(code);
        remaining = rest;
    }

    if let Some((code, rest)) = match_article(remaining, thresholds.article_min_stem) {
        prefixes.push(code);
        remaining = rest;
    }

    (prefixes, remaining)
}

/// Byte length of the given prefix at the start of `word`: the consonant and
/// its marks, plus the vav of a מוֹ participle.
pub fn prefix_span(word: &str, code: PrefixCode) -> usize {
    let Some((_, _, rest)) = split_leading(word) else {
        return word.len();
    };
    let mut end = word.len() - rest.len();
    if code == PrefixCode::VerbalMem {
        if let Some(after_vav) = strip_cholam_vav(rest) {
            end = word.len() - after_vav.len();
        }
    }
    end
}
