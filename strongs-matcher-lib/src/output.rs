// Output formatting for match results.

use crate::prefix::prefix_span;
use crate::types::*;

/// Separator placed between a prefix and what follows it in display text.
pub const SEPARATOR: char = '/';

/// Build the output record for one word.
///
/// `strong` carries the id alone, except for a word with exactly one prefix
/// and no suffix, which is written `{prefix}/{id}` (e.g. `Hb/H7225`).
pub fn format(
    surface: &str,
    id: Option<&str>,
    prefixes: &[PrefixCode],
    suffix: Option<SuffixCode>,
) -> OutputRecord {
    let strong = id.map(|id| match (prefixes, suffix) {
        ([prefix], None) => format!("{prefix}{SEPARATOR}{id}"),
        _ => id.to_string(),
    });
    OutputRecord {
        text: surface.to_string(),
        strong,
        prefixes: prefixes.to_vec(),
        suffix,
        possible_proper_name: false,
    }
}

/// Build the output record for a match result.
pub fn to_record(result: &MatchResult) -> OutputRecord {
    format(
        &result.surface,
        result.resolved_id.as_deref(),
        &result.prefixes,
        result.suffix,
    )
}

/// Insert separators after each detected prefix in the verse text.
///
/// Records are located in order; one that cannot be found in the rest of the
/// verse is skipped and the text is left as it was.
pub fn reinsert_separators(verse: &str, records: &[OutputRecord]) -> String {
    let mut out = String::with_capacity(verse.len() + records.len());
    let mut remaining = verse;

    for record in records {
        let word = record.text.as_str();
        if word.is_empty() {
            continue;
        }
        let Some(start) = remaining.find(word) else {
            continue;
        };
        out.push_str(&remaining[..start]);
        out.push_str(&split_prefixes(word, &record.prefixes));
        remaining = &remaining[start + word.len()..];
    }

    out.push_str(remaining);
    out
}

fn split_prefixes(word: &str, prefixes: &[PrefixCode]) -> String {
    let mut out = String::with_capacity(word.len() + prefixes.len());
    let mut pos = 0;
    for &code in prefixes {
        if pos >= word.len() {
            break;
        }
        let end = pos + prefix_span(&word[pos..], code);
        out.push_str(&word[pos..end]);
        pos = end;
        if pos < word.len() {
            out.push(SEPARATOR);
        }
    }
    out.push_str(&word[pos..]);
    out
}

/// Format a verse's records in `word=strong` form, one per word, for quick
/// inspection.
pub fn to_summary(records: &[OutputRecord]) -> String {
    records
        .iter()
        .map(|r| {
            let strong = r.strong.as_deref().unwrap_or("?");
            match r.suffix {
                Some(suffix) => format!("{}={strong}+{suffix}", r.text),
                None => format!("{}={strong}", r.text),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const VAV: char = '\u{05D5}';
    const HE: char = '\u{05D4}';
    const MEM: char = '\u{05DE}';
    const SHEVA: char = '\u{05B0}';
    const QAMATS: char = '\u{05B8}';
    const CHOLAM: char = '\u{05B9}';

    #[test]
    fn test_single_prefix_decorates_strong() {
        let r = format("בְּרֵאשִׁית", Some("H7225"), &[PrefixCode::In], None);
        assert_eq!(r.strong.as_deref(), Some("Hb/H7225"));
        assert_eq!(r.prefixes, vec![PrefixCode::In]);
    }

    #[test]
    fn test_suffix_or_stacked_prefixes_keep_bare_id() {
        let r = format("w", Some("H1697"), &[PrefixCode::Conjunction], Some(SuffixCode::S3ms));
        assert_eq!(r.strong.as_deref(), Some("H1697"));
        let r = format("w", Some("H776"), &[PrefixCode::Conjunction, PrefixCode::Article], None);
        assert_eq!(r.strong.as_deref(), Some("H776"));
    }

    #[test]
    fn test_unresolved_record() {
        let r = format("w", None, &[], None);
        assert_eq!(r.strong, None);
        assert!(r.suffix.is_none());
    }

    #[test]
    fn test_json_shape() {
        let r = format("w", Some("H776"), &[PrefixCode::Article], Some(SuffixCode::S3fs));
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(
            json,
            r#"{"text":"w","strong":"H776","prefixes":["Hd"],"suffix":"S3fs"}"#
        );
        let flagged = OutputRecord {
            possible_proper_name: true,
            ..r
        };
        assert!(serde_json::to_string(&flagged)
            .unwrap()
            .ends_with(r#""possible_proper_name":true}"#));
    }

    #[test]
    fn test_reinsert_separators() {
        let stem = format!("א{QAMATS}רֶץ");
        let first = format!("{VAV}{SHEVA}{HE}{QAMATS}{stem}");
        let second = "הָיְתָה";
        let verse = format!("{first} {second}");
        let records = vec![
            format(&first, Some("H776"), &[PrefixCode::Conjunction, PrefixCode::Article], None),
            format(second, Some("H1961"), &[], None),
        ];
        assert_eq!(
            reinsert_separators(&verse, &records),
            format!("{VAV}{SHEVA}/{HE}{QAMATS}/{stem} {second}")
        );
    }

    #[test]
    fn test_reinsert_keeps_cholam_vav_with_prefix() {
        let word = format!("{MEM}{VAV}{CHOLAM}שִׁיעַ");
        let records = vec![format(&word, Some("H3467"), &[PrefixCode::VerbalMem], None)];
        assert_eq!(
            reinsert_separators(&word, &records),
            format!("{MEM}{VAV}{CHOLAM}/שִׁיעַ")
        );
    }

    #[test]
    fn test_prefix_free_verse_unchanged() {
        let verse = "בָּרָא אֱלֹהִים אֵת הַשָּׁמַיִם׃";
        let records: Vec<_> = crate::normalize::tokenize_verse(verse)
            .into_iter()
            .map(|w| format(w, None, &[], None))
            .collect();
        assert_eq!(reinsert_separators(verse, &records), verse);
    }

    #[test]
    fn test_missing_word_skipped() {
        let records = vec![format("לא", None, &[PrefixCode::To], None)];
        assert_eq!(reinsert_separators("אב בית", &records), "אב בית");
        let records = vec![format("בבית", Some("H1004"), &[PrefixCode::In], None)];
        assert_eq!(reinsert_separators("אב בבית גם", &records), "אב ב/בית גם");
    }

    #[test]
    fn test_summary() {
        let records = vec![
            format("א", Some("H1"), &[], None),
            format("ב", None, &[], None),
            format("ג", Some("H2"), &[], Some(SuffixCode::S3ms)),
        ];
        assert_eq!(to_summary(&records), "א=H1 ב=? ג=H2+S3ms");
    }
}
