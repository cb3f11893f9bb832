// Fallback-chain matcher: links one surface word to a lexicon id.
//
// Stages, in priority order; the first that produces a result wins:
//   a. whole word: normalized, then without one unvalidated leading
//      preposition letter, then with final forms kept
//   b. grammar-validated prefix detection; a prefix+suffix word with no stem
//      and a too-short stem both end the chain here
//   c. the stem left by prefix detection
//   d. the stem with one suffix removed
//   e. unresolved
//
// Prefixes found in (b) are reported only if (c) or (d) confirms the stem.

use crate::config::MatcherConfig;
use crate::diagnostics::UnresolvedLog;
use crate::lexicon::Lexicon;
use crate::normalize::{clean_word, consonant_count, is_hebrew_letter, normalize, strip_nikud};
use crate::output;
use crate::prefix::{detect_with, SPECULATIVE_PREFIXES};
use crate::suffix::{bare_suffix, strip_suffix_with};
use crate::types::*;

/// Matches words against a shared lexicon.
///
/// Holds no mutable state besides the unresolved-word log, so one matcher can
/// serve several threads.
#[derive(Debug)]
pub struct Matcher<'a> {
    lexicon: &'a Lexicon,
    config: MatcherConfig,
    unresolved: UnresolvedLog,
}

impl<'a> Matcher<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self::with_config(lexicon, MatcherConfig::default())
    }

    pub fn with_config(lexicon: &'a Lexicon, config: MatcherConfig) -> Self {
        Self {
            lexicon,
            config,
            unresolved: UnresolvedLog::new(),
        }
    }

    /// Words that could not be resolved so far.
    pub fn unresolved(&self) -> &UnresolvedLog {
        &self.unresolved
    }

    /// Resolve a word with no outside information about it.
    pub fn match_word(&self, word: &str) -> MatchResult {
        self.run_chain(word, false)
    }

    /// Resolve a word for which an upstream source may already know the id.
    ///
    /// A known id is taken as given. Prefixes are detected with the standard
    /// thresholds and reported with it unless the lexicon contradicts the
    /// split: the whole word already spells the id, or the stem spells a
    /// different one. Without an id, the full chain runs with conservative
    /// prefix detection.
    pub fn match_with_hint(&self, word: &str, known_id: Option<&str>) -> MatchResult {
        let Some(id) = known_id else {
            return self.run_chain(word, true);
        };
        let surface = word.trim();
        let cleaned = clean_word(surface);
        if cleaned.is_empty() {
            return self.give_up(surface, surface, UnresolvedReason::EmptyToken);
        }
        let (prefixes, stem) = detect_with(&cleaned, self.config.thresholds(false));
        let prefixes = if self.spells(&cleaned, id) || !self.stem_agrees(stem, id) {
            vec![]
        } else {
            prefixes
        };
        MatchResult::resolved(surface, id, prefixes, None, MatchStage::KnownId)
    }

    /// Output record for a result, flagging proper-noun ids.
    pub fn to_record(&self, result: &MatchResult) -> OutputRecord {
        let mut record = output::to_record(result);
        record.possible_proper_name = result
            .resolved_id
            .as_deref()
            .map_or(false, |id| self.lexicon.is_proper_noun(id));
        record
    }

    fn run_chain(&self, word: &str, conservative: bool) -> MatchResult {
        let surface = word.trim();
        let cleaned = clean_word(surface);
        if cleaned.is_empty() {
            return self.give_up(surface, surface, UnresolvedReason::EmptyToken);
        }
        if !cleaned.chars().any(is_hebrew_letter) {
            return self.give_up(surface, &cleaned, UnresolvedReason::NonHebrew);
        }

        if let Some(result) = self.whole_word(surface, &cleaned) {
            return result;
        }

        let (prefixes, stem) = detect_with(&cleaned, self.config.thresholds(conservative));
        self.composite(surface, &prefixes, stem)
            .or_else(|| self.reject_short_stem(surface, stem))
            .or_else(|| self.stem_lookup(surface, &prefixes, stem))
            .or_else(|| self.suffix_lookup(surface, &prefixes, stem))
            .unwrap_or_else(|| self.give_up(surface, stem, UnresolvedReason::NoMatch))
    }

    // Stage a.

    fn whole_word(&self, surface: &str, cleaned: &str) -> Option<MatchResult> {
        let normalized = normalize(cleaned);
        self.exact(surface, &normalized)
            .or_else(|| self.speculative_prefix(surface, &normalized))
            .or_else(|| self.preserved_finals(surface, cleaned))
    }

    fn exact(&self, surface: &str, normalized: &str) -> Option<MatchResult> {
        let id = self.lexicon.lookup(normalized)?;
        Some(self.found(surface, id, vec![], None, MatchStage::WholeWord))
    }

    /// Some entries are stored without a prefix their usual spelling carries
    /// (`למען` under `מען`). Drop the first letter blind and retry.
    fn speculative_prefix(&self, surface: &str, normalized: &str) -> Option<MatchResult> {
        if !self.config.speculative_prefix {
            return None;
        }
        let first = normalized.chars().next()?;
        let code = SPECULATIVE_PREFIXES
            .iter()
            .find(|(letter, _)| *letter == first)
            .map(|(_, code)| *code)?;
        let rest = &normalized[first.len_utf8()..];
        if rest.is_empty() {
            return None;
        }
        let id = self.lexicon.lookup(rest)?;
        Some(self.found(surface, id, vec![code], None, MatchStage::SpeculativePrefix))
    }

    fn preserved_finals(&self, surface: &str, cleaned: &str) -> Option<MatchResult> {
        let id = self.lexicon.lookup(&strip_nikud(cleaned))?;
        Some(self.found(surface, id, vec![], None, MatchStage::PreservedFinals))
    }

    // Stage b.

    /// Prefixes followed by nothing but a pronominal suffix (לָהֶם "to them").
    fn composite(&self, surface: &str, prefixes: &[PrefixCode], stem: &str) -> Option<MatchResult> {
        if prefixes.is_empty() {
            return None;
        }
        let suffix = bare_suffix(&strip_nikud(stem))?;
        log::debug!("{surface}: prefixes {prefixes:?} + suffix {suffix}, no stem");
        Some(MatchResult::composite(surface, prefixes.to_vec(), suffix))
    }

    fn reject_short_stem(&self, surface: &str, stem: &str) -> Option<MatchResult> {
        if consonant_count(stem) >= self.config.min_stem {
            return None;
        }
        Some(self.give_up(surface, stem, UnresolvedReason::InvalidStem))
    }

    // Stage c.

    fn stem_lookup(&self, surface: &str, prefixes: &[PrefixCode], stem: &str) -> Option<MatchResult> {
        let id = self.lexicon.lookup(&normalize(stem))?;
        Some(self.found(surface, id, prefixes.to_vec(), None, MatchStage::PrefixStripped))
    }

    // Stage d. Suffixes are matched before final forms are folded.

    fn suffix_lookup(&self, surface: &str, prefixes: &[PrefixCode], stem: &str) -> Option<MatchResult> {
        let consonants = strip_nikud(stem);
        let (reduced, suffix) = strip_suffix_with(&consonants, self.config.suffix_min_stem);
        let suffix = suffix?;
        let id = self.lexicon.lookup(&normalize(reduced))?;
        Some(self.found(
            surface,
            id,
            prefixes.to_vec(),
            Some(suffix),
            MatchStage::SuffixStripped,
        ))
    }

    /// The unsplit word looks up to `id`.
    fn spells(&self, cleaned: &str, id: &str) -> bool {
        self.lexicon.lookup(&normalize(cleaned)) == Some(id)
            || self.lexicon.lookup(&strip_nikud(cleaned)) == Some(id)
    }

    /// The stem, with or without a suffix, is unknown or looks up to `id`.
    fn stem_agrees(&self, stem: &str, id: &str) -> bool {
        let consonants = strip_nikud(stem);
        let (reduced, suffix) = strip_suffix_with(&consonants, self.config.suffix_min_stem);
        let found = self.lexicon.lookup(&normalize(stem)).or_else(|| {
            suffix.and_then(|_| self.lexicon.lookup(&normalize(reduced)))
        });
        found.map_or(true, |found| found == id)
    }

    fn found(
        &self,
        surface: &str,
        id: &str,
        prefixes: Vec<PrefixCode>,
        suffix: Option<SuffixCode>,
        stage: MatchStage,
    ) -> MatchResult {
        log::debug!("{surface}: {id} via {stage:?}");
        MatchResult::resolved(surface, id, prefixes, suffix, stage)
    }

    fn give_up(&self, surface: &str, stem: &str, reason: UnresolvedReason) -> MatchResult {
        self.unresolved.record(surface, stem, reason);
        MatchResult::unresolved(surface, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::OnceLock;

    fn lexicon() -> &'static Lexicon {
        static LEXICON: OnceLock<Lexicon> = OnceLock::new();
        LEXICON.get_or_init(|| {
            Lexicon::from_json(
                include_str!("../../data/lexicon/words.json"),
                include_str!("../../data/lexicon/roots.json"),
            )
            .unwrap()
        })
    }

    fn matcher() -> Matcher<'static> {
        Matcher::new(lexicon())
    }

    #[test]
    fn test_whole_word() {
        let r = matcher().match_word("אֱלֹהִים");
        assert_eq!(r.resolved_id.as_deref(), Some("H430"));
        assert_eq!(r.stage, MatchStage::WholeWord);
        assert!(r.prefixes.is_empty());
    }

    #[test]
    fn test_whole_word_from_root_table() {
        let r = matcher().match_word("בָּרָא");
        assert_eq!(r.resolved_id.as_deref(), Some("H1254"));
    }

    #[test]
    fn test_bereshit() {
        let m = matcher();
        let r = m.match_word("בְּרֵאשִׁית");
        assert_eq!(r.resolved_id.as_deref(), Some("H7225"));
        assert_eq!(r.prefixes, vec![PrefixCode::In]);
        assert_eq!(r.suffix, None);
        assert_eq!(m.to_record(&r).strong.as_deref(), Some("Hb/H7225"));
    }

    #[test]
    fn test_bereshit_through_prefix_detection() {
        let config = MatcherConfig {
            speculative_prefix: false,
            ..MatcherConfig::default()
        };
        let m = Matcher::with_config(lexicon(), config);
        let r = m.match_word("בְּרֵאשִׁית");
        assert_eq!(r.stage, MatchStage::PrefixStripped);
        assert_eq!(r.resolved_id.as_deref(), Some("H7225"));
        assert_eq!(r.prefixes, vec![PrefixCode::In]);
    }

    #[test]
    fn test_article() {
        let r = matcher().match_word("הַשָּׁמַיִם");
        assert_eq!(r.resolved_id.as_deref(), Some("H8064"));
        assert_eq!(r.prefixes, vec![PrefixCode::Article]);
        assert_eq!(r.stage, MatchStage::PrefixStripped);
    }

    #[test]
    fn test_conjunction_and_article() {
        let r = matcher().match_word("וְהָאָרֶץ");
        assert_eq!(r.resolved_id.as_deref(), Some("H776"));
        assert_eq!(r.prefixes, vec![PrefixCode::Conjunction, PrefixCode::Article]);
    }

    #[test]
    fn test_trailing_punctuation_kept_in_surface() {
        let r = matcher().match_word("הָאָרֶץ׃");
        assert_eq!(r.resolved_id.as_deref(), Some("H776"));
        assert_eq!(r.surface, "הָאָרֶץ׃");
    }

    #[test]
    fn test_suffix() {
        let r = matcher().match_word("דְּבָרָיו");
        assert_eq!(r.resolved_id.as_deref(), Some("H1697"));
        assert_eq!(r.suffix, Some(SuffixCode::S3ms));
        assert!(r.prefixes.is_empty());
        assert_eq!(r.stage, MatchStage::SuffixStripped);
    }

    #[test]
    fn test_prefix_and_suffix() {
        let m = matcher();
        let r = m.match_word("וּדְבָרָיו");
        assert_eq!(r.resolved_id.as_deref(), Some("H1697"));
        assert_eq!(r.prefixes, vec![PrefixCode::Conjunction]);
        assert_eq!(r.suffix, Some(SuffixCode::S3ms));
        assert_eq!(m.to_record(&r).strong.as_deref(), Some("H1697"));
    }

    #[test]
    fn test_final_mem_suffix() {
        let r = matcher().match_word("סוּסָם");
        assert_eq!(r.resolved_id.as_deref(), Some("H5483"));
        assert_eq!(r.suffix, Some(SuffixCode::S3mp));
    }

    #[test]
    fn test_composite_prefix_suffix() {
        let m = matcher();
        let r = m.match_word("וְלָהֶם");
        assert_eq!(r.resolved_id, None);
        assert_eq!(r.prefixes, vec![PrefixCode::Conjunction, PrefixCode::To]);
        assert_eq!(r.suffix, Some(SuffixCode::S3mp));
        assert_eq!(r.reason, Some(UnresolvedReason::PrefixSuffixOnly));
        assert!(m.unresolved().is_empty());
    }

    #[test]
    fn test_speculative_strip_precedes_detection() {
        let r = matcher().match_word("לָהֶם");
        assert_eq!(r.resolved_id.as_deref(), Some("H1992"));
        assert_eq!(r.prefixes, vec![PrefixCode::To]);
        assert_eq!(r.stage, MatchStage::SpeculativePrefix);
    }

    #[test]
    fn test_preserved_finals() {
        let r = matcher().match_word("לְמַעַן");
        assert_eq!(r.resolved_id.as_deref(), Some("H4616"));
        assert_eq!(r.stage, MatchStage::PreservedFinals);
    }

    #[test]
    fn test_invalid_stem() {
        let m = matcher();
        let r = m.match_word("ו");
        assert_eq!(r.reason, Some(UnresolvedReason::InvalidStem));
        assert!(r.prefixes.is_empty());
        assert_eq!(m.unresolved().len(), 1);
    }

    #[test]
    fn test_unconfirmed_prefix_not_reported() {
        let m = matcher();
        let r = m.match_word("וְגַמָּל");
        assert_eq!(r.resolved_id, None);
        assert_eq!(r.reason, Some(UnresolvedReason::NoMatch));
        assert!(r.prefixes.is_empty());
        assert!(r.suffix.is_none());
        let logged = m.unresolved().entries();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].word, "וְגַמָּל");
        assert_eq!(strip_nikud(&logged[0].stem), "גמל");
    }

    #[test]
    fn test_empty_and_non_hebrew() {
        let m = matcher();
        assert_eq!(m.match_word("").reason, Some(UnresolvedReason::EmptyToken));
        assert_eq!(m.match_word("   ").reason, Some(UnresolvedReason::EmptyToken));
        assert_eq!(m.match_word("׃").reason, Some(UnresolvedReason::EmptyToken));
        assert_eq!(m.match_word("abc").reason, Some(UnresolvedReason::NonHebrew));
        assert_eq!(m.unresolved().len(), 4);
    }

    #[test]
    fn test_known_id_reports_prefixes() {
        let r = matcher().match_with_hint("וְהָאָרֶץ", Some("H776"));
        assert_eq!(r.stage, MatchStage::KnownId);
        assert_eq!(r.resolved_id.as_deref(), Some("H776"));
        assert_eq!(r.prefixes, vec![PrefixCode::Conjunction, PrefixCode::Article]);
    }

    #[test]
    fn test_known_id_allows_mem() {
        let r = matcher().match_with_hint("מִמִּצְרַיִם", Some("H4714"));
        assert_eq!(r.prefixes, vec![PrefixCode::From]);
    }

    #[test]
    fn test_known_id_bare_root_keeps_leading_letter() {
        let m = matcher();
        let r = m.match_with_hint("בָּרָא", Some("H1254"));
        assert!(r.prefixes.is_empty());
        assert_eq!(m.to_record(&r).strong.as_deref(), Some("H1254"));

        let r = m.match_with_hint("בַּיִת", Some("H1004"));
        assert!(r.prefixes.is_empty());
    }

    #[test]
    fn test_known_id_rejects_split_to_other_entry() {
        // The stem after ל is בית (H1004), which is not the given id.
        let r = matcher().match_with_hint("לְבֵית", Some("H9999"));
        assert_eq!(r.resolved_id.as_deref(), Some("H9999"));
        assert!(r.prefixes.is_empty());

        let r = matcher().match_with_hint("לְבֵית", Some("H1004"));
        assert_eq!(r.prefixes, vec![PrefixCode::To]);
    }

    #[test]
    fn test_known_id_with_suffixed_stem() {
        let r = matcher().match_with_hint("וּדְבָרָיו", Some("H1697"));
        assert_eq!(r.prefixes, vec![PrefixCode::Conjunction]);
        let r = matcher().match_with_hint("וּדְבָרָיו", Some("H1696"));
        assert!(r.prefixes.is_empty());
    }

    #[test]
    fn test_no_hint_is_conservative() {
        let m = matcher();
        assert!(m.match_word("הָאָרֶץ").is_resolved());
        let r = m.match_with_hint("הָאָרֶץ", None);
        assert!(!r.is_resolved());
        assert!(r.prefixes.is_empty());
    }

    #[test]
    fn test_proper_name_flag() {
        let m = matcher();
        let r = m.match_word("מִצְרַיִם");
        assert_eq!(r.resolved_id.as_deref(), Some("H4714"));
        assert!(m.to_record(&r).possible_proper_name);
        assert!(!m.to_record(&m.match_word("אֱלֹהִים")).possible_proper_name);
    }

    #[test]
    fn test_matcher_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Matcher<'static>>();
    }

    proptest! {
        #[test]
        fn prefixes_imply_resolution(word in "[\u{05B0}-\u{05BC}\u{05D0}-\u{05EA} ]{0,10}") {
            let m = matcher();
            let r = m.match_word(&word);
            if !r.prefixes.is_empty() {
                prop_assert!(
                    r.resolved_id.is_some()
                        || r.reason == Some(UnresolvedReason::PrefixSuffixOnly)
                );
            }
            if r.resolved_id.is_none() {
                prop_assert!(r.reason.is_some());
            }
            if r.reason.is_some() && r.reason != Some(UnresolvedReason::PrefixSuffixOnly) {
                prop_assert!(r.prefixes.is_empty() && r.suffix.is_none());
            }
        }
    }
}
