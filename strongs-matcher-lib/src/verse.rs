// Verse-level matching: split into words and match each independently.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::TagError;
use crate::matcher::Matcher;
use crate::normalize::tokenize_verse;
use crate::output::reinsert_separators;
use crate::tagged::{parse_tagged_verse, strip_tags};
use crate::types::*;

/// A verse with every word matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedVerse {
    /// The verse text with separators after each confirmed prefix.
    pub hebrew: String,
    pub words: Vec<OutputRecord>,
}

/// Match every word of a plain verse.
pub fn match_verse(matcher: &Matcher<'_>, verse: &str) -> Vec<MatchResult> {
    tokenize_verse(verse)
        .into_iter()
        .map(|word| matcher.match_word(word))
        .collect()
}

/// Match every word of a verse whose words carry upstream ids.
pub fn match_tagged_verse(matcher: &Matcher<'_>, words: &[TaggedWord]) -> Vec<MatchResult> {
    words
        .iter()
        .map(|w| matcher.match_with_hint(&w.text, w.strong.as_deref()))
        .collect()
}

/// Match a plain verse and build its annotated form.
pub fn annotate_verse(matcher: &Matcher<'_>, verse: &str) -> AnnotatedVerse {
    annotate_results(matcher, verse, &match_verse(matcher, verse))
}

/// Match a tagged verse and build its annotated form from the untagged text.
pub fn annotate_tagged_verse(
    matcher: &Matcher<'_>,
    markup: &str,
) -> Result<AnnotatedVerse, TagError> {
    let words = parse_tagged_verse(markup)?;
    let text = strip_tags(markup)?;
    Ok(annotate_results(matcher, &text, &match_tagged_verse(matcher, &words)))
}

/// Build the annotated form of a verse from results already computed, one per
/// word in verse order.
pub fn annotate_results(
    matcher: &Matcher<'_>,
    verse: &str,
    results: &[MatchResult],
) -> AnnotatedVerse {
    let words: Vec<OutputRecord> = results.iter().map(|r| matcher.to_record(r)).collect();
    AnnotatedVerse {
        hebrew: reinsert_separators(verse.trim(), &words),
        words,
    }
}

/// Count of results per fallback stage, for judging how often each stage
/// fires across a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageTally {
    counts: BTreeMap<MatchStage, usize>,
    total: usize,
}

impl StageTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: &MatchResult) {
        *self.counts.entry(result.stage).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn count(&self, stage: MatchStage) -> usize {
        self.counts.get(&stage).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Results that carry an id.
    pub fn resolved(&self) -> usize {
        self.total - self.count(MatchStage::Unresolved) - self.count(MatchStage::Composite)
    }

    /// Stages that fired at least once, in chain order.
    pub fn iter(&self) -> impl Iterator<Item = (MatchStage, usize)> + '_ {
        self.counts.iter().map(|(stage, n)| (*stage, *n))
    }
}

impl<'r> Extend<&'r MatchResult> for StageTally {
    fn extend<I: IntoIterator<Item = &'r MatchResult>>(&mut self, iter: I) {
        for result in iter {
            self.add(result);
        }
    }
}

impl<'r> FromIterator<&'r MatchResult> for StageTally {
    fn from_iter<I: IntoIterator<Item = &'r MatchResult>>(iter: I) -> Self {
        let mut tally = Self::new();
        tally.extend(iter);
        tally
    }
}
