use std::fmt;

use serde::{Deserialize, Serialize};

/// A grammatical prefix morpheme, in the order it may appear on a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrefixCode {
    /// Conjunctive vav, "and".
    #[serde(rename = "Hc")]
    Conjunction,
    /// Preposition bet, "in/at/with".
    #[serde(rename = "Hb")]
    In,
    /// Preposition lamed, "to/for".
    #[serde(rename = "Hl")]
    To,
    /// Preposition kaf, "like/as".
    #[serde(rename = "Hk")]
    Like,
    /// Preposition min, "from".
    #[serde(rename = "HR")]
    From,
    /// Mem of a verbal pattern (Hiphil participle), not a preposition.
    #[serde(rename = "Hm")]
    VerbalMem,
    /// Definite article he, "the".
    #[serde(rename = "Hd")]
    Article,
}

impl PrefixCode {
    /// The short code used in output records.
    pub fn code(self) -> &'static str {
        match self {
            PrefixCode::Conjunction => "Hc",
            PrefixCode::In => "Hb",
            PrefixCode::To => "Hl",
            PrefixCode::Like => "Hk",
            PrefixCode::From => "HR",
            PrefixCode::VerbalMem => "Hm",
            PrefixCode::Article => "Hd",
        }
    }
}

impl fmt::Display for PrefixCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A pronominal or verbal suffix, named by person, gender and number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuffixCode {
    S1cs,
    S1cp,
    S2,
    S2mp,
    S2fp,
    S3ms,
    S3fs,
    S3mp,
    S3fp,
}

impl SuffixCode {
    pub fn code(self) -> &'static str {
        match self {
            SuffixCode::S1cs => "S1cs",
            SuffixCode::S1cp => "S1cp",
            SuffixCode::S2 => "S2",
            SuffixCode::S2mp => "S2mp",
            SuffixCode::S2fp => "S2fp",
            SuffixCode::S3ms => "S3ms",
            SuffixCode::S3fs => "S3fs",
            SuffixCode::S3mp => "S3mp",
            SuffixCode::S3fp => "S3fp",
        }
    }
}

impl fmt::Display for SuffixCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which step of the fallback chain produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    /// The whole word matched after normalization.
    WholeWord,
    /// The whole word matched after dropping one unvalidated leading letter.
    SpeculativePrefix,
    /// The whole word matched with final letter forms kept.
    PreservedFinals,
    /// The stem left by grammar-validated prefix detection matched.
    PrefixStripped,
    /// The stem matched after a suffix was also removed.
    SuffixStripped,
    /// Prefixes followed directly by a suffix, no stem.
    Composite,
    /// The id was supplied by the caller.
    KnownId,
    /// Nothing matched.
    Unresolved,
}

/// Why a word could not be linked to a lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnresolvedReason {
    #[serde(rename = "empty token")]
    EmptyToken,
    #[serde(rename = "non-Hebrew token")]
    NonHebrew,
    #[serde(rename = "invalid stem after prefix removal")]
    InvalidStem,
    #[serde(rename = "no dictionary match")]
    NoMatch,
    #[serde(rename = "prefix+suffix only, no stem")]
    PrefixSuffixOnly,
}

impl UnresolvedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            UnresolvedReason::EmptyToken => "empty token",
            UnresolvedReason::NonHebrew => "non-Hebrew token",
            UnresolvedReason::InvalidStem => "invalid stem after prefix removal",
            UnresolvedReason::NoMatch => "no dictionary match",
            UnresolvedReason::PrefixSuffixOnly => "prefix+suffix only, no stem",
        }
    }
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The analysis of one surface word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// The word as it appeared in the text.
    pub surface: String,
    /// Canonical lexicon id (e.g. `H7225`), if one was found.
    pub resolved_id: Option<String>,
    /// Prefixes in grammatical order. Empty unless they were confirmed.
    pub prefixes: Vec<PrefixCode>,
    pub suffix: Option<SuffixCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnresolvedReason>,
    pub stage: MatchStage,
}

impl MatchResult {
    pub(crate) fn resolved(
        surface: &str,
        id: &str,
        prefixes: Vec<PrefixCode>,
        suffix: Option<SuffixCode>,
        stage: MatchStage,
    ) -> Self {
        Self {
            surface: surface.to_string(),
            resolved_id: Some(id.to_string()),
            prefixes,
            suffix,
            reason: None,
            stage,
        }
    }

    pub(crate) fn unresolved(surface: &str, reason: UnresolvedReason) -> Self {
        Self {
            surface: surface.to_string(),
            resolved_id: None,
            prefixes: vec![],
            suffix: None,
            reason: Some(reason),
            stage: MatchStage::Unresolved,
        }
    }

    pub(crate) fn composite(surface: &str, prefixes: Vec<PrefixCode>, suffix: SuffixCode) -> Self {
        Self {
            surface: surface.to_string(),
            resolved_id: None,
            prefixes,
            suffix: Some(suffix),
            reason: Some(UnresolvedReason::PrefixSuffixOnly),
            stage: MatchStage::Composite,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_id.is_some()
    }
}

/// The per-word record handed to downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub text: String,
    /// The canonical id, or `<prefix>/<id>` for a single prefix and no suffix.
    pub strong: Option<String>,
    pub prefixes: Vec<PrefixCode>,
    pub suffix: Option<SuffixCode>,
    /// Set when the id belongs to a proper noun, a frequent source of
    /// accidental matches.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub possible_proper_name: bool,
}

/// Raw lexicon row as stored in the JSON tables, keyed by canonical id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconRow {
    /// Consonantal spelling with final forms folded.
    #[serde(default)]
    pub normalized: Option<String>,
    /// Pointed headword; used when `normalized` is absent.
    #[serde(default)]
    pub lemma: Option<String>,
    /// Latin pronunciation guide. Capitalized for proper nouns.
    #[serde(default, alias = "xlit")]
    pub transliteration: String,
}

/// A word from tagged verse markup, with the id the source assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedWord {
    pub text: String,
    pub strong: Option<String>,
}
