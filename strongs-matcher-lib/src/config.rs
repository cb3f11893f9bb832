// Tunable thresholds for prefix detection and stem validation.
//
// The defaults reproduce the hand-calibrated values. A TOML file can
// override any subset of them; keys left out of a section keep that
// section's own default:
//
// ```toml
// min_stem = 2
// speculative_prefix = true
//
// [conservative]
// article_min_stem = 4
// detect_from = false
// ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Minimum consonants that must remain after each prefix category is peeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefixThresholds {
    /// Conjunction and the bet/lamed/kaf prepositions.
    pub min_stem: usize,
    /// Definite article.
    pub article_min_stem: usize,
    /// The ambiguous mem.
    pub from_min_stem: usize,
    /// Whether the ambiguous mem is considered at all.
    pub detect_from: bool,
}

impl PrefixThresholds {
    /// Used when the word's identity is corroborated, by a dictionary match
    /// later in the chain or by an upstream id.
    pub fn standard() -> Self {
        Self {
            min_stem: 2,
            article_min_stem: 3,
            from_min_stem: 3,
            detect_from: true,
        }
    }

    /// Used when nothing corroborates the analysis. Mem is too often part
    /// of the stem to be guessed blind.
    pub fn conservative() -> Self {
        Self {
            min_stem: 2,
            article_min_stem: 4,
            from_min_stem: 3,
            detect_from: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawConfig")]
pub struct MatcherConfig {
    pub standard: PrefixThresholds,
    pub conservative: PrefixThresholds,
    /// Minimum consonants in the stem left by prefix detection.
    pub min_stem: usize,
    /// Minimum consonants left after suffix removal.
    pub suffix_min_stem: usize,
    /// Retry a failed whole-word lookup without its first letter.
    pub speculative_prefix: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            standard: PrefixThresholds::standard(),
            conservative: PrefixThresholds::conservative(),
            min_stem: 2,
            suffix_min_stem: 2,
            speculative_prefix: true,
        }
    }
}

impl MatcherConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: MatcherConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Select the prefix thresholds for a detection mode.
    pub fn thresholds(&self, conservative: bool) -> &PrefixThresholds {
        if conservative {
            &self.conservative
        } else {
            &self.standard
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // A zero-length stem would let a prefix swallow the whole word.
        for (name, value) in [
            ("min_stem", self.min_stem),
            ("suffix_min_stem", self.suffix_min_stem),
            ("standard.min_stem", self.standard.min_stem),
            ("conservative.min_stem", self.conservative.min_stem),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be at least 1")));
            }
        }
        Ok(())
    }
}

// File shape: every key optional, filled in from the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    standard: RawThresholds,
    conservative: RawThresholds,
    min_stem: Option<usize>,
    suffix_min_stem: Option<usize>,
    speculative_prefix: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawThresholds {
    min_stem: Option<usize>,
    article_min_stem: Option<usize>,
    from_min_stem: Option<usize>,
    detect_from: Option<bool>,
}

impl RawThresholds {
    fn over(self, base: PrefixThresholds) -> PrefixThresholds {
        PrefixThresholds {
            min_stem: self.min_stem.unwrap_or(base.min_stem),
            article_min_stem: self.article_min_stem.unwrap_or(base.article_min_stem),
            from_min_stem: self.from_min_stem.unwrap_or(base.from_min_stem),
            detect_from: self.detect_from.unwrap_or(base.detect_from),
        }
    }
}

impl From<RawConfig> for MatcherConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = MatcherConfig::default();
        Self {
            standard: raw.standard.over(defaults.standard),
            conservative: raw.conservative.over(defaults.conservative),
            min_stem: raw.min_stem.unwrap_or(defaults.min_stem),
            suffix_min_stem: raw.suffix_min_stem.unwrap_or(defaults.suffix_min_stem),
            speculative_prefix: raw.speculative_prefix.unwrap_or(defaults.speculative_prefix),
        }
    }
}
