pub mod types;
pub mod error;
pub mod normalize;
pub mod config;
pub mod lexicon;
pub mod prefix;
pub mod suffix;
pub mod diagnostics;
pub mod matcher;
pub mod output;
pub mod verse;
pub mod tagged;

pub use config::{MatcherConfig, PrefixThresholds};
pub use diagnostics::{UnresolvedEntry, UnresolvedLog};
pub use error::{ConfigError, LoadError, TagError};
pub use lexicon::Lexicon;
pub use matcher::Matcher;
pub use normalize::{normalize, tokenize_verse};
pub use output::reinsert_separators;
pub use prefix::detect;
pub use suffix::strip_suffix;
pub use tagged::parse_tagged_verse;
pub use types::{
    MatchResult, MatchStage, OutputRecord, PrefixCode, SuffixCode, TaggedWord, UnresolvedReason,
};
pub use verse::{annotate_tagged_verse, annotate_verse, match_verse, AnnotatedVerse, StageTally};
