// Error types for loading lexicon tables, configuration and tagged text.
//
// Matching itself never fails: a word without a lexicon entry is reported
// through `UnresolvedReason`, not through these types.

use std::path::PathBuf;

use thiserror::Error;

/// A lexicon table could not be loaded. Fatal at startup.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The table file is missing or unreadable.
    #[error("cannot read lexicon table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table is not a JSON object of id to entry.
    #[error("invalid lexicon table {table}: {source}")]
    Json {
        table: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The matcher configuration file is unreadable or invalid.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Verse markup with word tags could not be read.
#[derive(Error, Debug)]
pub enum TagError {
    #[error("malformed verse markup at byte {position}: {source}")]
    Markup {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("unexpected element <{0}> in verse markup")]
    UnexpectedElement(String),

    #[error("word tag {0:?} is not a number")]
    InvalidNumber(String),
}
