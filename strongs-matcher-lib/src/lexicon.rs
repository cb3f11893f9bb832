use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::LoadError;
use crate::normalize::normalize;
use crate::types::LexiconRow;

/// One lexicon table as stored on disk: canonical id and row, in file order.
pub type LexiconTable = Vec<(String, LexiconRow)>;

// Inflected spellings missing from the word table. `למען` keeps its final
// nun and is only reachable through the final-preserving lookup.
const ALTERNATE_FORMS: &[(&str, &str)] = &[
    ("היא", "H1931"),
    ("יהי", "H1961"),
    ("תהיה", "H1961"),
    ("למען", "H4616"),
];

/// In-memory lexicon, built once and shared read-only by every matcher.
#[derive(Debug, Default)]
pub struct Lexicon {
    /// Inflected word forms: normalized spelling → id.
    words: HashMap<String, String>,
    /// Bare roots: normalized spelling → id.
    roots: HashMap<String, String>,
    proper_nouns: HashSet<String>,
}

impl Lexicon {
    /// Load the word and root tables from JSON files. Both must exist.
    pub fn load(words_path: &Path, roots_path: &Path) -> Result<Self, LoadError> {
        let words = read_table(words_path)?;
        let roots = read_table(roots_path)?;
        let lexicon = Self::from_tables(words, roots);
        log::info!(
            "loaded lexicon: {} word forms, {} roots, {} proper nouns",
            lexicon.words.len(),
            lexicon.roots.len(),
            lexicon.proper_nouns.len()
        );
        Ok(lexicon)
    }

    /// Build from JSON text already in memory.
    pub fn from_json(words_json: &str, roots_json: &str) -> Result<Self, LoadError> {
        let words = parse_table("words", words_json)?;
        let roots = parse_table("roots", roots_json)?;
        Ok(Self::from_tables(words, roots))
    }

    /// Index two parsed tables. When several ids share a spelling the last
    /// one in file order wins.
    pub fn from_tables(words: LexiconTable, roots: LexiconTable) -> Self {
        let mut proper_nouns = HashSet::new();
        let mut word_index = HashMap::new();
        for (id, row) in &words {
            if is_capitalized(&row.transliteration) {
                proper_nouns.insert(id.clone());
            }
            if let Some(spelling) = &row.normalized {
                word_index.insert(spelling.clone(), id.clone());
            }
        }
        for (spelling, id) in ALTERNATE_FORMS {
            word_index.insert(spelling.to_string(), id.to_string());
        }

        let mut root_index = HashMap::new();
        for (id, row) in &roots {
            if is_capitalized(&row.transliteration) {
                proper_nouns.insert(id.clone());
            }
            let spelling = match (&row.normalized, &row.lemma) {
                (Some(n), _) => n.clone(),
                (None, Some(lemma)) => normalize(lemma),
                (None, None) => continue,
            };
            root_index.insert(spelling, id.clone());
        }

        Self {
            words: word_index,
            roots: root_index,
            proper_nouns,
        }
    }

    /// Find the id for a normalized spelling, word forms first, then roots.
    pub fn lookup(&self, spelling: &str) -> Option<&str> {
        self.words
            .get(spelling)
            .or_else(|| self.roots.get(spelling))
            .map(String::as_str)
    }

    /// Check whether any entry has this spelling.
    pub fn contains(&self, spelling: &str) -> bool {
        self.lookup(spelling).is_some()
    }

    /// True if the id names a proper noun. Accepts decorated ids such as
    /// `Hb/H3478`.
    pub fn is_proper_noun(&self, id: &str) -> bool {
        let bare = id.rsplit('/').next().unwrap_or(id);
        self.proper_nouns.contains(bare)
    }

    /// Number of indexed spellings across both tables.
    pub fn len(&self) -> usize {
        self.words.len() + self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.roots.is_empty()
    }
}

fn read_table(path: &Path) -> Result<LexiconTable, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(&path.display().to_string(), &text)
}

// serde_json is built with `preserve_order`, so the object's rows come back
// in file order.
fn parse_table(name: &str, text: &str) -> Result<LexiconTable, LoadError> {
    let json_error = |source: serde_json::Error| LoadError::Json {
        table: name.to_string(),
        source,
    };
    let rows: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(text).map_err(json_error)?;
    rows.into_iter()
        .map(|(id, row)| Ok((id, serde_json::from_value(row).map_err(json_error)?)))
        .collect()
}

/// Proper nouns are transliterated with a leading capital.
fn is_capitalized(transliteration: &str) -> bool {
    transliteration
        .chars()
        .next()
        .map_or(false, char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: &str = r#"{
        "H7225": {"normalized": "ראשית", "transliteration": "rêʼshîyth"},
        "H3478": {"normalized": "ישראל", "transliteration": "Yisrâʼêl"},
        "H1697": {"normalized": "דבר", "transliteration": "dâbâr"}
    }"#;
    const ROOTS: &str = r#"{
        "H1254": {"lemma": "בָּרָא", "xlit": "bârâʼ"},
        "H1696": {"normalized": "דבר", "xlit": "dâbar"},
        "H9999": {}
    }"#;

    fn lexicon() -> Lexicon {
        Lexicon::from_json(WORDS, ROOTS).unwrap()
    }

    #[test]
    fn test_lookup_word() {
        assert_eq!(lexicon().lookup("ראשית"), Some("H7225"));
    }

    #[test]
    fn test_root_keyed_by_normalized_lemma() {
        assert_eq!(lexicon().lookup("ברא"), Some("H1254"));
    }

    #[test]
    fn test_words_before_roots() {
        assert_eq!(lexicon().lookup("דבר"), Some("H1697"));
    }

    #[test]
    fn test_lookup_nonexistent() {
        assert!(lexicon().lookup("זזזז").is_none());
        assert!(!lexicon().contains(""));
    }

    #[test]
    fn test_alternate_forms() {
        let lex = lexicon();
        assert_eq!(lex.lookup("היא"), Some("H1931"));
        assert_eq!(lex.lookup("למען"), Some("H4616"));
        assert!(lex.lookup("למענ").is_none());
    }

    #[test]
    fn test_proper_noun() {
        let lex = lexicon();
        assert!(lex.is_proper_noun("H3478"));
        assert!(lex.is_proper_noun("Hl/H3478"));
        assert!(!lex.is_proper_noun("H7225"));
        assert!(!lex.is_proper_noun("H0"));
    }

    #[test]
    fn test_row_without_spelling_skipped() {
        // H9999 has neither spelling; only the two real roots are indexed.
        assert_eq!(lexicon().roots.len(), 2);
    }

    #[test]
    fn test_duplicate_spelling_last_row_wins() {
        let words = r#"{
            "H1697": {"normalized": "דבר"},
            "H1696": {"normalized": "דבר"}
        }"#;
        let lex = Lexicon::from_json(words, "{}").unwrap();
        assert_eq!(lex.lookup("דבר"), Some("H1696"));

        let words = r#"{
            "H1000": {"normalized": "אבנ"},
            "H999": {"normalized": "אבנ"}
        }"#;
        let lex = Lexicon::from_json(words, "{}").unwrap();
        assert_eq!(lex.lookup("אבנ"), Some("H999"));
    }

    #[test]
    fn test_bad_row_is_json_error() {
        let err = Lexicon::from_json(r#"{"H1": {"normalized": 7}}"#, "{}").unwrap_err();
        assert!(matches!(err, LoadError::Json { ref table, .. } if table == "words"));
    }

    #[test]
    fn test_invalid_json() {
        let err = Lexicon::from_json("[1, 2]", ROOTS).unwrap_err();
        assert!(matches!(err, LoadError::Json { ref table, .. } if table == "words"));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words.json");
        let roots = dir.path().join("roots.json");
        std::fs::write(&words, WORDS).unwrap();
        std::fs::write(&roots, ROOTS).unwrap();
        let lex = Lexicon::load(&words, &roots).unwrap();
        assert_eq!(lex.lookup("ישראל"), Some("H3478"));
    }

    #[test]
    fn test_missing_table_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words.json");
        std::fs::write(&words, WORDS).unwrap();
        let err = Lexicon::load(&words, &dir.path().join("roots.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
