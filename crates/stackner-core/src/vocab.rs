//! Word-frequency vocabulary loaded from `word_to_id.json`.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, StacknerError};

/// Default file name of the word vocabulary.
pub const WORD_VOCAB_FILE: &str = "word_to_id.json";

/// Reserved padding entry.
pub const PAD_WORD: &str = "**PAD**";

/// Reserved unknown-word entry.
pub const UNK_WORD: &str = "**UNK**";

/// Read-only mapping from surface word to id.
#[derive(Debug, Clone)]
pub struct WordVocabulary {
    word_to_id: HashMap<String, u32>,
    pad_id: u32,
    unk_id: u32,
}

impl WordVocabulary {
    /// Build from a map that must contain [`PAD_WORD`] and [`UNK_WORD`].
    pub fn new(word_to_id: HashMap<String, u32>) -> Result<Self> {
        let pad_id = *word_to_id
            .get(PAD_WORD)
            .ok_or(StacknerError::MissingReservedWord(PAD_WORD))?;
        let unk_id = *word_to_id
            .get(UNK_WORD)
            .ok_or(StacknerError::MissingReservedWord(UNK_WORD))?;

        Ok(Self {
            word_to_id,
            pad_id,
            unk_id,
        })
    }

    /// Load a JSON object of `word -> id`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StacknerError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let reader = BufReader::new(File::open(path)?);
        let word_to_id: HashMap<String, u32> = serde_json::from_reader(reader)?;
        debug!(path = %path.display(), words = word_to_id.len(), "loaded word vocabulary");
        Self::new(word_to_id)
    }

    /// Id of `word`, or the unknown-word id.
    pub fn id(&self, word: &str) -> u32 {
        self.word_to_id.get(word).copied().unwrap_or(self.unk_id)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.word_to_id.contains_key(word)
    }

    pub fn pad_id(&self) -> u32 {
        self.pad_id
    }

    pub fn unk_id(&self) -> u32 {
        self.unk_id
    }

    pub fn len(&self) -> usize {
        self.word_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_to_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HashMap<String, u32> {
        [(PAD_WORD, 0), (UNK_WORD, 1), ("python", 2), ("list", 3)]
            .into_iter()
            .map(|(w, i)| (w.to_string(), i))
            .collect()
    }

    #[test]
    fn test_lookup_with_unknown_fallback() {
        let vocab = WordVocabulary::new(sample()).unwrap();
        assert_eq!(vocab.id("python"), 2);
        assert_eq!(vocab.id("Python"), 1);
        assert_eq!(vocab.pad_id(), 0);
        assert_eq!(vocab.unk_id(), 1);
        assert!(vocab.contains("list"));
    }

    #[test]
    fn test_reserved_entries_required() {
        let mut map = sample();
        map.remove(UNK_WORD);
        assert!(matches!(
            WordVocabulary::new(map),
            Err(StacknerError::MissingReservedWord("**UNK**"))
        ));

        let mut map = sample();
        map.remove(PAD_WORD);
        assert!(matches!(
            WordVocabulary::new(map),
            Err(StacknerError::MissingReservedWord("**PAD**"))
        ));
    }

    #[test]
    fn test_load_json_file() {
        let path = std::env::temp_dir().join(format!("stackner-words-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"**PAD**": 0, "**UNK**": 1, "numpy": 7}"#).unwrap();

        let vocab = WordVocabulary::from_json_file(&path).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.id("numpy"), 7);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_json_file() {
        let err = WordVocabulary::from_json_file("/nope/word_to_id.json").unwrap_err();
        assert!(matches!(err, StacknerError::NotFound { .. }));
    }
}
