//! HuggingFace `tokenizer.json` backed tokenizer.

use std::path::Path;

use tokenizers::{PostProcessor, Tokenizer};
use tracing::debug;

use super::SubwordTokenizer;
use crate::error::{Result, StacknerError};

/// Unknown tokens tried, in order, when a token has no id.
const UNK_CANDIDATES: &[&str] = &["[UNK]", "<unk>"];

/// Fallback when the tokenizer has no post-processor: `[CLS]` + `[SEP]`.
const DEFAULT_SPECIAL_TOKENS: usize = 2;

/// Wrapper around a pretrained HuggingFace tokenizer.
pub struct HfTokenizer {
    inner: Tokenizer,
    unk_id: Option<u32>,
    special_tokens: usize,
}

impl HfTokenizer {
    /// Wrap an already constructed tokenizer.
    pub fn new(inner: Tokenizer) -> Self {
        let unk_id = UNK_CANDIDATES.iter().find_map(|t| inner.token_to_id(t));
        let special_tokens = inner
            .get_post_processor()
            .map(|pp| pp.added_tokens(false))
            .unwrap_or(DEFAULT_SPECIAL_TOKENS);

        debug!(
            vocab_size = inner.get_vocab_size(true),
            special_tokens,
            has_unk = unk_id.is_some(),
            "HuggingFace tokenizer initialized"
        );

        Self {
            inner,
            unk_id,
            special_tokens,
        }
    }

    /// Load a `tokenizer.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StacknerError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let inner =
            Tokenizer::from_file(path).map_err(|e| StacknerError::Tokenizer(e.to_string()))?;
        Ok(Self::new(inner))
    }

    /// Override the special-token count reported by the post-processor.
    pub fn with_special_tokens_count(mut self, count: usize) -> Self {
        self.special_tokens = count;
        self
    }

    pub fn inner(&self) -> &Tokenizer {
        &self.inner
    }
}

impl SubwordTokenizer for HfTokenizer {
    fn tokenize(&self, word: &str) -> Result<Vec<String>> {
        let encoding = self
            .inner
            .encode(word, false)
            .map_err(|e| StacknerError::Tokenizer(format!("failed to encode {word:?}: {e}")))?;
        Ok(encoding.get_tokens().to_vec())
    }

    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Result<Vec<u32>> {
        tokens
            .iter()
            .map(|t| {
                self.inner
                    .token_to_id(t)
                    .or(self.unk_id)
                    .ok_or_else(|| StacknerError::UnknownToken(t.clone()))
            })
            .collect()
    }

    fn num_special_tokens_to_add(&self) -> usize {
        self.special_tokens
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::str::FromStr;

    use super::*;

    const TOKENIZER_JSON: &str = r###"{
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": { "type": "BertPreTokenizer" },
        "post_processor": {
            "type": "BertProcessing",
            "sep": ["[SEP]", 3],
            "cls": ["[CLS]", 2]
        },
        "decoder": null,
        "model": {
            "type": "WordPiece",
            "unk_token": "[UNK]",
            "continuing_subword_prefix": "##",
            "max_input_chars_per_word": 100,
            "vocab": {
                "[PAD]": 0, "[UNK]": 1, "[CLS]": 2, "[SEP]": 3,
                "run": 4, "##ning": 5, "fast": 6
            }
        }
    }"###;

    /// BERT-style tokenizer over a seven-token vocabulary.
    pub(crate) fn tokenizer() -> HfTokenizer {
        HfTokenizer::new(Tokenizer::from_str(TOKENIZER_JSON).unwrap())
    }

    #[test]
    fn test_tokenize_word() {
        let tok = tokenizer();
        assert_eq!(tok.tokenize("running").unwrap(), vec!["run", "##ning"]);
        assert_eq!(tok.tokenize("fast").unwrap(), vec!["fast"]);
    }

    #[test]
    fn test_space_yields_no_tokens() {
        let tok = tokenizer();
        assert!(tok.tokenize(" ").unwrap().is_empty());
    }

    #[test]
    fn test_special_tokens_from_post_processor() {
        let tok = tokenizer();
        assert_eq!(tok.num_special_tokens_to_add(), 2);
        let tok = tok.with_special_tokens_count(3);
        assert_eq!(tok.num_special_tokens_to_add(), 3);
    }

    #[test]
    fn test_unknown_tokens_map_to_unk() {
        let tok = tokenizer();
        let tokens = vec!["[CLS]".to_string(), "fast".to_string(), "zzz".to_string()];
        assert_eq!(tok.convert_tokens_to_ids(&tokens).unwrap(), vec![2, 6, 1]);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            HfTokenizer::from_file("/missing/tokenizer.json"),
            Err(StacknerError::NotFound { .. })
        ));
    }
}
