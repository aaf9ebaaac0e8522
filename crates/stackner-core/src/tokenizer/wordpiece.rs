//! # WordPiece Tokenizer
//!
//! BERT tokenization over a plain `vocab.txt`, assembled from the `tokenizers`
//! building blocks: `BertNormalizer` (control-char cleanup, CJK spacing,
//! optional lowercasing with accent stripping), `BertPreTokenizer` (whitespace
//! and Unicode punctuation) and a greedy longest-match `WordPiece` model using
//! the `##` continuation prefix.

use std::fs;
use std::path::Path;

use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::bert::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::{
    Model, NormalizedString, Normalizer, OffsetReferential, OffsetType, PreTokenizedString,
    PreTokenizer,
};
use tracing::debug;

use super::SubwordTokenizer;
use crate::error::{Result, StacknerError};

/// Continuation prefix for non-initial sub-words.
const CONTINUATION_PREFIX: &str = "##";

/// Unknown token of BERT vocabularies.
pub const UNK_TOKEN: &str = "[UNK]";

/// Longer pieces are mapped to the unknown token without matching.
const MAX_INPUT_CHARS_PER_WORD: usize = 100;

/// `[CLS]` and `[SEP]` around a single sequence.
const SPECIAL_TOKENS_SINGLE: usize = 2;

fn tokenizer_error(e: impl std::fmt::Display) -> StacknerError {
    StacknerError::Tokenizer(e.to_string())
}

/// WordPiece tokenizer compatible with BERT-family vocabularies.
#[derive(Debug, Clone)]
pub struct WordPieceTokenizer {
    normalizer: BertNormalizer,
    pre_tokenizer: BertPreTokenizer,
    model: WordPiece,
    unk_id: u32,
    special_tokens: usize,
}

impl WordPieceTokenizer {
    /// Create a tokenizer from vocabulary tokens indexed by id.
    ///
    /// Accents are stripped whenever `lowercase` is set, as uncased BERT
    /// checkpoints expect.
    ///
    /// # Errors
    /// Returns `StacknerError::UnknownToken` if the vocabulary has no `[UNK]`.
    pub fn new(tokens: Vec<String>, lowercase: bool) -> Result<Self> {
        let model = WordPiece::builder()
            .vocab(
                tokens
                    .into_iter()
                    .enumerate()
                    .map(|(i, tok)| (tok, i as u32))
                    .collect(),
            )
            .unk_token(UNK_TOKEN.to_string())
            .continuing_subword_prefix(CONTINUATION_PREFIX.to_string())
            .max_input_chars_per_word(MAX_INPUT_CHARS_PER_WORD)
            .build()
            .map_err(tokenizer_error)?;

        let unk_id = model
            .token_to_id(UNK_TOKEN)
            .ok_or_else(|| StacknerError::UnknownToken(UNK_TOKEN.to_string()))?;

        debug!(
            vocab_size = model.get_vocab_size(),
            lowercase,
            "WordPiece tokenizer initialized"
        );

        Ok(Self {
            normalizer: BertNormalizer::new(true, true, None, lowercase),
            pre_tokenizer: BertPreTokenizer,
            model,
            unk_id,
            special_tokens: SPECIAL_TOKENS_SINGLE,
        })
    }

    /// Create a tokenizer from `vocab.txt` content (one token per line).
    pub fn from_vocab_text(text: &str, lowercase: bool) -> Result<Self> {
        Self::new(text.lines().map(|l| l.trim_end().to_string()).collect(), lowercase)
    }

    /// Load a `vocab.txt` file.
    pub fn from_vocab_file(path: impl AsRef<Path>, lowercase: bool) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StacknerError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Self::from_vocab_text(&fs::read_to_string(path)?, lowercase)
    }

    /// Override the number of special tokens reported to the aligner.
    pub fn with_special_tokens_count(mut self, count: usize) -> Self {
        self.special_tokens = count;
        self
    }

    pub fn vocab_size(&self) -> usize {
        self.model.get_vocab_size()
    }
}

impl SubwordTokenizer for WordPieceTokenizer {
    fn tokenize(&self, word: &str) -> Result<Vec<String>> {
        let mut normalized = NormalizedString::from(word);
        self.normalizer
            .normalize(&mut normalized)
            .map_err(tokenizer_error)?;

        let mut pretokenized = PreTokenizedString::from(normalized);
        self.pre_tokenizer
            .pre_tokenize(&mut pretokenized)
            .map_err(tokenizer_error)?;

        let splits = pretokenized.get_splits(OffsetReferential::Original, OffsetType::Byte);
        let mut output = Vec::new();
        for (piece, _, _) in splits {
            if piece.is_empty() {
                continue;
            }
            let tokens = self.model.tokenize(piece).map_err(tokenizer_error)?;
            output.extend(tokens.into_iter().map(|t| t.value));
        }
        Ok(output)
    }

    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Result<Vec<u32>> {
        Ok(tokens
            .iter()
            .map(|t| self.model.token_to_id(t).unwrap_or(self.unk_id))
            .collect())
    }

    fn num_special_tokens_to_add(&self) -> usize {
        self.special_tokens
    }
}
