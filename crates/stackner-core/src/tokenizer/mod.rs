//! # Sub-word Tokenizers
//!
//! The feature aligner only needs three operations from a tokenizer, captured
//! by [`SubwordTokenizer`]. Two implementations are provided: a wrapper around
//! a HuggingFace `tokenizer.json` and a plain WordPiece tokenizer over a BERT
//! `vocab.txt`.

pub mod hf;
pub mod wordpiece;

pub use hf::HfTokenizer;
pub use wordpiece::WordPieceTokenizer;

use crate::error::Result;

/// Sub-word tokenization capability used by the feature aligner.
pub trait SubwordTokenizer {
    /// Split a single word into sub-word units. May return an empty vector.
    fn tokenize(&self, word: &str) -> Result<Vec<String>>;

    /// Map sub-word units (and special tokens) to vocabulary ids.
    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Result<Vec<u32>>;

    /// Number of special tokens added around a single sequence.
    fn num_special_tokens_to_add(&self) -> usize;
}

impl<T: SubwordTokenizer + ?Sized> SubwordTokenizer for &T {
    fn tokenize(&self, word: &str) -> Result<Vec<String>> {
        (**self).tokenize(word)
    }

    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Result<Vec<u32>> {
        (**self).convert_tokens_to_ids(tokens)
    }

    fn num_special_tokens_to_add(&self) -> usize {
        (**self).num_special_tokens_to_add()
    }
}

impl<T: SubwordTokenizer + ?Sized> SubwordTokenizer for Box<T> {
    fn tokenize(&self, word: &str) -> Result<Vec<String>> {
        (**self).tokenize(word)
    }

    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Result<Vec<u32>> {
        (**self).convert_tokens_to_ids(tokens)
    }

    fn num_special_tokens_to_add(&self) -> usize {
        (**self).num_special_tokens_to_add()
    }
}
