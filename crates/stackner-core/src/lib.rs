//! # Stackner Core
//!
//! Data preparation for fine-tuning transformer NER models on
//! StackOverflow-style text. Reads tab-separated token/label files and
//! aligns word-level labels onto sub-word tokenizations, producing
//! fixed-width feature records.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::io::Cursor;
//!
//! use stackner_core::{
//!     parse_examples, FeatureAligner, FeatureConfig, LabelVocabulary, WordPieceTokenizer,
//!     WordVocabulary,
//! };
//!
//! let sentences = parse_examples(
//!     Cursor::new("running\tO\tCTC_PRED:0\tmd_label:O\nfast\tO\tCTC_PRED:0\tmd_label:O\n"),
//!     "train",
//! )
//! .unwrap();
//!
//! let tokenizer =
//!     WordPieceTokenizer::from_vocab_text("[PAD]\n[UNK]\n[CLS]\n[SEP]\nrun\n##ning\nfast", true)
//!         .unwrap();
//! let labels = LabelVocabulary::new(stackner_core::labels::extend_labels(["B-Class"])).unwrap();
//! let words: HashMap<String, u32> = [("**PAD**", 0), ("**UNK**", 1)]
//!     .into_iter()
//!     .map(|(w, i)| (w.to_string(), i))
//!     .collect();
//! let words = WordVocabulary::new(words).unwrap();
//!
//! let aligner = FeatureAligner::new(
//!     &tokenizer,
//!     &labels,
//!     &words,
//!     FeatureConfig::new().with_max_seq_length(8),
//! )
//! .unwrap();
//! let records = aligner.convert_all(&sentences).unwrap();
//!
//! assert_eq!(records[0].input_ids(), &[2, 4, 5, 6, 3, 0, 0, 0]);
//! ```
pub mod data;
pub mod error;
pub mod features;
pub mod labels;
pub mod tokenizer;
pub mod vocab;

// Re-export primary API
pub use data::{LabelTuple, LabeledSentence, parse_examples, read_examples, read_examples_from_path};
pub use error::{Result, StacknerError};
pub use features::{FeatureAligner, FeatureConfig, FeatureRecord};
pub use labels::{LabelVocabulary, build_label_list};
pub use tokenizer::{HfTokenizer, SubwordTokenizer, WordPieceTokenizer};
pub use vocab::{WORD_VOCAB_FILE, WordVocabulary};
