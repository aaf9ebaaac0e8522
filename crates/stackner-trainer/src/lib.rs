//! # Stackner Trainer
//!
//! Batch workflows around the core aligner: the feature preparation
//! pipeline with JSON Lines export, and the settings table of the auxiliary
//! CTC classifier.

pub mod ctc;
pub mod prepare;

pub use ctc::CtcConfig;
pub use prepare::{
    ModelType, PrepareOptions, PreparedDataset, TokenizerSource, prepare_features, write_jsonl,
};
