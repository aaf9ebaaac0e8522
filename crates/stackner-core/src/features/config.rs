//! # Feature Configuration
//!
//! Token conventions of the target model family: where the class token goes,
//! which separators are emitted, and how sequences are padded.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StacknerError};

/// Default output width.
pub const DEFAULT_MAX_SEQ_LENGTH: usize = 128;

/// Label id excluded from loss computation.
pub const IGNORE_LABEL_ID: i64 = -100;

/// Configuration of the feature aligner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Length of every produced array.
    pub max_seq_length: usize,
    /// `false`: `[CLS] A [SEP]` (BERT/XLM). `true`: `A [SEP] [CLS]` (XLNet/GPT).
    pub cls_token_at_end: bool,
    pub cls_token: String,
    /// Segment id of the class token (0 for BERT-style checkpoints, 2 for XLNet).
    pub cls_token_segment_id: u32,
    pub sep_token: String,
    /// RoBERTa emits a second separator.
    pub sep_token_extra: bool,
    pub pad_on_left: bool,
    /// Token id used for padding.
    pub pad_token: u32,
    /// Segment id used for padding.
    pub pad_token_md_id: u32,
    /// Label id for positions excluded from the loss.
    pub pad_token_label_id: i64,
    /// Segment id of real content.
    pub sequence_a_markdown_id: u32,
    /// Real tokens get mask 1 and padding 0 when set; inverted otherwise.
    pub mask_padding_with_zero: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            max_seq_length: DEFAULT_MAX_SEQ_LENGTH,
            cls_token_at_end: false,
            cls_token: "[CLS]".to_string(),
            cls_token_segment_id: 1,
            sep_token: "[SEP]".to_string(),
            sep_token_extra: false,
            pad_on_left: false,
            pad_token: 0,
            pad_token_md_id: 0,
            pad_token_label_id: IGNORE_LABEL_ID,
            sequence_a_markdown_id: 0,
            mask_padding_with_zero: true,
        }
    }
}

impl FeatureConfig {
    /// Create a configuration with BERT conventions.
    pub fn new() -> Self {
        Self::default()
    }

    /// BERT conventions (the defaults).
    pub fn bert() -> Self {
        Self::default()
    }

    /// RoBERTa conventions: `<s> A </s></s>`.
    pub fn roberta() -> Self {
        Self {
            cls_token: "<s>".to_string(),
            cls_token_segment_id: 0,
            sep_token: "</s>".to_string(),
            sep_token_extra: true,
            pad_token: 1,
            ..Self::default()
        }
    }

    /// XLNet conventions: `A <sep> <cls>`, left padded.
    pub fn xlnet() -> Self {
        Self {
            cls_token_at_end: true,
            cls_token: "<cls>".to_string(),
            cls_token_segment_id: 2,
            sep_token: "<sep>".to_string(),
            pad_on_left: true,
            pad_token: 5,
            pad_token_md_id: 4,
            ..Self::default()
        }
    }

    pub fn with_max_seq_length(mut self, max_seq_length: usize) -> Self {
        self.max_seq_length = max_seq_length;
        self
    }

    pub fn with_cls_token_at_end(mut self, at_end: bool) -> Self {
        self.cls_token_at_end = at_end;
        self
    }

    pub fn with_cls_token(mut self, token: impl Into<String>, segment_id: u32) -> Self {
        self.cls_token = token.into();
        self.cls_token_segment_id = segment_id;
        self
    }

    pub fn with_sep_token(mut self, token: impl Into<String>, extra: bool) -> Self {
        self.sep_token = token.into();
        self.sep_token_extra = extra;
        self
    }

    pub fn with_pad_on_left(mut self, pad_on_left: bool) -> Self {
        self.pad_on_left = pad_on_left;
        self
    }

    pub fn with_pad_token(mut self, pad_token: u32) -> Self {
        self.pad_token = pad_token;
        self
    }

    pub fn with_pad_token_md_id(mut self, pad_token_md_id: u32) -> Self {
        self.pad_token_md_id = pad_token_md_id;
        self
    }

    pub fn with_pad_token_label_id(mut self, label_id: i64) -> Self {
        self.pad_token_label_id = label_id;
        self
    }

    pub fn with_sequence_a_markdown_id(mut self, md_id: u32) -> Self {
        self.sequence_a_markdown_id = md_id;
        self
    }

    pub fn with_mask_padding_with_zero(mut self, enabled: bool) -> Self {
        self.mask_padding_with_zero = enabled;
        self
    }

    /// Separators plus the class token emitted around every sentence.
    pub fn special_positions(&self) -> usize {
        if self.sep_token_extra { 3 } else { 2 }
    }

    /// Mask value of a real position.
    pub fn mask_real(&self) -> u32 {
        if self.mask_padding_with_zero { 1 } else { 0 }
    }

    /// Mask value of a padding position.
    pub fn mask_pad(&self) -> u32 {
        if self.mask_padding_with_zero { 0 } else { 1 }
    }

    /// Reject configurations that cannot fit their own special tokens.
    pub fn validate(&self) -> Result<()> {
        if self.max_seq_length < self.special_positions() {
            return Err(StacknerError::InvalidConfig(format!(
                "max_seq_length {} cannot hold {} special tokens",
                self.max_seq_length,
                self.special_positions()
            )));
        }
        if self.cls_token.is_empty() || self.sep_token.is_empty() {
            return Err(StacknerError::InvalidConfig(
                "class and separator tokens must be non-empty".into(),
            ));
        }
        Ok(())
    }
}
