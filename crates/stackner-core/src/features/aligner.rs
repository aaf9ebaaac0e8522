//! # Feature Aligner
//!
//! Converts labeled sentences into fixed-width feature records aligned to a
//! sub-word tokenization.
//!
//! Word labels are placed on the first sub-word unit of each word; the
//! remaining units get the ignore label. Word-frequency ids are emitted once
//! per word, so before padding the frequency sequence is usually shorter than
//! the token sequence and is topped up with pad ids at the end.
//!
//! ```text
//! words:   running            fast
//! tokens:  [CLS] run  ##ning  fast  [SEP] [PAD] ...
//! labels:  -100  O    -100    O     -100  -100  ...
//! freq:    pad   w(running)   w(fast)  pad  pad ...
//! ```

use std::iter;

use tracing::{debug, trace};

use crate::data::LabeledSentence;
use crate::error::Result;
use crate::features::config::FeatureConfig;
use crate::features::record::FeatureRecord;
use crate::labels::LabelVocabulary;
use crate::tokenizer::SubwordTokenizer;
use crate::vocab::WordVocabulary;

/// Number of leading examples whose features are logged at debug level.
const LOGGED_EXAMPLES: usize = 5;

/// Token and label sequences of a sentence before ids and padding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignedTokens {
    pub tokens: Vec<String>,
    pub label_ids: Vec<i64>,
    pub label_ids_ctc: Vec<i64>,
    pub label_ids_md: Vec<i64>,
    /// One entry per word, not per token.
    pub freq_ids: Vec<u32>,
}

impl AlignedTokens {
    /// Keep at most `len` entries of every sequence.
    fn truncate(&mut self, len: usize) {
        if self.tokens.len() <= len {
            return;
        }
        self.tokens.truncate(len);
        self.label_ids.truncate(len);
        self.label_ids_ctc.truncate(len);
        self.label_ids_md.truncate(len);
        self.freq_ids.truncate(len);
    }

    fn push_special(&mut self, token: &str, ignore: i64, word_pad: u32) {
        self.tokens.push(token.to_string());
        self.label_ids.push(ignore);
        self.label_ids_ctc.push(ignore);
        self.label_ids_md.push(ignore);
        self.freq_ids.push(word_pad);
    }

    fn prepend_special(&mut self, token: &str, ignore: i64, word_pad: u32) {
        self.tokens.insert(0, token.to_string());
        self.label_ids.insert(0, ignore);
        self.label_ids_ctc.insert(0, ignore);
        self.label_ids_md.insert(0, ignore);
        self.freq_ids.insert(0, word_pad);
    }
}

/// Builds [`FeatureRecord`]s from [`LabeledSentence`]s.
pub struct FeatureAligner<'a, T> {
    tokenizer: T,
    labels: &'a LabelVocabulary,
    words: &'a WordVocabulary,
    config: FeatureConfig,
}

impl<'a, T: SubwordTokenizer> FeatureAligner<'a, T> {
    /// Create an aligner over fixed vocabularies.
    ///
    /// # Errors
    ///
    /// Returns `StacknerError::InvalidConfig` if the configuration cannot fit
    /// its own special tokens.
    pub fn new(
        tokenizer: T,
        labels: &'a LabelVocabulary,
        words: &'a WordVocabulary,
        config: FeatureConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tokenizer,
            labels,
            words,
            config,
        })
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Convert every sentence, preserving order. Stops at the first error.
    pub fn convert_all(&self, sentences: &[LabeledSentence]) -> Result<Vec<FeatureRecord>> {
        let mut features = Vec::with_capacity(sentences.len());
        for (index, sentence) in sentences.iter().enumerate() {
            if index % 10_000 == 0 {
                debug!("Writing example {} of {}", index, sentences.len());
            }
            let record = self.convert(sentence)?;
            if index < LOGGED_EXAMPLES {
                debug!(
                    guid = sentence.guid(),
                    input_ids = ?record.input_ids(),
                    input_mask = ?record.input_mask(),
                    md_ids = ?record.md_ids(),
                    label_ids = ?record.label_ids(),
                    label_ids_ctc = ?record.label_ids_ctc(),
                    label_ids_md = ?record.label_ids_md(),
                    "example features"
                );
            }
            features.push(record);
        }
        Ok(features)
    }

    /// Convert a single sentence into a feature record.
    pub fn convert(&self, sentence: &LabeledSentence) -> Result<FeatureRecord> {
        let cfg = &self.config;
        let max_len = cfg.max_seq_length;
        let ignore = cfg.pad_token_label_id;
        let word_pad = self.words.pad_id();

        let aligned = self.align_tokens(sentence)?;
        let AlignedTokens {
            tokens,
            mut label_ids,
            mut label_ids_ctc,
            mut label_ids_md,
            mut freq_ids,
        } = aligned;

        let mut input_ids = self.tokenizer.convert_tokens_to_ids(&tokens)?;
        let mut md_ids = self.segment_ids(tokens.len());
        let mut input_mask = vec![cfg.mask_real(); input_ids.len()];

        let padding_length = max_len.saturating_sub(input_ids.len());
        let left = cfg.pad_on_left;
        pad(&mut input_ids, cfg.pad_token, padding_length, left);
        pad(&mut input_mask, cfg.mask_pad(), padding_length, left);
        pad(&mut freq_ids, word_pad, padding_length, left);
        pad(&mut md_ids, cfg.pad_token_md_id, padding_length, left);
        pad(&mut label_ids, ignore, padding_length, left);
        pad(&mut label_ids_ctc, ignore, padding_length, left);
        pad(&mut label_ids_md, ignore, padding_length, left);

        // Frequency ids are per word, so they can still be short here
        if freq_ids.len() < max_len {
            freq_ids.resize(max_len, word_pad);
        }

        FeatureRecord::new(
            max_len,
            input_ids,
            input_mask,
            freq_ids,
            md_ids,
            label_ids,
            label_ids_ctc,
            label_ids_md,
        )
    }

    /// Word alignment, truncation and special tokens; everything before ids
    /// and padding.
    pub fn align_tokens(&self, sentence: &LabeledSentence) -> Result<AlignedTokens> {
        let cfg = &self.config;
        let ignore = cfg.pad_token_label_id;
        let word_pad = self.words.pad_id();

        let mut aligned = self.align_words(sentence)?;

        let special_tokens = self.tokenizer.num_special_tokens_to_add();
        aligned.truncate(cfg.max_seq_length.saturating_sub(special_tokens));

        aligned.push_special(&cfg.sep_token, ignore, word_pad);
        if cfg.sep_token_extra {
            aligned.push_special(&cfg.sep_token, ignore, word_pad);
        }

        if cfg.cls_token_at_end {
            aligned.push_special(&cfg.cls_token, ignore, word_pad);
        } else {
            aligned.prepend_special(&cfg.cls_token, ignore, word_pad);
        }

        Ok(aligned)
    }

    /// Place word labels on first sub-word units.
    ///
    /// Words that tokenize to nothing are dropped without a trace in any
    /// sequence, including the frequency ids.
    fn align_words(&self, sentence: &LabeledSentence) -> Result<AlignedTokens> {
        let ignore = self.config.pad_token_label_id;
        let mut aligned = AlignedTokens::default();

        for (word, labels) in sentence.iter() {
            let word_tokens = self.tokenizer.tokenize(word)?;
            if word_tokens.is_empty() {
                trace!(
                    guid = sentence.guid(),
                    word,
                    "word has no sub-word units, skipped"
                );
                continue;
            }

            let ner = self.labels.id(&labels.ner)?;
            let ctc = self.labels.id(&labels.ctc)?;
            let markdown = self.labels.id(&labels.markdown)?;

            let continuation = word_tokens.len() - 1;
            aligned.tokens.extend(word_tokens);
            extend_first(&mut aligned.label_ids, ner, ignore, continuation);
            extend_first(&mut aligned.label_ids_ctc, ctc, ignore, continuation);
            extend_first(&mut aligned.label_ids_md, markdown, ignore, continuation);
            aligned.freq_ids.push(self.words.id(word));
        }

        Ok(aligned)
    }

    /// Segment ids matching the layout built by [`Self::align_tokens`].
    fn segment_ids(&self, len: usize) -> Vec<u32> {
        let cfg = &self.config;
        let mut md_ids = vec![cfg.sequence_a_markdown_id; len.saturating_sub(1)];
        if cfg.cls_token_at_end {
            md_ids.push(cfg.cls_token_segment_id);
        } else {
            md_ids.insert(0, cfg.cls_token_segment_id);
        }
        md_ids
    }
}

fn extend_first(ids: &mut Vec<i64>, first: i64, ignore: i64, continuation: usize) {
    ids.push(first);
    ids.extend(iter::repeat_n(ignore, continuation));
}

fn pad<V: Clone>(values: &mut Vec<V>, value: V, count: usize, left: bool) {
    if left {
        values.splice(0..0, iter::repeat_n(value, count));
    } else {
        values.extend(iter::repeat_n(value, count));
    }
}
