use serde::{Deserialize, Serialize};

use crate::error::{Result, StacknerError};

/// Label assigned to every slot when a line carries no labels.
pub const OUTSIDE: &str = "O";

/// The three parallel labels carried by each word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelTuple {
    /// Primary NER tag, e.g. `B-Class`.
    pub ner: String,
    /// Auxiliary binary tag, e.g. `CTC_PRED:1`.
    pub ctc: String,
    /// Markdown/code tag, e.g. `md_label:Name`.
    pub markdown: String,
}

impl LabelTuple {
    pub fn new(
        ner: impl Into<String>,
        ctc: impl Into<String>,
        markdown: impl Into<String>,
    ) -> Self {
        Self {
            ner: ner.into(),
            ctc: ctc.into(),
            markdown: markdown.into(),
        }
    }

    /// Tuple used for unlabeled (test-mode) lines.
    pub fn outside() -> Self {
        Self::new(OUTSIDE, OUTSIDE, OUTSIDE)
    }
}

/// A sentence of words with one label tuple per word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledSentence {
    guid: String,
    words: Vec<String>,
    labels: Vec<LabelTuple>,
}

impl LabeledSentence {
    /// Builds a sentence, rejecting word/label count mismatches.
    pub fn new(
        guid: impl Into<String>,
        words: Vec<String>,
        labels: Vec<LabelTuple>,
    ) -> Result<Self> {
        let guid = guid.into();
        if words.len() != labels.len() {
            return Err(StacknerError::MismatchedLabels {
                guid,
                words: words.len(),
                labels: labels.len(),
            });
        }
        Ok(Self {
            guid,
            words,
            labels,
        })
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn labels(&self) -> &[LabelTuple] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over `(word, labels)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelTuple)> {
        self.words.iter().map(String::as_str).zip(self.labels.iter())
    }
}
