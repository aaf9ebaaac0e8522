//! # Label Vocabulary
//!
//! Builds the ordered label list and the label-to-id bijection used by the
//! feature aligner. The index of each label is the model's class index, so
//! the order produced here must be reproducible.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::data::OUTSIDE;
use crate::error::{Result, StacknerError};

/// Tag set used when no label file is given.
pub const DEFAULT_LABELS: &[&str] = &[
    "O", "B-MISC", "I-MISC", "B-PER", "I-PER", "B-ORG", "I-ORG", "B-LOC", "I-LOC",
];

/// Labels of the CTC and markdown slots, always appended last in this order.
pub const AUXILIARY_LABELS: &[&str] = &["CTC_PRED:0", "CTC_PRED:1", "md_label:O", "md_label:Name"];

/// Build the ordered label list.
///
/// Without a path the built-in CoNLL tag set is returned as is. With a path,
/// the file's labels come first (`"O"` prepended if missing), followed by
/// [`AUXILIARY_LABELS`].
pub fn build_label_list(path: Option<&Path>) -> Result<Vec<String>> {
    let Some(path) = path else {
        return Ok(DEFAULT_LABELS.iter().map(|l| l.to_string()).collect());
    };

    if !path.exists() {
        return Err(StacknerError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    Ok(extend_labels(content.lines()))
}

/// Apply the `"O"` and auxiliary-label rules to a raw label sequence.
pub fn extend_labels<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut labels: Vec<String> = raw
        .into_iter()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !AUXILIARY_LABELS.contains(l))
        .map(str::to_string)
        .collect();

    if !labels.iter().any(|l| l == OUTSIDE) {
        labels.insert(0, OUTSIDE.to_string());
    }
    labels.extend(AUXILIARY_LABELS.iter().map(|l| l.to_string()));
    labels
}

/// Bijection between label strings and class ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVocabulary {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelVocabulary {
    /// Build from an ordered label list; duplicates are rejected.
    pub fn new(labels: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(StacknerError::DuplicateLabel(label.clone()));
            }
        }
        Ok(Self { labels, index })
    }

    /// Shorthand for [`build_label_list`] followed by [`LabelVocabulary::new`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::new(build_label_list(path)?)
    }

    /// Class id of a label.
    pub fn id(&self, label: &str) -> Result<i64> {
        self.index
            .get(label)
            .map(|&i| i as i64)
            .ok_or_else(|| StacknerError::UnknownLabel(label.to_string()))
    }

    /// Label at a class id.
    pub fn label(&self, id: usize) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels_without_path() {
        let labels = build_label_list(None).unwrap();
        assert_eq!(labels.len(), 9);
        assert_eq!(labels[0], "O");
        assert_eq!(labels[8], "I-LOC");
        assert!(!labels.iter().any(|l| l.starts_with("CTC_PRED")));
    }

    #[test]
    fn test_outside_prepended_and_auxiliary_appended() {
        let labels = extend_labels(["B-Class", "I-Class", "B-Library"]);
        assert_eq!(labels[0], "O");
        assert_eq!(
            &labels[labels.len() - 4..],
            &["CTC_PRED:0", "CTC_PRED:1", "md_label:O", "md_label:Name"]
        );
        assert_eq!(labels.len(), 8);
    }

    #[test]
    fn test_existing_outside_keeps_position() {
        let labels = extend_labels(["B-Class", "O", "I-Class"]);
        assert_eq!(labels[0], "B-Class");
        assert_eq!(labels[1], "O");
        assert_eq!(labels.iter().filter(|l| *l == "O").count(), 1);
    }

    #[test]
    fn test_auxiliary_labels_stay_last_when_in_file() {
        let labels = extend_labels(["O", "md_label:Name", "B-Class", "CTC_PRED:0"]);
        assert_eq!(
            labels,
            vec!["O", "B-Class", "CTC_PRED:0", "CTC_PRED:1", "md_label:O", "md_label:Name"]
        );
        assert!(LabelVocabulary::new(labels).is_ok());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let labels = extend_labels("B-Class\n\n  \nI-Class\n".lines());
        assert_eq!(labels.len(), 7);
        assert_eq!(labels[1], "B-Class");
        assert_eq!(labels[2], "I-Class");
    }

    #[test]
    fn test_vocabulary_bijection() {
        let vocab = LabelVocabulary::new(extend_labels(["B-Class"])).unwrap();
        assert_eq!(vocab.id("O").unwrap(), 0);
        assert_eq!(vocab.id("B-Class").unwrap(), 1);
        assert_eq!(vocab.id("md_label:Name").unwrap(), 5);
        for (i, label) in vocab.labels().iter().enumerate() {
            assert_eq!(vocab.id(label).unwrap(), i as i64);
            assert_eq!(vocab.label(i), Some(label.as_str()));
        }
        assert!(matches!(vocab.id("B-Nope"), Err(StacknerError::UnknownLabel(_))));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let err = LabelVocabulary::new(vec!["O".into(), "B-X".into(), "B-X".into()]).unwrap_err();
        assert!(matches!(err, StacknerError::DuplicateLabel(l) if l == "B-X"));
    }

    #[test]
    fn test_missing_label_file() {
        let err = build_label_list(Some(Path::new("/no/such/labels.txt"))).unwrap_err();
        assert!(matches!(err, StacknerError::NotFound { .. }));
    }

    #[test]
    fn test_label_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("stackner-labels-{}.txt", std::process::id()));
        std::fs::write(&path, "B-Class\nI-Class\n").unwrap();

        let vocab = LabelVocabulary::load(Some(&path)).unwrap();
        assert_eq!(vocab.len(), 7);
        assert_eq!(vocab.label(0), Some("O"));
        assert_eq!(vocab.label(6), Some("md_label:Name"));

        std::fs::remove_file(&path).unwrap();
    }
}
