use serde::{Deserialize, Serialize};

use crate::error::{Result, StacknerError};

/// Fixed-width model inputs for one sentence.
///
/// All seven arrays have the same length, checked by [`FeatureRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    input_ids: Vec<u32>,
    input_mask: Vec<u32>,
    freq_ids: Vec<u32>,
    md_ids: Vec<u32>,
    label_ids: Vec<i64>,
    label_ids_ctc: Vec<i64>,
    label_ids_md: Vec<i64>,
}

impl FeatureRecord {
    /// Assemble a record, failing if any array is not `max_seq_length` long.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        max_seq_length: usize,
        input_ids: Vec<u32>,
        input_mask: Vec<u32>,
        freq_ids: Vec<u32>,
        md_ids: Vec<u32>,
        label_ids: Vec<i64>,
        label_ids_ctc: Vec<i64>,
        label_ids_md: Vec<i64>,
    ) -> Result<Self> {
        let lengths = [
            ("input_ids", input_ids.len()),
            ("input_mask", input_mask.len()),
            ("freq_ids", freq_ids.len()),
            ("md_ids", md_ids.len()),
            ("label_ids", label_ids.len()),
            ("label_ids_ctc", label_ids_ctc.len()),
            ("label_ids_md", label_ids_md.len()),
        ];
        for (field, actual) in lengths {
            if actual != max_seq_length {
                return Err(StacknerError::LengthMismatch {
                    field,
                    expected: max_seq_length,
                    actual,
                });
            }
        }

        Ok(Self {
            input_ids,
            input_mask,
            freq_ids,
            md_ids,
            label_ids,
            label_ids_ctc,
            label_ids_md,
        })
    }

    pub fn input_ids(&self) -> &[u32] {
        &self.input_ids
    }

    pub fn input_mask(&self) -> &[u32] {
        &self.input_mask
    }

    /// Word-frequency ids, one per word at its first sub-token.
    pub fn freq_ids(&self) -> &[u32] {
        &self.freq_ids
    }

    /// Segment (markdown) ids.
    pub fn md_ids(&self) -> &[u32] {
        &self.md_ids
    }

    pub fn label_ids(&self) -> &[i64] {
        &self.label_ids
    }

    pub fn label_ids_ctc(&self) -> &[i64] {
        &self.label_ids_ctc
    }

    pub fn label_ids_md(&self) -> &[i64] {
        &self.label_ids_md
    }

    /// Width shared by every array.
    pub fn seq_len(&self) -> usize {
        self.input_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_uniform_lengths() {
        let record = FeatureRecord::new(
            2,
            vec![101, 102],
            vec![1, 1],
            vec![0, 0],
            vec![1, 0],
            vec![-100, -100],
            vec![-100, -100],
            vec![-100, -100],
        )
        .unwrap();
        assert_eq!(record.seq_len(), 2);
        assert_eq!(record.input_ids(), &[101, 102]);
    }

    #[test]
    fn test_rejects_short_array() {
        let err = FeatureRecord::new(
            3,
            vec![1, 2, 3],
            vec![1, 1, 1],
            vec![0, 0],
            vec![0, 0, 0],
            vec![0, 0, 0],
            vec![0, 0, 0],
            vec![0, 0, 0],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StacknerError::LengthMismatch {
                field: "freq_ids",
                expected: 3,
                actual: 2
            }
        ));
    }
}
