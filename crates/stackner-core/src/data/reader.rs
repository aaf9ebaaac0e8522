//! Reader for tab-separated token/label files.
//!
//! One token per line, fields separated by a tab:
//!
//! ```text
//! -DOCSTART-
//! Use	O	CTC_PRED:0	md_label:O
//! numpy	B-Library	CTC_PRED:1	md_label:O
//!
//! next	O	CTC_PRED:0	md_label:O
//! ```
//!
//! Blank lines and `-DOCSTART-` lines close the current sentence.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::data::sentence::{LabelTuple, LabeledSentence};
use crate::error::{Result, StacknerError};

/// Marker line separating documents.
pub const DOCSTART: &str = "-DOCSTART-";

const FIELD_DELIMITER: char = '\t';

/// Resolve `<data_dir>/<mode>.txt`.
pub fn example_path(data_dir: impl AsRef<Path>, mode: &str) -> PathBuf {
    data_dir.as_ref().join(format!("{mode}.txt"))
}

/// Read `<data_dir>/<mode>.txt` into labeled sentences.
pub fn read_examples(data_dir: impl AsRef<Path>, mode: &str) -> Result<Vec<LabeledSentence>> {
    read_examples_from_path(example_path(data_dir, mode), mode)
}

/// Read an explicit file; `mode` only prefixes the sentence ids.
pub fn read_examples_from_path(path: impl AsRef<Path>, mode: &str) -> Result<Vec<LabeledSentence>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StacknerError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let examples = parse_examples(BufReader::new(file), mode)?;
    debug!(
        path = %path.display(),
        sentences = examples.len(),
        "read token/label file"
    );
    Ok(examples)
}

/// Parse sentences from any buffered reader.
pub fn parse_examples<R: BufRead>(reader: R, mode: &str) -> Result<Vec<LabeledSentence>> {
    let mut examples = Vec::new();
    let mut words = Vec::new();
    let mut labels = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        // Whitespace-only lines close the sentence like empty ones
        let line = line.trim();

        if line.is_empty() || line.starts_with(DOCSTART) {
            if !words.is_empty() {
                let guid = format!("{mode}-{}", examples.len() + 1);
                examples.push(LabeledSentence::new(
                    guid,
                    std::mem::take(&mut words),
                    std::mem::take(&mut labels),
                )?);
            }
            continue;
        }

        let (word, tuple) = parse_line(line, idx + 1)?;
        words.push(word);
        labels.push(tuple);
    }

    // Last sentence may not be followed by a blank line
    if !words.is_empty() {
        let guid = format!("{mode}-{}", examples.len() + 1);
        examples.push(LabeledSentence::new(guid, words, labels)?);
    }

    Ok(examples)
}

fn parse_line(line: &str, line_no: usize) -> Result<(String, LabelTuple)> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();

    let word = fields[0];
    let tuple = match fields.len() {
        1 => LabelTuple::outside(),
        2 | 3 => {
            return Err(StacknerError::MalformedLine {
                line: line_no,
                reason: format!("expected 3 labels, found {}", fields.len() - 1),
            });
        }
        // Extra trailing fields are ignored
        _ => LabelTuple::new(fields[1], fields[2], fields[3]),
    };

    Ok((word.to_string(), tuple))
}
