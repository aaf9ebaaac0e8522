//! Feature preparation pipeline: token/label file in, feature records out.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, ensure};
use clap::ValueEnum;
use serde::Serialize;
use stackner_core::vocab::WORD_VOCAB_FILE;
use stackner_core::{
    FeatureAligner, FeatureConfig, FeatureRecord, HfTokenizer, LabelVocabulary, LabeledSentence,
    SubwordTokenizer, WordPieceTokenizer, WordVocabulary, read_examples, read_examples_from_path,
};
use tracing::{debug, info};

/// Model family whose token conventions the features follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModelType {
    #[default]
    Bert,
    Roberta,
    Xlnet,
}

impl ModelType {
    pub fn feature_config(self) -> FeatureConfig {
        match self {
            Self::Bert => FeatureConfig::bert(),
            Self::Roberta => FeatureConfig::roberta(),
            Self::Xlnet => FeatureConfig::xlnet(),
        }
    }
}

/// Where the sub-word tokenizer comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerSource {
    /// A HuggingFace `tokenizer.json`.
    HuggingFace(PathBuf),
    /// A BERT `vocab.txt`.
    WordPiece { vocab: PathBuf, lowercase: bool },
}

impl TokenizerSource {
    /// Load the tokenizer, reserving `special_tokens` positions during
    /// truncation.
    pub fn load(&self, special_tokens: usize) -> anyhow::Result<Box<dyn SubwordTokenizer>> {
        Ok(match self {
            Self::HuggingFace(path) => {
                let tokenizer = HfTokenizer::from_file(path)
                    .with_context(|| format!("failed to load tokenizer {}", path.display()))?;
                if tokenizer.num_special_tokens_to_add() != special_tokens {
                    debug!(
                        reported = tokenizer.num_special_tokens_to_add(),
                        special_tokens,
                        "overriding tokenizer special-token count"
                    );
                }
                Box::new(tokenizer.with_special_tokens_count(special_tokens))
            }
            Self::WordPiece { vocab, lowercase } => Box::new(
                WordPieceTokenizer::from_vocab_file(vocab, *lowercase)
                    .with_context(|| format!("failed to load vocabulary {}", vocab.display()))?
                    .with_special_tokens_count(special_tokens),
            ),
        })
    }
}

/// Inputs of a preparation run.
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    pub data_dir: PathBuf,
    pub mode: String,
    /// Explicit input file; `<data_dir>/<mode>.txt` when absent.
    pub input: Option<PathBuf>,
    /// Label file; the built-in CoNLL tag set when absent.
    pub labels: Option<PathBuf>,
    pub word_vocab: PathBuf,
    pub tokenizer: TokenizerSource,
    pub features: FeatureConfig,
    /// Positions reserved for special tokens; the layout of `features` when
    /// absent.
    pub special_tokens: Option<usize>,
}

impl PrepareOptions {
    pub fn new(tokenizer: TokenizerSource) -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            mode: "train".to_string(),
            input: None,
            labels: None,
            word_vocab: PathBuf::from(WORD_VOCAB_FILE),
            tokenizer,
            features: FeatureConfig::default(),
            special_tokens: None,
        }
    }
}

/// Result of a preparation run.
#[derive(Debug)]
pub struct PreparedDataset {
    pub sentences: Vec<LabeledSentence>,
    pub records: Vec<FeatureRecord>,
    pub labels: LabelVocabulary,
}

/// Read, align and convert one split.
pub fn prepare_features(opts: &PrepareOptions) -> anyhow::Result<PreparedDataset> {
    let sentences = match &opts.input {
        Some(path) => read_examples_from_path(path, &opts.mode),
        None => read_examples(&opts.data_dir, &opts.mode),
    }
    .context("failed to read examples")?;

    let labels =
        LabelVocabulary::load(opts.labels.as_deref()).context("failed to build label vocabulary")?;
    let words = WordVocabulary::from_json_file(&opts.word_vocab)
        .with_context(|| format!("failed to load word vocabulary {}", opts.word_vocab.display()))?;
    let special_tokens = opts
        .special_tokens
        .unwrap_or_else(|| opts.features.special_positions());
    let tokenizer = opts.tokenizer.load(special_tokens)?;

    let records = {
        let aligner = FeatureAligner::new(tokenizer, &labels, &words, opts.features.clone())?;
        aligner
            .convert_all(&sentences)
            .with_context(|| format!("failed to convert {} examples", opts.mode))?
    };

    info!(
        mode = %opts.mode,
        sentences = sentences.len(),
        labels = labels.len(),
        words = words.len(),
        max_seq_length = opts.features.max_seq_length,
        "prepared features"
    );

    Ok(PreparedDataset {
        sentences,
        records,
        labels,
    })
}

#[derive(Serialize)]
struct ExportedRecord<'a> {
    guid: &'a str,
    #[serde(flatten)]
    features: &'a FeatureRecord,
}

/// Write one JSON object per record, tagged with its sentence id.
pub fn write_jsonl(
    path: impl AsRef<Path>,
    sentences: &[LabeledSentence],
    records: &[FeatureRecord],
) -> anyhow::Result<usize> {
    let path = path.as_ref();
    ensure!(
        sentences.len() == records.len(),
        "{} sentences but {} records",
        sentences.len(),
        records.len()
    );

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
    );

    for (sentence, record) in sentences.iter().zip(records) {
        let exported = ExportedRecord {
            guid: sentence.guid(),
            features: record,
        };
        writeln!(out, "{}", serde_json::to_string(&exported)?)?;
    }
    out.flush()?;

    info!(path = %path.display(), records = records.len(), "wrote features");
    Ok(records.len())
}
