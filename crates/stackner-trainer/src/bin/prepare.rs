//! Feature preparation CLI.
//!
//! ```text
//! prepare features --data-dir data --mode train --vocab vocab.txt --output out/train.jsonl
//! prepare ctc-params --config ctc.json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stackner_core::vocab::WORD_VOCAB_FILE;
use stackner_trainer::{
    CtcConfig, ModelType, PrepareOptions, TokenizerSource, prepare_features, write_jsonl,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser)]
#[command(name = "prepare")]
#[command(about = "Convert token/label files into NER fine-tuning features")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a split into fixed-width feature records
    Features {
        /// Directory holding `<mode>.txt`
        #[arg(short, long, env = "STACKNER_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// Split name, also the sentence id prefix
        #[arg(short, long, default_value = "train")]
        mode: String,

        /// Explicit input file instead of `<data-dir>/<mode>.txt`
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Newline-delimited label file
        #[arg(short, long, env = "STACKNER_LABELS")]
        labels: Option<PathBuf>,

        /// Word-to-id JSON mapping
        #[arg(short, long, env = "STACKNER_WORD_VOCAB", default_value = WORD_VOCAB_FILE)]
        word_vocab: PathBuf,

        /// HuggingFace tokenizer.json
        #[arg(short, long, conflicts_with = "vocab", required_unless_present = "vocab")]
        tokenizer: Option<PathBuf>,

        /// BERT vocab.txt for the built-in WordPiece tokenizer
        #[arg(long)]
        vocab: Option<PathBuf>,

        /// Lowercase words before WordPiece (uncased vocabularies)
        #[arg(long, requires = "vocab")]
        lowercase: bool,

        /// Output width of every feature array
        #[arg(long, default_value_t = 128)]
        max_seq_length: usize,

        /// Token conventions of the target model
        #[arg(long, value_enum, default_value_t = ModelType::Bert)]
        model_type: ModelType,

        /// Positions reserved for special tokens (defaults to the model layout)
        #[arg(long)]
        special_tokens: Option<usize>,

        /// JSON Lines output file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the CTC classifier settings
    CtcParams {
        /// JSON file overriding the defaults
        #[arg(short, long, env = "STACKNER_CTC_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Features {
            data_dir,
            mode,
            input,
            labels,
            word_vocab,
            tokenizer,
            vocab,
            lowercase,
            max_seq_length,
            model_type,
            special_tokens,
            output,
        } => {
            let tokenizer = match (tokenizer, vocab) {
                (Some(path), _) => TokenizerSource::HuggingFace(path),
                (None, Some(vocab)) => TokenizerSource::WordPiece { vocab, lowercase },
                (None, None) => anyhow::bail!("either --tokenizer or --vocab is required"),
            };

            let mut opts = PrepareOptions::new(tokenizer);
            opts.data_dir = data_dir;
            opts.mode = mode;
            opts.input = input;
            opts.labels = labels;
            opts.word_vocab = word_vocab;
            opts.features = model_type
                .feature_config()
                .with_max_seq_length(max_seq_length);
            opts.special_tokens = special_tokens;

            info!(?model_type, max_seq_length, "preparing features");
            let dataset = prepare_features(&opts)?;
            write_jsonl(&output, &dataset.sentences, &dataset.records)?;
        }
        Commands::CtcParams { config } => {
            let params = CtcConfig::load(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
    }

    Ok(())
}
