pub mod aligner;
pub mod config;
pub mod record;

pub use aligner::{AlignedTokens, FeatureAligner};
pub use config::{DEFAULT_MAX_SEQ_LENGTH, FeatureConfig, IGNORE_LABEL_ID};
pub use record::FeatureRecord;
