//! Hyperparameters of the auxiliary CTC classifier.

use std::path::{Path, PathBuf};

use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};

/// Settings table of the CTC classifier. Any field missing from a JSON
/// override keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CtcConfig {
    #[serde(rename = "RESOURCES_base_directory", alias = "resources_base_directory")]
    pub resources_base_directory: PathBuf,
    pub train_file: PathBuf,
    pub test_file: PathBuf,
    #[serde(rename = "LR", alias = "learning_rate")]
    pub learning_rate: f64,
    pub epochs: usize,
    pub word_dim: usize,
    pub hidden_layer_1_dim: usize,
}

impl Default for CtcConfig {
    fn default() -> Self {
        Self {
            resources_base_directory: PathBuf::from("data"),
            train_file: PathBuf::from("data/train_updated.tsv"),
            test_file: PathBuf::from("data/test_updated.tsv"),
            learning_rate: 0.0015,
            epochs: 70,
            word_dim: 300,
            hidden_layer_1_dim: 300,
        }
    }
}

impl CtcConfig {
    /// Load a JSON override file.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read CTC config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse CTC config {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise, and validate.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.learning_rate.is_finite() && self.learning_rate > 0.0,
            "LR must be positive, got {}",
            self.learning_rate
        );
        ensure!(self.epochs > 0, "epochs must be non-zero");
        ensure!(self.word_dim > 0, "word_dim must be non-zero");
        ensure!(self.hidden_layer_1_dim > 0, "hidden_layer_1_dim must be non-zero");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CtcConfig::default();
        assert_eq!(config.learning_rate, 0.0015);
        assert_eq!(config.epochs, 70);
        assert_eq!(config.word_dim, 300);
        assert_eq!(config.hidden_layer_1_dim, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let config: CtcConfig =
            serde_json::from_str(r#"{"LR": 0.01, "epochs": 5, "train_file": "t.tsv"}"#).unwrap();
        assert_eq!(config.learning_rate, 0.01);
        assert_eq!(config.epochs, 5);
        assert_eq!(config.train_file, PathBuf::from("t.tsv"));
        assert_eq!(config.word_dim, 300);
    }

    #[test]
    fn test_snake_case_aliases() {
        let config: CtcConfig = serde_json::from_str(
            r#"{"learning_rate": 0.5, "resources_base_directory": "/srv/so"}"#,
        )
        .unwrap();
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.resources_base_directory, PathBuf::from("/srv/so"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = CtcConfig {
            learning_rate: 0.0,
            ..CtcConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CtcConfig {
            epochs: 0,
            ..CtcConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(CtcConfig::load(Some(Path::new("/nope/ctc.json"))).is_err());
        assert_eq!(CtcConfig::load(None).unwrap(), CtcConfig::default());
    }
}
