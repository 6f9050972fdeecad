// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Loads the trained-model checkpoint the driver evaluates.
//
// A checkpoint is a JSON document written by the external
// training/decoding job:
//
//   {
//     "epoch":   12,
//     "iter":    4800,
//     "config":  { "embed_size": 300, "hidden_size": 128,
//                  "vocab_size": 50005, "beam_size": 2,
//                  "max_decode": 120, "lmbda": 1.0 },
//     "decodes": { "<example id>": [[12, 7, 50007, ...], ...] }
//   }
//
// "config" is optional. When present, its vocab_size must
// match the loaded vocabulary: pointer ids are only decodable
// against the vocabulary size they were produced with.

use anyhow::{bail, ensure, Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};

use crate::domain::example::GeneratedSummary;
use crate::ml::model::ModelConfig;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Checkpoint {
    #[serde(default)]
    pub epoch: usize,

    #[serde(default)]
    pub iter: usize,

    /// Hyperparameters the model was trained with
    #[serde(default)]
    pub config: Option<ModelConfig>,

    /// Beam hypotheses per example id, best first
    #[serde(default)]
    pub decodes: HashMap<String, Vec<GeneratedSummary>>,
}

impl Checkpoint {
    /// Fail on a vocabulary-size mismatch, warn on any other
    /// hyperparameter the command line disagrees with.
    pub fn check_compatible(&self, requested: &ModelConfig) -> Result<()> {
        let Some(saved) = &self.config else {
            tracing::warn!("Checkpoint carries no model config; skipping compatibility check");
            return Ok(());
        };

        ensure!(
            saved.vocab_size == requested.vocab_size,
            "Checkpoint was trained with a vocabulary of {} words but {} were loaded \
             (check --vocab-file and --truncate-vocab)",
            saved.vocab_size,
            requested.vocab_size
        );

        let diff = saved.differences(requested);
        if !diff.is_empty() {
            tracing::warn!(
                "Command-line model settings differ from the checkpoint: {}",
                diff.join(", ")
            );
        }
        Ok(())
    }
}

pub struct CheckpointManager {
    path: PathBuf,
}

impl CheckpointManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Checkpoint> {
        if !self.path.is_file() {
            bail!("Invalid path to trained model file '{}'", self.path.display());
        }

        tracing::info!("Loading weights from file '{}'", self.path.display());

        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read checkpoint '{}'", self.path.display()))?;
        let ckpt: Checkpoint = serde_json::from_str(&json)
            .with_context(|| format!("Malformed checkpoint '{}'", self.path.display()))?;

        tracing::info!(
            "Loaded checkpoint (epoch {}, iter {}) with decodes for {} examples",
            ckpt.epoch,
            ckpt.iter,
            ckpt.decodes.len()
        );
        Ok(ckpt)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_from_disk() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, r#"{"epoch": 3, "iter": 10, "decodes": {"a": [[1, 2]]}}"#).unwrap();

        let loaded = CheckpointManager::new(&path).load().unwrap();
        assert_eq!(loaded.epoch, 3);
        assert_eq!(loaded.decodes["a"][0], GeneratedSummary::new(vec![1, 2]));
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = CheckpointManager::new("/no/such/model.json").load().unwrap_err();
        assert!(err.to_string().contains("Invalid path to trained model"));
    }

    #[test]
    fn test_decodes_parse_as_plain_arrays() {
        let ckpt: Checkpoint =
            serde_json::from_str(r#"{"decodes": {"x": [[4, 5], [6]]}}"#).unwrap();
        assert_eq!(ckpt.decodes["x"].len(), 2);
        assert_eq!(ckpt.decodes["x"][1].ids, vec![6]);
        assert!(ckpt.config.is_none());
    }

    #[test]
    fn test_vocab_size_mismatch_is_fatal() {
        let saved = ModelConfig { vocab_size: 100, ..ModelConfig::default() };
        let ckpt  = Checkpoint { config: Some(saved), ..Checkpoint::default() };
        let requested = ModelConfig { vocab_size: 200, ..ModelConfig::default() };
        assert!(ckpt.check_compatible(&requested).is_err());

        let requested = ModelConfig { vocab_size: 100, beam_size: 5, ..ModelConfig::default() };
        assert!(ckpt.check_compatible(&requested).is_ok());
    }
}
