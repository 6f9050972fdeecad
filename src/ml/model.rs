// ============================================================
// Layer 5 — Summarizer Model
// ============================================================
// The pointer-generator network itself (bidirectional encoder,
// attention decoder, copy switch, beam search) runs outside
// this crate. What the driver sees of it:
//
//   ModelConfig       — the hyperparameters it was built with
//   ReplaySummarizer  — the beam hypotheses it exported into
//                       the checkpoint, served per example id
//
// Any other model can be plugged in by implementing the
// Summarizer trait from the domain layer.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::example::{ExampleRecord, GeneratedSummary};
use crate::domain::token::TokenId;
use crate::domain::traits::Summarizer;

/// Hyperparameters of the summarization network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub embed_size:  usize,
    pub hidden_size: usize,
    pub vocab_size:  usize,
    pub beam_size:   usize,
    pub max_decode:  usize,
    /// Weight of the auxiliary (coverage) loss
    pub lmbda:       f64,
    /// Word embeddings initialised from pretrained GloVe vectors
    #[serde(default)]
    pub bootstrap:   bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            embed_size:  300,
            hidden_size: 128,
            vocab_size:  50_005,
            beam_size:   2,
            max_decode:  120,
            lmbda:       1.0,
            bootstrap:   false,
        }
    }
}

impl ModelConfig {
    /// Names of the fields that differ from `other`, for warnings.
    pub fn differences(&self, other: &ModelConfig) -> Vec<&'static str> {
        let mut diff = Vec::new();
        if self.embed_size  != other.embed_size  { diff.push("embed_size"); }
        if self.hidden_size != other.hidden_size { diff.push("hidden_size"); }
        if self.vocab_size  != other.vocab_size  { diff.push("vocab_size"); }
        if self.beam_size   != other.beam_size   { diff.push("beam_size"); }
        if self.max_decode  != other.max_decode  { diff.push("max_decode"); }
        if self.lmbda       != other.lmbda       { diff.push("lmbda"); }
        if self.bootstrap   != other.bootstrap   { diff.push("bootstrap"); }
        diff
    }
}

/// Serves the decodes stored in a checkpoint.
pub struct ReplaySummarizer {
    decodes:    HashMap<String, Vec<GeneratedSummary>>,
    beam_size:  usize,
    max_decode: usize,
    end_id:     Option<TokenId>,
}

impl ReplaySummarizer {
    pub fn new(
        decodes: HashMap<String, Vec<GeneratedSummary>>,
        cfg:     &ModelConfig,
        end_id:  Option<TokenId>,
    ) -> Self {
        Self {
            decodes,
            beam_size:  cfg.beam_size,
            max_decode: cfg.max_decode,
            end_id,
        }
    }

    pub fn num_examples(&self) -> usize {
        self.decodes.len()
    }

    /// Stop at `<end>` (not included) or after `max_decode` ids.
    fn clip(&self, summary: &GeneratedSummary) -> GeneratedSummary {
        let ids = summary
            .ids
            .iter()
            .copied()
            .take_while(|id| Some(*id) != self.end_id)
            .take(self.max_decode)
            .collect();
        GeneratedSummary::new(ids)
    }
}

impl Summarizer for ReplaySummarizer {
    fn summarize(&self, example: &ExampleRecord) -> Result<Vec<GeneratedSummary>> {
        let hypotheses = self
            .decodes
            .get(&example.id)
            .with_context(|| format!("Checkpoint has no decodes for example '{}'", example.id))?;

        Ok(hypotheses
            .iter()
            .take(self.beam_size)
            .map(|h| self.clip(h))
            .collect())
    }
}
