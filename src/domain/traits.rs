// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The evaluation driver does not own the data pipeline, the
// neural model, or the ROUGE toolkit. Each is reached through
// a trait so the use cases only see behaviour:
//
//   ExampleSource → JsonlTestSet, ArticleFileSource
//   Summarizer    → ReplaySummarizer
//   RougeScorer   → Rouge155Command
//
// Every collaborator is passed in explicitly; nothing here is
// global or captured from ambient state.

use std::path::Path;

use anyhow::Result;

use crate::domain::example::{ExampleRecord, GeneratedSummary};
use crate::domain::score::ScoreReport;

// ─── ExampleSource ────────────────────────────────────────────────────────────
/// Supplies one evaluation sample per call.
pub trait ExampleSource {
    fn next_example(&mut self) -> Result<ExampleRecord>;
}

// ─── Summarizer ───────────────────────────────────────────────────────────────
/// A model that decodes an article into one or more candidate
/// summaries, best hypothesis first.
pub trait Summarizer {
    fn summarize(&self, example: &ExampleRecord) -> Result<Vec<GeneratedSummary>>;
}

// ─── RougeScorer ──────────────────────────────────────────────────────────────
/// Scores a directory of reference files against a directory of
/// decoded files that follow the `{index:06}_*.txt` convention.
pub trait RougeScorer {
    fn evaluate(&self, ref_dir: &Path, dec_dir: &Path) -> Result<ScoreReport>;
}
