// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Runs a Summarizer on one example and maps every hypothesis
// back to words. Pointer ids are resolved against the OOV list
// of the example they were decoded from, never another one.

use anyhow::{Context, Result};

use crate::domain::example::ExampleRecord;
use crate::domain::token::resolve_summary;
use crate::domain::traits::Summarizer;
use crate::domain::vocab::{is_display_hidden, Vocabulary};

pub struct Inferencer<'a, S: Summarizer + ?Sized> {
    model: &'a S,
    vocab: &'a Vocabulary,
}

impl<'a, S: Summarizer + ?Sized> Inferencer<'a, S> {
    pub fn new(model: &'a S, vocab: &'a Vocabulary) -> Self {
        Self { model, vocab }
    }

    /// Decode all hypotheses of `example` into words, best first.
    pub fn predict(&self, example: &ExampleRecord) -> Result<Vec<Vec<String>>> {
        let summaries = self.model.summarize(example)?;

        summaries
            .iter()
            .enumerate()
            .map(|(rank, summary)| {
                let words = resolve_summary(&summary.ids, self.vocab, &example.encoded.oov_words)
                    .with_context(|| {
                        format!("Cannot resolve hypothesis #{} of example '{}'", rank + 1, example.id)
                    })?;
                tracing::debug!(
                    "Example '{}' hypothesis #{}: {} tokens",
                    example.id,
                    rank + 1,
                    words.len()
                );
                Ok(words)
            })
            .collect()
    }
}

/// Join decoded words for display, leaving out sentence and
/// decoder control tokens.
pub fn display_text(words: &[String]) -> String {
    words
        .iter()
        .filter(|w| !is_display_hidden(w))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
