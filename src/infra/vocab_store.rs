// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Loads the word-frequency artifact the model was trained with
// and turns it into a Vocabulary.
//
// Accepted formats:
//   *.json — array of [word, count] pairs, most frequent first
//            [["the", 1061396], [",", 1002321], ...]
//   other  — plain text, one "word count" per line
//
// The artifact is laid out for 50000 words followed by 5
// reserved rows. Truncation drops rows from the end: the 5
// reserved ones plus (50000 - truncate) more. The special
// tokens are then appended:
//
//   rows:   w1 … w50000 r1 … r5
//   vocab:  w1 … w{truncate}  <unk> <go> <end> <s> </s>
//
// A shorter artifact loses the same number of rows, so it
// keeps len - (5 + 50000 - truncate) words.

use anyhow::{bail, ensure, Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::vocab::{Vocabulary, MAX_VOCAB_WORDS};

/// Trailing rows of the artifact that are not part of the word list.
pub const RESERVED_TRAILING_ROWS: usize = 5;

pub struct VocabStore {
    path: PathBuf,
}

impl VocabStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load and truncate to `truncate_vocab` regular words.
    pub fn load(&self, truncate_vocab: usize) -> Result<Vocabulary> {
        ensure!(
            truncate_vocab <= MAX_VOCAB_WORDS,
            "Invalid value for --truncate-vocab: {} (must be <= {})",
            truncate_vocab,
            MAX_VOCAB_WORDS
        );

        let text = fs::read_to_string(&self.path).with_context(|| {
            format!("Invalid path to vocabulary file '{}'", self.path.display())
        })?;

        let is_json = self.path.extension().and_then(|e| e.to_str()) == Some("json");
        let rows = if is_json {
            parse_json_rows(&text)?
        } else {
            parse_text_rows(&text)?
        };

        let vocab = build_vocabulary(rows, truncate_vocab)?;
        tracing::info!(
            "Loaded vocabulary of {} words (incl. special tokens) from '{}'",
            vocab.len(),
            self.path.display()
        );
        Ok(vocab)
    }
}

/// Drop `5 + 50000 - truncate_vocab` trailing rows, then append
/// the special tokens.
pub fn build_vocabulary(rows: Vec<(String, u64)>, truncate_vocab: usize) -> Result<Vocabulary> {
    let dropped = RESERVED_TRAILING_ROWS + MAX_VOCAB_WORDS.saturating_sub(truncate_vocab);
    let keep    = rows.len().saturating_sub(dropped);
    if keep == 0 {
        tracing::warn!(
            "Vocabulary artifact has {} rows; truncating to {} leaves no regular words",
            rows.len(),
            truncate_vocab
        );
    }

    let words: Vec<String> = rows.into_iter().take(keep).map(|(w, _)| w).collect();
    match Vocabulary::with_special_tokens(words) {
        Some(vocab) => Ok(vocab),
        None => bail!("Vocabulary artifact contains duplicate words"),
    }
}

fn parse_json_rows(text: &str) -> Result<Vec<(String, u64)>> {
    serde_json::from_str(text).context("Vocabulary JSON must be an array of [word, count] pairs")
}

fn parse_text_rows(text: &str) -> Result<Vec<(String, u64)>> {
    let mut rows = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else { continue };
        let count = match parts.next() {
            Some(c) => c.parse::<u64>().with_context(|| {
                format!("Bad count {:?} on vocabulary line {}", c, line_no + 1)
            })?,
            None => 0,
        };
        rows.push((word.to_string(), count));
    }
    Ok(rows)
}
