// ============================================================
// Layer 4 — Example Sources
// ============================================================
// Two ways to obtain evaluation samples:
//
//   JsonlTestSet      — random entries from the exported test
//                       set, one JSON object per line:
//                       {"id": "...", "article": "...", "abstract": "..."}
//   ArticleFileSource — one plain-text article, no gold abstract
//
// Sampling is uniform with replacement, like drawing a fresh
// random eval sample every iteration. The RNG is seedable so
// a run can be repeated exactly.

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::data::encoder::{tokenize_article, ArticleEncoder};
use crate::data::preprocessor::Preprocessor;
use crate::domain::example::ExampleRecord;
use crate::domain::traits::ExampleSource;
use crate::domain::vocab::Vocabulary;

/// One line of the test-set export.
#[derive(Debug, Clone, Deserialize)]
pub struct TestEntry {
    /// Falls back to the 0-based line number when absent
    #[serde(default)]
    pub id: Option<String>,
    pub article: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

/// Parse a JSON-lines test set. Blank lines are skipped; a
/// malformed line is an error naming its line number.
pub fn parse_test_set(text: &str) -> Result<Vec<TestEntry>> {
    let mut entries = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut entry: TestEntry = serde_json::from_str(line)
            .with_context(|| format!("Malformed test entry on line {}", line_no + 1))?;
        if entry.id.is_none() {
            entry.id = Some(line_no.to_string());
        }
        entries.push(entry);
    }
    Ok(entries)
}

pub struct JsonlTestSet<'v> {
    entries:          Vec<TestEntry>,
    encoder:          ArticleEncoder<'v>,
    prep:             Preprocessor,
    max_article_size: usize,
    rng:              StdRng,
}

impl<'v> JsonlTestSet<'v> {
    pub fn load(
        path:             &Path,
        vocab:            &'v Vocabulary,
        max_article_size: usize,
        seed:             Option<u64>,
    ) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read test set '{}'", path.display()))?;
        let entries = parse_test_set(&text)?;
        tracing::info!("Loaded {} test entries from '{}'", entries.len(), path.display());
        Self::from_entries(entries, vocab, max_article_size, seed)
    }

    pub fn from_entries(
        entries:          Vec<TestEntry>,
        vocab:            &'v Vocabulary,
        max_article_size: usize,
        seed:             Option<u64>,
    ) -> Result<Self> {
        if entries.is_empty() {
            bail!("Test set has no entries to sample from");
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        Ok(Self {
            entries,
            encoder: ArticleEncoder::new(vocab)?,
            prep: Preprocessor::new(),
            max_article_size,
            rng,
        })
    }
}

impl ExampleSource for JsonlTestSet<'_> {
    fn next_example(&mut self) -> Result<ExampleRecord> {
        let entry = self
            .entries
            .choose(&mut self.rng)
            .context("Test set has no entries to sample from")?;

        let article_tokens = tokenize_article(&entry.article, &self.prep)?;
        let encoded        = self.encoder.encode(&article_tokens, self.max_article_size);

        tracing::debug!(
            "Sampled test entry '{}' ({} words, {} OOV)",
            entry.id.as_deref().unwrap_or("?"),
            article_tokens.len(),
            encoded.max_oov()
        );

        Ok(ExampleRecord {
            id:            entry.id.clone().unwrap_or_default(),
            article:       entry.article.clone(),
            article_tokens,
            encoded,
            abstract_text: Some(entry.abstract_text.clone()),
        })
    }
}

/// Decodes the same article file on every call.
pub struct ArticleFileSource<'v> {
    id:               String,
    article:          String,
    encoder:          ArticleEncoder<'v>,
    prep:             Preprocessor,
    max_article_size: usize,
}

impl<'v> ArticleFileSource<'v> {
    /// The example id is the file stem, which is the key the
    /// checkpoint's decodes are looked up under.
    pub fn load(path: &Path, vocab: &'v Vocabulary, max_article_size: usize) -> Result<Self> {
        let article = fs::read_to_string(path)
            .with_context(|| format!("Cannot read article '{}'", path.display()))?
            .trim()
            .to_string();
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("article")
            .to_string();
        Ok(Self {
            id,
            article,
            encoder: ArticleEncoder::new(vocab)?,
            prep: Preprocessor::new(),
            max_article_size,
        })
    }
}

impl ExampleSource for ArticleFileSource<'_> {
    fn next_example(&mut self) -> Result<ExampleRecord> {
        let article_tokens = tokenize_article(&self.article, &self.prep)?;
        let encoded        = self.encoder.encode(&article_tokens, self.max_article_size);
        Ok(ExampleRecord {
            id:            self.id.clone(),
            article:       self.article.clone(),
            article_tokens,
            encoded,
            abstract_text: None,
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vocab() -> Vocabulary {
        let words = ["the", "cat", "sat", "."].iter().map(|w| w.to_string()).collect();
        Vocabulary::with_special_tokens(words).unwrap()
    }

    #[test]
    fn test_parse_assigns_line_ids() {
        let text = concat!(
            r#"{"id": "a1", "article": "the cat", "abstract": "cat."}"#, "\n",
            "\n",
            r#"{"article": "the dog", "abstract": "dog."}"#, "\n",
        );
        let entries = parse_test_set(text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id.as_deref(), Some("a1"));
        assert_eq!(entries[1].id.as_deref(), Some("2"));
    }

    #[test]
    fn test_parse_reports_bad_line() {
        let err = parse_test_set("{\"article\": 1}").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_seeded_sampling_repeats() {
        let v = vocab();
        let entries: Vec<TestEntry> = (0..10)
            .map(|i| TestEntry {
                id:            Some(i.to_string()),
                article:       "the cat sat".into(),
                abstract_text: "cat sat.".into(),
            })
            .collect();

        let mut a = JsonlTestSet::from_entries(entries.clone(), &v, 50, Some(7)).unwrap();
        let mut b = JsonlTestSet::from_entries(entries, &v, 50, Some(7)).unwrap();
        for _ in 0..5 {
            assert_eq!(a.next_example().unwrap().id, b.next_example().unwrap().id);
        }
    }

    #[test]
    fn test_empty_test_set_rejected() {
        let v = vocab();
        assert!(JsonlTestSet::from_entries(Vec::new(), &v, 50, Some(1)).is_err());
    }

    #[test]
    fn test_article_file_has_no_abstract() {
        let v = vocab();
        let mut f = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(f, "  The cat sat on zorblax.  \n").unwrap();

        let mut src = ArticleFileSource::load(f.path(), &v, 100).unwrap();
        let ex      = src.next_example().unwrap();
        assert!(ex.abstract_text.is_none());
        assert_eq!(ex.article, "The cat sat on zorblax.");
        assert_eq!(ex.encoded.oov_words, vec!["on".to_string(), "zorblax".to_string()]);
    }
}
