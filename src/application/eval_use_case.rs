// ============================================================
// Layer 2 — Eval Use Case
// ============================================================
// Runs the trained summarizer over a handful of examples and
// leaves ROUGE-ready file pairs behind:
//
//   Step 1: Validate configuration       (fail fast)
//   Step 2: Load vocabulary              (Layer 6 - infra)
//   Step 3: Load checkpoint              (Layer 6 - infra)
//   Step 4: Pick the example source      (Layer 4 - data)
//   Step 5: For each of num_samples iterations:
//             sample → summarize → resolve ids → write pair
//
// One example is processed end to end before the next one
// starts. Any error aborts the run.

use anyhow::{ensure, Result};
use std::path::{Path, PathBuf};

use crate::data::sampler::{ArticleFileSource, JsonlTestSet};
use crate::data::segmenter::{sentences_to_lines, split_reference_text};
use crate::domain::traits::{ExampleSource, Summarizer};
use crate::domain::vocab::{is_display_hidden, Vocabulary, MAX_VOCAB_WORDS};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::rouge_writer::RougeWriter;
use crate::infra::vocab_store::VocabStore;
use crate::ml::inferencer::{display_text, Inferencer};
use crate::ml::model::{ModelConfig, ReplaySummarizer};

/// Which text the reference file of each pair is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceSource {
    /// The gold abstract of the test entry
    #[default]
    Abstract,
    /// The article itself
    Article,
}

// ─── Eval Configuration ──────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub train_file:         String,
    pub test_file:          String,
    pub vocab_file:         String,
    pub max_abstract_size:  usize,
    pub max_article_size:   usize,
    pub batch_size:         usize,
    pub embed_size:         usize,
    pub hidden_size:        usize,
    pub lmbda:              f64,
    pub beam_size:          usize,
    pub max_decode:         usize,
    pub truncate_vocab:     usize,
    pub bootstrap:          bool,
    pub print_ground_truth: bool,
    pub load_model:         Option<String>,
    pub article_path:       Option<String>,
    pub num_samples:        usize,
    pub seed:               Option<u64>,
    pub reference_source:   ReferenceSource,
    pub ref_dir:            String,
    pub dec_dir:            String,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            train_file:         "finished_files/train.bin".to_string(),
            test_file:          "finished_files/test.bin".to_string(),
            vocab_file:         "finished_files/vocabulary.bin".to_string(),
            max_abstract_size:  110,
            max_article_size:   300,
            batch_size:         32,
            embed_size:         300,
            hidden_size:        128,
            lmbda:              1.0,
            beam_size:          2,
            max_decode:         120,
            truncate_vocab:     MAX_VOCAB_WORDS,
            bootstrap:          false,
            print_ground_truth: true,
            load_model:         None,
            article_path:       None,
            num_samples:        5,
            seed:               None,
            reference_source:   ReferenceSource::Abstract,
            ref_dir:            "actual_abstract".to_string(),
            dec_dir:            "gen_abstract".to_string(),
        }
    }
}

impl EvalConfig {
    /// Startup checks; every failure here is a configuration error.
    pub fn validate(&self) -> Result<()> {
        let model_ok = self
            .load_model
            .as_deref()
            .map(|p| PathBuf::from(p).is_file())
            .unwrap_or(false);
        ensure!(model_ok, "Invalid path to trained model file (--load-model)");
        ensure!(
            PathBuf::from(&self.vocab_file).is_file(),
            "Invalid path to vocabulary file '{}'",
            self.vocab_file
        );
        ensure!(
            self.truncate_vocab <= MAX_VOCAB_WORDS,
            "Invalid value for --truncate-vocab: {} (must be <= {})",
            self.truncate_vocab,
            MAX_VOCAB_WORDS
        );
        ensure!(self.beam_size > 0, "--beam-size must be at least 1");
        ensure!(self.num_samples > 0, "--num-samples must be at least 1");
        Ok(())
    }

    /// Model hyperparameters as requested on the command line.
    pub fn model_config(&self, vocab_size: usize) -> ModelConfig {
        ModelConfig {
            embed_size:  self.embed_size,
            hidden_size: self.hidden_size,
            vocab_size,
            beam_size:   self.beam_size,
            max_decode:  self.max_decode,
            lmbda:       self.lmbda,
            bootstrap:   self.bootstrap,
        }
    }
}

// ─── Per-example output ───────────────────────────────────────────────────────
/// What one iteration produced, for the CLI to display.
#[derive(Debug, Clone)]
pub struct ExampleOutput {
    /// 1-based iteration index, also the file index
    pub index:         usize,
    pub example_id:    String,
    pub article:       String,
    pub abstract_text: Option<String>,
    /// Display text of every hypothesis, best first
    pub summaries:     Vec<String>,
    /// Reference and decoded file, if a pair was written
    pub written:       Option<(PathBuf, PathBuf)>,
}

// ─── EvalUseCase ──────────────────────────────────────────────────────────────
pub struct EvalUseCase {
    config: EvalConfig,
}

impl EvalUseCase {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<Vec<ExampleOutput>> {
        self.execute_each(|_| {})
    }

    /// Like `execute`, handing every output to `on_example` as soon
    /// as its pair has been written.
    pub fn execute_each(&self, on_example: impl FnMut(&ExampleOutput)) -> Result<Vec<ExampleOutput>> {
        let cfg = &self.config;

        // ── Step 1: Fail fast on bad configuration ───────────────────────────
        cfg.validate()?;
        tracing::debug!("Eval configuration: {:?}", cfg);

        // ── Step 2: Vocabulary ────────────────────────────────────────────────
        let vocab = VocabStore::new(&cfg.vocab_file).load(cfg.truncate_vocab)?;

        // ── Step 3: Checkpoint and model ──────────────────────────────────────
        // validate() guarantees load_model is set
        let ckpt_path  = cfg.load_model.clone().unwrap_or_default();
        let checkpoint = CheckpointManager::new(ckpt_path).load()?;
        let model_cfg  = cfg.model_config(vocab.len());
        checkpoint.check_compatible(&model_cfg)?;
        let model = ReplaySummarizer::new(checkpoint.decodes, &model_cfg, vocab.end_id());
        tracing::info!("Summarizer serves decodes for {} examples", model.num_examples());

        // ── Step 4: Example source ────────────────────────────────────────────
        let mut source: Box<dyn ExampleSource + '_> = match &cfg.article_path {
            Some(path) if PathBuf::from(path).is_file() => {
                tracing::info!("Decoding article file '{}'", path);
                Box::new(ArticleFileSource::load(Path::new(path), &vocab, cfg.max_article_size)?)
            }
            other => {
                if let Some(path) = other {
                    tracing::warn!("Article file '{}' not found, sampling the test set", path);
                }
                Box::new(JsonlTestSet::load(
                    Path::new(&cfg.test_file),
                    &vocab,
                    cfg.max_article_size,
                    cfg.seed,
                )?)
            }
        };

        // ── Step 5: Decode loop ───────────────────────────────────────────────
        let writer = RougeWriter::new(&cfg.ref_dir, &cfg.dec_dir);
        run_eval(
            source.as_mut(),
            &model,
            &vocab,
            &writer,
            cfg.num_samples,
            cfg.reference_source,
            on_example,
        )
    }
}

/// The decode loop with every collaborator passed in. Outputs
/// reach `on_example` in order, before the next example starts.
pub fn run_eval(
    source:           &mut dyn ExampleSource,
    model:            &dyn Summarizer,
    vocab:            &Vocabulary,
    writer:           &RougeWriter,
    num_samples:      usize,
    reference_source: ReferenceSource,
    mut on_example:   impl FnMut(&ExampleOutput),
) -> Result<Vec<ExampleOutput>> {
    let inferencer  = Inferencer::new(model, vocab);
    let mut outputs = Vec::with_capacity(num_samples);

    for index in 1..=num_samples {
        let example    = source.next_example()?;
        let hypotheses = inferencer.predict(&example)?;

        let reference_text = match reference_source {
            ReferenceSource::Abstract => example.abstract_text.as_deref(),
            ReferenceSource::Article  => Some(example.article.as_str()),
        };
        let reference_sents = reference_text.map(split_reference_text).unwrap_or_default();

        // Only the best hypothesis is scored
        let written = match hypotheses.first() {
            Some(best) if !reference_sents.is_empty() => {
                let visible: Vec<String> = best
                    .iter()
                    .filter(|w| !is_display_hidden(w))
                    .cloned()
                    .collect();
                let decoded_sents = sentences_to_lines(&visible);
                Some(writer.write(index, &reference_sents, &decoded_sents)?)
            }
            Some(_) => {
                tracing::warn!(
                    "Example '{}' has no reference text; not writing a ROUGE pair",
                    example.id
                );
                None
            }
            None => {
                tracing::warn!("Model returned no hypotheses for example '{}'", example.id);
                None
            }
        };

        tracing::info!("Decoded example {} ('{}')", index, example.id);

        let output = ExampleOutput {
            index,
            example_id:    example.id,
            article:       example.article,
            abstract_text: example.abstract_text,
            summaries:     hypotheses.iter().map(|h| display_text(h)).collect(),
            written,
        };
        on_example(&output);
        outputs.push(output);
    }

    Ok(outputs)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::{EncodedArticle, ExampleRecord, GeneratedSummary};
    use std::fs;

    struct OneExample(ExampleRecord);

    impl ExampleSource for OneExample {
        fn next_example(&mut self) -> Result<ExampleRecord> {
            Ok(self.0.clone())
        }
    }

    /// Yields its record once, then fails.
    struct FailsAfterFirst(Option<ExampleRecord>);

    impl ExampleSource for FailsAfterFirst {
        fn next_example(&mut self) -> Result<ExampleRecord> {
            self.0.take().ok_or_else(|| anyhow::anyhow!("test set exhausted"))
        }
    }

    struct Fixed(Vec<GeneratedSummary>);

    impl Summarizer for Fixed {
        fn summarize(&self, _: &ExampleRecord) -> Result<Vec<GeneratedSummary>> {
            Ok(self.0.clone())
        }
    }

    fn strings(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    fn setup() -> (tempfile::TempDir, RougeWriter, Vocabulary) {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("ref")).unwrap();
        fs::create_dir_all(tmp.path().join("dec")).unwrap();
        let writer = RougeWriter::new(tmp.path().join("ref"), tmp.path().join("dec"));
        let vocab  = Vocabulary::with_special_tokens(strings(&["the", "cat", "sat", "."])).unwrap();
        (tmp, writer, vocab)
    }

    fn record(abstract_text: Option<&str>) -> ExampleRecord {
        ExampleRecord {
            id:             "e1".into(),
            article:        "The cat sat on zorblax. Then it slept.".into(),
            article_tokens: Vec::new(),
            encoded:        EncodedArticle { oov_words: strings(&["zorblax"]), ..EncodedArticle::default() },
            abstract_text:  abstract_text.map(str::to_owned),
        }
    }

    #[test]
    fn test_writes_pairs_for_every_iteration() {
        let (tmp, writer, vocab) = setup();
        // <s>=8, the=1, cat=2, zorblax=10 (9 + 1), .=4, sat=3
        let model  = Fixed(vec![GeneratedSummary::new(vec![8, 1, 10, 4, 2, 3])]);
        let mut src = OneExample(record(Some("The cat sat. It slept.")));

        let out = run_eval(&mut src, &model, &vocab, &writer, 2, ReferenceSource::Abstract, |_| {}).unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].index, 1);
        assert_eq!(out[0].summaries, vec!["the zorblax . cat sat"]);
        let dec = fs::read_to_string(tmp.path().join("dec/000002_decoded.txt")).unwrap();
        assert_eq!(dec, "the zorblax .\ncat sat");
        let reference = fs::read_to_string(tmp.path().join("ref/000001_reference.txt")).unwrap();
        assert_eq!(reference, "The cat sat.\nIt slept.");
    }

    #[test]
    fn test_article_reference_source() {
        let (tmp, writer, vocab) = setup();
        let model   = Fixed(vec![GeneratedSummary::new(vec![1])]);
        let mut src = OneExample(record(None));

        run_eval(&mut src, &model, &vocab, &writer, 1, ReferenceSource::Article, |_| {}).unwrap();
        let reference = fs::read_to_string(tmp.path().join("ref/000001_reference.txt")).unwrap();
        assert_eq!(reference, "The cat sat on zorblax.\nThen it slept.");
    }

    #[test]
    fn test_no_reference_skips_writing() {
        let (tmp, writer, vocab) = setup();
        let model   = Fixed(vec![GeneratedSummary::new(vec![1])]);
        let mut src = OneExample(record(None));

        let out = run_eval(&mut src, &model, &vocab, &writer, 1, ReferenceSource::Abstract, |_| {}).unwrap();
        assert!(out[0].written.is_none());
        assert!(!tmp.path().join("dec/000001_decoded.txt").exists());
    }

    #[test]
    fn test_outputs_reported_before_a_later_failure() {
        let (tmp, writer, vocab) = setup();
        let model   = Fixed(vec![GeneratedSummary::new(vec![1, 2])]);
        let mut src = FailsAfterFirst(Some(record(Some("The cat sat."))));

        let mut seen = Vec::new();
        let err = run_eval(&mut src, &model, &vocab, &writer, 3, ReferenceSource::Abstract, |o| {
            seen.push((o.index, o.summaries.clone()))
        })
        .unwrap_err();

        assert!(err.to_string().contains("exhausted"));
        assert_eq!(seen, vec![(1, vec!["the cat".to_string()])]);
        assert!(tmp.path().join("dec/000001_decoded.txt").exists());
    }

    #[test]
    fn test_validate_rejects_missing_model() {
        let cfg = EvalConfig::default();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("--load-model"));
    }

    #[test]
    fn test_validate_rejects_large_truncation() {
        let tmp   = tempfile::tempdir().unwrap();
        let model = tmp.path().join("model.json");
        let vocab = tmp.path().join("vocab.json");
        fs::write(&model, "{}").unwrap();
        fs::write(&vocab, "[]").unwrap();

        let cfg = EvalConfig {
            load_model:     Some(model.display().to_string()),
            vocab_file:     vocab.display().to_string(),
            truncate_vocab: MAX_VOCAB_WORDS + 1,
            ..EvalConfig::default()
        };
        assert!(cfg.validate().unwrap_err().to_string().contains("--truncate-vocab"));
    }
}
