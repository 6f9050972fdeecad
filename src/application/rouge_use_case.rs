// ============================================================
// Layer 2 — ROUGE Use Case
// ============================================================
// Scores the file pairs written by the eval run:
//
//   Step 1: Run the scorer over ref_dir / dec_dir   (Layer 6)
//   Step 2: Format the ROUGE-1/2/L table            (Layer 6)
//   Step 3: Write results/ROUGE_results.txt         (Layer 6)
//
// Printing the table is left to the CLI layer.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::domain::traits::RougeScorer;
use crate::infra::rouge_log::{format_rouge_log, write_results, LogLayout};
use crate::infra::rouge_runner::{Rouge155Command, DEFAULT_ROUGE_COMMAND};

#[derive(Debug, Clone)]
pub struct RougeConfig {
    pub ref_dir:     String,
    pub dec_dir:     String,
    pub results_dir: String,
    pub rouge_cmd:   String,
    pub rouge_args:  Vec<String>,
    pub layout:      LogLayout,
}

impl Default for RougeConfig {
    fn default() -> Self {
        Self {
            ref_dir:     "actual_abstract".to_string(),
            dec_dir:     "gen_abstract".to_string(),
            results_dir: "results".to_string(),
            rouge_cmd:   DEFAULT_ROUGE_COMMAND.to_string(),
            rouge_args:  Vec::new(),
            layout:      LogLayout::Nested,
        }
    }
}

/// The formatted table and where it was written.
#[derive(Debug, Clone)]
pub struct RougeOutcome {
    pub log:          String,
    pub results_path: PathBuf,
}

pub struct RougeUseCase {
    config: RougeConfig,
}

impl RougeUseCase {
    pub fn new(config: RougeConfig) -> Self {
        Self { config }
    }

    /// Score with the external ROUGE-1.5.5 wrapper.
    pub fn execute(&self) -> Result<RougeOutcome> {
        let scorer = Rouge155Command::new(&self.config.rouge_cmd)
            .with_args(self.config.rouge_args.clone());
        self.execute_with(&scorer)
    }

    /// Score with any scorer.
    pub fn execute_with(&self, scorer: &dyn RougeScorer) -> Result<RougeOutcome> {
        let cfg = &self.config;

        let report = scorer.evaluate(Path::new(&cfg.ref_dir), Path::new(&cfg.dec_dir))?;
        tracing::info!("ROUGE scorer returned {} values", report.len());

        if cfg.layout == LogLayout::Legacy {
            tracing::warn!("Using the legacy log layout: only ROUGE-L statistics are reported");
        }
        let log = format_rouge_log(&report, cfg.layout)?;

        let results_path = write_results(Path::new(&cfg.results_dir), &log)?;
        Ok(RougeOutcome { log, results_path })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::score::{metric_key, RougeStatistic, ScoreReport};
    use crate::infra::rouge_log::LOGGED_VARIANTS;
    use std::fs;

    struct CannedScorer;

    impl RougeScorer for CannedScorer {
        fn evaluate(&self, _: &Path, _: &Path) -> Result<ScoreReport> {
            let mut r = ScoreReport::new();
            for variant in LOGGED_VARIANTS {
                for stat in RougeStatistic::ALL {
                    let key = metric_key(variant, stat);
                    r.insert(format!("{key}_cb"), 0.25);
                    r.insert(format!("{key}_ce"), 0.75);
                    r.insert(key, 0.5);
                }
            }
            Ok(r)
        }
    }

    struct FailingScorer;

    impl RougeScorer for FailingScorer {
        fn evaluate(&self, _: &Path, _: &Path) -> Result<ScoreReport> {
            anyhow::bail!("toolkit not installed")
        }
    }

    fn config(results_dir: &Path) -> RougeConfig {
        RougeConfig {
            results_dir: results_dir.display().to_string(),
            ..RougeConfig::default()
        }
    }

    #[test]
    fn test_writes_log_verbatim() {
        let tmp     = tempfile::tempdir().unwrap();
        let outcome = RougeUseCase::new(config(tmp.path())).execute_with(&CannedScorer).unwrap();

        let on_disk = fs::read_to_string(&outcome.results_path).unwrap();
        assert_eq!(on_disk, outcome.log);
        assert!(on_disk.contains("rouge_2_recall: 0.5000 with confidence interval (0.2500, 0.7500)"));
    }

    #[test]
    fn test_scorer_failure_propagates() {
        let tmp = tempfile::tempdir().unwrap();
        let err = RougeUseCase::new(config(tmp.path())).execute_with(&FailingScorer).unwrap_err();
        assert!(err.to_string().contains("not installed"));
        assert!(!tmp.path().join("ROUGE_results.txt").exists());
    }
}
