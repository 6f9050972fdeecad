// ============================================================
// Layer 6 — ROUGE Results Log
// ============================================================
// Formats the ROUGE-1 / ROUGE-2 / ROUGE-L block of a score
// report and persists it to results/ROUGE_results.txt.
//
// Nested layout (default):
//
//   ROUGE-1:
//   rouge_1_f_score: 0.3610 with confidence interval (0.3500, 0.3720)
//   rouge_1_recall: ...
//   rouge_1_precision: ...
//
//   ROUGE-2:
//   ...
//
// Legacy layout: what earlier runs of this pipeline wrote, when
// the statistics loop ran with the variant left over from the
// header loop. All three headers come first, followed by the
// ROUGE-L statistics only. Selected with --legacy-log-layout.

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};

use crate::domain::score::{metric_key, RougeStatistic, ScoreReport};

pub const RESULTS_FILE_NAME: &str = "ROUGE_results.txt";
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Variants covered by the log, in order.
pub const LOGGED_VARIANTS: [&str; 3] = ["1", "2", "l"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLayout {
    #[default]
    Nested,
    Legacy,
}

pub fn format_rouge_log(report: &ScoreReport, layout: LogLayout) -> Result<String> {
    let mut log = String::new();

    match layout {
        LogLayout::Nested => {
            for variant in LOGGED_VARIANTS {
                log.push_str(&variant_header(variant));
                push_statistics(&mut log, report, variant)?;
            }
        }
        LogLayout::Legacy => {
            for variant in LOGGED_VARIANTS {
                log.push_str(&variant_header(variant));
            }
            push_statistics(&mut log, report, LOGGED_VARIANTS[LOGGED_VARIANTS.len() - 1])?;
        }
    }

    Ok(log)
}

fn variant_header(variant: &str) -> String {
    format!("\nROUGE-{variant}:\n")
}

fn push_statistics(log: &mut String, report: &ScoreReport, variant: &str) -> Result<()> {
    for stat in RougeStatistic::ALL {
        let key = metric_key(variant, stat);
        let val = lookup(report, &key)?;
        let cb  = lookup(report, &format!("{key}_cb"))?;
        let ce  = lookup(report, &format!("{key}_ce"))?;
        log.push_str(&format!(
            "{key}: {val:.4} with confidence interval ({cb:.4}, {ce:.4})\n"
        ));
    }
    Ok(())
}

fn lookup(report: &ScoreReport, key: &str) -> Result<f64> {
    report
        .get(key)
        .with_context(|| format!("ROUGE results are missing '{key}'"))
}

/// Write the log verbatim to `{dir}/ROUGE_results.txt`.
pub fn write_results(dir: &Path, log: &str) -> Result<PathBuf> {
    let path = dir.join(RESULTS_FILE_NAME);
    fs::write(&path, log)
        .with_context(|| format!("Cannot write ROUGE results to '{}'", path.display()))?;
    Ok(path)
}
