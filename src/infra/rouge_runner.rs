// ============================================================
// Layer 6 — External ROUGE Scorer
// ============================================================
// Scores the written file pairs with the ROUGE-1.5.5 toolkit
// through its command-line wrapper:
//
//   pyrouge_evaluate_plain_text_files \
//       -s gen_abstract    -sfp "(\d+)_decoded.txt" \
//       -m actual_abstract -mfp "#ID#_reference.txt"
//
// and flattens the summary lines of its output, e.g.
//
//   1 ROUGE-1 Average_R: 0.39512 (95%-conf.int. 0.38071 - 0.40953)
//     → rouge_1_recall = 0.39512
//       rouge_1_recall_cb = 0.38071
//       rouge_1_recall_ce = 0.40953
//
// The call blocks until the toolkit exits. Any failure (not
// installed, non-zero exit, no score lines) is returned as an
// error; there is no retry.

use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use std::{path::Path, process::Command, sync::LazyLock};

use crate::domain::score::{RougeStatistic, ScoreReport};
use crate::domain::traits::RougeScorer;

pub const DEFAULT_ROUGE_COMMAND: &str = "pyrouge_evaluate_plain_text_files";

/// Matches the decoded files; the group is the example id.
pub const SYSTEM_FILENAME_PATTERN: &str = r"(\d+)_decoded.txt";

/// Reference file for the example id matched above.
pub const MODEL_FILENAME_PATTERN: &str = "#ID#_reference.txt";

static SCORE_LINE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r"(\d+) (ROUGE-\S+) (Average_\w): (\d\.\d+) \(95%-conf\.int\. (\d\.\d+) - (\d\.\d+)\)",
    )
});

pub struct Rouge155Command {
    program:    String,
    extra_args: Vec<String>,
}

impl Rouge155Command {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), extra_args: Vec::new() }
    }

    /// Extra arguments appended after the directory/pattern flags.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }
}

impl Default for Rouge155Command {
    fn default() -> Self {
        Self::new(DEFAULT_ROUGE_COMMAND)
    }
}

impl RougeScorer for Rouge155Command {
    fn evaluate(&self, ref_dir: &Path, dec_dir: &Path) -> Result<ScoreReport> {
        for dir in [ref_dir, dec_dir] {
            if !dir.is_dir() {
                bail!("ROUGE input directory '{}' does not exist", dir.display());
            }
        }

        tracing::info!(
            "Running {} on '{}' (references) and '{}' (decoded)",
            self.program,
            ref_dir.display(),
            dec_dir.display()
        );

        let output = Command::new(&self.program)
            .arg("-s").arg(dec_dir)
            .arg("-sfp").arg(SYSTEM_FILENAME_PATTERN)
            .arg("-m").arg(ref_dir)
            .arg("-mfp").arg(MODEL_FILENAME_PATTERN)
            .args(&self.extra_args)
            .output()
            .with_context(|| format!("Cannot run ROUGE scorer '{}'. Is it installed?", self.program))?;

        if !output.status.success() {
            bail!(
                "ROUGE scorer exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let report = parse_rouge_output(&stdout)?;
        if report.is_empty() {
            bail!("ROUGE scorer output contained no score lines");
        }
        Ok(report)
    }
}

/// Flatten ROUGE-1.5.5 summary lines into a ScoreReport.
/// Lines that are not score lines are ignored.
pub fn parse_rouge_output(text: &str) -> Result<ScoreReport> {
    let pattern = SCORE_LINE
        .as_ref()
        .map_err(|e| anyhow!("Invalid ROUGE score pattern: {e}"))?;
    let mut report = ScoreReport::new();

    for caps in pattern.captures_iter(text) {
        let variant = caps[2].to_lowercase().replace('-', "_");
        let Some(stat) = RougeStatistic::from_average_label(&caps[3]) else {
            continue;
        };
        let key = format!("{}_{}", variant, stat.key_suffix());

        let value: f64 = caps[4].parse().with_context(|| format!("Bad value for {key}"))?;
        let cb: f64    = caps[5].parse().with_context(|| format!("Bad lower bound for {key}"))?;
        let ce: f64    = caps[6].parse().with_context(|| format!("Bad upper bound for {key}"))?;

        report.insert(format!("{key}_cb"), cb);
        report.insert(format!("{key}_ce"), ce);
        report.insert(key, value);
    }

    tracing::debug!("Parsed {} ROUGE values", report.len());
    Ok(report)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
---------------------------------------------
1 ROUGE-1 Average_R: 0.39512 (95%-conf.int. 0.38071 - 0.40953)
1 ROUGE-1 Average_P: 0.35000 (95%-conf.int. 0.34000 - 0.36000)
1 ROUGE-1 Average_F: 0.36100 (95%-conf.int. 0.35000 - 0.37200)
---------------------------------------------
1 ROUGE-2 Average_R: 0.17000 (95%-conf.int. 0.16000 - 0.18000)
1 ROUGE-W-1.2 Average_R: 0.10000 (95%-conf.int. 0.09000 - 0.11000)
1 ROUGE-SU* Average_F: 0.12000 (95%-conf.int. 0.11000 - 0.13000)
";

    #[test]
    fn test_parses_score_lines() {
        let r = parse_rouge_output(SAMPLE).unwrap();
        assert_eq!(r.get("rouge_1_recall"), Some(0.39512));
        assert_eq!(r.get("rouge_1_recall_cb"), Some(0.38071));
        assert_eq!(r.get("rouge_1_recall_ce"), Some(0.40953));
        assert_eq!(r.get("rouge_1_f_score"), Some(0.361));
        assert_eq!(r.get("rouge_2_recall"), Some(0.17));
    }

    #[test]
    fn test_variant_names_are_normalised() {
        let r = parse_rouge_output(SAMPLE).unwrap();
        assert_eq!(r.get("rouge_w_1.2_recall"), Some(0.1));
        assert_eq!(r.get("rouge_su*_f_score"), Some(0.12));
    }

    #[test]
    fn test_noise_gives_empty_report() {
        let r = parse_rouge_output("Preparing documents...\nRunning ROUGE...\n").unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn test_dots_must_be_literal() {
        let text = "\
1 ROUGE-1 Average_R: 0,39512 (95%-conf.int. 0.38071 - 0.40953)
1 ROUGE-2 Average_R: 0.17000 (95%-confXintX 0.16000 - 0.18000)
";
        let r = parse_rouge_output(text).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn test_missing_directory_fails_before_spawning() {
        let tmp    = tempfile::tempdir().unwrap();
        let scorer = Rouge155Command::new("definitely-not-a-real-rouge-binary");
        let err    = scorer.evaluate(&tmp.path().join("a"), tmp.path()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_missing_program_is_error() {
        let tmp    = tempfile::tempdir().unwrap();
        let scorer = Rouge155Command::new("definitely-not-a-real-rouge-binary");
        let err    = scorer.evaluate(tmp.path(), tmp.path()).unwrap_err();
        assert!(err.to_string().contains("Is it installed?"));
    }
}
