// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses the command line with clap and prints results. All
// work is delegated to Layer 2 (application).
//
//   summary-eval — decode examples, write ROUGE file pairs
//   calc-rouge   — score the pairs, print and save the table

pub mod commands;

use anyhow::Result;
use clap::Parser;

use crate::application::eval_use_case::{EvalUseCase, ExampleOutput};
use crate::application::rouge_use_case::RougeUseCase;
use commands::{EvalArgs, RougeArgs};

const BANNER_WIDTH: usize = 150;

#[derive(Parser, Debug)]
#[command(
    name = "summary-eval",
    version,
    about = "Decode articles with a trained pointer-generator checkpoint and write ROUGE file pairs."
)]
pub struct EvalCli {
    #[command(flatten)]
    pub args: EvalArgs,
}

impl EvalCli {
    pub fn run(self) -> Result<()> {
        let show_ground_truth = self.args.print_ground_truth != 0;
        tracing::info!("Building summarizer from checkpoint '{}'", self.args.load_model);

        let use_case = EvalUseCase::new(self.args.into());
        use_case.execute_each(|output| print_example(output, show_ground_truth))?;
        Ok(())
    }
}

fn print_example(output: &ExampleOutput, show_ground_truth: bool) {
    let banner = "*".repeat(BANNER_WIDTH);
    println!("{banner}\n");
    if show_ground_truth {
        println!("ARTICLE TEXT : \n{}", output.article);
        println!(
            "ACTUAL ABSTRACT : \n{}",
            output.abstract_text.as_deref().unwrap_or("**No abstract available**")
        );
    }
    for (rank, summary) in output.summaries.iter().enumerate() {
        println!("GENERATED ABSTRACT #{} : \n{}", rank + 1, summary);
    }
    println!("{banner}");
}

#[derive(Parser, Debug)]
#[command(
    name = "calc-rouge",
    version,
    about = "Score reference/decoded file pairs with ROUGE-1.5.5 and save the results."
)]
pub struct RougeCli {
    #[command(flatten)]
    pub args: RougeArgs,
}

impl RougeCli {
    pub fn run(self) -> Result<()> {
        let use_case = RougeUseCase::new(self.args.into());
        let outcome  = use_case.execute()?;

        println!("{}", outcome.log);
        println!("Writing final ROUGE results to {}...", outcome.results_path.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::eval_use_case::{EvalConfig, ReferenceSource};
    use crate::application::rouge_use_case::RougeConfig;
    use crate::infra::rouge_log::LogLayout;

    #[test]
    fn test_eval_defaults() {
        let cli = EvalCli::parse_from(["summary-eval", "--load-model", "m.json"]);
        let cfg: EvalConfig = cli.args.into();
        assert_eq!(cfg.beam_size, 2);
        assert_eq!(cfg.max_decode, 120);
        assert_eq!(cfg.truncate_vocab, 50_000);
        assert!(cfg.print_ground_truth);
        assert!(!cfg.bootstrap);
        assert_eq!(cfg.load_model.as_deref(), Some("m.json"));
        assert_eq!(cfg.reference_source, ReferenceSource::Abstract);
    }

    #[test]
    fn test_eval_flags() {
        let cli = EvalCli::parse_from([
            "summary-eval",
            "--load-model", "m.json",
            "--lambda", "0.5",
            "--truncate-vocab", "20000",
            "--print-ground-truth", "0",
            "--article", "a.txt",
            "--reference-source", "article",
        ]);
        let cfg: EvalConfig = cli.args.into();
        assert_eq!(cfg.lmbda, 0.5);
        assert_eq!(cfg.truncate_vocab, 20_000);
        assert!(!cfg.print_ground_truth);
        assert_eq!(cfg.article_path.as_deref(), Some("a.txt"));
        assert_eq!(cfg.reference_source, ReferenceSource::Article);
    }

    #[test]
    fn test_load_model_is_required() {
        let err = EvalCli::try_parse_from(["summary-eval", "--num-samples", "2"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert!(err.to_string().contains("--load-model"));
    }

    #[test]
    fn test_rouge_flags() {
        let cli = RougeCli::parse_from([
            "calc-rouge",
            "--legacy-log-layout",
            "--rouge-arg", "-e",
            "--rouge-arg", "/opt/ROUGE/data",
        ]);
        let cfg: RougeConfig = cli.args.into();
        assert_eq!(cfg.layout, LogLayout::Legacy);
        assert_eq!(cfg.rouge_args, vec!["-e", "/opt/ROUGE/data"]);
        assert_eq!(cfg.ref_dir, "actual_abstract");
    }
}
