// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// Flat --key value options for the two binaries. There are no
// subcommands: `summary-eval` decodes, `calc-rouge` scores.
//
// Flag names and defaults follow the training scripts the
// checkpoints come from, so existing invocations keep working.

use clap::{Args, ValueEnum};

use crate::application::eval_use_case::{EvalConfig, ReferenceSource};
use crate::application::rouge_use_case::RougeConfig;
use crate::infra::rouge_log::LogLayout;
use crate::infra::rouge_runner::DEFAULT_ROUGE_COMMAND;

/// Arguments of `summary-eval`.
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Path to train datafile
    #[arg(long, default_value = "finished_files/train.bin")]
    pub train_file: String,

    /// Path to test/eval datafile (JSON lines: id, article, abstract)
    #[arg(long, default_value = "finished_files/test.bin")]
    pub test_file: String,

    /// Path to vocabulary datafile
    #[arg(long, default_value = "finished_files/vocabulary.bin")]
    pub vocab_file: String,

    /// Maximum size of abstract for decoder input
    #[arg(long, default_value_t = 110)]
    pub max_abstract_size: usize,

    /// Maximum size of article for encoder input
    #[arg(long, default_value_t = 300)]
    pub max_article_size: usize,

    /// Mini-batch size
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Size of word embedding
    #[arg(long, default_value_t = 300)]
    pub embed_size: usize,

    /// Size of hidden to model
    #[arg(long, default_value_t = 128)]
    pub hidden_size: usize,

    /// Hyperparameter for auxiliary cost
    #[arg(long = "lambda", default_value_t = 1.0)]
    pub lmbda: f64,

    /// Beam size for beam search decoding
    #[arg(long, default_value_t = 2)]
    pub beam_size: usize,

    /// Maximum length of decoded output
    #[arg(long, default_value_t = 120)]
    pub max_decode: usize,

    /// Size of truncated vocabulary, <= 50000
    #[arg(long = "truncate-vocab", default_value_t = 50_000)]
    pub truncate_vocab: usize,

    /// Bootstrap word embeddings with GloVe (0 or 1)
    #[arg(long, default_value_t = 0)]
    pub bootstrap: u8,

    /// Print the article and abstract (0 or 1)
    #[arg(long, default_value_t = 1)]
    pub print_ground_truth: u8,

    /// Trained model checkpoint to load
    #[arg(long)]
    pub load_model: String,

    /// Path to a single article text file to summarize
    #[arg(long = "article")]
    pub article_path: Option<String>,

    /// Number of examples to decode
    #[arg(long, default_value_t = 5)]
    pub num_samples: usize,

    /// Seed for test-set sampling; random when absent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Text the reference file of each ROUGE pair is built from
    #[arg(long, value_enum, default_value_t = ReferenceArg::Abstract)]
    pub reference_source: ReferenceArg,

    /// Directory for *_reference.txt files (must exist)
    #[arg(long, default_value = "actual_abstract")]
    pub ref_dir: String,

    /// Directory for *_decoded.txt files (must exist)
    #[arg(long, default_value = "gen_abstract")]
    pub dec_dir: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceArg {
    Abstract,
    Article,
}

impl From<ReferenceArg> for ReferenceSource {
    fn from(a: ReferenceArg) -> Self {
        match a {
            ReferenceArg::Abstract => ReferenceSource::Abstract,
            ReferenceArg::Article  => ReferenceSource::Article,
        }
    }
}

/// Boundary between Layer 1 and Layer 2: the application layer
/// never sees clap types.
impl From<EvalArgs> for EvalConfig {
    fn from(a: EvalArgs) -> Self {
        EvalConfig {
            train_file:         a.train_file,
            test_file:          a.test_file,
            vocab_file:         a.vocab_file,
            max_abstract_size:  a.max_abstract_size,
            max_article_size:   a.max_article_size,
            batch_size:         a.batch_size,
            embed_size:         a.embed_size,
            hidden_size:        a.hidden_size,
            lmbda:              a.lmbda,
            beam_size:          a.beam_size,
            max_decode:         a.max_decode,
            truncate_vocab:     a.truncate_vocab,
            bootstrap:          a.bootstrap != 0,
            print_ground_truth: a.print_ground_truth != 0,
            load_model:         Some(a.load_model),
            article_path:       a.article_path,
            num_samples:        a.num_samples,
            seed:               a.seed,
            reference_source:   a.reference_source.into(),
            ref_dir:            a.ref_dir,
            dec_dir:            a.dec_dir,
        }
    }
}

/// Arguments of `calc-rouge`.
#[derive(Args, Debug)]
pub struct RougeArgs {
    /// Directory holding the *_reference.txt files
    #[arg(long, default_value = "actual_abstract")]
    pub ref_dir: String,

    /// Directory holding the *_decoded.txt files
    #[arg(long, default_value = "gen_abstract")]
    pub dec_dir: String,

    /// Directory ROUGE_results.txt is written to (must exist)
    #[arg(long, default_value = "results")]
    pub results_dir: String,

    /// ROUGE-1.5.5 wrapper executable
    #[arg(long, default_value = DEFAULT_ROUGE_COMMAND)]
    pub rouge_cmd: String,

    /// Extra argument passed through to the wrapper (repeatable)
    #[arg(long = "rouge-arg", allow_hyphen_values = true)]
    pub rouge_args: Vec<String>,

    /// Reproduce the old report layout (headers, then ROUGE-L only)
    #[arg(long)]
    pub legacy_log_layout: bool,
}

impl From<RougeArgs> for RougeConfig {
    fn from(a: RougeArgs) -> Self {
        RougeConfig {
            ref_dir:     a.ref_dir,
            dec_dir:     a.dec_dir,
            results_dir: a.results_dir,
            rouge_cmd:   a.rouge_cmd,
            rouge_args:  a.rouge_args,
            layout:      if a.legacy_log_layout { LogLayout::Legacy } else { LogLayout::Nested },
        }
    }
}
