// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the filesystem or another process:
//
//   vocab_store.rs  — reads the word-frequency artifact and
//                     builds the Vocabulary
//
//   checkpoint.rs   — loads the model checkpoint (config and
//                     exported beam decodes)
//
//   rouge_writer.rs — writes the reference/decoded file pairs
//                     under the fixed naming convention
//
//   rouge_runner.rs — runs the external ROUGE-1.5.5 toolkit
//                     and parses its score lines
//
//   rouge_log.rs    — formats the ROUGE-1/2/L table and writes
//                     results/ROUGE_results.txt

/// Vocabulary artifact loading
pub mod vocab_store;

/// Model checkpoint loading
pub mod checkpoint;

/// Reference/decoded file pairs for ROUGE
pub mod rouge_writer;

/// External ROUGE scorer
pub mod rouge_runner;

/// ROUGE report formatting and persistence
pub mod rouge_log;
