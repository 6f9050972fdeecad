// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw text and the id sequences the model
// reads, plus the way back from decoded words to ROUGE lines.
//
//   article text / test-set line
//       │
//       ▼
//   Preprocessor      → normalises whitespace and case
//       │
//       ▼
//   tokenize_article  → splits into words
//       │
//       ▼
//   ArticleEncoder    → ids, extended ids, OOV word list
//       │
//       ▼
//   ExampleSource     → one ExampleRecord per eval iteration
//
//   decoded words ──► segmenter → one sentence per line

/// Cleans raw article text
pub mod preprocessor;

/// Word splitting and id encoding with OOV pointer ids
pub mod encoder;

/// Test-set and article-file example sources
pub mod sampler;

/// Sentence segmentation and HTML escaping for ROUGE
pub mod segmenter;
