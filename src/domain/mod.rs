// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits that describe what the
// evaluation driver works with:
//
//   vocab.rs    — the fixed word list and its special tokens
//   token.rs    — token ids and the pointer/copy addressing
//                 scheme used to turn ids back into words
//   example.rs  — one evaluation sample and its decodes
//   score.rs    — the flat ROUGE score mapping
//   traits.rs   — the external collaborators (sampler, model,
//                 scorer) expressed as traits
//
// Rules for this layer:
//   - NO file I/O or process spawning
//   - NO clap or tracing-subscriber types
//   - Only plain Rust structs, enums, and traits

/// Vocabulary with reserved special tokens
pub mod vocab;

/// Token id addressing and output resolution
pub mod token;

/// Example records and generated summaries
pub mod example;

/// ROUGE score report
pub mod score;

// Collaborator abstractions implemented by other layers
pub mod traits;
