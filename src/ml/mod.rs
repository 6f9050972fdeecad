// ============================================================
// Layer 5 — Model Layer
// ============================================================
// The neural summarizer is an external collaborator. This
// layer holds what the driver needs to talk to it:
//
//   model.rs      — its hyperparameters and the replaying
//                   Summarizer backed by checkpoint decodes
//
//   inferencer.rs — runs a Summarizer on one example and
//                   resolves token ids back into words

/// Model hyperparameters and the checkpoint-backed summarizer
pub mod model;

/// Decoding of model output into words
pub mod inferencer;
