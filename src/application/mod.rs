// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers for the two workflows of the
// driver. No printing here (that's Layer 1) and no direct
// file or process handling (that's Layer 6).

// Decode examples and write ROUGE file pairs
pub mod eval_use_case;

// Score the file pairs and persist the ROUGE table
pub mod rouge_use_case;
