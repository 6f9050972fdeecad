// ============================================================
// Layer 4 — Article Text Preprocessor
// ============================================================
// Normalises raw article text before it is split into words.
//
// Articles pasted into a text file often carry:
//   - non-breaking / zero-width spaces and byte order marks
//   - Windows line endings and tabs
//   - mixed case, while the vocabulary artifact is lower-cased
//
// The encoder works on a flat word stream, so line structure
// is not kept: every run of whitespace becomes one space.

/// Lower-cases as it cleans, matching the lower-cased vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw text string for word splitting.
    pub fn clean(&self, text: &str) -> String {
        // ── Step 1: Map invisible and control characters to spaces ───────────
        let normalised = text.chars().map(|c| match c {
            '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
            c if c.is_control() => ' ',
            c => c,
        });

        // ── Step 2: Collapse whitespace runs ─────────────────────────────────
        let mut out        = String::with_capacity(text.len());
        let mut last_space = true; // swallows leading whitespace

        for c in normalised {
            if c.is_whitespace() {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.extend(c.to_lowercase());
                last_space = false;
            }
        }

        // Drop the single trailing space left by trailing whitespace
        if out.ends_with(' ') {
            out.pop();
        }
        out
    }
}
