// ============================================================
// Layer 4 — Sentence Segmentation for ROUGE
// ============================================================
// The ROUGE toolkit scores one sentence per line, while the
// decoder emits a flat word stream. This module re-segments
// decoded words at "." tokens and prepares reference text the
// same way.
//
// Example:
//   ["the", "cat", "sat", ".", "it", "purred"]
//     → ["the cat sat .", "it purred"]
//
// The final fragment is kept even without a closing period,
// and no period is invented for it.

/// Sentence terminator token emitted by the decoder.
pub const PERIOD: &str = ".";

/// Split a decoded word stream into sentences, each ending at
/// (and including) a period token. Borrowed slices keep the
/// token count of the input.
pub fn split_sentences(words: &[String]) -> Vec<&[String]> {
    let mut sentences = Vec::new();
    let mut rest      = words;

    while !rest.is_empty() {
        let cut = rest
            .iter()
            .position(|w| w == PERIOD)
            .map(|idx| idx + 1)
            .unwrap_or(rest.len());
        let (sentence, tail) = rest.split_at(cut);
        sentences.push(sentence);
        rest = tail;
    }

    sentences
}

/// `split_sentences`, with each sentence joined into one line.
pub fn sentences_to_lines(words: &[String]) -> Vec<String> {
    split_sentences(words)
        .into_iter()
        .map(|sentence| sentence.join(" "))
        .collect()
}

/// Split raw reference text on '.' into trimmed sentences
/// without their periods; the ROUGE writer adds them back.
/// Empty fragments (e.g. after the last period) are dropped.
pub fn split_reference_text(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Escape angle brackets so the HTML-producing ROUGE wrapper
/// does not read generated text as markup. `&` is left alone,
/// so text that is already escaped passes through unchanged.
pub fn make_html_safe(s: &str) -> String {
    s.replace('<', "&lt;").replace('>', "&gt;")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn test_splits_at_periods_inclusive() {
        let w = words("the cat sat . it was happy .");
        assert_eq!(sentences_to_lines(&w), vec!["the cat sat .", "it was happy ."]);
    }

    #[test]
    fn test_keeps_trailing_fragment() {
        let w = words("one . two three");
        assert_eq!(sentences_to_lines(&w), vec!["one .", "two three"]);
    }

    #[test]
    fn test_no_period_is_one_sentence() {
        let w = words("no period here");
        assert_eq!(sentences_to_lines(&w), vec!["no period here"]);
    }

    #[test]
    fn test_empty_input_gives_no_sentences() {
        assert!(split_sentences(&[]).is_empty());
        assert!(sentences_to_lines(&[]).is_empty());
    }

    #[test]
    fn test_token_count_is_preserved() {
        for text in ["a . b . c", ". . .", "a b", "a b .", "x"] {
            let w = words(text);
            let total: usize = split_sentences(&w).iter().map(|s| s.len()).sum();
            assert_eq!(total, w.len(), "token count changed for {text:?}");
        }
    }

    #[test]
    fn test_lone_periods_are_sentences() {
        let w = words(". .");
        assert_eq!(sentences_to_lines(&w), vec![".", "."]);
    }

    #[test]
    fn test_reference_text_split() {
        assert_eq!(
            split_reference_text("The cat sat. It was happy. "),
            vec!["The cat sat", "It was happy"]
        );
        assert!(split_reference_text("").is_empty());
    }

    #[test]
    fn test_html_safe() {
        assert_eq!(make_html_safe("<a>"), "&lt;a&gt;");
        assert_eq!(make_html_safe("plain"), "plain");
        // Already escaped text is not touched
        assert_eq!(make_html_safe("&lt;a&gt;"), "&lt;a&gt;");
    }
}
