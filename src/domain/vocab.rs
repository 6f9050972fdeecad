// ============================================================
// Layer 3 — Vocabulary Domain Type
// ============================================================
// The fixed word list the summarizer was trained with.
//
// Ids are 1-based: id 0 is the padding row of the embedding
// table, so id `t` names the `t`-th word (index `t - 1`).
//
//   id:    1     2     ...   V-4     V-3    V-2     V-1   V
//   word:  the   ,     ...   <unk>   <go>   <end>   <s>   </s>
//
// The five special tokens are always appended last, in the
// order listed in SPECIAL_TOKENS.

use std::collections::HashMap;

/// Hard cap on the number of regular (non-special) words.
pub const MAX_VOCAB_WORDS: usize = 50_000;

pub const UNK_TOKEN: &str = "<unk>";
pub const GO_TOKEN: &str = "<go>";
pub const END_TOKEN: &str = "<end>";
pub const SENT_START_TOKEN: &str = "<s>";
pub const SENT_END_TOKEN: &str = "</s>";

/// Reserved tokens appended after the regular words.
pub const SPECIAL_TOKENS: [&str; 5] = [
    UNK_TOKEN,
    GO_TOKEN,
    END_TOKEN,
    SENT_START_TOKEN,
    SENT_END_TOKEN,
];

/// Immutable word list with a reverse index.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words:   Vec<String>,
    word2id: HashMap<String, u32>,
}

impl Vocabulary {
    /// Build from regular words; the special tokens are appended here.
    /// Returns `None` if a word appears twice (including a regular word
    /// that collides with a special token).
    pub fn with_special_tokens(regular: Vec<String>) -> Option<Self> {
        let mut words = regular;
        words.extend(SPECIAL_TOKENS.iter().map(|s| s.to_string()));
        Self::from_words(words)
    }

    /// Build from an already complete word list.
    pub fn from_words(words: Vec<String>) -> Option<Self> {
        let mut word2id = HashMap::with_capacity(words.len());
        for (idx, word) in words.iter().enumerate() {
            // 1-based ids
            if word2id.insert(word.clone(), idx as u32 + 1).is_some() {
                return None;
            }
        }
        Some(Self { words, word2id })
    }

    /// Number of words, special tokens included. This is the
    /// boundary between in-vocabulary ids and pointer ids.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word for a 1-based id, `None` for 0 or ids past the end.
    pub fn word(&self, id: u32) -> Option<&str> {
        let idx = (id as usize).checked_sub(1)?;
        self.words.get(idx).map(String::as_str)
    }

    pub fn id(&self, word: &str) -> Option<u32> {
        self.word2id.get(word).copied()
    }

    /// Id of `<unk>`. Always present when built through
    /// `with_special_tokens`.
    pub fn unk_id(&self) -> Option<u32> {
        self.id(UNK_TOKEN)
    }

    pub fn end_id(&self) -> Option<u32> {
        self.id(END_TOKEN)
    }
}

/// True for tokens that should never be shown to a reader.
/// `<unk>` stays visible since it carries information.
pub fn is_display_hidden(word: &str) -> bool {
    matches!(word, SENT_START_TOKEN | GO_TOKEN | END_TOKEN | SENT_END_TOKEN)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_special_tokens_appended_in_order() {
        let v = Vocabulary::with_special_tokens(words(&["the", "cat"])).unwrap();
        assert_eq!(v.len(), 7);
        assert_eq!(v.word(3), Some("<unk>"));
        assert_eq!(v.word(7), Some("</s>"));
        assert_eq!(v.unk_id(), Some(3));
        assert_eq!(v.end_id(), Some(5));
    }

    #[test]
    fn test_ids_are_one_based() {
        let v = Vocabulary::from_words(words(&["a", "b", "c"])).unwrap();
        assert_eq!(v.word(0), None);
        assert_eq!(v.word(1), Some("a"));
        assert_eq!(v.word(3), Some("c"));
        assert_eq!(v.word(4), None);
        assert_eq!(v.id("b"), Some(2));
    }

    #[test]
    fn test_duplicate_words_rejected() {
        assert!(Vocabulary::from_words(words(&["a", "b", "a"])).is_none());
        // A regular word colliding with a special token is a duplicate too
        assert!(Vocabulary::with_special_tokens(words(&["<unk>"])).is_none());
    }

    #[test]
    fn test_display_hidden_tokens() {
        assert!(is_display_hidden("<s>"));
        assert!(is_display_hidden("<end>"));
        assert!(!is_display_hidden("<unk>"));
        assert!(!is_display_hidden("cat"));
    }
}
