// ============================================================
// Layer 3 — Token Addressing and Output Resolution
// ============================================================
// The decoder emits one integer per output position. With a
// pointer/copy mechanism an id means one of two things:
//
//   id <= V   → an ordinary vocabulary word (1-based)
//   id  > V   → a copy of the k-th out-of-vocabulary word of
//               the *current* article, k = id mod V (1-based)
//
// where V is the vocabulary size. Pointer ids are only
// meaningful together with the article they were decoded
// from, so resolution always takes that article's OOV list.
//
// The classification step is kept separate from the lookup
// so that a pointer id can never silently fall back to a
// vocabulary word (or the other way around).

use thiserror::Error;

use crate::domain::vocab::Vocabulary;

/// Raw id emitted by the decoder.
pub type TokenId = u32;

/// Where a decoded id points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRef {
    /// A 1-based id into the fixed vocabulary.
    InVocabulary(TokenId),
    /// A 1-based offset into the article's OOV word list.
    CopiedFromSource(usize),
}

impl TokenRef {
    /// Split an id into its addressing mode.
    pub fn classify(id: TokenId, vocab_size: usize) -> Result<Self, ResolveError> {
        if vocab_size == 0 {
            return Err(ResolveError::EmptyVocabulary);
        }
        if (id as usize) <= vocab_size {
            Ok(Self::InVocabulary(id))
        } else {
            Ok(Self::CopiedFromSource(id as usize % vocab_size))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("token id 0 is the padding id and has no word")]
    Padding,

    #[error("vocabulary is empty, cannot resolve any token id")]
    EmptyVocabulary,

    #[error(
        "pointer id {id} addresses OOV offset {offset}, \
         but the article only has {oov_len} OOV word(s)"
    )]
    OovOutOfRange {
        id:      TokenId,
        offset:  usize,
        oov_len: usize,
    },
}

/// Resolve a single id to its surface word.
pub fn resolve_token<'a>(
    id:        TokenId,
    vocab:     &'a Vocabulary,
    oov_words: &'a [String],
) -> Result<&'a str, ResolveError> {
    match TokenRef::classify(id, vocab.len())? {
        TokenRef::InVocabulary(id) => vocab.word(id).ok_or(ResolveError::Padding),
        TokenRef::CopiedFromSource(offset) => offset
            .checked_sub(1)
            .and_then(|idx| oov_words.get(idx))
            .map(String::as_str)
            .ok_or(ResolveError::OovOutOfRange {
                id,
                offset,
                oov_len: oov_words.len(),
            }),
    }
}

/// Resolve a whole decoded sequence. Fails on the first bad id.
pub fn resolve_summary(
    ids:       &[TokenId],
    vocab:     &Vocabulary,
    oov_words: &[String],
) -> Result<Vec<String>, ResolveError> {
    ids.iter()
        .map(|&id| resolve_token(id, vocab, oov_words).map(str::to_owned))
        .collect()
}
