// ============================================================
// Layer 3 — Example Domain Types
// ============================================================
// One evaluation sample: the article in the three id forms the
// encoder consumes, its article-local OOV words, and the gold
// abstract when one exists. Records are transient — built for
// one iteration of the eval loop and then dropped.

use serde::{Deserialize, Serialize};

use crate::domain::token::TokenId;

/// Article ids in the forms the summarizer reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedArticle {
    /// Vocabulary ids, unknown words mapped to `<unk>`
    pub ids: Vec<TokenId>,

    /// `ids` reversed, for the backward encoder direction
    pub reversed_ids: Vec<TokenId>,

    /// Like `ids`, but each unknown word carries its pointer id
    /// (vocab size + 1-based OOV position) instead of `<unk>`
    pub extended_ids: Vec<TokenId>,

    /// Distinct unknown words in first-occurrence order.
    /// Pointer offset k addresses `oov_words[k - 1]`.
    pub oov_words: Vec<String>,
}

impl EncodedArticle {
    /// Size of this article's extended vocabulary.
    pub fn max_oov(&self) -> usize {
        self.oov_words.len()
    }
}

/// A single evaluation sample.
#[derive(Debug, Clone)]
pub struct ExampleRecord {
    /// Stable key used to look up decodes in the checkpoint
    pub id: String,

    /// Raw article text as read from the source
    pub article: String,

    /// Article after word splitting (before truncation)
    pub article_tokens: Vec<String>,

    pub encoded: EncodedArticle,

    /// Gold abstract; `None` when decoding a standalone article file
    pub abstract_text: Option<String>,
}

/// The ids of one beam-search hypothesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedSummary {
    pub ids: Vec<TokenId>,
}

impl GeneratedSummary {
    pub fn new(ids: Vec<TokenId>) -> Self {
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
