// ============================================================
// Layer 4 — Article Encoder
// ============================================================
// Turns article words into the id sequences the summarizer
// reads, building the article-local OOV list on the way.
//
//   words:        the  zorblax  sat  zorblax  quietly
//   ids:          1    <unk>    3    <unk>    <unk>
//   extended_ids: 1    V+1      3    V+1      V+2
//   oov_words:    [zorblax, quietly]
//
// Extended ids use the same addressing the resolver decodes:
// pointer id V + k names oov_words[k - 1]. An article with V
// or more distinct unknown words would wrap around the modulo,
// so from that point unknown words stay `<unk>` in both forms.

use anyhow::{anyhow, Context, Result};
use tokenizers::pre_tokenizers::whitespace::Whitespace;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

use crate::data::preprocessor::Preprocessor;
use crate::domain::example::EncodedArticle;
use crate::domain::token::TokenId;
use crate::domain::vocab::Vocabulary;

/// Split article text into words: clean it, then apply the
/// `\w+|[^\w\s]+` whitespace pre-tokenizer.
pub fn tokenize_article(text: &str, prep: &Preprocessor) -> Result<Vec<String>> {
    let cleaned = prep.clean(text);
    let mut pretokenized = PreTokenizedString::from(cleaned.as_str());

    Whitespace::default()
        .pre_tokenize(&mut pretokenized)
        .map_err(|e| anyhow!("Cannot split article into words: {e}"))?;

    Ok(pretokenized
        .get_splits(OffsetReferential::Original, OffsetType::Byte)
        .into_iter()
        .map(|(word, _, _)| word.to_owned())
        .collect())
}

pub struct ArticleEncoder<'v> {
    vocab:  &'v Vocabulary,
    unk_id: TokenId,
}

impl<'v> ArticleEncoder<'v> {
    pub fn new(vocab: &'v Vocabulary) -> Result<Self> {
        let unk_id = vocab
            .unk_id()
            .context("Vocabulary has no <unk> token")?;
        Ok(Self { vocab, unk_id })
    }

    /// Encode at most `max_article_size` leading words.
    pub fn encode(&self, words: &[String], max_article_size: usize) -> EncodedArticle {
        let vocab_size = self.vocab.len();
        let words      = &words[..words.len().min(max_article_size)];

        let mut ids          = Vec::with_capacity(words.len());
        let mut extended_ids = Vec::with_capacity(words.len());
        let mut oov_words: Vec<String> = Vec::new();

        for word in words {
            if let Some(id) = self.vocab.id(word) {
                ids.push(id);
                extended_ids.push(id);
                continue;
            }

            ids.push(self.unk_id);

            let offset = match oov_words.iter().position(|w| w == word) {
                Some(idx) => Some(idx + 1),
                // Offsets must stay below V or `id mod V` wraps
                None if oov_words.len() + 1 < vocab_size => {
                    oov_words.push(word.clone());
                    Some(oov_words.len())
                }
                None => None,
            };

            extended_ids.push(match offset {
                Some(k) => (vocab_size + k) as TokenId,
                None    => self.unk_id,
            });
        }

        let reversed_ids = ids.iter().rev().copied().collect();

        EncodedArticle { ids, reversed_ids, extended_ids, oov_words }
    }
}
