//! Unicode-aware word tokenization.

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::Token;

/// Splits text into lowercase word tokens on Unicode word boundaries.
///
/// Input is NFKC-normalized first so that visually equivalent forms
/// (e.g. full-width characters, ligatures) map to the same tokens. Tokens
/// that contain no alphanumeric character are dropped.
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Create a new tokenizer.
    pub fn new() -> Self {
        WordTokenizer
    }

    /// Tokenize `text` into positioned word tokens.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let normalized: String = text.nfkc().collect::<String>().to_lowercase();
        normalized
            .unicode_words()
            .filter(|w| w.chars().any(|c| c.is_alphanumeric()))
            .enumerate()
            .map(|(position, word)| Token::new(word, position))
            .collect()
    }
}
