//! Analyzers: the two named analysis capabilities.
//!
//! The vocabulary builder and the query compiler both depend on this one
//! abstraction, so there is exactly one place where the literal/stemmed
//! mapping could drift. Keeping index-side and query-side stemming aligned
//! is a first-class invariant of the whole engine (see
//! [`crate::search`]), not an afterthought.

use crate::analysis::stem::PorterStemmer;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::WordTokenizer;

/// Deterministic text analysis with two named capabilities.
///
/// Implementations must be pure functions of their input text: same text,
/// same tokens, every time. The [`version`](Analyzer::version) string
/// identifies the configuration; changing the stemming algorithm or
/// tokenization rules means a new version, which invalidates every existing
/// term vector and requires a full reindex.
pub trait Analyzer: Send + Sync + std::fmt::Debug {
    /// Split text into normalized tokens with surface spelling preserved.
    ///
    /// Used for the fuzzy-suggestion vocabulary: misspellings are
    /// surface-level phenomena, so stemming here would destroy the signal.
    fn literal_tokens(&self, text: &str) -> Vec<Token>;

    /// Split text into normalized tokens reduced to their root form.
    ///
    /// Used for document term vectors and for query alternates immediately
    /// before matching.
    fn stemmed_terms(&self, text: &str) -> Vec<Token>;

    /// Identifier of this analysis configuration.
    fn version(&self) -> &str;
}

/// The default analyzer: Unicode word tokenization plus Porter-style
/// stemming in stemmed mode.
#[derive(Debug, Clone, Default)]
pub struct StandardAnalyzer {
    tokenizer: WordTokenizer,
    stemmer: PorterStemmer,
}

impl StandardAnalyzer {
    /// Create a new standard analyzer.
    pub fn new() -> Self {
        StandardAnalyzer {
            tokenizer: WordTokenizer::new(),
            stemmer: PorterStemmer::new(),
        }
    }
}

impl Analyzer for StandardAnalyzer {
    fn literal_tokens(&self, text: &str) -> Vec<Token> {
        self.tokenizer.tokenize(text)
    }

    fn stemmed_terms(&self, text: &str) -> Vec<Token> {
        self.tokenizer
            .tokenize(text)
            .into_iter()
            .map(|t| Token::new(self.stemmer.stem(&t.text), t.position))
            .collect()
    }

    fn version(&self) -> &str {
        "standard-porter/1"
    }
}
