//! Text analysis module for Sedge.
//!
//! Analysis turns raw text into tokens, in one of two modes that serve two
//! different purposes:
//!
//! - **literal**: surface spelling preserved (after Unicode normalization
//!   and lowercasing). Used to build the fuzzy-suggestion vocabulary, since
//!   misspellings are surface-level phenomena.
//! - **stemmed**: literal pipeline plus reduction to a root form. Used to
//!   build document term vectors and, crucially, applied to every query
//!   alternate immediately before matching, so both sides of a match always
//!   go through the same configuration.
//!
//! Both modes are deterministic, and the analyzer carries a version string;
//! changing the analysis configuration invalidates every existing term
//! vector and requires a full reindex.
//!
//! # Modules
//!
//! - [`analyzer`]: the [`Analyzer`] trait and the standard implementation
//! - [`tokenizer`]: Unicode-aware word tokenization
//! - [`stem`]: the stemming transform
//! - [`token`]: token representation

pub mod analyzer;
pub mod stem;
pub mod token;
pub mod tokenizer;

// Re-exports
pub use analyzer::{Analyzer, StandardAnalyzer};
pub use stem::PorterStemmer;
pub use token::Token;
pub use tokenizer::WordTokenizer;
