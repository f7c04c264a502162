//! Typo tolerance: vocabulary maintenance and fuzzy token suggestion.
//!
//! The [`dictionary`] submodule owns the deduplicated set of literal tokens
//! observed in the corpus, rebuilt in full batches and published with an
//! atomic snapshot swap so unlimited concurrent readers never observe a
//! half-built vocabulary. The [`suggest`] submodule answers "top-K tokens
//! most similar to X" queries over that vocabulary using trigram similarity.

pub mod dictionary;
pub mod suggest;

// Re-exports
pub use dictionary::{CorpusEntry, CorpusReader, RebuildStats, VocabularySnapshot, VocabularyStore};
pub use suggest::{ScoredToken, TrigramIndex};
