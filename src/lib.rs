//! # Sedge
//!
//! A typo-tolerant, fuzzy full-text search library for titled-document
//! corpora (movie titles and the like). Queries may be misspelled, use
//! alternate transliterations, or add and drop words; Sedge still retrieves
//! and ranks the relevant documents.
//!
//! ## How it works
//!
//! - A **vocabulary** of literal surface tokens is rebuilt in full batches
//!   from the corpus and published with an atomic snapshot swap.
//! - A **trigram index** over that vocabulary answers "top-K tokens most
//!   similar to X".
//! - The **query compiler** turns N input words into N OR-groups combined
//!   conjunctively, each group holding the verbatim word plus its fuzzy
//!   alternates.
//! - Documents carry **weighted, stemmed term vectors**; the **search
//!   executor** stems every query alternate with the same analyzer before
//!   matching, then ranks by weighted term frequency normalized by document
//!   length.
//!
//! ## Quickstart
//!
//! ```
//! use sedge::{Document, EngineConfig, SearchEngine};
//!
//! let engine = SearchEngine::new(EngineConfig::default()).unwrap();
//! engine.upsert_document(
//!     Document::new("m1")
//!         .with_field("title", "Star Wars", 2.0)
//!         .with_field("alt_title", "La guerre des étoiles", 1.0),
//! ).unwrap();
//! engine.rebuild_vocabulary().unwrap();
//!
//! // "warps" is not a corpus word, but "wars" is a fuzzy alternate.
//! let results = engine.search("star warps").unwrap();
//! assert_eq!(results[0].doc_id, "m1");
//! ```

// Core modules
pub mod analysis;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod search;
pub mod spelling;

// Re-exports for the public API
pub use analysis::{Analyzer, StandardAnalyzer};
pub use document::{Document, FieldValue};
pub use engine::SearchEngine;
pub use engine::config::EngineConfig;
pub use error::{Result, SedgeError};
pub use index::{DocumentIndexer, DocumentStore, MemoryDocumentStore, TermVector};
pub use query::{CompiledQuery, ExpansionGroup, ExpansionPolicy, QueryCompiler};
pub use search::{SearchResult, Searcher};
pub use spelling::{CorpusEntry, CorpusReader, RebuildStats, VocabularyStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
