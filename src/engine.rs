//! The unified search engine facade.
//!
//! [`SearchEngine`] wires the components together: one shared analyzer, the
//! vocabulary store with its trigram index, an in-memory document store,
//! the query compiler and the search executor. It exposes the two outward
//! operations of the system, `search` and the vocabulary rebuild trigger,
//! plus document upsert/removal.

pub mod config;

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::analysis::{Analyzer, StandardAnalyzer};
use crate::document::Document;
use crate::error::Result;
use crate::index::{DocumentStore, MemoryDocumentStore};
use crate::query::QueryCompiler;
use crate::search::{SearchResult, Searcher};
use crate::spelling::dictionary::{CorpusReader, RebuildStats, VocabularyStore};

use self::config::EngineConfig;

/// A typo-tolerant search engine over a titled-document corpus.
///
/// Read-heavy by design: any number of concurrent `search` calls run
/// against immutable snapshots, while `rebuild_vocabulary` — the single
/// mutating vocabulary operation — builds its replacement in isolation and
/// publishes it atomically. Document upserts are independent of vocabulary
/// rebuilds and of each other.
///
/// # Example
///
/// ```
/// use sedge::engine::SearchEngine;
/// use sedge::engine::config::EngineConfig;
/// use sedge::document::Document;
///
/// let engine = SearchEngine::new(EngineConfig::default()).unwrap();
/// engine.upsert_document(Document::new("m1").with_field("title", "Rush Hour 2", 2.0)).unwrap();
/// engine.upsert_document(Document::new("m2").with_field("title", "Rush Hour 3", 2.0)).unwrap();
/// engine.rebuild_vocabulary().unwrap();
///
/// let results = engine.search("russh hour").unwrap();
/// assert_eq!(results.len(), 2);
/// ```
pub struct SearchEngine {
    config: EngineConfig,
    analyzer: Arc<dyn Analyzer>,
    vocabulary: VocabularyStore,
    store: MemoryDocumentStore,
    compiler: QueryCompiler,
    searcher: Searcher,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("documents", &self.store.len())
            .field("vocabulary", &self.vocabulary)
            .finish()
    }
}

impl SearchEngine {
    /// Create an engine with the [`StandardAnalyzer`].
    ///
    /// Fails fast on invalid configuration; nothing is recoverable
    /// per-request about a bad config.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_analyzer(config, Arc::new(StandardAnalyzer::new()))
    }

    /// Create an engine with a custom analyzer.
    ///
    /// The same analyzer instance drives vocabulary construction, document
    /// indexing and query-side stemming, so the three can never drift
    /// apart.
    pub fn with_analyzer(config: EngineConfig, analyzer: Arc<dyn Analyzer>) -> Result<Self> {
        config.validate()?;
        Ok(SearchEngine {
            compiler: QueryCompiler::new(config.expansion.clone()),
            config,
            vocabulary: VocabularyStore::new(Arc::clone(&analyzer)),
            store: MemoryDocumentStore::new(Arc::clone(&analyzer)),
            searcher: Searcher::new(Arc::clone(&analyzer)),
            analyzer,
        })
    }

    /// Insert or replace a document; its term vector is re-derived
    /// immediately.
    ///
    /// The new document is searchable right away through its literal terms;
    /// fuzzy alternates for its words appear after the next vocabulary
    /// rebuild.
    pub fn upsert_document(&self, document: Document) -> Result<()> {
        self.store.upsert(document)
    }

    /// Remove a document. Returns whether it existed.
    pub fn remove_document(&self, id: &str) -> bool {
        self.store.remove(id)
    }

    /// Fetch a stored document.
    pub fn get_document(&self, id: &str) -> Option<Document> {
        self.store.get(id)
    }

    /// Number of stored documents.
    pub fn document_count(&self) -> usize {
        self.store.len()
    }

    /// Rebuild the vocabulary from the engine's own document store.
    ///
    /// This is the parameterless rebuild trigger: idempotent, safe to call
    /// at any time, safe to run concurrently with in-flight searches.
    pub fn rebuild_vocabulary(&self) -> Result<RebuildStats> {
        self.vocabulary.rebuild(&self.store)
    }

    /// Rebuild the vocabulary from an external corpus reader.
    pub fn rebuild_vocabulary_from(&self, corpus: &dyn CorpusReader) -> Result<RebuildStats> {
        self.vocabulary.rebuild(corpus)
    }

    /// Rebuild with a wall-clock budget; on timeout the previously
    /// published vocabulary stays in effect.
    pub fn rebuild_vocabulary_with_deadline(
        &self,
        corpus: &dyn CorpusReader,
        budget: Duration,
    ) -> Result<RebuildStats> {
        self.vocabulary.rebuild_with_deadline(corpus, Some(budget))
    }

    /// Search with the configured default result limit.
    pub fn search(&self, query_text: &str) -> Result<Vec<SearchResult>> {
        self.search_with_limit(query_text, self.config.default_limit)
    }

    /// Search, returning at most `limit` results ordered by descending
    /// score with ties broken by ascending document id.
    ///
    /// Never fails on query content: empty or degenerate input yields an
    /// empty result list, and words with no fuzzy neighbors fall back to
    /// literal-only matching.
    pub fn search_with_limit(&self, query_text: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let snapshot = self.vocabulary.snapshot();
        let compiled = self.compiler.compile(query_text, &snapshot);
        if compiled.is_empty() {
            return Ok(Vec::new());
        }
        debug!(
            "search: {} group(s) compiled from {:?}",
            compiled.groups.len(),
            query_text
        );
        Ok(self.searcher.execute(&compiled, &self.store, limit))
    }

    /// Identifier of the analysis configuration this engine was built
    /// with. Changing it invalidates all term vectors and requires a full
    /// reindex.
    pub fn analyzer_version(&self) -> &str {
        self.analyzer.version()
    }

    /// Number of distinct literal tokens in the published vocabulary.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.snapshot().len()
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The underlying vocabulary store, for operators that schedule
    /// rebuilds directly.
    pub fn vocabulary(&self) -> &VocabularyStore {
        &self.vocabulary
    }
}
