//! Document indexing: weighted, stemmed term vectors.
//!
//! A [`TermVector`] is derived from a document by exactly one code path,
//! [`DocumentIndexer::index`], and always with the same analyzer the search
//! side uses. Indexing with literal tokens while matching with stemmed ones
//! (or vice versa) silently degrades recall, so the analyzer is shared, not
//! duplicated.

use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::analysis::Analyzer;
use crate::document::Document;
use crate::error::{Result, SedgeError};
use crate::spelling::dictionary::{CorpusEntry, CorpusReader};

/// One occurrence of a term in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermPosting {
    /// Importance weight of the field the occurrence came from.
    pub weight: f32,
    /// Token position, running across the document's fields in
    /// deterministic field order.
    pub position: usize,
}

/// A document's weighted, positioned set of stemmed index terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermVector {
    terms: AHashMap<String, Vec<TermPosting>>,
    length: usize,
}

impl TermVector {
    /// Whether the stemmed term occurs in this document.
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// All occurrences of a stemmed term.
    pub fn postings(&self, term: &str) -> Option<&[TermPosting]> {
        self.terms.get(term).map(|p| p.as_slice())
    }

    /// Total token count of the document, used for length normalization.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of distinct stemmed terms.
    pub fn distinct_terms(&self) -> usize {
        self.terms.len()
    }
}

/// Derives term vectors from documents.
///
/// Each field is stemmed independently and weighted per its configured
/// importance; the weighted term sets are merged into one vector per
/// document.
#[derive(Debug, Clone)]
pub struct DocumentIndexer {
    analyzer: Arc<dyn Analyzer>,
}

impl DocumentIndexer {
    /// Create an indexer over the given analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        DocumentIndexer { analyzer }
    }

    /// The analyzer this indexer stems with.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Derive the term vector for `document`.
    ///
    /// Rejects fields whose weight is not a finite positive number.
    pub fn index(&self, document: &Document) -> Result<TermVector> {
        let mut terms: AHashMap<String, Vec<TermPosting>> = AHashMap::new();
        let mut length = 0usize;

        for (name, field) in &document.fields {
            if !field.weight.is_finite() || field.weight <= 0.0 {
                return Err(SedgeError::document(
                    &document.id,
                    format!("field '{name}' has invalid weight {}", field.weight),
                ));
            }
            let tokens = self.analyzer.stemmed_terms(&field.text);
            let count = tokens.len();
            for token in tokens {
                terms.entry(token.text).or_default().push(TermPosting {
                    weight: field.weight,
                    position: length + token.position,
                });
            }
            length += count;
        }

        Ok(TermVector { terms, length })
    }
}

/// The document store contract this engine consumes and keeps current.
///
/// Upserting a document re-derives its term vector through the indexer, so
/// vectors stay consistent with field changes automatically. Updates to the
/// same document id are serialized; distinct documents may proceed in
/// parallel.
pub trait DocumentStore: Send + Sync {
    /// Insert or replace a document, re-deriving its term vector.
    fn upsert(&self, document: Document) -> Result<()>;

    /// Remove a document. Returns whether it existed.
    fn remove(&self, id: &str) -> bool;

    /// Fetch a stored document by id.
    fn get(&self, id: &str) -> Option<Document>;

    /// Fetch a document's term vector by id.
    fn term_vector(&self, id: &str) -> Option<Arc<TermVector>>;

    /// Visit every (document id, term vector) pair.
    fn for_each_vector(&self, visit: &mut dyn FnMut(&str, &TermVector));

    /// Number of stored documents.
    fn len(&self) -> usize;

    /// Whether the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct StoredDocument {
    document: Document,
    vector: Arc<TermVector>,
}

/// In-memory reference implementation of [`DocumentStore`].
pub struct MemoryDocumentStore {
    indexer: DocumentIndexer,
    docs: RwLock<AHashMap<String, StoredDocument>>,
}

impl std::fmt::Debug for MemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryDocumentStore")
            .field("documents", &self.len())
            .finish()
    }
}

impl MemoryDocumentStore {
    /// Create an empty store that indexes through `analyzer`.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        MemoryDocumentStore {
            indexer: DocumentIndexer::new(analyzer),
            docs: RwLock::new(AHashMap::new()),
        }
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn upsert(&self, document: Document) -> Result<()> {
        // Derive outside the lock; the write lock serializes publication
        // per id (and, in this reference impl, across ids too).
        let vector = Arc::new(self.indexer.index(&document)?);
        let mut docs = self.docs.write();
        docs.insert(
            document.id.clone(),
            StoredDocument { document, vector },
        );
        Ok(())
    }

    fn remove(&self, id: &str) -> bool {
        self.docs.write().remove(id).is_some()
    }

    fn get(&self, id: &str) -> Option<Document> {
        self.docs.read().get(id).map(|s| s.document.clone())
    }

    fn term_vector(&self, id: &str) -> Option<Arc<TermVector>> {
        self.docs.read().get(id).map(|s| Arc::clone(&s.vector))
    }

    fn for_each_vector(&self, visit: &mut dyn FnMut(&str, &TermVector)) {
        for (id, stored) in self.docs.read().iter() {
            visit(id, &stored.vector);
        }
    }

    fn len(&self) -> usize {
        self.docs.read().len()
    }
}

impl CorpusReader for MemoryDocumentStore {
    fn read_entries(&self) -> Result<Vec<CorpusEntry>> {
        let docs = self.docs.read();
        let mut entries = Vec::new();
        for stored in docs.values() {
            for (name, field) in &stored.document.fields {
                entries.push(CorpusEntry::new(
                    stored.document.id.clone(),
                    name.clone(),
                    field.text.clone(),
                ));
            }
        }
        Ok(entries)
    }
}
