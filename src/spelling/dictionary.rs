//! Vocabulary store: full-batch rebuild with atomic snapshot publication.
//!
//! The vocabulary is the deduplicated set of *literal* tokens observed in
//! the corpus. Rebuilds construct a complete replacement snapshot (token
//! set plus its derived [`TrigramIndex`]) in isolation, then publish it with
//! a single swap, so in-flight readers always observe either the fully-old
//! or the fully-new vocabulary. Nothing is ever mutated in place on the
//! read path.

use std::sync::Arc;
use std::time::{Duration, Instant};

use ahash::AHashSet;
use log::{debug, info, warn};
use parking_lot::RwLock;

use crate::analysis::Analyzer;
use crate::error::{Result, SedgeError};
use crate::spelling::suggest::{ScoredToken, TrigramIndex};

/// One indexable text field of one corpus document, as yielded by a
/// [`CorpusReader`].
#[derive(Debug, Clone)]
pub struct CorpusEntry {
    /// Identifier of the owning document.
    pub doc_id: String,
    /// Field name.
    pub field: String,
    /// Raw field text.
    pub text: String,
}

impl CorpusEntry {
    /// Create a new corpus entry.
    pub fn new<D, F, T>(doc_id: D, field: F, text: T) -> Self
    where
        D: Into<String>,
        F: Into<String>,
        T: Into<String>,
    {
        CorpusEntry {
            doc_id: doc_id.into(),
            field: field.into(),
            text: text.into(),
        }
    }
}

/// Source of corpus text for vocabulary rebuilds.
///
/// The reader yields every indexable text field of every document; no
/// further schema is assumed. A failing reader aborts the rebuild and
/// leaves the previously published vocabulary untouched.
pub trait CorpusReader: Send + Sync {
    /// Read all (document id, field name, field text) entries.
    fn read_entries(&self) -> Result<Vec<CorpusEntry>>;
}

/// An immutable, fully consistent view of the vocabulary.
///
/// The token set and the trigram index are always built together, so a
/// snapshot can never pair an old vocabulary with a new index or vice
/// versa.
#[derive(Debug)]
pub struct VocabularySnapshot {
    index: TrigramIndex,
}

impl VocabularySnapshot {
    fn empty() -> Self {
        VocabularySnapshot {
            index: TrigramIndex::build(std::iter::empty()),
        }
    }

    /// Number of distinct literal tokens in this snapshot.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether `token` appears verbatim in the vocabulary.
    pub fn contains(&self, token: &str) -> bool {
        self.index.contains(token)
    }

    /// All literal tokens of this snapshot, in lexicographic order.
    pub fn all_tokens(&self) -> &[String] {
        self.index.tokens()
    }

    /// Top-`limit` vocabulary tokens most similar to `probe`, descending by
    /// score with lexicographic tie-breaking; candidates below `min_score`
    /// are excluded.
    pub fn similar(&self, probe: &str, limit: usize, min_score: f32) -> Vec<ScoredToken> {
        self.index.similar(probe, limit, min_score)
    }
}

/// Statistics reported by a vocabulary rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildStats {
    /// Distinct documents seen.
    pub documents: usize,
    /// Field entries read.
    pub fields: usize,
    /// Distinct literal tokens in the published vocabulary.
    pub tokens: usize,
    /// Wall-clock time of the rebuild.
    pub elapsed: Duration,
}

/// The vocabulary store: holds the currently published snapshot and
/// performs full-batch rebuilds.
///
/// `rebuild` is the single mutating operation and is safe to run while
/// unlimited concurrent `snapshot` readers are in flight. Rebuilding from
/// an unchanged corpus is idempotent.
pub struct VocabularyStore {
    analyzer: Arc<dyn Analyzer>,
    current: RwLock<Arc<VocabularySnapshot>>,
}

impl std::fmt::Debug for VocabularyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VocabularyStore")
            .field("tokens", &self.snapshot().len())
            .finish()
    }
}

impl VocabularyStore {
    /// Create a store with an empty published vocabulary.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        VocabularyStore {
            analyzer,
            current: RwLock::new(Arc::new(VocabularySnapshot::empty())),
        }
    }

    /// The currently published snapshot. Cheap; safe to hold across a
    /// concurrent rebuild.
    pub fn snapshot(&self) -> Arc<VocabularySnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Clear and repopulate the vocabulary from `corpus`, publishing the
    /// replacement atomically on completion.
    pub fn rebuild(&self, corpus: &dyn CorpusReader) -> Result<RebuildStats> {
        self.rebuild_with_deadline(corpus, None)
    }

    /// Like [`rebuild`](Self::rebuild), but gives up with
    /// [`SedgeError::RebuildTimeout`] once `budget` is exhausted, checked
    /// between entries. On timeout or corpus failure the previously
    /// published snapshot stays in effect.
    pub fn rebuild_with_deadline(
        &self,
        corpus: &dyn CorpusReader,
        budget: Option<Duration>,
    ) -> Result<RebuildStats> {
        let started = Instant::now();
        let deadline = budget.map(|b| started + b);

        let entries = corpus.read_entries().inspect_err(|e| {
            warn!("vocabulary rebuild aborted, previous snapshot kept: {e}");
        })?;

        let mut token_set: AHashSet<String> = AHashSet::new();
        let mut doc_ids: AHashSet<String> = AHashSet::new();
        let mut fields = 0usize;
        for entry in &entries {
            if let Some(deadline) = deadline
                && Instant::now() > deadline
            {
                warn!(
                    "vocabulary rebuild timed out after {} documents, previous snapshot kept",
                    doc_ids.len()
                );
                return Err(SedgeError::RebuildTimeout(doc_ids.len()));
            }
            fields += 1;
            doc_ids.insert(entry.doc_id.clone());
            for token in self.analyzer.literal_tokens(&entry.text) {
                token_set.insert(token.text);
            }
        }

        let index = TrigramIndex::build(token_set);
        let stats = RebuildStats {
            documents: doc_ids.len(),
            fields,
            tokens: index.len(),
            elapsed: started.elapsed(),
        };

        // Single publish point: readers see old-complete or new-complete.
        *self.current.write() = Arc::new(VocabularySnapshot { index });

        info!(
            "vocabulary rebuilt: {} tokens from {} documents ({} fields) in {:?}",
            stats.tokens, stats.documents, stats.fields, stats.elapsed
        );
        debug!("analyzer version: {}", self.analyzer.version());
        Ok(stats)
    }
}
