//! Search execution: boolean evaluation and ranking.
//!
//! The executor stems every candidate of every expansion group with the
//! same analyzer used at indexing time, immediately before matching. This
//! is the alignment invariant the engine is built around: the vocabulary
//! stays literal for fuzzy suggestion, but both sides of a term comparison
//! always go through one stemming configuration.
//!
//! # Ranking
//!
//! A document matches when every group has at least one stemmed candidate
//! present in its term vector. The score is
//!
//! ```text
//! sum over groups of
//!     max over matching candidates of
//!         candidate_weight * sum over postings of
//!             field_weight * 1 / (1 + 0.1 * position)
//! all divided by (1 + ln(1 + document_length))
//! ```
//!
//! Monotonic in field weight and in term frequency; early positions count
//! slightly more; the length divisor keeps long documents from winning on
//! volume alone. `candidate_weight` is the trigram similarity of the
//! alternate (verbatim words are fixed at 1.0), so exact words outrank
//! fuzzy alternates with equal corpus statistics.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::Analyzer;
use crate::index::{DocumentStore, TermVector};
use crate::query::CompiledQuery;

/// A ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// External document identifier.
    pub doc_id: String,
    /// Rank score; strictly positive for any match.
    pub score: f32,
}

/// One OR-group after stemming: (stemmed term, candidate weight) pairs.
type StemmedGroup = Vec<(String, f32)>;

/// Evaluates compiled queries against a document store.
#[derive(Debug, Clone)]
pub struct Searcher {
    analyzer: Arc<dyn Analyzer>,
}

impl Searcher {
    /// Create a searcher that stems with `analyzer`. This must be the same
    /// analyzer the document store indexes with.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Searcher { analyzer }
    }

    /// Execute `compiled` against `store`, returning up to `limit` results
    /// ordered by descending score, ties by ascending document id.
    ///
    /// A query with zero groups yields zero results, never "everything".
    pub fn execute(
        &self,
        compiled: &CompiledQuery,
        store: &dyn DocumentStore,
        limit: usize,
    ) -> Vec<SearchResult> {
        if compiled.is_empty() || limit == 0 {
            return Vec::new();
        }

        let groups = self.stem_groups(compiled);
        debug!(
            "executing {} group(s), fan-out {:?}",
            groups.len(),
            groups.iter().map(|g| g.len()).collect::<Vec<_>>()
        );

        let mut results: Vec<SearchResult> = Vec::new();
        store.for_each_vector(&mut |doc_id, vector| {
            if let Some(score) = Self::score_document(&groups, vector) {
                results.push(SearchResult {
                    doc_id: doc_id.to_string(),
                    score,
                });
            }
        });

        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.doc_id.cmp(&b.doc_id))
        });
        results.truncate(limit);
        results
    }

    /// Stem every candidate of every group, deduplicating within a group
    /// after stemming. Distinct literal alternates may collapse to one
    /// stem; the highest candidate weight wins.
    fn stem_groups(&self, compiled: &CompiledQuery) -> Vec<StemmedGroup> {
        compiled
            .groups
            .iter()
            .map(|group| {
                let mut stemmed: StemmedGroup = Vec::with_capacity(group.candidates.len());
                for candidate in &group.candidates {
                    let term = self
                        .analyzer
                        .stemmed_terms(&candidate.token)
                        .into_iter()
                        .next()
                        .map(|t| t.text)
                        .unwrap_or_else(|| candidate.token.clone());
                    match stemmed.iter_mut().find(|(t, _)| *t == term) {
                        Some((_, weight)) => *weight = weight.max(candidate.score),
                        None => stemmed.push((term, candidate.score)),
                    }
                }
                stemmed
            })
            .collect()
    }

    /// Score one document, or `None` when some group has no match in it.
    fn score_document(groups: &[StemmedGroup], vector: &TermVector) -> Option<f32> {
        let mut total = 0.0f32;
        for group in groups {
            let mut best: Option<f32> = None;
            for (term, candidate_weight) in group {
                if let Some(postings) = vector.postings(term) {
                    let contribution: f32 = candidate_weight
                        * postings
                            .iter()
                            .map(|p| p.weight / (1.0 + 0.1 * p.position as f32))
                            .sum::<f32>();
                    best = Some(best.map_or(contribution, |b: f32| b.max(contribution)));
                }
            }
            total += best?;
        }
        Some(total / (1.0 + (1.0 + vector.length() as f32).ln()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StandardAnalyzer;
    use crate::document::Document;
    use crate::index::MemoryDocumentStore;
    use crate::query::{ExpansionGroup, QueryCompiler};
    use crate::spelling::suggest::ScoredToken;

    fn store_with(titles: &[(&str, &str)]) -> MemoryDocumentStore {
        let store = MemoryDocumentStore::new(Arc::new(StandardAnalyzer::new()));
        for (id, title) in titles {
            store
                .upsert(Document::new(*id).with_field("title", *title, 2.0))
                .unwrap();
        }
        store
    }

    fn group(candidates: &[(&str, f32)]) -> ExpansionGroup {
        ExpansionGroup {
            candidates: candidates
                .iter()
                .map(|(t, s)| ScoredToken::new(*t, *s))
                .collect(),
        }
    }

    fn searcher() -> Searcher {
        Searcher::new(Arc::new(StandardAnalyzer::new()))
    }

    #[test]
    fn test_all_groups_must_match() {
        let store = store_with(&[("m1", "Rush Hour 2"), ("m2", "Rush Job")]);
        let compiled = CompiledQuery {
            groups: vec![group(&[("rush", 1.0)]), group(&[("hour", 1.0)])],
        };
        let results = searcher().execute(&compiled, &store, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].doc_id, "m1");
        assert!(results[0].score > 0.0);
    }

    #[test]
    fn test_any_candidate_in_group_matches() {
        let store = store_with(&[("m1", "Star Wars")]);
        let compiled = CompiledQuery {
            groups: vec![
                group(&[("star", 1.0)]),
                // Verbatim "warps" misses, fuzzy alternate "wars" hits.
                group(&[("warps", 1.0), ("wars", 0.25)]),
            ],
        };
        let results = searcher().execute(&compiled, &store, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].doc_id, "m1");
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let store = store_with(&[("m1", "Rush Hour 2")]);
        let compiled = CompiledQuery { groups: vec![] };
        assert!(searcher().execute(&compiled, &store, 10).is_empty());
    }

    #[test]
    fn test_verbatim_match_outranks_fuzzy_match() {
        let store = store_with(&[("a_exact", "Rush Hour"), ("b_fuzzy", "Crush Hour")]);
        // One group where "rush" is verbatim and "crush" is an alternate.
        let compiled = CompiledQuery {
            groups: vec![
                group(&[("rush", 1.0), ("crush", 0.4)]),
                group(&[("hour", 1.0)]),
            ],
        };
        let results = searcher().execute(&compiled, &store, 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].doc_id, "a_exact");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_tie_broken_by_document_id() {
        let store = store_with(&[("m2", "Alien"), ("m1", "Alien")]);
        let compiled = CompiledQuery {
            groups: vec![group(&[("alien", 1.0)])],
        };
        let results = searcher().execute(&compiled, &store, 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].doc_id, "m1");
        assert_eq!(results[1].doc_id, "m2");
    }

    #[test]
    fn test_limit_truncates() {
        let store = store_with(&[("m1", "Alien"), ("m2", "Alien"), ("m3", "Alien")]);
        let compiled = CompiledQuery {
            groups: vec![group(&[("alien", 1.0)])],
        };
        assert_eq!(searcher().execute(&compiled, &store, 2).len(), 2);
        assert!(searcher().execute(&compiled, &store, 0).is_empty());
    }

    #[test]
    fn test_alternates_collapsing_to_one_stem_keep_max_weight() {
        let compiled = CompiledQuery {
            // "wars" and "war" both stem to "war".
            groups: vec![group(&[("warps", 1.0), ("wars", 0.25), ("war", 0.6)])],
        };
        let groups = searcher().stem_groups(&compiled);
        assert_eq!(groups.len(), 1);
        let war = groups[0].iter().find(|(t, _)| t == "war").unwrap();
        assert_eq!(war.1, 0.6);
        // No duplicate stems inside the group.
        let mut terms: Vec<_> = groups[0].iter().map(|(t, _)| t.clone()).collect();
        terms.sort();
        terms.dedup();
        assert_eq!(terms.len(), groups[0].len());
    }

    #[test]
    fn test_compiled_query_from_compiler_round_trips() {
        // Full pipeline sanity: compile against a vocabulary built from the
        // store, then execute against the same store.
        let store = store_with(&[("m1", "Rush Hour 2"), ("m2", "Rush Hour 3")]);
        let vocab = crate::spelling::VocabularyStore::new(Arc::new(StandardAnalyzer::new()));
        vocab.rebuild(&store).unwrap();

        let compiled = QueryCompiler::default().compile("russh hour", &vocab.snapshot());
        let results = searcher().execute(&compiled, &store, 10);
        assert_eq!(results.len(), 2);
    }
}
