//! Trigram-based fuzzy token suggestion.
//!
//! Candidate generation goes through a gram-to-token postings table, so only
//! vocabulary tokens sharing at least one trigram with the probe are scored.
//! Similarity is the Jaccard coefficient over trigram sets: symmetric, 1.0
//! for identical strings, 0.0 for disjoint gram sets.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A suggested vocabulary token with its similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredToken {
    /// The candidate token, exactly as it appears in the vocabulary.
    pub token: String,
    /// Normalized similarity in `[0.0, 1.0]`.
    pub score: f32,
}

impl ScoredToken {
    /// Create a new scored token.
    pub fn new<T: Into<String>>(token: T, score: f32) -> Self {
        ScoredToken {
            token: token.into(),
            score,
        }
    }
}

/// An immutable "find similar tokens" index over a fixed vocabulary.
///
/// Built in one pass from a token set and never mutated afterwards; the
/// owning [`VocabularyStore`](crate::spelling::VocabularyStore) replaces the
/// whole index on rebuild.
#[derive(Debug)]
pub struct TrigramIndex {
    /// Vocabulary tokens, sorted for deterministic candidate ordering.
    tokens: Vec<String>,
    /// Sorted, deduplicated trigrams per token, parallel to `tokens`.
    grams_by_token: Vec<Vec<String>>,
    /// Gram -> indices into `tokens`.
    postings: AHashMap<String, Vec<u32>>,
}

/// Extract the sorted, deduplicated character trigrams of a token.
///
/// Tokens shorter than three characters contribute their whole text as a
/// single gram; an empty gram set would make short words invisible to
/// fuzzy matching.
pub fn trigrams(token: &str) -> Vec<String> {
    let chars: Vec<char> = token.chars().collect();
    let mut grams: Vec<String> = if chars.len() < 3 {
        if chars.is_empty() {
            Vec::new()
        } else {
            vec![token.to_string()]
        }
    } else {
        chars.windows(3).map(|w| w.iter().collect()).collect()
    };
    grams.sort_unstable();
    grams.dedup();
    grams
}

/// Jaccard coefficient of two sorted, deduplicated gram lists.
fn jaccard_sorted(a: &[String], b: &[String]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let mut i = 0;
    let mut j = 0;
    let mut shared = 0usize;
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                shared += 1;
                i += 1;
                j += 1;
            }
        }
    }
    let union = a.len() + b.len() - shared;
    shared as f32 / union as f32
}

impl TrigramIndex {
    /// Build an index from an iterator of vocabulary tokens.
    ///
    /// Duplicates are collapsed and tokens are ordered lexicographically so
    /// the same vocabulary always produces the same index.
    pub fn build<I>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut tokens: Vec<String> = vocabulary.into_iter().collect();
        tokens.sort_unstable();
        tokens.dedup();

        let mut grams_by_token = Vec::with_capacity(tokens.len());
        let mut postings: AHashMap<String, Vec<u32>> = AHashMap::new();
        for (id, token) in tokens.iter().enumerate() {
            let grams = trigrams(token);
            for gram in &grams {
                postings.entry(gram.clone()).or_default().push(id as u32);
            }
            grams_by_token.push(grams);
        }

        TrigramIndex {
            tokens,
            grams_by_token,
            postings,
        }
    }

    /// Number of distinct tokens in the index.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the index holds no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether `token` is present verbatim in the vocabulary.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.binary_search_by(|t| t.as_str().cmp(token)).is_ok()
    }

    /// All vocabulary tokens, in lexicographic order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Return up to `limit` vocabulary tokens most similar to `probe`.
    ///
    /// Results are ordered by descending score, ties broken by ascending
    /// token, and candidates scoring below `min_score` are excluded. An
    /// identical vocabulary token scores exactly 1.0 and is returned like
    /// any other candidate.
    pub fn similar(&self, probe: &str, limit: usize, min_score: f32) -> Vec<ScoredToken> {
        if limit == 0 {
            return Vec::new();
        }
        let probe_grams = trigrams(probe);
        if probe_grams.is_empty() {
            return Vec::new();
        }

        let mut candidate_ids: Vec<u32> = probe_grams
            .iter()
            .filter_map(|gram| self.postings.get(gram))
            .flatten()
            .copied()
            .collect();
        candidate_ids.sort_unstable();
        candidate_ids.dedup();

        let mut scored: Vec<ScoredToken> = Vec::new();
        for id in candidate_ids {
            let id = id as usize;
            let score = jaccard_sorted(&probe_grams, &self.grams_by_token[id]);
            if score >= min_score && score > 0.0 {
                scored.push(ScoredToken::new(self.tokens[id].clone(), score));
            }
        }

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.token.cmp(&b.token))
        });
        scored.truncate(limit);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(tokens: &[&str]) -> TrigramIndex {
        TrigramIndex::build(tokens.iter().map(|t| t.to_string()))
    }

    #[test]
    fn test_identical_token_scores_one() {
        let idx = index(&["rush", "russia", "rust"]);
        let results = idx.similar("rush", 10, 0.0);
        assert_eq!(results[0].token, "rush");
        assert_eq!(results[0].score, 1.0);
    }

    #[test]
    fn test_results_sorted_non_increasing() {
        let idx = index(&["rush", "russia", "rust", "crush", "brush"]);
        let results = idx.similar("russh", 10, 0.0);
        assert!(!results.is_empty());
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_misspelling_finds_neighbor() {
        let idx = index(&["rush", "russia", "rust"]);
        let results = idx.similar("russh", 10, 0.0);
        assert!(results.iter().any(|s| s.token == "rush"));
    }

    #[test]
    fn test_ties_broken_lexicographically() {
        // "abcx" and "abcz" share the same gram overlap with "abc".
        let idx = index(&["abcz", "abcx"]);
        let results = idx.similar("abc", 10, 0.0);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].score, results[1].score);
        assert!(results[0].token < results[1].token);
    }

    #[test]
    fn test_threshold_excludes_weak_candidates() {
        let idx = index(&["rush", "crushing"]);
        let all = idx.similar("rush", 10, 0.0);
        let strict = idx.similar("rush", 10, 0.9);
        assert!(all.len() > strict.len());
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].token, "rush");
    }

    #[test]
    fn test_limit_caps_results() {
        let idx = index(&["rush", "rusty", "rust", "crush", "brush"]);
        let results = idx.similar("rush", 2, 0.0);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_disjoint_tokens_score_zero() {
        let idx = index(&["zzzzz"]);
        assert!(idx.similar("aaaa", 10, 0.0).is_empty());
    }

    #[test]
    fn test_short_tokens_remain_matchable() {
        let idx = index(&["io", "ion"]);
        let results = idx.similar("io", 10, 0.0);
        assert!(results.iter().any(|s| s.token == "io" && s.score == 1.0));
    }
}
