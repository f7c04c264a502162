//! Query compilation: raw text to an AND-of-OR boolean expression.
//!
//! Each whitespace-separated input word becomes one [`ExpansionGroup`]: the
//! verbatim word first, followed by fuzzy alternates drawn from the current
//! vocabulary snapshot. Groups are OR inside, AND between, in input order.
//! Compilation is a pure function of the raw text, the vocabulary snapshot
//! and the expansion policy; nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::spelling::dictionary::VocabularySnapshot;
use crate::spelling::suggest::ScoredToken;

/// Fan-out and threshold knobs for query expansion.
///
/// These are empirically tuned policy values, not structural constants:
/// raising the limits trades query-expression size and latency for recall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionPolicy {
    /// Alternates fetched for the word of a single-word query. Single-word
    /// queries are more prone to noisy alternates, so they are capped
    /// tighter.
    pub single_word_limit: usize,
    /// Alternates fetched per word of a multi-word query.
    pub multi_word_limit: usize,
    /// Minimum trigram similarity for an alternate to be considered.
    pub min_similarity: f32,
}

impl Default for ExpansionPolicy {
    fn default() -> Self {
        ExpansionPolicy {
            single_word_limit: 3,
            multi_word_limit: 6,
            min_similarity: 0.2,
        }
    }
}

/// The acceptable alternate spellings for one query word, combined
/// disjunctively.
///
/// The verbatim input word is always the first candidate, at weight 1.0:
/// the exact user word is at least as trustworthy as any fuzzy alternate,
/// and its weight biases ranking toward verbatim matches. Candidates are
/// deduplicated and the group is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionGroup {
    /// Candidates in descending trust order; `candidates[0]` is verbatim.
    pub candidates: Vec<ScoredToken>,
}

impl ExpansionGroup {
    /// The verbatim input word this group was expanded from.
    pub fn verbatim(&self) -> &str {
        // Construction guarantees at least the verbatim candidate.
        &self.candidates[0].token
    }
}

/// The full boolean expression compiled from a raw query:
/// `(group1) AND (group2) AND ... AND (groupN)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledQuery {
    /// One group per input word, in input order.
    pub groups: Vec<ExpansionGroup>,
}

impl CompiledQuery {
    /// Whether the query has no groups. Callers must treat this as
    /// "no results", never as "match everything".
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Compiles raw user input against a vocabulary snapshot.
#[derive(Debug, Clone, Default)]
pub struct QueryCompiler {
    policy: ExpansionPolicy,
}

impl QueryCompiler {
    /// Create a compiler with the given expansion policy.
    pub fn new(policy: ExpansionPolicy) -> Self {
        QueryCompiler { policy }
    }

    /// The compiler's expansion policy.
    pub fn policy(&self) -> &ExpansionPolicy {
        &self.policy
    }

    /// Compile `raw_text` into an AND-of-OR expression over `snapshot`.
    ///
    /// Words are lowercased to match vocabulary normalization but are not
    /// stemmed here: fuzzy matching operates on surface spelling, because
    /// misspellings are surface-level phenomena. Empty input compiles to a
    /// query with zero groups.
    pub fn compile(&self, raw_text: &str, snapshot: &VocabularySnapshot) -> CompiledQuery {
        let words: Vec<String> = raw_text
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect();

        let limit = if words.len() == 1 {
            self.policy.single_word_limit
        } else {
            self.policy.multi_word_limit
        };

        let groups = words
            .into_iter()
            .map(|word| self.expand_word(word, limit, snapshot))
            .collect();

        CompiledQuery { groups }
    }

    /// Build one group: verbatim word first, then up to `limit` similar
    /// vocabulary tokens by descending score, without duplicates.
    fn expand_word(
        &self,
        word: String,
        limit: usize,
        snapshot: &VocabularySnapshot,
    ) -> ExpansionGroup {
        let alternates = snapshot.similar(&word, limit, self.policy.min_similarity);

        let mut candidates = Vec::with_capacity(1 + alternates.len());
        candidates.push(ScoredToken::new(word, 1.0));
        for alternate in alternates {
            if alternate.token != candidates[0].token {
                candidates.push(alternate);
            }
        }

        ExpansionGroup { candidates }
    }
}
