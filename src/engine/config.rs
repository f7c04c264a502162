//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SedgeError};
use crate::query::ExpansionPolicy;

/// Configuration for a [`SearchEngine`](crate::engine::SearchEngine).
///
/// Validated once at engine construction; configuration problems are fatal
/// there and never surface per-request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Query expansion policy (fan-out limits and similarity threshold).
    pub expansion: ExpansionPolicy,
    /// Result count returned by [`search`](crate::engine::SearchEngine::search)
    /// when the caller does not pass an explicit limit.
    pub default_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            expansion: ExpansionPolicy::default(),
            default_limit: 10,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Check the configuration for fatal problems.
    pub fn validate(&self) -> Result<()> {
        if self.expansion.single_word_limit == 0 || self.expansion.multi_word_limit == 0 {
            return Err(SedgeError::config("expansion limits must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.expansion.min_similarity) {
            return Err(SedgeError::config(format!(
                "min_similarity must be within [0.0, 1.0], got {}",
                self.expansion.min_similarity
            )));
        }
        if self.default_limit == 0 {
            return Err(SedgeError::config("default_limit must be at least 1"));
        }
        Ok(())
    }
}

/// Builder for [`EngineConfig`].
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Alternates fetched for the word of a single-word query.
    pub fn single_word_limit(mut self, limit: usize) -> Self {
        self.config.expansion.single_word_limit = limit;
        self
    }

    /// Alternates fetched per word of a multi-word query.
    pub fn multi_word_limit(mut self, limit: usize) -> Self {
        self.config.expansion.multi_word_limit = limit;
        self
    }

    /// Minimum trigram similarity for fuzzy alternates.
    pub fn min_similarity(mut self, min_similarity: f32) -> Self {
        self.config.expansion.min_similarity = min_similarity;
        self
    }

    /// Default result count.
    pub fn default_limit(mut self, limit: usize) -> Self {
        self.config.default_limit = limit;
        self
    }

    pub fn build(self) -> EngineConfig {
        self.config
    }
}
