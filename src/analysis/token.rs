//! Token representation.

use serde::{Deserialize, Serialize};

/// A single token produced by analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token text (normalized, and stemmed in stemmed mode).
    pub text: String,
    /// Zero-based position of the token within its source text.
    pub position: usize,
}

impl Token {
    /// Create a new token.
    pub fn new<T: Into<String>>(text: T, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }
}
