//! Document data model.
//!
//! A [`Document`] is the unit handed to the indexer: an external identifier
//! plus one or more named text fields, each carrying an importance weight.
//! Weights let the ranking function prefer matches in a primary title over
//! matches in an alternate title without treating the two as different
//! types of field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single text field of a document together with its importance weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    /// The raw field text.
    pub text: String,
    /// Importance weight applied to every term of this field. Must be a
    /// finite value greater than zero; the indexer rejects anything else.
    pub weight: f32,
}

impl FieldValue {
    /// Create a new field value.
    pub fn new<T: Into<String>>(text: T, weight: f32) -> Self {
        FieldValue {
            text: text.into(),
            weight,
        }
    }
}

/// A document to be indexed and searched.
///
/// Fields are kept in a `BTreeMap` so iteration order is deterministic,
/// which keeps term positions stable across re-indexing runs.
///
/// # Example
///
/// ```
/// use sedge::document::Document;
///
/// let doc = Document::new("m42")
///     .with_field("title", "Rush Hour 2", 2.0)
///     .with_field("alt_title", "Heure limite 2", 1.0);
/// assert_eq!(doc.id, "m42");
/// assert_eq!(doc.fields.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// External document identifier.
    pub id: String,
    /// Named weighted text fields.
    pub fields: BTreeMap<String, FieldValue>,
}

impl Document {
    /// Create a new empty document with the given identifier.
    pub fn new<I: Into<String>>(id: I) -> Self {
        Document {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a weighted text field (builder style).
    pub fn with_field<N: Into<String>, T: Into<String>>(
        mut self,
        name: N,
        text: T,
        weight: f32,
    ) -> Self {
        self.fields.insert(name.into(), FieldValue::new(text, weight));
        self
    }

    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}
