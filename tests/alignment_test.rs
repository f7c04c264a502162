//! Index-time and query-time term normalization must use the same stemming
//! configuration. These tests pin that alignment down so any divergence
//! between the two stages fails loudly instead of silently losing recall.

use std::sync::Arc;

use sedge::analysis::{Analyzer, StandardAnalyzer};
use sedge::document::Document;
use sedge::engine::SearchEngine;
use sedge::engine::config::EngineConfig;
use sedge::error::Result;
use sedge::index::DocumentIndexer;

#[test]
fn test_document_with_only_stemmed_form_still_matches() -> Result<()> {
    let engine = SearchEngine::new(EngineConfig::default())?;
    // The stored title already carries the stem form "war"; the query uses
    // the inflected form "wars". Alignment means they meet at "war".
    engine.upsert_document(Document::new("m1").with_field("title", "Star War", 2.0))?;
    engine.rebuild_vocabulary()?;

    let results = engine.search("star wars")?;
    assert_eq!(results.len(), 1, "stemmed-form document must match inflected query");
    assert_eq!(results[0].doc_id, "m1");
    Ok(())
}

#[test]
fn test_inflected_document_matches_differently_inflected_query() -> Result<()> {
    let engine = SearchEngine::new(EngineConfig::default())?;
    engine.upsert_document(Document::new("m1").with_field("title", "Running Stories", 2.0))?;
    engine.rebuild_vocabulary()?;

    // Different surface forms on each side; both sides stem.
    let results = engine.search("run story")?;
    assert_eq!(results.len(), 1, "index-side and query-side stemming must agree");
    Ok(())
}

#[test]
fn test_term_vector_stores_stems_not_surface_forms() -> Result<()> {
    // Guards the indexing half of the invariant: if someone switches the
    // indexer to literal tokens, this fails immediately rather than
    // degrading ranking quietly.
    let analyzer: Arc<dyn Analyzer> = Arc::new(StandardAnalyzer::new());
    let indexer = DocumentIndexer::new(Arc::clone(&analyzer));
    let vector = indexer.index(&Document::new("m1").with_field("title", "Running Wars", 2.0))?;

    assert!(vector.contains("run"));
    assert!(vector.contains("war"));
    assert!(!vector.contains("running"));
    assert!(!vector.contains("wars"));
    Ok(())
}

#[test]
fn test_query_side_uses_the_same_stems_as_index_side() {
    // Guards the query half: whatever the analyzer produces for a document
    // must be exactly what it produces for the same words in a query.
    let analyzer = StandardAnalyzer::new();
    for phrase in ["Running Stories", "Star Wars", "Rush Hour 2", "Crouching Tigers"] {
        let index_side: Vec<String> = analyzer
            .stemmed_terms(phrase)
            .into_iter()
            .map(|t| t.text)
            .collect();
        let query_side: Vec<String> = analyzer
            .stemmed_terms(&phrase.to_lowercase())
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(index_side, query_side, "stemming diverged for {phrase:?}");
    }
}

#[test]
fn test_vocabulary_stays_literal_while_vectors_are_stemmed() -> Result<()> {
    // The two tokenizations serve different purposes and must not be
    // conflated: fuzzy suggestion needs surface spelling, matching needs
    // stems.
    let engine = SearchEngine::new(EngineConfig::default())?;
    engine.upsert_document(Document::new("m1").with_field("title", "Running Wars", 2.0))?;
    engine.rebuild_vocabulary()?;

    let snapshot = engine.vocabulary().snapshot();
    assert!(snapshot.contains("running"));
    assert!(snapshot.contains("wars"));
    assert!(!snapshot.contains("run"));
    assert!(!snapshot.contains("war"));
    Ok(())
}

#[test]
fn test_analyzer_version_is_stable_and_exposed() -> Result<()> {
    let engine = SearchEngine::new(EngineConfig::default())?;
    let version = engine.analyzer_version().to_string();
    assert!(!version.is_empty());
    assert_eq!(version, StandardAnalyzer::new().version());
    Ok(())
}
