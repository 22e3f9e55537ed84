//! Semantic memory: concept vectors with linear-scan similarity lookup.
//!
//! Embeddings are a deterministic toy: `[byte length, byte sum mod 1000]`.
//! Queries score every stored vector with `1 / (1 + euclidean distance)` and
//! return the top-k. There is deliberately no index, eviction, or uniqueness
//! constraint at this scale.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored concept with its vector and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticEntry {
    pub concept: String,
    pub vector: Vec<f32>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    pub timestamp: DateTime<Utc>,
}

/// A query hit: the entry plus its similarity score.
#[derive(Debug, Clone)]
pub struct SemanticHit {
    pub concept: String,
    pub similarity: f32,
}

/// Append-only concept-vector store.
#[derive(Debug, Default)]
pub struct SemanticMemory {
    entries: Vec<SemanticEntry>,
}

/// Deterministic toy embedding: byte length and byte sum modulo 1000.
pub fn embed(text: &str) -> Vec<f32> {
    let sum: u64 = text.bytes().map(u64::from).sum();
    vec![text.len() as f32, (sum % 1000) as f32]
}

fn similarity(a: &[f32], b: &[f32]) -> f32 {
    let dist: f32 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt();
    1.0 / (1.0 + dist)
}

impl SemanticMemory {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a concept with its embedding and optional metadata.
    pub fn store(&mut self, concept: impl Into<String>, metadata: BTreeMap<String, String>) {
        let concept = concept.into();
        let vector = embed(&concept);
        tracing::debug!(concept = %concept, "semantic entry stored");
        self.entries.push(SemanticEntry {
            concept,
            vector,
            metadata,
            timestamp: Utc::now(),
        });
    }

    /// Store a concept with no metadata.
    pub fn store_concept(&mut self, concept: impl Into<String>) {
        self.store(concept, BTreeMap::new());
    }

    /// Top-k entries most similar to the query text, descending by score.
    pub fn query(&self, text: &str, k: usize) -> Vec<SemanticHit> {
        let query_vec = embed(text);
        let mut scored: Vec<SemanticHit> = self
            .entries
            .iter()
            .map(|entry| SemanticHit {
                concept: entry.concept.clone(),
                similarity: similarity(&query_vec, &entry.vector),
            })
            .collect();
        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);
        scored
    }

    /// All stored entries, oldest first.
    pub fn entries(&self) -> &[SemanticEntry] {
        &self.entries
    }

    /// Number of stored concepts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_is_deterministic() {
        assert_eq!(embed("focus"), embed("focus"));
        assert_eq!(embed("abc"), vec![3.0, ((97u64 + 98 + 99) % 1000) as f32]);
    }

    #[test]
    fn identical_text_scores_highest() {
        let mut mem = SemanticMemory::new();
        mem.store_concept("organize workspace");
        mem.store_concept("completely unrelated and much longer concept text");

        let hits = mem.query("organize workspace", 2);
        assert_eq!(hits[0].concept, "organize workspace");
        assert!((hits[0].similarity - 1.0).abs() < 1e-6);
        assert!(hits[0].similarity > hits[1].similarity);
    }

    #[test]
    fn query_respects_k() {
        let mut mem = SemanticMemory::new();
        for i in 0..5 {
            mem.store_concept(format!("concept {i}"));
        }
        assert_eq!(mem.query("concept", 3).len(), 3);
    }

    #[test]
    fn query_on_empty_store_is_empty() {
        let mem = SemanticMemory::new();
        assert!(mem.query("anything", 3).is_empty());
    }

    #[test]
    fn metadata_is_kept() {
        let mut mem = SemanticMemory::new();
        let mut meta = BTreeMap::new();
        meta.insert("source".to_string(), "goal".to_string());
        mem.store("plan the week", meta);
        assert_eq!(
            mem.entries()[0].metadata.get("source").map(|s| s.as_str()),
            Some("goal")
        );
    }
}
