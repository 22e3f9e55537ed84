//! Memory system: semantic concept vectors plus an append-only episodic log.
//!
//! Both stores grow without bound for the process lifetime — persistence
//! guarantees and eviction are explicitly out of scope at this scale. The
//! combined dump is what `GET /memory` returns, and it can be exported to
//! disk as JSON.

pub mod episodic;
pub mod semantic;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::error::MemoryError;

pub use episodic::{Episode, EpisodicMemory};
pub use semantic::{embed, SemanticEntry, SemanticHit, SemanticMemory};

/// Combined semantic + episodic memory, as composed into the agent.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub semantic: SemanticMemory,
    pub episodic: EpisodicMemory,
}

/// JSON-serializable view of all memory contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryDump {
    pub semantic: Vec<SemanticEntry>,
    pub episodic: Vec<Episode>,
}

impl MemoryStore {
    /// Create an empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a semantic concept with metadata.
    pub fn add_semantic(&mut self, concept: impl Into<String>, metadata: BTreeMap<String, String>) {
        self.semantic.store(concept, metadata);
    }

    /// Append an episodic record.
    pub fn add_episodic(
        &mut self,
        context: &Context,
        action: impl Into<String>,
        result: Option<String>,
    ) {
        self.episodic.record(context, action, result);
    }

    /// Serializable snapshot of everything stored.
    pub fn dump(&self) -> MemoryDump {
        MemoryDump {
            semantic: self.semantic.entries().to_vec(),
            episodic: self.episodic.all().to_vec(),
        }
    }

    /// Write the full dump to a file as pretty-printed JSON.
    pub fn export_json(&self, path: &Path) -> Result<(), MemoryError> {
        let dump = self.dump();
        let json =
            serde_json::to_string_pretty(&dump).map_err(|e| MemoryError::Serialize {
                message: e.to_string(),
            })?;
        std::fs::write(path, json).map_err(|source| MemoryError::Export {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), "memory exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_includes_both_stores() {
        let mut mem = MemoryStore::new();
        mem.add_semantic("a concept", BTreeMap::new());
        mem.add_episodic(&Context::default(), "did something", None);

        let dump = mem.dump();
        assert_eq!(dump.semantic.len(), 1);
        assert_eq!(dump.episodic.len(), 1);
    }

    #[test]
    fn export_writes_valid_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("memory.json");

        let mut mem = MemoryStore::new();
        mem.add_episodic(&Context::new("happy", "create"), "built", Some("ok".into()));
        mem.export_json(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let back: MemoryDump = serde_json::from_str(&content).unwrap();
        assert_eq!(back.episodic.len(), 1);
        assert_eq!(back.episodic[0].action, "built");
    }

    #[test]
    fn export_to_bad_path_errors() {
        let mem = MemoryStore::new();
        let result = mem.export_json(Path::new("/nonexistent-dir/memory.json"));
        assert!(matches!(result, Err(MemoryError::Export { .. })));
    }
}
