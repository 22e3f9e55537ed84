//! Episodic memory: append-only log of context → action → result records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::Context;

/// One experience record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub timestamp: DateTime<Utc>,
    /// Snapshot of the context at the time of the action.
    pub context: Context,
    pub action: String,
    pub result: Option<String>,
}

/// Append-only experience log. Entries are never pruned.
#[derive(Debug, Default)]
pub struct EpisodicMemory {
    episodes: Vec<Episode>,
}

impl EpisodicMemory {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record with the current timestamp.
    pub fn record(&mut self, context: &Context, action: impl Into<String>, result: Option<String>) {
        let action = action.into();
        tracing::debug!(action = %action, "episode recorded");
        self.episodes.push(Episode {
            timestamp: Utc::now(),
            context: context.clone(),
            action,
            result,
        });
    }

    /// All episodes, oldest first.
    pub fn all(&self) -> &[Episode] {
        &self.episodes
    }

    /// The n most recent episodes, newest last.
    pub fn recent(&self, n: usize) -> &[Episode] {
        let start = self.episodes.len().saturating_sub(n);
        &self.episodes[start..]
    }

    /// Number of recorded episodes.
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}
