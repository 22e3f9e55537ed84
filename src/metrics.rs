//! Process-wide activity counters, exposed via `/system/health`.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Monotonic counters shared across the server.
#[derive(Debug, Default)]
pub struct Metrics {
    goals_completed: AtomicU64,
    learning_cycles: AtomicU64,
    protocol_mutations: AtomicU64,
}

/// Serializable snapshot of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub goals_completed: u64,
    pub learning_cycles: u64,
    pub protocol_mutations: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_goal(&self) {
        self.goals_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_learning(&self) {
        self.learning_cycles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_mutations(&self, count: u64) {
        self.protocol_mutations.fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            goals_completed: self.goals_completed.load(Ordering::Relaxed),
            learning_cycles: self.learning_cycles.load(Ordering::Relaxed),
            protocol_mutations: self.protocol_mutations.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = Metrics::new();
        metrics.record_goal();
        metrics.record_goal();
        metrics.record_learning();
        metrics.record_mutations(3);

        let snap = metrics.snapshot();
        assert_eq!(snap.goals_completed, 2);
        assert_eq!(snap.learning_cycles, 1);
        assert_eq!(snap.protocol_mutations, 3);
    }
}
