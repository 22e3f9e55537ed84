//! Protocol performance evaluation.

use serde::{Deserialize, Serialize};

use crate::protocol::Protocol;

/// Minimum executions before a verdict other than `InsufficientData`.
const MIN_EXECUTIONS: u64 = 3;

/// Performance verdict for a single protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Fewer than three executions — nothing to conclude yet.
    InsufficientData,
    /// Reward at or above 4.
    Excellent,
    /// Reward at or above 2.
    Acceptable,
    /// Reward below 2.
    Poor,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::InsufficientData => "insufficient_data",
            Verdict::Excellent => "excellent",
            Verdict::Acceptable => "acceptable",
            Verdict::Poor => "poor",
        };
        f.write_str(s)
    }
}

/// Judge a protocol's performance from its reward and execution count.
pub fn evaluate(protocol: &Protocol) -> Verdict {
    if protocol.executions() < MIN_EXECUTIONS {
        return Verdict::InsufficientData;
    }
    if protocol.reward() >= 4.0 {
        return Verdict::Excellent;
    }
    if protocol.reward() >= 2.0 {
        return Verdict::Acceptable;
    }
    Verdict::Poor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;

    fn executed(reward: f64, times: usize) -> Protocol {
        let mut p = Protocol::new("Test", |_| true, |_| "act".to_string(), reward);
        let ctx = Context::default();
        for _ in 0..times {
            p.execute(&ctx);
        }
        p
    }

    #[test]
    fn fewer_than_three_runs_is_insufficient() {
        assert_eq!(evaluate(&executed(4.5, 2)), Verdict::InsufficientData);
    }

    #[test]
    fn thresholds_partition_the_reward_range() {
        assert_eq!(evaluate(&executed(4.0, 3)), Verdict::Excellent);
        assert_eq!(evaluate(&executed(3.9, 3)), Verdict::Acceptable);
        assert_eq!(evaluate(&executed(2.0, 3)), Verdict::Acceptable);
        assert_eq!(evaluate(&executed(1.9, 3)), Verdict::Poor);
    }
}
