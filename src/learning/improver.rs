//! Self-improvement: reward scaling driven by evaluation verdicts.
//!
//! Excellent protocols are reinforced (reward × 1.1), poor ones penalized
//! (reward × 0.8), both clamped into the reward domain. One improvement pass
//! over a manager produces a per-protocol report.

use serde::{Deserialize, Serialize};

use crate::manager::ProtocolManager;

use super::evaluator::{evaluate, Verdict};

/// Reinforcement factor applied to excellent protocols.
pub const REINFORCE_FACTOR: f64 = 1.1;
/// Penalty factor applied to poor protocols.
pub const PENALTY_FACTOR: f64 = 0.8;

/// One row of an improvement report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementEntry {
    pub protocol: String,
    pub verdict: Verdict,
    pub reward: f64,
    pub executions: u64,
}

/// Run one improvement pass over all registered protocols.
pub fn improve(manager: &mut ProtocolManager) -> Vec<ImprovementEntry> {
    let mut report = Vec::with_capacity(manager.len());

    for protocol in manager.protocols_mut() {
        let verdict = evaluate(protocol);
        match verdict {
            Verdict::Poor => {
                protocol.scale_reward(PENALTY_FACTOR);
                tracing::warn!(protocol = protocol.name(), reward = protocol.reward(), "protocol degraded");
            }
            Verdict::Excellent => {
                protocol.scale_reward(REINFORCE_FACTOR);
                tracing::info!(protocol = protocol.name(), reward = protocol.reward(), "protocol reinforced");
            }
            Verdict::Acceptable | Verdict::InsufficientData => {}
        }

        report.push(ImprovementEntry {
            protocol: protocol.name().to_string(),
            verdict,
            reward: protocol.reward(),
            executions: protocol.executions(),
        });
    }

    report
}
