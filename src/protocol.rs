//! Protocols: named condition/action/reward triples, the unit of behavior.
//!
//! A protocol applies when its condition holds for the current [`Context`];
//! executing it runs the action and returns a human-readable result. The
//! reward scalar is adjusted over time by the learning subsystem and drives
//! selection in the [`ProtocolManager`](crate::manager::ProtocolManager).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::Context;

/// Lower bound of the reward domain.
pub const REWARD_MIN: f64 = 0.0;
/// Upper bound of the reward domain.
pub const REWARD_MAX: f64 = 5.0;

/// EMA learning rate for outcome-score observations.
const SCORE_ALPHA: f64 = 0.3;

/// Predicate deciding whether a protocol applies to a context.
pub type Condition = Arc<dyn Fn(&Context) -> bool + Send + Sync>;
/// Behavior executed when a protocol is selected.
pub type Action = Arc<dyn Fn(&Context) -> String + Send + Sync>;

/// A candidate behavior: condition, action, and a learned reward scalar.
///
/// Identity is by name. Cloning shares the condition and action closures.
#[derive(Clone)]
pub struct Protocol {
    name: String,
    condition: Condition,
    action: Action,
    reward: f64,
    executions: u64,
}

impl Protocol {
    /// Create a protocol. The reward is clamped into `[REWARD_MIN, REWARD_MAX]`.
    pub fn new(
        name: impl Into<String>,
        condition: impl Fn(&Context) -> bool + Send + Sync + 'static,
        action: impl Fn(&Context) -> String + Send + Sync + 'static,
        reward: f64,
    ) -> Self {
        Self {
            name: name.into(),
            condition: Arc::new(condition),
            action: Arc::new(action),
            reward: reward.clamp(REWARD_MIN, REWARD_MAX),
            executions: 0,
        }
    }

    /// Unique name within a manager.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current reward scalar in `[0, 5]`.
    pub fn reward(&self) -> f64 {
        self.reward
    }

    /// How many times this protocol has been executed.
    pub fn executions(&self) -> u64 {
        self.executions
    }

    /// Whether this protocol applies to the given context.
    pub fn matches(&self, context: &Context) -> bool {
        (self.condition)(context)
    }

    /// Run the action and count the execution.
    pub fn execute(&mut self, context: &Context) -> String {
        self.executions += 1;
        (self.action)(context)
    }

    /// Fold an outcome score into the reward via exponential moving average.
    pub fn observe_score(&mut self, score: f64) {
        let score = score.clamp(REWARD_MIN, REWARD_MAX);
        self.reward = (SCORE_ALPHA * score + (1.0 - SCORE_ALPHA) * self.reward)
            .clamp(REWARD_MIN, REWARD_MAX);
        tracing::debug!(protocol = %self.name, score, reward = self.reward, "reward observed");
    }

    /// Multiply the reward by a factor, clamped into the valid range.
    ///
    /// Used by the improver (×1.1 reinforcement, ×0.8 penalty).
    pub fn scale_reward(&mut self, factor: f64) {
        self.reward = (self.reward * factor).clamp(REWARD_MIN, REWARD_MAX);
    }

    /// Overwrite the reward, clamped into the valid range.
    ///
    /// Used by evolution when jittering mutant rewards.
    pub fn set_reward(&mut self, reward: f64) {
        self.reward = reward.clamp(REWARD_MIN, REWARD_MAX);
    }

    /// Derive a renamed copy sharing this protocol's condition and action.
    pub fn variant(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: Arc::clone(&self.condition),
            action: Arc::clone(&self.action),
            reward: self.reward,
            executions: 0,
        }
    }

    /// Serializable view of this protocol's learning state.
    pub fn stats(&self) -> ProtocolStats {
        ProtocolStats {
            name: self.name.clone(),
            reward: self.reward,
            executions: self.executions,
        }
    }
}

impl std::fmt::Debug for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Protocol")
            .field("name", &self.name)
            .field("reward", &self.reward)
            .field("executions", &self.executions)
            .finish()
    }
}

/// Name / reward / executions row, as exposed by the API and dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolStats {
    pub name: String,
    pub reward: f64,
    pub executions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn happy_protocol() -> Protocol {
        Protocol::new(
            "Happy",
            |ctx| ctx.emotion == "happy",
            |_| "Spreading joy!".to_string(),
            3.0,
        )
    }

    #[test]
    fn matches_against_context() {
        let p = happy_protocol();
        assert!(p.matches(&Context::new("happy", "create")));
        assert!(!p.matches(&Context::new("sad", "create")));
    }

    #[test]
    fn execute_counts_and_returns_action() {
        let mut p = happy_protocol();
        let result = p.execute(&Context::new("happy", "create"));
        assert_eq!(p.executions(), 1);
        assert!(result.contains("joy"));
    }

    #[test]
    fn observe_score_moves_reward_toward_score() {
        let mut p = happy_protocol();
        let before = p.reward();
        p.observe_score(5.0);
        assert!(p.reward() > before);
        assert!((p.reward() - (0.3 * 5.0 + 0.7 * before)).abs() < 1e-9);

        let mid = p.reward();
        p.observe_score(1.0);
        assert!(p.reward() < mid);
    }

    #[test]
    fn rewards_are_clamped() {
        let p = Protocol::new("Over", |_| true, |_| String::new(), 9.0);
        assert_eq!(p.reward(), REWARD_MAX);

        let mut q = happy_protocol();
        q.scale_reward(10.0);
        assert_eq!(q.reward(), REWARD_MAX);
        q.set_reward(-1.0);
        assert_eq!(q.reward(), REWARD_MIN);
    }

    #[test]
    fn variant_shares_behavior_but_resets_executions() {
        let mut p = happy_protocol();
        p.execute(&Context::new("happy", "create"));
        let v = p.variant("Happy-mutant");
        assert_eq!(v.name(), "Happy-mutant");
        assert_eq!(v.executions(), 0);
        assert_eq!(v.reward(), p.reward());
        assert!(v.matches(&Context::new("happy", "none")));
    }
}
