//! The agent: composes context, protocols, memory, cognition, and governance.
//!
//! One agent instance owns one [`Context`], mutated in place by updates. The
//! run cycle is: think → select best protocol → governance check → execute →
//! record the episode. Goal execution plans steps and runs the cycle once per
//! step, reflecting each outcome into the selected protocol's reward.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cognition::CognitionEngine;
use crate::context::{Context, ContextUpdate};
use crate::error::AgentError;
use crate::governance::{Governance, VETOED_ACTION};
use crate::learning::reflect;
use crate::manager::ProtocolManager;
use crate::memory::MemoryStore;
use crate::planner::Planner;
use crate::protocol::ProtocolStats;
use crate::protocols::standard_protocols;

/// Action reported when no protocol condition holds.
pub const BASELINE_ACTION: &str = "No specific protocol matched. Maintaining baseline behavior.";

/// Result of one agent run cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// The cognition engine's assessment of the context.
    pub thought: String,
    /// Name of the selected protocol, `None` when nothing matched.
    pub protocol: Option<String>,
    /// What the action produced (or the baseline text).
    pub action: String,
    /// The selected protocol's reward, `None` when nothing matched.
    pub reward: Option<f64>,
}

/// One executed step of a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalStep {
    pub step: String,
    pub result: RunReport,
}

/// Result of executing a goal end to end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalReport {
    pub goal: String,
    /// Concepts recalled from semantic memory while planning.
    pub recalled: Vec<String>,
    pub steps: Vec<GoalStep>,
    /// Protocol learning state after the goal ran.
    pub protocols: Vec<ProtocolStats>,
}

/// An adaptive agent over a protocol set.
pub struct Agent {
    context: Context,
    manager: ProtocolManager,
    memory: MemoryStore,
    cognition: CognitionEngine,
    governance: Governance,
    planner: Planner,
}

impl Agent {
    /// Create an agent from a protocol manager and cognition engine.
    pub fn new(manager: ProtocolManager, cognition: CognitionEngine) -> Self {
        Self {
            context: Context::default(),
            manager,
            memory: MemoryStore::new(),
            cognition,
            governance: Governance::default(),
            planner: Planner::new(),
        }
    }

    /// Create an agent with the built-in protocol set registered.
    pub fn standard(cognition: CognitionEngine) -> Self {
        let mut manager = ProtocolManager::new();
        for protocol in standard_protocols() {
            manager.register(protocol);
        }
        Self::new(manager, cognition)
    }

    /// Apply a context update and record it in semantic memory.
    ///
    /// Returns the new context snapshot.
    pub fn update_context(&mut self, update: &ContextUpdate) -> Context {
        self.context.apply(update);

        let mut metadata = BTreeMap::new();
        metadata.insert("kind".to_string(), "context_update".to_string());
        self.memory
            .add_semantic(format!("context update: {}", update.describe()), metadata);

        self.context.clone()
    }

    /// One full run cycle against the current context.
    pub fn run(&mut self) -> RunReport {
        let thought = self.cognition.think(&self.context);
        tracing::info!(thought = %thought, "agent thought");

        let report = match self.manager.execute_best(&self.context) {
            Some(selection) => {
                let action = if self.governance.approves(&selection.action) {
                    selection.action
                } else {
                    tracing::warn!(protocol = %selection.protocol, "action vetoed by governance");
                    VETOED_ACTION.to_string()
                };
                RunReport {
                    thought,
                    protocol: Some(selection.protocol),
                    action,
                    reward: Some(selection.reward),
                }
            }
            None => {
                tracing::info!("no protocol matched, using baseline");
                RunReport {
                    thought,
                    protocol: None,
                    action: BASELINE_ACTION.to_string(),
                    reward: None,
                }
            }
        };

        self.memory
            .add_episodic(&self.context, report.action.clone(), None);
        report
    }

    /// Execute a goal: derive intent, plan steps, run each step, and reflect
    /// each outcome into the selected protocol's reward.
    pub fn execute_goal(&mut self, goal: &str) -> Result<GoalReport, AgentError> {
        self.execute_goal_with(goal, std::time::Duration::ZERO, |_, _| {})
    }

    /// Goal execution with inter-step pacing and a progress callback,
    /// invoked after each step completes.
    pub fn execute_goal_with(
        &mut self,
        goal: &str,
        pacing: std::time::Duration,
        mut on_step: impl FnMut(&str, &RunReport),
    ) -> Result<GoalReport, AgentError> {
        let goal = goal.trim();
        if goal.is_empty() {
            return Err(AgentError::EmptyGoal);
        }
        tracing::info!(goal, "executing goal");

        // The goal becomes the working intent for protocol selection.
        self.context.apply(&ContextUpdate::intent(goal));

        // Recall related concepts, then remember the goal itself.
        let recalled: Vec<String> = self
            .memory
            .semantic
            .query(goal, 3)
            .into_iter()
            .map(|hit| hit.concept)
            .filter(|c| c != goal)
            .collect();
        let mut metadata = BTreeMap::new();
        metadata.insert("kind".to_string(), "goal".to_string());
        self.memory.add_semantic(goal, metadata);

        let steps = self.planner.plan(goal);
        let step_count = steps.len();
        let mut executed = Vec::with_capacity(step_count);

        for (i, step) in steps.into_iter().enumerate() {
            let result = self.run();

            // A step counts as successful when a protocol actually matched.
            let success = result.protocol.is_some();
            if let Some(name) = &result.protocol {
                if let Some(protocol) = self.manager.get_mut(name) {
                    reflect(protocol, success);
                }
            }

            self.memory.add_episodic(
                &self.context,
                format!("step: {step}"),
                Some(if success { "success" } else { "no_match" }.to_string()),
            );

            on_step(&step, &result);
            if !pacing.is_zero() && i + 1 < step_count {
                std::thread::sleep(pacing);
            }

            executed.push(GoalStep { step, result });
        }

        Ok(GoalReport {
            goal: goal.to_string(),
            recalled,
            steps: executed,
            protocols: self.manager.snapshot(),
        })
    }

    /// The current context snapshot.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The protocol manager.
    pub fn manager(&self) -> &ProtocolManager {
        &self.manager
    }

    /// Mutable protocol manager access for the learning subsystem.
    pub fn manager_mut(&mut self) -> &mut ProtocolManager {
        &mut self.manager
    }

    /// The memory store.
    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Whether cognition is using the remote backend.
    pub fn is_remote_cognition(&self) -> bool {
        self.cognition.is_remote()
    }

    /// Reset context and memory while keeping protocols and their learned
    /// rewards. Used by tests and the demo between scenarios.
    pub fn reset_session(&mut self) {
        self.context = Context::default();
        self.memory = MemoryStore::new();
        tracing::debug!("agent session reset");
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("context", &self.context)
            .field("protocols", &self.manager.len())
            .field("episodes", &self.memory.episodic.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Protocol;

    fn test_agent() -> Agent {
        Agent::standard(CognitionEngine::rule_based())
    }

    #[test]
    fn run_selects_matching_protocol() {
        let mut agent = test_agent();
        agent.update_context(&ContextUpdate::state("happy", "create"));

        let report = agent.run();
        assert_eq!(report.protocol.as_deref(), Some("Happy"));
        assert!(report.reward.is_some());
        assert_eq!(agent.memory().episodic.len(), 1);
    }

    #[test]
    fn run_without_match_uses_baseline() {
        let mut agent = Agent::new(ProtocolManager::new(), CognitionEngine::rule_based());
        let report = agent.run();
        assert!(report.protocol.is_none());
        assert!(report.reward.is_none());
        assert_eq!(report.action, BASELINE_ACTION);
    }

    #[test]
    fn governance_vetoes_forbidden_actions() {
        let mut manager = ProtocolManager::new();
        manager.register(Protocol::new(
            "Rogue",
            |_| true,
            |_| "exploit the system".to_string(),
            3.0,
        ));
        let mut agent = Agent::new(manager, CognitionEngine::rule_based());

        let report = agent.run();
        assert_eq!(report.action, VETOED_ACTION);
    }

    #[test]
    fn update_context_records_semantic_entry() {
        let mut agent = test_agent();
        let snapshot = agent.update_context(&ContextUpdate::state("happy", "work"));
        assert_eq!(snapshot.emotion, "happy");
        assert_eq!(agent.memory().semantic.len(), 1);
    }

    #[test]
    fn goal_execution_runs_planned_steps() {
        let mut agent = test_agent();
        agent.update_context(&ContextUpdate::emotion("neutral"));

        let report = agent.execute_goal("organize workspace").unwrap();
        assert_eq!(report.goal, "organize workspace");
        assert_eq!(report.steps.len(), 4);
        // Intent was derived from the goal, so the Focus protocol matches.
        for step in &report.steps {
            assert_eq!(step.result.protocol.as_deref(), Some("Focus"));
        }
        assert_eq!(agent.context().intent, "organize workspace");
    }

    #[test]
    fn goal_execution_reflects_rewards() {
        let mut agent = test_agent();
        let before = agent.manager().get("Focus").unwrap().reward();
        agent.execute_goal("organize workspace").unwrap();
        // Successful steps pull the reward toward the success score.
        assert!(agent.manager().get("Focus").unwrap().reward() > before);
    }

    #[test]
    fn empty_goal_rejected() {
        let mut agent = test_agent();
        assert!(matches!(
            agent.execute_goal("   "),
            Err(AgentError::EmptyGoal)
        ));
    }

    #[test]
    fn goal_recalls_related_concepts() {
        let mut agent = test_agent();
        agent.execute_goal("organize workspace").unwrap();
        let report = agent.execute_goal("organize workspace again").unwrap();
        assert!(report
            .recalled
            .iter()
            .any(|c| c == "organize workspace"));
    }

    #[test]
    fn reset_keeps_learned_rewards() {
        let mut agent = test_agent();
        agent.execute_goal("organize workspace").unwrap();
        let learned = agent.manager().get("Focus").unwrap().reward();

        agent.reset_session();
        assert!(agent.memory().episodic.is_empty());
        assert_eq!(agent.context().intent, "none");
        assert_eq!(agent.manager().get("Focus").unwrap().reward(), learned);
    }
}
