//! Paced goal execution for interactive surfaces.
//!
//! Wraps [`Agent::execute_goal_with`] so demos can show each step as it
//! completes, with a fixed delay between steps. Library callers wanting
//! unpaced execution use [`Agent::execute_goal`] directly.

use std::time::Duration;

use crate::agent::{Agent, GoalReport, RunReport};
use crate::error::AgentError;

/// Runs goals step by step with a fixed pacing delay.
pub struct AutonomousLoop<'a> {
    agent: &'a mut Agent,
    pacing: Duration,
}

impl<'a> AutonomousLoop<'a> {
    /// Wrap an agent with the given inter-step pacing.
    pub fn new(agent: &'a mut Agent, pacing: Duration) -> Self {
        Self { agent, pacing }
    }

    /// Execute the goal, reporting each step through the callback as it
    /// completes and pausing between steps.
    pub fn run_goal(
        &mut self,
        goal: &str,
        on_step: impl FnMut(&str, &RunReport),
    ) -> Result<GoalReport, AgentError> {
        self.agent.execute_goal_with(goal, self.pacing, on_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cognition::CognitionEngine;

    #[test]
    fn reports_each_step_in_order() {
        let mut agent = Agent::standard(CognitionEngine::rule_based());
        let mut seen = Vec::new();

        let report = AutonomousLoop::new(&mut agent, Duration::ZERO)
            .run_goal("organize workspace", |step, _| seen.push(step.to_string()))
            .unwrap();

        assert_eq!(seen.len(), report.steps.len());
        assert_eq!(seen[0], "Reduce distractions");
    }
}
