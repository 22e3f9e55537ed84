//! Goal planning: break a high-level goal into executable steps.
//!
//! Deterministic keyword-keyed templates. A goal's final step is always the
//! goal itself, so that execution ends on the user's actual request.

/// Deterministic step planner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner;

impl Planner {
    pub fn new() -> Self {
        Self
    }

    /// Break a goal into ordered steps.
    pub fn plan(&self, goal: &str) -> Vec<String> {
        let lower = goal.to_lowercase();

        let mut steps: Vec<String> = if lower.contains("focus") || lower.contains("organize") {
            vec![
                "Reduce distractions".to_string(),
                "Create task structure".to_string(),
                "Execute focused work block".to_string(),
            ]
        } else if lower.contains("feel better") || lower.contains("comfort") {
            vec![
                "Acknowledge emotion".to_string(),
                "Provide emotional support".to_string(),
                "Stabilize mood".to_string(),
            ]
        } else {
            vec![
                "Understand goal".to_string(),
                "Choose best protocol".to_string(),
                "Execute response".to_string(),
            ]
        };

        steps.push(goal.to_string());
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_goals_use_focus_template() {
        let steps = Planner::new().plan("organize workspace");
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0], "Reduce distractions");
        assert_eq!(steps.last().unwrap(), "organize workspace");
    }

    #[test]
    fn support_goals_use_support_template() {
        let steps = Planner::new().plan("help me feel better");
        assert!(steps.iter().any(|s| s.contains("emotional support")));
    }

    #[test]
    fn generic_goals_use_generic_template() {
        let steps = Planner::new().plan("something unusual");
        assert_eq!(steps[0], "Understand goal");
        assert_eq!(steps.last().unwrap(), "something unusual");
    }
}
