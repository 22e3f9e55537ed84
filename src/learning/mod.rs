//! Learning subsystem: verdicts, reward nudging, mutation, and analysis.
//!
//! The pieces compose into two flows: per-step reflection (binary outcome →
//! EMA reward update) during goal execution, and batch improvement
//! (evaluate → scale rewards → spawn mutants) triggered explicitly via
//! `POST /learning/improve` or the dashboard.

pub mod evaluator;
pub mod evolution;
pub mod improver;
pub mod reflector;
pub mod researcher;

use serde::{Deserialize, Serialize};

use crate::manager::ProtocolManager;

pub use evaluator::{evaluate, Verdict};
pub use evolution::{evolve, evolve_into, MUTATION_THRESHOLD};
pub use improver::{improve, ImprovementEntry, PENALTY_FACTOR, REINFORCE_FACTOR};
pub use reflector::reflect;
pub use researcher::{analyze, ResearchReport};

/// Combined result of one full learning pass (improve + evolve).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningReport {
    pub improvements: Vec<ImprovementEntry>,
    pub mutants_spawned: usize,
}

/// Run a full learning pass: scale rewards by verdict, then spawn mutants
/// for the protocols that remain underperforming.
pub fn learning_pass(manager: &mut ProtocolManager) -> LearningReport {
    let improvements = improve(manager);
    let mutants_spawned = evolve_into(manager);
    tracing::info!(
        protocols = improvements.len(),
        mutants = mutants_spawned,
        "learning pass complete"
    );
    LearningReport {
        improvements,
        mutants_spawned,
    }
}
