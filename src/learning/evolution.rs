//! Protocol evolution: underperformers spawn jittered mutant variants.
//!
//! A protocol with reward below the mutation threshold is cloned into a
//! `-mutant` variant sharing its condition and action, with the reward
//! jittered by a uniform offset. Mutants compete through normal selection
//! and learning like any other protocol.

use rand::Rng;

use crate::manager::ProtocolManager;
use crate::protocol::Protocol;

/// Rewards below this value trigger mutation.
pub const MUTATION_THRESHOLD: f64 = 2.0;
/// Mutant rewards are jittered by a uniform offset in ±this value.
pub const REWARD_JITTER: f64 = 0.5;

/// Name suffix carried by mutant protocols.
pub const MUTANT_SUFFIX: &str = "-mutant";

/// Spawn mutants for every underperforming protocol.
///
/// Mutants of mutants are not spawned — a single suffix is the limit.
pub fn evolve(protocols: &[Protocol]) -> Vec<Protocol> {
    let mut rng = rand::thread_rng();
    let mut mutants = Vec::new();

    for protocol in protocols {
        if protocol.reward() >= MUTATION_THRESHOLD || protocol.name().ends_with(MUTANT_SUFFIX) {
            continue;
        }
        let mut mutant = protocol.variant(format!("{}{MUTANT_SUFFIX}", protocol.name()));
        let jitter: f64 = rng.gen_range(-REWARD_JITTER..=REWARD_JITTER);
        mutant.set_reward(protocol.reward() + jitter);
        tracing::info!(
            parent = protocol.name(),
            mutant = mutant.name(),
            reward = mutant.reward(),
            "protocol mutated"
        );
        mutants.push(mutant);
    }

    mutants
}

/// Evolve and register the mutants back into the manager.
///
/// Returns the number of mutants registered.
pub fn evolve_into(manager: &mut ProtocolManager) -> usize {
    let mutants = evolve(manager.protocols());
    let count = mutants.len();
    for mutant in mutants {
        manager.register(mutant);
    }
    count
}
