//! Protocol manager: registration and highest-reward selection.
//!
//! Selection is a linear scan in registration order. Among protocols whose
//! condition holds, the one with the strictly highest reward wins; on a tie
//! the earlier-registered protocol is kept.

use crate::context::Context;
use crate::protocol::{Protocol, ProtocolStats};

/// Ordered collection of protocols with reward-driven selection.
#[derive(Debug, Default)]
pub struct ProtocolManager {
    protocols: Vec<Protocol>,
}

impl ProtocolManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a protocol. A protocol whose name is already registered
    /// replaces the existing entry in place, keeping its position.
    pub fn register(&mut self, protocol: Protocol) {
        if let Some(existing) = self
            .protocols
            .iter_mut()
            .find(|p| p.name() == protocol.name())
        {
            tracing::debug!(protocol = protocol.name(), "replacing registered protocol");
            *existing = protocol;
        } else {
            tracing::debug!(protocol = protocol.name(), reward = protocol.reward(), "protocol registered");
            self.protocols.push(protocol);
        }
    }

    /// Name of the best-matching protocol for the context, if any.
    pub fn best_match(&self, context: &Context) -> Option<&Protocol> {
        let mut best: Option<&Protocol> = None;
        for protocol in &self.protocols {
            if !protocol.matches(context) {
                continue;
            }
            match best {
                Some(current) if protocol.reward() <= current.reward() => {}
                _ => best = Some(protocol),
            }
        }
        best
    }

    /// Select and execute the best-matching protocol.
    ///
    /// Returns `None` when no condition holds; the caller decides the
    /// no-match behavior (the agent substitutes its baseline action).
    pub fn execute_best(&mut self, context: &Context) -> Option<Selection> {
        let mut best: Option<usize> = None;
        for (i, protocol) in self.protocols.iter().enumerate() {
            if !protocol.matches(context) {
                continue;
            }
            match best {
                Some(j) if protocol.reward() <= self.protocols[j].reward() => {}
                _ => best = Some(i),
            }
        }

        let protocol = &mut self.protocols[best?];
        let action = protocol.execute(context);
        let selection = Selection {
            protocol: protocol.name().to_string(),
            action,
            reward: protocol.reward(),
        };
        tracing::info!(protocol = %selection.protocol, reward = selection.reward, "protocol executed");
        Some(selection)
    }

    /// Get a protocol by name.
    pub fn get(&self, name: &str) -> Option<&Protocol> {
        self.protocols.iter().find(|p| p.name() == name)
    }

    /// Get a mutable protocol by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Protocol> {
        self.protocols.iter_mut().find(|p| p.name() == name)
    }

    /// Remove a protocol by name. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.protocols.len();
        self.protocols.retain(|p| p.name() != name);
        before != self.protocols.len()
    }

    /// All protocols, in registration order.
    pub fn protocols(&self) -> &[Protocol] {
        &self.protocols
    }

    /// Mutable access for the learning subsystem.
    pub fn protocols_mut(&mut self) -> &mut [Protocol] {
        &mut self.protocols
    }

    /// Serializable name/reward/executions rows for all protocols.
    pub fn snapshot(&self) -> Vec<ProtocolStats> {
        self.protocols.iter().map(|p| p.stats()).collect()
    }

    /// Number of registered protocols.
    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    /// Whether no protocols are registered.
    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}

/// Outcome of executing the selected protocol.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Name of the protocol that ran.
    pub protocol: String,
    /// What the action produced.
    pub action: String,
    /// The protocol's reward at execution time.
    pub reward: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Protocol;

    fn always(name: &str, reward: f64) -> Protocol {
        let label = name.to_string();
        Protocol::new(name, |_| true, move |_| format!("{label} ran"), reward)
    }

    fn never(name: &str, reward: f64) -> Protocol {
        Protocol::new(name, |_| false, |_| String::new(), reward)
    }

    #[test]
    fn highest_reward_wins_among_matches() {
        let mut pm = ProtocolManager::new();
        pm.register(always("Low", 1.0));
        pm.register(always("High", 4.0));
        pm.register(never("Ignored", 5.0));

        let best = pm.best_match(&Context::default()).unwrap();
        assert_eq!(best.name(), "High");
    }

    #[test]
    fn first_registered_wins_ties() {
        let mut pm = ProtocolManager::new();
        pm.register(always("First", 3.0));
        pm.register(always("Second", 3.0));

        let best = pm.best_match(&Context::default()).unwrap();
        assert_eq!(best.name(), "First");
    }

    #[test]
    fn no_match_returns_none() {
        let mut pm = ProtocolManager::new();
        pm.register(never("A", 3.0));
        assert!(pm.best_match(&Context::default()).is_none());
        assert!(pm.execute_best(&Context::default()).is_none());
    }

    #[test]
    fn execute_best_counts_execution() {
        let mut pm = ProtocolManager::new();
        pm.register(always("Only", 2.0));

        let selection = pm.execute_best(&Context::default()).unwrap();
        assert_eq!(selection.protocol, "Only");
        assert!(selection.action.contains("ran"));
        assert_eq!(pm.get("Only").unwrap().executions(), 1);
    }

    #[test]
    fn register_same_name_replaces() {
        let mut pm = ProtocolManager::new();
        pm.register(always("Dup", 1.0));
        pm.register(always("Dup", 4.0));
        assert_eq!(pm.len(), 1);
        assert_eq!(pm.get("Dup").unwrap().reward(), 4.0);
    }

    #[test]
    fn remove_by_name() {
        let mut pm = ProtocolManager::new();
        pm.register(always("Gone", 1.0));
        assert!(pm.remove("Gone"));
        assert!(!pm.remove("Gone"));
        assert!(pm.is_empty());
    }

    #[test]
    fn snapshot_lists_all() {
        let mut pm = ProtocolManager::new();
        pm.register(always("A", 1.0));
        pm.register(always("B", 2.0));
        let snap = pm.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].name, "A");
        assert_eq!(snap[1].reward, 2.0);
    }
}
