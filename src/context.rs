//! Situational context: the agent's view of the current emotional and
//! intentional state plus arbitrary environment annotations.
//!
//! One `Context` lives per agent and is mutated in place by updates; it keeps
//! no history of its own — episodic memory records snapshots separately.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current situational state of the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Detected or reported emotional state (free-form, lowercased on match).
    pub emotion: String,
    /// What the user or agent currently intends to do.
    pub intent: String,
    /// Arbitrary key/value annotations about the surroundings.
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            emotion: "neutral".to_string(),
            intent: "none".to_string(),
            environment: BTreeMap::new(),
        }
    }
}

impl Context {
    /// Create a context with the given emotion and intent and an empty environment.
    pub fn new(emotion: impl Into<String>, intent: impl Into<String>) -> Self {
        Self {
            emotion: emotion.into(),
            intent: intent.into(),
            environment: BTreeMap::new(),
        }
    }

    /// Apply a partial update. Only provided fields change; environment
    /// entries merge key-by-key (there is no removal path).
    pub fn apply(&mut self, update: &ContextUpdate) {
        if let Some(emotion) = &update.emotion {
            self.emotion = emotion.clone();
        }
        if let Some(intent) = &update.intent {
            self.intent = intent.clone();
        }
        if let Some(env) = &update.environment {
            for (key, value) in env {
                self.environment.insert(key.clone(), value.clone());
            }
        }
        tracing::info!(
            emotion = %self.emotion,
            intent = %self.intent,
            environment_keys = self.environment.len(),
            "context updated"
        );
    }

    /// Environment lookup helper for protocol conditions.
    pub fn env(&self, key: &str) -> Option<&str> {
        self.environment.get(key).map(|s| s.as_str())
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "emotion={} intent={}", self.emotion, self.intent)?;
        if !self.environment.is_empty() {
            write!(f, " env[{}]", self.environment.len())?;
        }
        Ok(())
    }
}

/// A partial context mutation, as accepted by `POST /context/update`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextUpdate {
    pub emotion: Option<String>,
    pub intent: Option<String>,
    pub environment: Option<BTreeMap<String, String>>,
}

impl ContextUpdate {
    /// Update only the emotion field.
    pub fn emotion(value: impl Into<String>) -> Self {
        Self {
            emotion: Some(value.into()),
            ..Default::default()
        }
    }

    /// Update only the intent field.
    pub fn intent(value: impl Into<String>) -> Self {
        Self {
            intent: Some(value.into()),
            ..Default::default()
        }
    }

    /// Update emotion and intent together (the common case).
    pub fn state(emotion: impl Into<String>, intent: impl Into<String>) -> Self {
        Self {
            emotion: Some(emotion.into()),
            intent: Some(intent.into()),
            environment: None,
        }
    }

    /// Whether the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.emotion.is_none() && self.intent.is_none() && self.environment.is_none()
    }

    /// Human-readable summary for memory records.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(e) = &self.emotion {
            parts.push(format!("emotion={e}"));
        }
        if let Some(i) = &self.intent {
            parts.push(format!("intent={i}"));
        }
        if let Some(env) = &self.environment {
            parts.push(format!("{} environment entries", env.len()));
        }
        if parts.is_empty() {
            "no fields".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_neutral() {
        let ctx = Context::default();
        assert_eq!(ctx.emotion, "neutral");
        assert_eq!(ctx.intent, "none");
        assert!(ctx.environment.is_empty());
    }

    #[test]
    fn apply_updates_only_provided_fields() {
        let mut ctx = Context::new("sad", "rest");
        ctx.apply(&ContextUpdate::emotion("happy"));
        assert_eq!(ctx.emotion, "happy");
        assert_eq!(ctx.intent, "rest");
    }

    #[test]
    fn environment_merges_key_by_key() {
        let mut ctx = Context::default();
        let mut env = BTreeMap::new();
        env.insert("location".to_string(), "office".to_string());
        ctx.apply(&ContextUpdate {
            environment: Some(env),
            ..Default::default()
        });

        let mut env2 = BTreeMap::new();
        env2.insert("weather".to_string(), "rain".to_string());
        ctx.apply(&ContextUpdate {
            environment: Some(env2),
            ..Default::default()
        });

        assert_eq!(ctx.env("location"), Some("office"));
        assert_eq!(ctx.env("weather"), Some("rain"));
    }

    #[test]
    fn serialization_round_trip() {
        let ctx = Context::new("sad", "rest");
        let json = serde_json::to_string(&ctx).unwrap();
        let back: Context = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }

    #[test]
    fn describe_lists_fields() {
        let update = ContextUpdate::state("happy", "work");
        let desc = update.describe();
        assert!(desc.contains("emotion=happy"));
        assert!(desc.contains("intent=work"));
    }
}
