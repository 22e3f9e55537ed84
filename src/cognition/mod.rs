//! Cognition: reasoning over the current context.
//!
//! Two interchangeable strategies, selected once at startup based on
//! configuration presence: a remote LLM call when `OPENAI_API_KEY` is set,
//! or deterministic rule evaluation otherwise. `think` never fails — a
//! remote error logs a warning and falls through to the rule path for that
//! call.

pub mod openai;

use crate::context::Context;

pub use openai::{OpenAiClient, OpenAiConfig};

/// The reasoning strategy in use.
enum Backend {
    /// Remote chat-completion call.
    Remote(OpenAiClient),
    /// Deterministic rule evaluation.
    Rules,
}

/// Reasoning engine producing a high-level assessment of the context.
pub struct CognitionEngine {
    backend: Backend,
}

impl CognitionEngine {
    /// Select the backend from the environment: remote when `OPENAI_API_KEY`
    /// is set and non-empty, rule-based otherwise.
    pub fn from_env(config: OpenAiConfig) -> Self {
        match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => {
                tracing::info!(model = %config.model, "cognition using remote backend");
                Self {
                    backend: Backend::Remote(OpenAiClient::new(config, key)),
                }
            }
            _ => {
                tracing::warn!("no API key configured, cognition running rule-based");
                Self::rule_based()
            }
        }
    }

    /// A purely rule-based engine (also the test default).
    pub fn rule_based() -> Self {
        Self {
            backend: Backend::Rules,
        }
    }

    /// Whether the remote backend is active.
    pub fn is_remote(&self) -> bool {
        matches!(self.backend, Backend::Remote(_))
    }

    /// Produce an assessment of the context.
    pub fn think(&self, context: &Context) -> String {
        match &self.backend {
            Backend::Remote(client) => match client.complete(
                &build_prompt(context),
                Some("You are AEON, a context reasoning engine. Respond concisely."),
            ) {
                Ok(thought) => thought,
                Err(e) => {
                    tracing::warn!(error = %e, "remote cognition failed, using rules");
                    rule_based_think(context)
                }
            },
            Backend::Rules => rule_based_think(context),
        }
    }
}

impl std::fmt::Debug for CognitionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = match &self.backend {
            Backend::Remote(client) => format!("remote({})", client.model()),
            Backend::Rules => "rules".to_string(),
        };
        f.debug_struct("CognitionEngine")
            .field("backend", &backend)
            .finish()
    }
}

/// Deterministic reasoning when no LLM is available.
pub fn rule_based_think(context: &Context) -> String {
    let emotion = context.emotion.to_lowercase();
    let intent = context.intent.to_lowercase();

    if matches!(emotion.as_str(), "sad" | "angry" | "frustrated") {
        return "User is emotionally distressed. Prioritize emotional support.".to_string();
    }
    if ["work", "study", "focus", "organize"]
        .iter()
        .any(|kw| intent.contains(kw))
    {
        return "User intends productivity. Reduce distractions and structure tasks.".to_string();
    }
    if matches!(emotion.as_str(), "happy" | "excited") {
        return "User has positive energy. Encourage creativity or exploration.".to_string();
    }

    "Neutral context detected. Maintain supportive baseline behavior.".to_string()
}

fn build_prompt(context: &Context) -> String {
    let environment = if context.environment.is_empty() {
        "(none)".to_string()
    } else {
        context
            .environment
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Context snapshot:\n\
         - Emotion: {}\n\
         - Intent: {}\n\
         - Environment: {}\n\n\
         Interpret the user's state, decide the most helpful high-level \
         response strategy, and explain briefly.",
        context.emotion, context.intent, environment
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distress_takes_priority() {
        let thought = rule_based_think(&Context::new("sad", "work"));
        assert!(thought.contains("emotional support"));
    }

    #[test]
    fn productivity_intent_detected() {
        let thought = rule_based_think(&Context::new("neutral", "organize workspace"));
        assert!(thought.contains("productivity"));
    }

    #[test]
    fn positive_emotion_encourages_creativity() {
        let thought = rule_based_think(&Context::new("excited", "none"));
        assert!(thought.contains("creativity"));
    }

    #[test]
    fn neutral_baseline_otherwise() {
        let thought = rule_based_think(&Context::default());
        assert!(thought.contains("Neutral"));
    }

    #[test]
    fn rule_based_engine_never_remote() {
        let engine = CognitionEngine::rule_based();
        assert!(!engine.is_remote());
        let thought = engine.think(&Context::new("happy", "none"));
        assert!(thought.contains("creativity"));
    }

    #[test]
    fn prompt_renders_environment() {
        let mut ctx = Context::new("calm", "read");
        ctx.environment
            .insert("location".to_string(), "library".to_string());
        let prompt = build_prompt(&ctx);
        assert!(prompt.contains("location=library"));
        assert!(prompt.contains("Emotion: calm"));
    }
}
