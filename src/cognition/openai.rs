//! OpenAI chat-completions client for the remote reasoning backend.
//!
//! Sync HTTP via ureq, mirroring how the rest of the framework talks to
//! external services. The client is constructed once at startup; callers
//! handle failures by falling back to rule-based reasoning.

use crate::error::CognitionError;

/// Configuration for the remote completion client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Base URL for the API.
    pub base_url: String,
    /// Model name to use.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            timeout_secs: 60,
        }
    }
}

/// Client for the chat-completions endpoint.
pub struct OpenAiClient {
    config: OpenAiConfig,
    api_key: String,
}

impl OpenAiClient {
    /// Create a client with the given configuration and API key.
    pub fn new(config: OpenAiConfig, api_key: impl Into<String>) -> Self {
        Self {
            config,
            api_key: api_key.into(),
        }
    }

    /// Request a completion for the prompt, with an optional system message.
    pub fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, CognitionError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
            .build();

        let mut messages = Vec::new();
        if let Some(sys) = system {
            messages.push(serde_json::json!({ "role": "system", "content": sys }));
        }
        messages.push(serde_json::json!({ "role": "user", "content": prompt }));

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": 0.4,
        });

        let body_str = serde_json::to_string(&body).map_err(|e| CognitionError::RequestFailed {
            message: format!("JSON serialize error: {e}"),
        })?;

        let resp = agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_string(&body_str)
            .map_err(|e: ureq::Error| match e {
                ureq::Error::Transport(_) => CognitionError::Unreachable {
                    url: self.config.base_url.clone(),
                },
                other => CognitionError::RequestFailed {
                    message: other.to_string(),
                },
            })?;

        let resp_str = resp.into_string().map_err(|e| CognitionError::ParseError {
            message: e.to_string(),
        })?;

        let json: serde_json::Value =
            serde_json::from_str(&resp_str).map_err(|e| CognitionError::ParseError {
                message: e.to_string(),
            })?;

        json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| CognitionError::ParseError {
                message: "missing choices[0].message.content".into(),
            })
    }

    /// The model name being used.
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = OpenAiConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn unreachable_host_reports_transport_error() {
        let config = OpenAiConfig {
            base_url: "http://127.0.0.1:1/v1".into(), // unreachable port
            timeout_secs: 1,
            ..Default::default()
        };
        let client = OpenAiClient::new(config, "test-key");
        let result = client.complete("hello", None);
        assert!(matches!(result, Err(CognitionError::Unreachable { .. })));
    }

    #[test]
    fn debug_hides_api_key() {
        let client = OpenAiClient::new(OpenAiConfig::default(), "secret");
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret"));
    }
}
