//! Runtime configuration, resolved once at startup.
//!
//! Defaults < TOML config file < environment variables. The OpenAI API key
//! itself is never stored here — cognition reads `OPENAI_API_KEY` directly
//! when selecting its backend.

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cognition::OpenAiConfig;
use crate::error::ConfigError;

/// Top-level configuration for the server, client commands, and cognition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AeonConfig {
    /// Server bind host.
    pub bind: String,
    /// Server port.
    pub port: u16,
    /// Base URL client commands and the dashboard talk to.
    pub api_url: String,
    /// Model name for the remote cognition backend.
    pub model: String,
}

impl Default for AeonConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8000,
            api_url: "http://127.0.0.1:8000".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}

impl AeonConfig {
    /// Load configuration: defaults, overlaid by an optional TOML file,
    /// overlaid by `AEON_BIND` / `AEON_PORT` / `AEON_API_URL` / `AEON_MODEL`.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Ok(bind) = std::env::var("AEON_BIND") {
            config.bind = bind;
        }
        if let Ok(port) = std::env::var("AEON_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            } else {
                tracing::warn!(value = %port, "ignoring unparsable AEON_PORT");
            }
        }
        if let Ok(url) = std::env::var("AEON_API_URL") {
            config.api_url = url;
        }
        if let Ok(model) = std::env::var("AEON_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// The server's socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.bind, self.port);
        addr.parse().map_err(|_| ConfigError::BindAddr { addr })
    }

    /// Cognition client configuration derived from this config.
    pub fn openai(&self) -> OpenAiConfig {
        OpenAiConfig {
            model: self.model.clone(),
            ..Default::default()
        }
    }
}
