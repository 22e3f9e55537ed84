//! Sync HTTP client for the aeon REST API.
//!
//! Used by the client CLI subcommands and the dashboard. Typed against the
//! same response structs the server serializes, so the two surfaces cannot
//! drift apart silently.

use serde::de::DeserializeOwned;

use crate::api::{
    ContextResponse, GoalRequest, GoalResponse, HealthResponse, LearnResponse, MemoryResponse,
    ProtocolsResponse, RunResponse,
};
use crate::context::ContextUpdate;
use crate::error::ClientError;

/// Client for a running aeon server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ApiClient {
    /// Create a client against the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(30))
            .build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /system/health`
    pub fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get("/system/health")
    }

    /// `POST /context/update`
    pub fn update_context(&self, update: &ContextUpdate) -> Result<ContextResponse, ClientError> {
        self.post("/context/update", update)
    }

    /// `POST /agent/run`
    pub fn run(&self) -> Result<RunResponse, ClientError> {
        self.post_empty("/agent/run")
    }

    /// `POST /agent/goal`
    pub fn goal(&self, goal: impl Into<String>) -> Result<GoalResponse, ClientError> {
        self.post("/agent/goal", &GoalRequest { goal: goal.into() })
    }

    /// `GET /memory`
    pub fn memory(&self) -> Result<MemoryResponse, ClientError> {
        self.get("/memory")
    }

    /// `GET /protocols`
    pub fn protocols(&self) -> Result<ProtocolsResponse, ClientError> {
        self.get("/protocols")
    }

    /// `POST /learning/improve`
    pub fn improve(&self) -> Result<LearnResponse, ClientError> {
        self.post_empty("/learning/improve")
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        let url = format!("{}{endpoint}", self.base_url);
        let resp = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| self.map_error(e, endpoint))?;
        decode(resp, endpoint)
    }

    fn post<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = format!("{}{endpoint}", self.base_url);
        let payload = serde_json::to_value(body).map_err(|e| ClientError::Decode {
            endpoint: endpoint.to_string(),
            message: format!("request encode error: {e}"),
        })?;
        let resp = self
            .agent
            .post(&url)
            .send_json(payload)
            .map_err(|e| self.map_error(e, endpoint))?;
        decode(resp, endpoint)
    }

    fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        let url = format!("{}{endpoint}", self.base_url);
        let resp = self
            .agent
            .post(&url)
            .call()
            .map_err(|e| self.map_error(e, endpoint))?;
        decode(resp, endpoint)
    }

    fn map_error(&self, error: ureq::Error, endpoint: &str) -> ClientError {
        match error {
            ureq::Error::Status(status, _) => ClientError::Status {
                status,
                endpoint: endpoint.to_string(),
            },
            ureq::Error::Transport(_) => ClientError::Unreachable {
                url: self.base_url.clone(),
            },
        }
    }
}

fn decode<T: DeserializeOwned>(resp: ureq::Response, endpoint: &str) -> Result<T, ClientError> {
    resp.into_json().map_err(|e| ClientError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}
