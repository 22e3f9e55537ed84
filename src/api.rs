//! REST API over a process-wide agent.
//!
//! Routes:
//! - `GET  /system/health` — status, protocol stats, context, metrics
//! - `POST /context/update` — partial context mutation
//! - `POST /agent/run` — one run cycle against the current context
//! - `POST /agent/goal` — goal execution
//! - `GET  /memory` — full semantic + episodic dump
//! - `GET  /protocols` — protocol learning state
//! - `POST /learning/improve` — reward scaling + mutation pass
//!
//! The agent lives in [`AppState`] behind an async `RwLock`; `AppState::new`
//! is the explicit initialization point (and the reset lifecycle for tests —
//! build a fresh state, no global singleton involved).

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::agent::{Agent, GoalReport, RunReport};
use crate::cognition::CognitionEngine;
use crate::config::AeonConfig;
use crate::context::{Context, ContextUpdate};
use crate::error::AeonError;
use crate::learning::{self, LearningReport};
use crate::memory::MemoryDump;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::protocol::ProtocolStats;

// ── Server state ──────────────────────────────────────────────────────────

/// Process-wide server state: one agent plus activity counters.
pub struct AppState {
    agent: RwLock<Agent>,
    metrics: Metrics,
}

impl AppState {
    /// Build the state with the standard protocol set and env-selected
    /// cognition backend.
    pub fn new(config: &AeonConfig) -> Self {
        let cognition = CognitionEngine::from_env(config.openai());
        Self::with_agent(Agent::standard(cognition))
    }

    /// Build the state around a pre-configured agent (tests, demos).
    pub fn with_agent(agent: Agent) -> Self {
        Self {
            agent: RwLock::new(agent),
            metrics: Metrics::new(),
        }
    }
}

// ── Request / response types ──────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct GoalRequest {
    pub goal: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub protocol_count: usize,
    pub protocols: Vec<ProtocolStats>,
    pub context: Context,
    pub memory_items: usize,
    pub remote_cognition: bool,
    pub metrics: MetricsSnapshot,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContextResponse {
    pub status: String,
    pub context: Context,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunResponse {
    pub status: String,
    pub result: RunReport,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoalResponse {
    pub status: String,
    pub result: GoalReport,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemoryResponse {
    pub status: String,
    pub memory: MemoryDump,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProtocolsResponse {
    pub status: String,
    pub protocols: Vec<ProtocolStats>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnResponse {
    pub status: String,
    pub report: LearningReport,
}

fn success() -> String {
    "success".to_string()
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let agent = state.agent.read().await;
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        protocol_count: agent.manager().len(),
        protocols: agent.manager().snapshot(),
        context: agent.context().clone(),
        memory_items: agent.memory().episodic.len(),
        remote_cognition: agent.is_remote_cognition(),
        metrics: state.metrics.snapshot(),
    })
}

async fn update_context(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ContextUpdate>,
) -> Result<Json<ContextResponse>, (StatusCode, String)> {
    if update.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "update carries no fields".to_string(),
        ));
    }
    let mut agent = state.agent.write().await;
    let context = agent.update_context(&update);
    Ok(Json(ContextResponse {
        status: success(),
        context,
    }))
}

async fn run_agent(State(state): State<Arc<AppState>>) -> Json<RunResponse> {
    let mut agent = state.agent.write().await;
    let result = agent.run();
    Json(RunResponse {
        status: success(),
        result,
    })
}

async fn run_goal(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GoalRequest>,
) -> Result<Json<GoalResponse>, (StatusCode, String)> {
    let mut agent = state.agent.write().await;
    match agent.execute_goal(&request.goal) {
        Ok(result) => {
            state.metrics.record_goal();
            Ok(Json(GoalResponse {
                status: success(),
                result,
            }))
        }
        Err(e) => Err((StatusCode::BAD_REQUEST, format!("{e}"))),
    }
}

async fn get_memory(State(state): State<Arc<AppState>>) -> Json<MemoryResponse> {
    let agent = state.agent.read().await;
    Json(MemoryResponse {
        status: success(),
        memory: agent.memory().dump(),
    })
}

async fn get_protocols(State(state): State<Arc<AppState>>) -> Json<ProtocolsResponse> {
    let agent = state.agent.read().await;
    Json(ProtocolsResponse {
        status: success(),
        protocols: agent.manager().snapshot(),
    })
}

async fn improve(State(state): State<Arc<AppState>>) -> Json<LearnResponse> {
    let mut agent = state.agent.write().await;
    let report = learning::learning_pass(agent.manager_mut());
    state.metrics.record_learning();
    state.metrics.record_mutations(report.mutants_spawned as u64);
    Json(LearnResponse {
        status: success(),
        report,
    })
}

// ── Router / entry point ──────────────────────────────────────────────────

/// Build the API router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/system/health", get(health))
        .route("/context/update", post(update_context))
        .route("/agent/run", post(run_agent))
        .route("/agent/goal", post(run_goal))
        .route("/memory", get(get_memory))
        .route("/protocols", get(get_protocols))
        .route("/learning/improve", post(improve))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve the API until the process exits.
pub async fn serve(config: AeonConfig) -> Result<(), AeonError> {
    let addr = config.socket_addr()?;
    let state = Arc::new(AppState::new(&config));
    let app = router(state);

    tracing::info!(%addr, "aeon server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| crate::error::ServeError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    axum::serve(listener, app)
        .await
        .map_err(|source| crate::error::ServeError::Io { source })?;
    Ok(())
}
