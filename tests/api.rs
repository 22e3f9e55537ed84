//! REST API tests against a real server on an ephemeral port, driven through
//! the crate's own HTTP client.

use std::sync::Arc;
use std::time::Duration;

use aeon::agent::Agent;
use aeon::api::{self, AppState};
use aeon::client::ApiClient;
use aeon::cognition::CognitionEngine;
use aeon::context::ContextUpdate;

/// Spin up a server on 127.0.0.1:0 and return a client plus the runtime
/// keeping it alive.
fn start_server() -> (ApiClient, tokio::runtime::Runtime) {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let state = Arc::new(AppState::with_agent(Agent::standard(
        CognitionEngine::rule_based(),
    )));
    let app = api::router(state);

    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let addr = listener.local_addr().unwrap();
    runtime.spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ApiClient::new(format!("http://{addr}"));

    // Wait for the accept loop to come up.
    for _ in 0..50 {
        if client.health().is_ok() {
            break;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    (client, runtime)
}

#[test]
fn health_reports_standard_protocols() {
    let (client, _rt) = start_server();

    let health = client.health().unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.protocol_count, health.protocols.len());
    assert!(health.protocols.iter().any(|p| p.name == "Happy"));
    assert!(!health.remote_cognition);
    assert_eq!(health.context.emotion, "neutral");
}

#[test]
fn context_update_then_goal_flow() {
    let (client, _rt) = start_server();

    // The documented scenario: happy/create context, then an organize goal.
    let resp = client
        .update_context(&ContextUpdate::state("happy", "create"))
        .unwrap();
    assert_eq!(resp.status, "success");
    assert_eq!(resp.context.emotion, "happy");

    let goal_resp = client.goal("organize workspace").unwrap();
    assert_eq!(goal_resp.status, "success");
    let result = goal_resp.result;
    assert_eq!(result.goal, "organize workspace");
    assert!(!result.steps.is_empty());
    for step in &result.steps {
        // Both Happy and Focus match this context; one of them ran.
        assert!(step.result.protocol.is_some());
        assert!(!step.result.action.is_empty());
    }

    // Goal completion shows up in the metrics.
    let health = client.health().unwrap();
    assert_eq!(health.metrics.goals_completed, 1);
    assert!(health.memory_items > 0);
}

#[test]
fn run_endpoint_returns_report() {
    let (client, _rt) = start_server();

    client
        .update_context(&ContextUpdate::state("sad", "talk"))
        .unwrap();
    let resp = client.run().unwrap();
    assert_eq!(resp.result.protocol.as_deref(), Some("Sad"));
    assert!(resp.result.reward.is_some());
}

#[test]
fn memory_endpoint_reflects_activity() {
    let (client, _rt) = start_server();

    client
        .update_context(&ContextUpdate::state("happy", "create"))
        .unwrap();
    client.run().unwrap();

    let resp = client.memory().unwrap();
    assert_eq!(resp.memory.episodic.len(), 1);
    assert_eq!(resp.memory.episodic[0].context.emotion, "happy");
    // The context update itself was recorded semantically.
    assert!(!resp.memory.semantic.is_empty());
}

#[test]
fn empty_context_update_is_rejected() {
    let (client, _rt) = start_server();

    let result = client.update_context(&ContextUpdate::default());
    assert!(matches!(
        result,
        Err(aeon::error::ClientError::Status { status: 400, .. })
    ));
}

#[test]
fn empty_goal_is_rejected() {
    let (client, _rt) = start_server();

    let result = client.goal("   ");
    assert!(matches!(
        result,
        Err(aeon::error::ClientError::Status { status: 400, .. })
    ));
}

#[test]
fn improve_endpoint_runs_learning_pass() {
    let (client, _rt) = start_server();

    let resp = client.improve().unwrap();
    assert_eq!(resp.status, "success");
    // Standard protocols all start under 3 executions.
    assert!(resp
        .report
        .improvements
        .iter()
        .all(|e| format!("{}", e.verdict) == "insufficient_data"));

    let health = client.health().unwrap();
    assert_eq!(health.metrics.learning_cycles, 1);
}

#[test]
fn protocols_endpoint_lists_learning_state() {
    let (client, _rt) = start_server();

    client
        .update_context(&ContextUpdate::state("happy", "create"))
        .unwrap();
    client.run().unwrap();

    let resp = client.protocols().unwrap();
    let happy = resp.protocols.iter().find(|p| p.name == "Happy").unwrap();
    assert_eq!(happy.executions, 1);
}
