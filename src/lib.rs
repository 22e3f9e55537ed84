//! # aeon
//!
//! Adaptive agent framework: a mutable situational context drives selection
//! among condition/action/reward protocols, with reward-nudging learning,
//! semantic + episodic memory, and an LLM-backed reasoning strategy that
//! falls back to deterministic rules.
//!
//! ## Architecture
//!
//! - **Context** (`context`): emotion / intent / environment state, mutated in place
//! - **Protocols** (`protocol`, `manager`): condition/action/reward triples with
//!   highest-reward selection
//! - **Memory** (`memory`): toy concept-vector semantic store + append-only episodic log
//! - **Cognition** (`cognition`): remote completion or rule-based assessment,
//!   selected at startup from configuration presence
//! - **Learning** (`learning`): verdicts, reward scaling, mutation, analysis
//! - **Surfaces** (`api`, `client`, `tui`): REST server, typed HTTP client,
//!   terminal dashboard
//!
//! ## Library usage
//!
//! ```no_run
//! use aeon::agent::Agent;
//! use aeon::cognition::CognitionEngine;
//! use aeon::context::ContextUpdate;
//!
//! let mut agent = Agent::standard(CognitionEngine::rule_based());
//! agent.update_context(&ContextUpdate::state("happy", "create"));
//! let report = agent.run();
//! println!("{}: {}", report.protocol.as_deref().unwrap_or("baseline"), report.action);
//! ```

pub mod agent;
pub mod api;
pub mod autonomy;
pub mod client;
pub mod cognition;
pub mod config;
pub mod context;
pub mod error;
pub mod governance;
pub mod learning;
pub mod manager;
pub mod memory;
pub mod metrics;
pub mod planner;
pub mod protocol;
pub mod protocols;
pub mod tui;
