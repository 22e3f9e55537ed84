//! aeon CLI: adaptive agent framework.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use aeon::agent::Agent;
use aeon::autonomy::AutonomousLoop;
use aeon::client::ApiClient;
use aeon::cognition::CognitionEngine;
use aeon::config::AeonConfig;
use aeon::context::ContextUpdate;
use aeon::learning;
use aeon::tui::Dashboard;

#[derive(Parser)]
#[command(name = "aeon", version, about = "Adaptive agent framework")]
struct Cli {
    /// Config file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API base URL for client commands and the dashboard.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API server.
    Serve {
        /// Bind host (overrides config).
        #[arg(long)]
        bind: Option<String>,

        /// Port (overrides config).
        #[arg(long)]
        port: Option<u16>,
    },

    /// Open the terminal dashboard against a running server.
    Dashboard,

    /// Run a scripted in-process demonstration.
    Demo,

    /// Show server status and protocol state.
    Status,

    /// Update the agent's context.
    Update {
        /// New emotion.
        #[arg(long)]
        emotion: Option<String>,

        /// New intent.
        #[arg(long)]
        intent: Option<String>,
    },

    /// Execute one agent run cycle.
    Run,

    /// Execute a goal.
    Goal {
        /// Goal description.
        goal: String,
    },

    /// Show memory contents.
    Memory {
        /// Write the full dump to this file as JSON.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// List registered protocols.
    Protocols,

    /// Trigger a learning pass (reward scaling + mutation).
    Improve,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AeonConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }

    match cli.command {
        Commands::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if let Some(port) = port {
                config.port = port;
            }
            let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;
            runtime.block_on(aeon::api::serve(config))?;
        }

        Commands::Dashboard => {
            Dashboard::new(config.api_url.clone()).run()?;
        }

        Commands::Demo => run_demo(&config),

        Commands::Status => {
            let client = ApiClient::new(config.api_url.clone());
            let health = client.health()?;
            println!("aeon server at {}", client.base_url());
            println!("  status:     {}", health.status);
            println!("  version:    {}", health.version);
            println!("  cognition:  {}", if health.remote_cognition { "remote" } else { "rules" });
            println!("  context:    {}", health.context);
            println!("  episodes:   {}", health.memory_items);
            println!(
                "  metrics:    {} goals, {} learning cycles, {} mutations",
                health.metrics.goals_completed,
                health.metrics.learning_cycles,
                health.metrics.protocol_mutations,
            );
            println!("  protocols ({}):", health.protocol_count);
            for p in &health.protocols {
                println!("    {} reward={:.2} execs={}", p.name, p.reward, p.executions);
            }
        }

        Commands::Update { emotion, intent } => {
            if emotion.is_none() && intent.is_none() {
                miette::bail!("provide at least one of --emotion / --intent");
            }
            let update = ContextUpdate {
                emotion,
                intent,
                environment: None,
            };
            let client = ApiClient::new(config.api_url.clone());
            let resp = client.update_context(&update)?;
            println!("Context updated: {}", resp.context);
        }

        Commands::Run => {
            let client = ApiClient::new(config.api_url.clone());
            let resp = client.run()?;
            print_run(&resp.result);
        }

        Commands::Goal { goal } => {
            let client = ApiClient::new(config.api_url.clone());
            let resp = client.goal(&goal)?;
            println!("Goal \"{}\" executed:", resp.result.goal);
            if !resp.result.recalled.is_empty() {
                println!("  recalled: {}", resp.result.recalled.join(", "));
            }
            for (i, step) in resp.result.steps.iter().enumerate() {
                println!("  {}. {}", i + 1, step.step);
                println!("     -> {}", step.result.action);
            }
        }

        Commands::Memory { export } => {
            let client = ApiClient::new(config.api_url.clone());
            let resp = client.memory()?;

            if let Some(path) = export {
                let json =
                    serde_json::to_string_pretty(&resp.memory).into_diagnostic()?;
                std::fs::write(&path, json).into_diagnostic()?;
                println!("Memory exported to {}", path.display());
                return Ok(());
            }

            println!("Semantic memory ({} items):", resp.memory.semantic.len());
            for entry in resp.memory.semantic.iter().rev().take(10) {
                println!("  - {}", entry.concept);
            }
            println!("Episodic memory ({} events):", resp.memory.episodic.len());
            for ep in resp.memory.episodic.iter().rev().take(10) {
                println!(
                    "  {} [{}] {}",
                    ep.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    ep.context.emotion,
                    ep.action
                );
            }
        }

        Commands::Protocols => {
            let client = ApiClient::new(config.api_url.clone());
            let resp = client.protocols()?;
            let mut protocols = resp.protocols;
            protocols.sort_by(|a, b| {
                b.reward
                    .partial_cmp(&a.reward)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            println!("Registered protocols ({}):", protocols.len());
            for p in &protocols {
                let tag = if p.reward > 4.0 {
                    "hot"
                } else if p.reward >= 2.0 {
                    "good"
                } else {
                    "low"
                };
                println!(
                    "  {:<24} reward={:.2} execs={:<4} [{}]",
                    p.name, p.reward, p.executions, tag
                );
            }
        }

        Commands::Improve => {
            let client = ApiClient::new(config.api_url.clone());
            let resp = client.improve()?;
            println!("Learning pass complete:");
            for entry in &resp.report.improvements {
                println!(
                    "  {:<24} {:<17} reward={:.2} execs={}",
                    entry.protocol,
                    entry.verdict.to_string(),
                    entry.reward,
                    entry.executions
                );
            }
            println!("  mutants spawned: {}", resp.report.mutants_spawned);
        }
    }

    Ok(())
}

fn print_run(report: &aeon::agent::RunReport) {
    println!("Thought:  {}", report.thought);
    println!(
        "Protocol: {}",
        report.protocol.as_deref().unwrap_or("(baseline)")
    );
    println!("Action:   {}", report.action);
    if let Some(reward) = report.reward {
        println!("Reward:   {reward:.2}");
    }
}

/// Scripted in-process walkthrough of the agent's behavior.
fn run_demo(config: &AeonConfig) {
    let mut agent = Agent::standard(CognitionEngine::from_env(config.openai()));

    let scenarios = [
        ("Happy & creative", "happy", "create"),
        ("Sad & needing comfort", "sad", "talk"),
        ("Focused & productive", "neutral", "work"),
    ];

    for (title, emotion, intent) in scenarios {
        println!("Scenario: {title}");
        println!("{}", "-".repeat(40));
        agent.update_context(&ContextUpdate::state(emotion, intent));
        let report = agent.run();
        print_run(&report);
        println!();
    }

    println!("Goal: organize workspace");
    println!("{}", "-".repeat(40));
    let mut paced = AutonomousLoop::new(&mut agent, Duration::from_millis(300));
    match paced.run_goal("organize workspace", |step, result| {
        println!("  {step}");
        println!("    -> {}", result.action);
    }) {
        Ok(report) => {
            println!();
            println!("Protocol state after goal:");
            for p in &report.protocols {
                println!("  {:<24} reward={:.2} execs={}", p.name, p.reward, p.executions);
            }
        }
        Err(e) => println!("goal failed: {e}"),
    }

    println!();
    println!("Learning pass:");
    println!("{}", "-".repeat(40));
    let report = learning::learning_pass(agent.manager_mut());
    for entry in &report.improvements {
        println!(
            "  {:<24} {:<17} reward={:.2}",
            entry.protocol,
            entry.verdict.to_string(),
            entry.reward
        );
    }
    println!("  mutants spawned: {}", report.mutants_spawned);

    println!();
    let dump = agent.memory().dump();
    println!("Memory: {} semantic, {} episodic entries", dump.semantic.len(), dump.episodic.len());
}
