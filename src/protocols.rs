//! Built-in protocol library: emotional, productivity, and automation behaviors.
//!
//! These are the defaults registered by the server, the demo, and the
//! dashboard-backed agent. Conditions read lowercased context fields;
//! actions return short human-readable result strings.

use rand::seq::SliceRandom;

use crate::context::Context;
use crate::protocol::Protocol;

// ---------------------------------------------------------------------------
// Emotional
// ---------------------------------------------------------------------------

/// Positive emotional states.
pub fn happy(ctx: &Context) -> bool {
    matches!(ctx.emotion.to_lowercase().as_str(), "happy" | "excited")
}

/// Low emotional states.
pub fn sad(ctx: &Context) -> bool {
    matches!(ctx.emotion.to_lowercase().as_str(), "sad" | "down")
}

/// Channel positive energy into creation.
pub fn create(_ctx: &Context) -> String {
    pick(&[
        "Creative energy detected. Let's build something meaningful.",
        "Positive momentum — a good moment to start something new.",
    ])
}

/// Offer emotional support.
pub fn comfort(_ctx: &Context) -> String {
    pick(&[
        "It's okay to feel this way. Take your time.",
        "I'm here with you. One small step at a time.",
    ])
}

// ---------------------------------------------------------------------------
// Productivity
// ---------------------------------------------------------------------------

/// Productivity-oriented intents.
pub fn focused(ctx: &Context) -> bool {
    let intent = ctx.intent.to_lowercase();
    ["work", "study", "focus", "organize"]
        .iter()
        .any(|kw| intent.contains(kw))
}

/// Structure the work ahead.
pub fn focus_action(_ctx: &Context) -> String {
    "Reducing distractions and structuring the next work block.".to_string()
}

// ---------------------------------------------------------------------------
// Automation
// ---------------------------------------------------------------------------

/// Network trouble reported via intent or environment.
pub fn network_issue(ctx: &Context) -> bool {
    ctx.intent.to_lowercase().contains("network")
        || ctx.env("incident").is_some_and(|v| v.contains("network"))
}

/// Run network diagnostics.
pub fn resolve_network(_ctx: &Context) -> String {
    "Running diagnostics, checking routing, escalating if needed.".to_string()
}

/// Ticket-flavored intents.
pub fn crm_ticket(ctx: &Context) -> bool {
    ctx.intent.to_lowercase().contains("ticket")
}

/// File a ticket.
pub fn create_ticket(_ctx: &Context) -> String {
    "CRM ticket created, priority assigned.".to_string()
}

fn pick(options: &[&str]) -> String {
    options
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
        .to_string()
}

/// The default protocol set registered at startup.
pub fn standard_protocols() -> Vec<Protocol> {
    vec![
        Protocol::new("Happy", happy, create, 3.0),
        Protocol::new("Sad", sad, comfort, 2.0),
        Protocol::new("Focus", focused, focus_action, 3.0),
        Protocol::new("NetworkTriage", network_issue, resolve_network, 2.5),
        Protocol::new("TicketIntake", crm_ticket, create_ticket, 2.5),
    ]
}
