//! Outcome reflection: fold binary step outcomes into protocol rewards.

use crate::protocol::Protocol;

/// Score observed for a successful outcome.
pub const SUCCESS_SCORE: f64 = 5.0;
/// Score observed for a failed outcome.
pub const FAILURE_SCORE: f64 = 1.0;

/// Update a protocol's reward from a step outcome via its EMA observation.
pub fn reflect(protocol: &mut Protocol, success: bool) {
    let score = if success { SUCCESS_SCORE } else { FAILURE_SCORE };
    protocol.observe_score(score);
    tracing::debug!(
        protocol = protocol.name(),
        success,
        reward = protocol.reward(),
        "outcome reflected"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mid_protocol() -> Protocol {
        Protocol::new("Mid", |_| true, |_| "act".to_string(), 3.0)
    }

    #[test]
    fn success_raises_reward_below_max() {
        let mut p = mid_protocol();
        reflect(&mut p, true);
        assert!(p.reward() > 3.0);
    }

    #[test]
    fn failure_lowers_reward_above_min() {
        let mut p = mid_protocol();
        reflect(&mut p, false);
        assert!(p.reward() < 3.0);
    }

    #[test]
    fn repeated_success_converges_toward_success_score() {
        let mut p = mid_protocol();
        for _ in 0..50 {
            reflect(&mut p, true);
        }
        assert!((p.reward() - SUCCESS_SCORE).abs() < 0.01);
    }
}
