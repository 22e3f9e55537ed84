//! Research reports: aggregate statistics over protocol learning state.

use serde::{Deserialize, Serialize};

use crate::protocol::ProtocolStats;

/// Aggregate view of the protocol population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchReport {
    pub mean_reward: f64,
    pub variance: f64,
    pub protocol_count: usize,
    pub hypothesis: String,
    pub data: Vec<ProtocolStats>,
}

/// Analyze a protocol snapshot into mean/variance statistics.
pub fn analyze(snapshot: &[ProtocolStats]) -> ResearchReport {
    if snapshot.is_empty() {
        return ResearchReport {
            mean_reward: 0.0,
            variance: 0.0,
            protocol_count: 0,
            hypothesis: "Insufficient data".to_string(),
            data: Vec::new(),
        };
    }

    let n = snapshot.len() as f64;
    let mean = snapshot.iter().map(|p| p.reward).sum::<f64>() / n;
    let variance = snapshot
        .iter()
        .map(|p| (p.reward - mean) * (p.reward - mean))
        .sum::<f64>()
        / n;

    ResearchReport {
        mean_reward: mean,
        variance,
        protocol_count: snapshot.len(),
        hypothesis: "Reward-weighted protocol selection converges".to_string(),
        data: snapshot.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(name: &str, reward: f64) -> ProtocolStats {
        ProtocolStats {
            name: name.to_string(),
            reward,
            executions: 0,
        }
    }

    #[test]
    fn empty_snapshot_yields_zeroed_report() {
        let report = analyze(&[]);
        assert_eq!(report.protocol_count, 0);
        assert_eq!(report.mean_reward, 0.0);
        assert_eq!(report.hypothesis, "Insufficient data");
    }

    #[test]
    fn mean_and_variance() {
        let report = analyze(&[stats("A", 2.0), stats("B", 4.0)]);
        assert!((report.mean_reward - 3.0).abs() < 1e-9);
        assert!((report.variance - 1.0).abs() < 1e-9);
        assert_eq!(report.protocol_count, 2);
        assert_eq!(report.data.len(), 2);
    }
}
