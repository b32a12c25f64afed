//! Episode outcome statistics
//!
//! Tallies finished episodes so rollouts can report success rate and
//! per-role returns.

use serde::{Deserialize, Serialize};

use crate::env::EndReason;

/// Summary of one finished episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Why the episode ended
    pub end_reason: EndReason,

    /// Ticks taken
    pub length: usize,

    /// Cumulative reward of each agent, in agent order
    pub returns: [f32; 2],
}

/// Aggregated statistics over many episodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    /// Episodes recorded
    pub episodes: usize,

    /// Episodes ended by reaching the right goal
    pub successes: usize,

    /// Episodes ended by reaching the wrong goal
    pub failures: usize,

    /// Episodes cut off by the step budget
    pub truncations: usize,

    /// Sum of episode lengths
    pub total_steps: usize,

    /// Sum of cumulative rewards per agent
    pub total_returns: [f64; 2],
}

impl EpisodeStats {
    /// Create zero-initialized statistics
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Add one finished episode
    pub fn record(&mut self, record: &EpisodeRecord) {
        self.episodes += 1;
        match record.end_reason {
            EndReason::Success => self.successes += 1,
            EndReason::Failure => self.failures += 1,
            EndReason::Truncated => self.truncations += 1,
        }
        self.total_steps += record.length;
        for (total, r) in self.total_returns.iter_mut().zip(record.returns) {
            *total += f64::from(r);
        }
    }

    /// Fraction of episodes that succeeded
    pub fn success_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.successes as f64 / self.episodes as f64
        }
    }

    /// Mean episode length in ticks
    pub fn mean_length(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.episodes as f64
        }
    }

    /// Mean cumulative reward of agent `agent_id`
    pub fn mean_return(&self, agent_id: usize) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_returns.get(agent_id).copied().unwrap_or(0.0) / self.episodes as f64
        }
    }

    /// Fold another set of statistics into this one
    pub fn merge(&mut self, other: &EpisodeStats) {
        self.episodes += other.episodes;
        self.successes += other.successes;
        self.failures += other.failures;
        self.truncations += other.truncations;
        self.total_steps += other.total_steps;
        for (total, r) in self.total_returns.iter_mut().zip(other.total_returns) {
            *total += r;
        }
    }
}

impl std::ops::AddAssign<&EpisodeStats> for EpisodeStats {
    fn add_assign(&mut self, other: &EpisodeStats) {
        self.merge(other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = EpisodeStats::zeros();
        assert_eq!(stats.success_rate(), 0.0);
        assert_eq!(stats.mean_length(), 0.0);
        assert_eq!(stats.mean_return(0), 0.0);
    }

    #[test]
    fn test_record_and_rates() {
        let mut stats = EpisodeStats::zeros();
        stats.record(&EpisodeRecord { end_reason: EndReason::Success, length: 10, returns: [1.0, 1.0] });
        stats.record(&EpisodeRecord { end_reason: EndReason::Failure, length: 20, returns: [-0.1, -0.1] });
        stats.record(&EpisodeRecord { end_reason: EndReason::Truncated, length: 30, returns: [-1.0, -1.0] });
        stats.record(&EpisodeRecord { end_reason: EndReason::Success, length: 40, returns: [1.0, 1.0] });

        assert_eq!(stats.episodes, 4);
        assert_eq!(stats.successes, 2);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.truncations, 1);
        assert!((stats.success_rate() - 0.5).abs() < 1e-12);
        assert!((stats.mean_length() - 25.0).abs() < 1e-12);
        assert!((stats.mean_return(1) - 0.225).abs() < 1e-6);
    }

    #[test]
    fn test_merge() {
        let mut a = EpisodeStats::zeros();
        a.record(&EpisodeRecord { end_reason: EndReason::Success, length: 5, returns: [1.0, 1.0] });
        let mut b = EpisodeStats::zeros();
        b.record(&EpisodeRecord { end_reason: EndReason::Failure, length: 7, returns: [-0.1, -0.1] });

        a += &b;
        assert_eq!(a.episodes, 2);
        assert_eq!(a.total_steps, 12);
        assert_eq!(a.failures, 1);
    }

    #[test]
    fn test_serializes_to_json() {
        let mut stats = EpisodeStats::zeros();
        stats.record(&EpisodeRecord { end_reason: EndReason::Success, length: 3, returns: [1.0, 1.0] });
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["successes"], 1);
        assert_eq!(json["episodes"], 1);
    }
}
