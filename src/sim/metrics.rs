//! Episode metrics and multi-episode aggregation.
//!
//! Metrics are observational: collecting them never changes play.

use serde::{Deserialize, Serialize};

use crate::core::Role;

/// Outcome and timings of one episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeMetrics {
    /// Winning side (`"catcher"` or `"runner"` when serialized).
    pub winner: Role,

    /// Turns played. On capture this counts the capturing turn.
    pub turns: u32,

    /// True if the episode ended by capture.
    pub captured: bool,

    /// Decision latency per catcher action (microseconds).
    pub catcher_times_us: Vec<u64>,

    /// Decision latency per runner action (microseconds).
    pub runner_times_us: Vec<u64>,

    /// Wall-clock time of the whole episode (microseconds).
    pub total_time_us: u64,
}

impl EpisodeMetrics {
    /// Decision latencies recorded for `role`.
    #[must_use]
    pub fn decision_times(&self, role: Role) -> &[u64] {
        match role {
            Role::Catcher => &self.catcher_times_us,
            Role::Runner => &self.runner_times_us,
        }
    }

    /// Mean decision latency for `role`, if it decided at all.
    #[must_use]
    pub fn mean_decision_us(&self, role: Role) -> Option<f64> {
        mean_u64(self.decision_times(role))
    }
}

/// Capture-turn statistics over the episodes the catcher won.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
}

impl TurnStats {
    fn from_turns(turns: &[u32]) -> Option<Self> {
        let min = *turns.iter().min()?;
        let max = *turns.iter().max()?;
        let values: Vec<f64> = turns.iter().map(|&t| f64::from(t)).collect();
        let mean = mean_f64(&values)?;
        Some(Self {
            mean,
            std_dev: std_dev(&values, mean),
            min,
            max,
        })
    }
}

/// Aggregate of a batch of episodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub episodes: usize,
    pub catcher_wins: usize,
    pub runner_wins: usize,
    pub catcher_win_rate: f64,
    pub runner_win_rate: f64,

    /// `None` if the catcher never won.
    pub capture_turns: Option<TurnStats>,

    /// Mean and spread of turns played, over all episodes.
    pub mean_turns: f64,
    pub std_turns: f64,

    /// Mean latency per action, pooled over every action of every episode.
    pub mean_catcher_decision_us: f64,
    pub mean_runner_decision_us: f64,

    pub mean_game_time_us: f64,
    pub max_game_time_us: u64,
}

impl MatchSummary {
    #[must_use]
    pub fn from_episodes(episodes: &[EpisodeMetrics]) -> Self {
        let count = episodes.len();
        let catcher_wins = episodes.iter().filter(|e| e.winner == Role::Catcher).count();
        let runner_wins = count - catcher_wins;
        let rate = |wins: usize| if count == 0 { 0.0 } else { wins as f64 / count as f64 };

        let capture_turns: Vec<u32> = episodes
            .iter()
            .filter(|e| e.winner == Role::Catcher)
            .map(|e| e.turns)
            .collect();

        let turns: Vec<f64> = episodes.iter().map(|e| f64::from(e.turns)).collect();
        let mean_turns = mean_f64(&turns).unwrap_or(0.0);

        let pooled = |role: Role| -> f64 {
            let all: Vec<u64> = episodes
                .iter()
                .flat_map(|e| e.decision_times(role).iter().copied())
                .collect();
            mean_u64(&all).unwrap_or(0.0)
        };

        let game_times: Vec<u64> = episodes.iter().map(|e| e.total_time_us).collect();

        Self {
            episodes: count,
            catcher_wins,
            runner_wins,
            catcher_win_rate: rate(catcher_wins),
            runner_win_rate: rate(runner_wins),
            capture_turns: TurnStats::from_turns(&capture_turns),
            mean_turns,
            std_turns: std_dev(&turns, mean_turns),
            mean_catcher_decision_us: pooled(Role::Catcher),
            mean_runner_decision_us: pooled(Role::Runner),
            mean_game_time_us: mean_u64(&game_times).unwrap_or(0.0),
            max_game_time_us: game_times.iter().copied().max().unwrap_or(0),
        }
    }
}

fn mean_u64(values: &[u64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64)
}

fn mean_f64(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

// Population standard deviation.
fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(
        winner: Role,
        turns: u32,
        catcher: Vec<u64>,
        runner: Vec<u64>,
        total: u64,
    ) -> EpisodeMetrics {
        EpisodeMetrics {
            winner,
            turns,
            captured: winner == Role::Catcher,
            catcher_times_us: catcher,
            runner_times_us: runner,
            total_time_us: total,
        }
    }

    #[test]
    fn test_winner_serializes_lowercase() {
        let metrics = episode(Role::Runner, 50, vec![], vec![], 10);
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["winner"], "runner");
        assert_eq!(json["turns"], 50);
    }

    #[test]
    fn test_mean_decision() {
        let metrics = episode(Role::Catcher, 3, vec![10, 20, 30], vec![], 100);
        assert_eq!(metrics.mean_decision_us(Role::Catcher), Some(20.0));
        assert_eq!(metrics.mean_decision_us(Role::Runner), None);
    }

    #[test]
    fn test_summary() {
        let episodes = vec![
            episode(Role::Catcher, 4, vec![10, 10], vec![5], 100),
            episode(Role::Catcher, 8, vec![40], vec![5, 5], 300),
            episode(Role::Runner, 50, vec![], vec![20], 200),
            episode(Role::Runner, 50, vec![], vec![], 400),
        ];

        let summary = MatchSummary::from_episodes(&episodes);

        assert_eq!(summary.episodes, 4);
        assert_eq!(summary.catcher_wins, 2);
        assert_eq!(summary.runner_wins, 2);
        assert_eq!(summary.catcher_win_rate, 0.5);

        let capture = summary.capture_turns.unwrap();
        assert_eq!(capture.mean, 6.0);
        assert_eq!(capture.std_dev, 2.0);
        assert_eq!((capture.min, capture.max), (4, 8));

        assert_eq!(summary.mean_turns, 28.0);
        // Pooled over actions, not averaged per episode
        assert_eq!(summary.mean_catcher_decision_us, 20.0);
        assert_eq!(summary.mean_runner_decision_us, 8.75);
        assert_eq!(summary.mean_game_time_us, 250.0);
        assert_eq!(summary.max_game_time_us, 400);
    }

    #[test]
    fn test_empty_summary() {
        let summary = MatchSummary::from_episodes(&[]);
        assert_eq!(summary.episodes, 0);
        assert_eq!(summary.catcher_win_rate, 0.0);
        assert_eq!(summary.capture_turns, None);
        assert_eq!(summary.mean_game_time_us, 0.0);
    }

    #[test]
    fn test_summary_round_trip() {
        let summary =
            MatchSummary::from_episodes(&[episode(Role::Catcher, 2, vec![1], vec![1], 9)]);
        let json = serde_json::to_string(&summary).unwrap();
        let back: MatchSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, back);
    }
}
