use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use lotto645_data::{Draw, POOL_SIZE};

use crate::config::ExclusionConfig;

pub trait ExclusionStrategy: Send + Sync {
    fn name(&self) -> &str;
    /// `history` is chronological (oldest first). Returns distinct numbers in ascending order.
    fn exclusions(&self, history: &[Draw]) -> Vec<u8>;
    fn params(&self) -> HashMap<String, f64>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberScore {
    pub number: u8,
    pub global_count: u32,
    pub recent_count: u32,
    pub score: u64,
}

/// Ranks numbers by `global_count + weight * recent_count` and excludes the lowest.
/// A single appearance in the recency window outweighs dozens of older ones.
#[derive(Debug, Clone)]
pub struct RecencyWeightedScorer {
    exclusion_size: usize,
    recency_window: usize,
    recency_weight: u32,
}

impl RecencyWeightedScorer {
    pub fn new(exclusion_size: usize, recency_window: usize, recency_weight: u32) -> Self {
        Self {
            exclusion_size,
            recency_window,
            recency_weight,
        }
    }

    pub fn from_config(config: &ExclusionConfig) -> Self {
        Self::new(
            config.exclusion_size,
            config.recency_window,
            config.recency_weight,
        )
    }

    /// One entry per number, in ascending number order.
    pub fn score_table(&self, history: &[Draw]) -> Vec<NumberScore> {
        let size = POOL_SIZE as usize;
        let mut global = vec![0u32; size];
        let mut recent = vec![0u32; size];

        tally(history, &mut global);
        let tail_start = history.len().saturating_sub(self.recency_window);
        tally(&history[tail_start..], &mut recent);

        (1..=POOL_SIZE)
            .zip(global.iter().zip(&recent))
            .map(|(number, (&global_count, &recent_count))| NumberScore {
                number,
                global_count,
                recent_count,
                score: global_count as u64 + self.recency_weight as u64 * recent_count as u64,
            })
            .collect()
    }
}

impl Default for RecencyWeightedScorer {
    fn default() -> Self {
        Self::from_config(&ExclusionConfig::default())
    }
}

impl ExclusionStrategy for RecencyWeightedScorer {
    fn name(&self) -> &str {
        "RecencyWeighted"
    }

    fn exclusions(&self, history: &[Draw]) -> Vec<u8> {
        let mut table = self.score_table(history);
        // Equal scores go to the smaller number.
        table.sort_by_key(|s| (s.score, s.number));

        let mut selected: Vec<u8> = table
            .iter()
            .take(self.exclusion_size)
            .map(|s| s.number)
            .collect();
        selected.sort_unstable();
        selected
    }

    fn params(&self) -> HashMap<String, f64> {
        HashMap::from([
            ("exclusion_size".to_string(), self.exclusion_size as f64),
            ("recency_window".to_string(), self.recency_window as f64),
            ("recency_weight".to_string(), self.recency_weight as f64),
        ])
    }
}

fn tally(draws: &[Draw], counts: &mut [u32]) {
    for draw in draws {
        for &n in &draw.numbers {
            if let Some(count) = (n as usize).checked_sub(1).and_then(|idx| counts.get_mut(idx)) {
                *count += 1;
            }
        }
    }
}

/// The 10 numbers least likely to be drawn next, under the default weighting.
pub fn score_exclusions(history: &[Draw]) -> Vec<u8> {
    RecencyWeightedScorer::default().exclusions(history)
}
