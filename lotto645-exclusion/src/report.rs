use std::fmt;

use serde::{Deserialize, Serialize};

use lotto645_data::{Draw, PICK_COUNT};

/// Percentage rounded to one decimal; displays as `"83.3"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuccessRate(f64);

impl SuccessRate {
    /// Rounds half away from zero on the binary value after scaling by ten. A
    /// percentage stored just below a `.x5` boundary (1.15 is really 1.1499..) can
    /// therefore round up where decimal-string rounding would give 1.1. Hit ratios
    /// over whole draws only land on such values for very large reports.
    pub fn from_percent(percent: f64) -> Self {
        Self((percent * 10.0).round() / 10.0)
    }

    /// Share of `total` winning numbers that stayed out of the exclusion lists.
    /// Zero when nothing was evaluated.
    pub fn from_hits(hits: usize, total: usize) -> Self {
        if total == 0 {
            return Self(0.0);
        }
        Self::from_percent((1.0 - hits as f64 / total as f64) * 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for SuccessRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionResult {
    pub draw_no: u32,
    pub exclusion_list: Vec<u8>,
    pub actual_numbers: Vec<u8>,
    /// Winning numbers that were wrongly excluded, in draw order.
    pub excluded_numbers: Vec<u8>,
    pub hit_count: usize,
    pub success_rate: SuccessRate,
}

impl ExclusionResult {
    pub fn evaluate(draw: &Draw, exclusion_list: Vec<u8>) -> Self {
        let actual_numbers = draw.numbers.to_vec();
        let excluded_numbers: Vec<u8> = actual_numbers
            .iter()
            .copied()
            .filter(|n| exclusion_list.contains(n))
            .collect();
        let hit_count = excluded_numbers.len();

        Self {
            draw_no: draw.draw_no,
            exclusion_list,
            actual_numbers,
            excluded_numbers,
            hit_count,
            success_rate: SuccessRate::from_hits(hit_count, PICK_COUNT),
        }
    }

    pub fn is_hit(&self, number: u8) -> bool {
        self.excluded_numbers.contains(&number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Most recent draw first.
    pub results: Vec<ExclusionResult>,
    pub total_draws: usize,
    pub avg_success_rate: SuccessRate,
    pub recent10_success_rate: SuccessRate,
}

impl BacktestReport {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            total_draws: 0,
            avg_success_rate: SuccessRate::default(),
            recent10_success_rate: SuccessRate::default(),
        }
    }

    /// Aggregates over `results` in chronological order, then flips them for display.
    pub fn from_chronological(mut results: Vec<ExclusionResult>, recent_window: usize) -> Self {
        let total_draws = results.len();
        let avg_success_rate = aggregate_rate(&results);
        let recent_start = total_draws.saturating_sub(recent_window);
        let recent10_success_rate = aggregate_rate(&results[recent_start..]);

        results.reverse();

        Self {
            results,
            total_draws,
            avg_success_rate,
            recent10_success_rate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn find(&self, draw_no: u32) -> Option<&ExclusionResult> {
        self.results.iter().find(|r| r.draw_no == draw_no)
    }

    pub fn latest(&self) -> Option<&ExclusionResult> {
        self.results.first()
    }
}

pub fn aggregate_rate(results: &[ExclusionResult]) -> SuccessRate {
    let hits: usize = results.iter().map(|r| r.hit_count).sum();
    SuccessRate::from_hits(hits, results.len() * PICK_COUNT)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextDrawPrediction {
    pub draw_no: u32,
    pub exclusion_list: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub report: BacktestReport,
    pub next: NextDrawPrediction,
}
