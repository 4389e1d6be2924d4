use rayon::prelude::*;

use lotto645_data::models::{chronological, validate_history};
use lotto645_data::Draw;

use crate::config::ExclusionConfig;
use crate::error::EngineError;
use crate::report::{Analysis, BacktestReport, ExclusionResult, NextDrawPrediction};
use crate::scoring::{ExclusionStrategy, RecencyWeightedScorer};

/// Replays an exclusion strategy over past draws.
///
/// Every evaluated draw is scored from the strictly earlier draws only. Input is
/// validated in full before anything is computed, and sorted by `draw_no` on a
/// private copy when it is not already ascending.
pub struct BacktestEngine<S = RecencyWeightedScorer> {
    config: ExclusionConfig,
    strategy: S,
}

impl BacktestEngine<RecencyWeightedScorer> {
    pub fn new(config: ExclusionConfig) -> Result<Self, EngineError> {
        let strategy = RecencyWeightedScorer::from_config(&config);
        Self::with_strategy(config, strategy)
    }
}

impl Default for BacktestEngine<RecencyWeightedScorer> {
    fn default() -> Self {
        Self {
            config: ExclusionConfig::default(),
            strategy: RecencyWeightedScorer::default(),
        }
    }
}

impl<S: ExclusionStrategy> BacktestEngine<S> {
    pub fn with_strategy(config: ExclusionConfig, strategy: S) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config, strategy })
    }

    pub fn config(&self) -> &ExclusionConfig {
        &self.config
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn replay(&self, draws: &[Draw]) -> Result<BacktestReport, EngineError> {
        validate_history(draws)?;
        let history = chronological(draws);
        Ok(self.replay_validated(&history, false))
    }

    /// Same report as [`replay`](Self::replay), with prefixes scored on the rayon pool.
    pub fn replay_par(&self, draws: &[Draw]) -> Result<BacktestReport, EngineError> {
        validate_history(draws)?;
        let history = chronological(draws);
        Ok(self.replay_validated(&history, true))
    }

    /// Exclusions for the draw after the last known one, from the whole history.
    pub fn predict_next(&self, draws: &[Draw]) -> Result<NextDrawPrediction, EngineError> {
        validate_history(draws)?;
        let history = chronological(draws);
        self.predict_validated(&history)
    }

    pub fn analyze(&self, draws: &[Draw]) -> Result<Analysis, EngineError> {
        validate_history(draws)?;
        let history = chronological(draws);
        let next = self.predict_validated(&history)?;
        let report = self.replay_validated(&history, false);
        Ok(Analysis { report, next })
    }

    fn start_index(&self, history: &[Draw]) -> Option<usize> {
        let cutoff = self.config.backtest_start_draw;
        match history.iter().position(|d| d.draw_no >= cutoff) {
            None => {
                log::warn!("No draw at or after {}, nothing to backtest", cutoff);
                None
            }
            Some(idx) if idx < self.config.min_lookback => {
                log::warn!(
                    "Only {} draw(s) before draw {}, need {}",
                    idx,
                    history[idx].draw_no,
                    self.config.min_lookback
                );
                None
            }
            Some(idx) => Some(idx),
        }
    }

    fn evaluate_at(&self, history: &[Draw], idx: usize) -> ExclusionResult {
        let exclusion_list = self.strategy.exclusions(&history[..idx]);
        let result = ExclusionResult::evaluate(&history[idx], exclusion_list);
        log::debug!(
            "Draw {}: {} hit(s), success {}%",
            result.draw_no,
            result.hit_count,
            result.success_rate
        );
        result
    }

    fn replay_validated(&self, history: &[Draw], parallel: bool) -> BacktestReport {
        let Some(start) = self.start_index(history) else {
            return BacktestReport::empty();
        };

        let results: Vec<ExclusionResult> = if parallel {
            (start..history.len())
                .into_par_iter()
                .map(|idx| self.evaluate_at(history, idx))
                .collect()
        } else {
            (start..history.len())
                .map(|idx| self.evaluate_at(history, idx))
                .collect()
        };

        let report = BacktestReport::from_chronological(results, self.config.recent_summary_window);
        log::info!(
            "{}: {} draws evaluated, average success {}%, recent {}%",
            self.strategy.name(),
            report.total_draws,
            report.avg_success_rate,
            report.recent10_success_rate
        );
        report
    }

    fn predict_validated(&self, history: &[Draw]) -> Result<NextDrawPrediction, EngineError> {
        let last = history.last().ok_or(EngineError::EmptyHistory)?;
        let draw_no = last
            .draw_no
            .checked_add(1)
            .ok_or(EngineError::DrawNoOverflow(last.draw_no))?;
        Ok(NextDrawPrediction {
            draw_no,
            exclusion_list: self.strategy.exclusions(history),
        })
    }
}

/// Historical replay with the default configuration.
pub fn replay(draws: &[Draw]) -> Result<BacktestReport, EngineError> {
    let engine: BacktestEngine = BacktestEngine::default();
    engine.replay(draws)
}

/// Next-draw exclusions with the default configuration.
pub fn predict_next(draws: &[Draw]) -> Result<NextDrawPrediction, EngineError> {
    let engine: BacktestEngine = BacktestEngine::default();
    engine.predict_next(draws)
}
