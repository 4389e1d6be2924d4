pub mod backtest;
pub mod config;
pub mod error;
pub mod report;
pub mod scoring;

#[cfg(test)]
mod testutil;

pub use backtest::{predict_next, replay, BacktestEngine};
pub use config::ExclusionConfig;
pub use error::EngineError;
pub use report::{Analysis, BacktestReport, ExclusionResult, NextDrawPrediction, SuccessRate};
pub use scoring::{score_exclusions, ExclusionStrategy, NumberScore, RecencyWeightedScorer};
