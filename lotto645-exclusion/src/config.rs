use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lotto645_data::POOL_SIZE;

use crate::error::EngineError;

pub const DEFAULT_EXCLUSION_SIZE: usize = 10;
pub const DEFAULT_RECENCY_WINDOW: usize = 10;
pub const DEFAULT_RECENCY_WEIGHT: u32 = 50;
/// First draw the backtest evaluates; earlier draws only feed the counts.
pub const DEFAULT_BACKTEST_START_DRAW: u32 = 1204;
pub const DEFAULT_MIN_LOOKBACK: usize = 10;
pub const DEFAULT_RECENT_SUMMARY_WINDOW: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    pub exclusion_size: usize,
    pub recency_window: usize,
    pub recency_weight: u32,
    pub backtest_start_draw: u32,
    pub min_lookback: usize,
    pub recent_summary_window: usize,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            exclusion_size: DEFAULT_EXCLUSION_SIZE,
            recency_window: DEFAULT_RECENCY_WINDOW,
            recency_weight: DEFAULT_RECENCY_WEIGHT,
            backtest_start_draw: DEFAULT_BACKTEST_START_DRAW,
            min_lookback: DEFAULT_MIN_LOOKBACK,
            recent_summary_window: DEFAULT_RECENT_SUMMARY_WINDOW,
        }
    }
}

impl ExclusionConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.exclusion_size == 0 || self.exclusion_size > POOL_SIZE as usize {
            return Err(EngineError::InvalidConfig(format!(
                "exclusion_size must be in 1..={}, got {}",
                POOL_SIZE, self.exclusion_size
            )));
        }
        if self.recency_window == 0 {
            return Err(EngineError::InvalidConfig(
                "recency_window must be positive".to_string(),
            ));
        }
        if self.recent_summary_window == 0 {
            return Err(EngineError::InvalidConfig(
                "recent_summary_window must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn save_config(config: &ExclusionConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json).with_context(|| format!("Cannot write {:?}", path))?;
    log::info!("Configuration saved to {}", path.display());
    Ok(())
}

pub fn load_config(path: &Path) -> Result<ExclusionConfig> {
    let json = std::fs::read_to_string(path).with_context(|| format!("Cannot read {:?}", path))?;
    let config: ExclusionConfig =
        serde_json::from_str(&json).with_context(|| format!("Invalid configuration in {:?}", path))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExclusionConfig::default();
        assert_eq!(config.exclusion_size, 10);
        assert_eq!(config.recency_window, 10);
        assert_eq!(config.recency_weight, 50);
        assert_eq!(config.backtest_start_draw, 1204);
        assert_eq!(config.min_lookback, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ExclusionConfig = serde_json::from_str(r#"{"backtest_start_draw": 11}"#).unwrap();
        assert_eq!(config.backtest_start_draw, 11);
        assert_eq!(config.recency_weight, 50);
        assert_eq!(config.exclusion_size, 10);
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        let config = ExclusionConfig {
            exclusion_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));

        let config = ExclusionConfig {
            exclusion_size: 46,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ExclusionConfig {
            recency_window: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("lotto645_config_{}.json", std::process::id()));
        let config = ExclusionConfig {
            recency_weight: 30,
            ..Default::default()
        };
        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let path = std::env::temp_dir().join(format!("lotto645_bad_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"exclusion_size": 99}"#).unwrap();
        let result = load_config(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
