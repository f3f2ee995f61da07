//! Screen configuration.

use crate::error::{Result, ScreenError};
use quantval_data::DEFAULT_BATCH_SIZE;
use quantval_factors::{DEFAULT_TOP_N, ScoringMode};
use serde::{Deserialize, Serialize};

/// Knobs for one screen run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Symbols per provider request
    pub batch_size: usize,
    /// Candidates kept after ranking
    pub top_n: usize,
    /// Which scorer to run
    pub mode: ScoringMode,
    /// Tickers removed from the universe before fetching
    pub exclude: Vec<String>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            top_n: DEFAULT_TOP_N,
            mode: ScoringMode::default(),
            exclude: Vec::new(),
        }
    }
}

impl ScreenConfig {
    /// Default configuration for a given scoring mode.
    pub fn with_mode(mode: ScoringMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Check the configuration before any work is done.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::InvalidConfig`] for a zero batch size or a zero
    /// candidate count.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(ScreenError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(ScreenError::InvalidConfig(
                "top_n must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScreenConfig::default();
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.top_n, 50);
        assert_eq!(config.mode, ScoringMode::CompositePercentile);
        assert!(config.exclude.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_sizes() {
        let config = ScreenConfig {
            batch_size: 0,
            ..ScreenConfig::default()
        };
        assert!(matches!(config.validate(), Err(ScreenError::InvalidConfig(_))));

        let config = ScreenConfig {
            top_n: 0,
            ..ScreenConfig::default()
        };
        assert!(matches!(config.validate(), Err(ScreenError::InvalidConfig(_))));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ScreenConfig =
            serde_json::from_str(r#"{"mode": "raw_pe", "exclude": ["DISCA"]}"#).unwrap();
        assert_eq!(config.mode, ScoringMode::RawPe);
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.exclude, vec!["DISCA".to_string()]);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(
            serde_json::to_string(&ScoringMode::CompositePercentile).unwrap(),
            "\"composite_percentile\""
        );
        assert_eq!(serde_json::to_string(&ScoringMode::RawPe).unwrap(), "\"raw_pe\"");
    }
}
