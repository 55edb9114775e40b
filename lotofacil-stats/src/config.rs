use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

/// Smallest run length worth reporting.
pub const MIN_RUN_LENGTH: usize = 2;

/// How many ranked entries the frequency and overdue lists keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct TopK(usize);

impl TopK {
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(StatsError::InvalidWindowSize(k));
        }
        Ok(Self(k))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for TopK {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<usize> for TopK {
    type Error = StatsError;

    fn try_from(k: usize) -> Result<Self> {
        Self::new(k)
    }
}

impl From<TopK> for usize {
    fn from(k: TopK) -> usize {
        k.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub top_k: TopK,
    pub min_run_length: usize,
    /// Draws fetched before each computation.
    pub latest_window: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            top_k: TopK::default(),
            min_run_length: MIN_RUN_LENGTH,
            latest_window: 50,
        }
    }
}

impl StatsConfig {
    pub fn with_top_k(mut self, top_k: TopK) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_run_length < MIN_RUN_LENGTH {
            return Err(StatsError::InvalidRunLength(self.min_run_length));
        }
        if self.latest_window == 0 {
            return Err(StatsError::Config {
                message: "latest_window deve ser positivo".to_string(),
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: StatsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_k_rejects_zero() {
        assert!(matches!(TopK::new(0), Err(StatsError::InvalidWindowSize(0))));
        assert_eq!(TopK::new(5).unwrap().get(), 5);
    }

    #[test]
    fn test_default_config() {
        let config = StatsConfig::default();
        assert_eq!(config.top_k.get(), 10);
        assert_eq!(config.min_run_length, 2);
        assert_eq!(config.latest_window, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = StatsConfig::from_json(r#"{"top_k": 5}"#).unwrap();
        assert_eq!(config.top_k.get(), 5);
        assert_eq!(config.min_run_length, 2);
        assert_eq!(config.latest_window, 50);
    }

    #[test]
    fn test_json_rejects_zero_top_k() {
        assert!(matches!(
            StatsConfig::from_json(r#"{"top_k": 0}"#),
            Err(StatsError::Json { .. })
        ));
    }

    #[test]
    fn test_rejects_run_length_below_two() {
        assert!(matches!(
            StatsConfig::from_json(r#"{"min_run_length": 1}"#),
            Err(StatsError::InvalidRunLength(1))
        ));
    }

    #[test]
    fn test_rejects_zero_latest_window() {
        assert!(matches!(
            StatsConfig::from_json(r#"{"latest_window": 0}"#),
            Err(StatsError::Config { .. })
        ));
    }

    #[test]
    fn test_malformed_json_keeps_parser_error() {
        let err = StatsConfig::from_json("{top_k").unwrap_err();
        assert!(matches!(err, StatsError::Json { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_missing_file_keeps_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StatsConfig::load(&dir.path().join("ausente.json")).unwrap_err();
        match err {
            StatsError::Io { source } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("erro inesperado: {other:?}"),
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = StatsConfig::default().with_top_k(TopK::new(3).unwrap());
        let json = serde_json::to_string(&config).unwrap();
        let restored = StatsConfig::from_json(&json).unwrap();
        assert_eq!(restored, config);
    }
}
