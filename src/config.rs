use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::eval::EvaluatorKind;

/// Default transposition cache capacity in entries
pub const DEFAULT_CACHE_CAPACITY: usize = 100_000;

/// Difficulty level 1..=5. Each level fixes a search depth and a wall-clock
/// budget per move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: Difficulty = Difficulty(1);
    pub const MAX: Difficulty = Difficulty(5);

    /// (depth, budget in seconds) per level
    const TABLE: [(u8, u64); 5] = [(2, 1), (3, 2), (4, 3), (5, 5), (6, 8)];

    pub fn new(level: u8) -> Result<Self, ConfigError> {
        if (1..=5).contains(&level) {
            Ok(Difficulty(level))
        } else {
            Err(ConfigError::InvalidDifficulty(level))
        }
    }

    #[inline]
    pub fn level(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn max_depth(self) -> u8 {
        Self::TABLE[self.0 as usize - 1].0
    }

    #[inline]
    pub fn time_budget(self) -> Duration {
        Duration::from_secs(Self::TABLE[self.0 as usize - 1].1)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty(3)
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Difficulty::new(level)
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> u8 {
        d.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-agent configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    pub evaluator: EvaluatorKind,
    /// Transposition cache capacity in entries
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            difficulty: Difficulty::default(),
            evaluator: EvaluatorKind::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn new(difficulty: Difficulty, evaluator: EvaluatorKind) -> Self {
        EngineConfig {
            difficulty,
            evaluator,
            ..Default::default()
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::Validation(
                "cache_capacity must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_table() {
        let expected = [(1, 2, 1), (2, 3, 2), (3, 4, 3), (4, 5, 5), (5, 6, 8)];
        for (level, depth, secs) in expected {
            let d = Difficulty::new(level).unwrap();
            assert_eq!(d.max_depth(), depth);
            assert_eq!(d.time_budget(), Duration::from_secs(secs));
        }
    }

    #[test]
    fn test_difficulty_out_of_range() {
        assert_eq!(Difficulty::new(0), Err(ConfigError::InvalidDifficulty(0)));
        assert_eq!(Difficulty::try_from(6), Err(ConfigError::InvalidDifficulty(6)));
        assert_eq!(Difficulty::default().level(), 3);
    }

    #[test]
    fn test_config_deserialize_with_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"difficulty": 5}"#).unwrap();
        assert_eq!(config.difficulty, Difficulty::MAX);
        assert_eq!(config.evaluator, EvaluatorKind::Comprehensive);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);

        let bad = serde_json::from_str::<EngineConfig>(r#"{"difficulty": 9}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_config_validation() {
        let config = EngineConfig {
            cache_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(EngineConfig::default().validate().is_ok());
    }
}
