use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::Grid;
use crate::snake::INITIAL_LENGTH;

/// Largest grid side. Hosts draw a border and a status line around the board
/// and still address every screen cell with a `u16`.
pub const MAX_DIMENSION: u16 = u16::MAX - 3;

/// Fixed values a session is built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Columns on the board
    pub width: u16,
    /// Rows on the board
    pub height: u16,
    /// Simulation steps per second
    pub ticks_per_second: u32,
    /// Cells added to the length target per food eaten
    pub growth_per_food: usize,
    /// Points added to the score per food eaten
    pub score_per_food: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            ticks_per_second: 10,
            growth_per_food: 1,
            score_per_food: 10,
        }
    }
}

impl GameConfig {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// A starting snake has to be able to move along either axis without its
    /// head running into its own tail on the first step.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = INITIAL_LENGTH as u16 + 1;
        if self.width < min || self.height < min {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                min,
            });
        }

        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_DIMENSION,
            });
        }

        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.width, self.height)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 40);
        assert_eq!(config.height, 30);
        assert_eq!(config.ticks_per_second, 10);
        assert_eq!(config.growth_per_food, 1);
        assert_eq!(config.score_per_food, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(GameConfig::default().tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let config = GameConfig::new(2, 30);
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall { width: 2, height: 30, min: 4 })
        );
    }

    #[test]
    fn test_smallest_grid() {
        assert!(GameConfig::new(4, 4).validate().is_ok());
        assert!(GameConfig::new(4, 3).validate().is_err());
    }

    #[test]
    fn test_rejects_huge_grid() {
        assert!(GameConfig::new(MAX_DIMENSION, MAX_DIMENSION).validate().is_ok());
        assert_eq!(
            GameConfig::new(u16::MAX, 30).validate(),
            Err(ConfigError::GridTooLarge { width: u16::MAX, height: 30, max: MAX_DIMENSION })
        );
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        let config = GameConfig {
            ticks_per_second: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickRate));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "width": 20, "score_per_food": 5 }"#).unwrap();
        assert_eq!(config.width, 20);
        assert_eq!(config.height, 30);
        assert_eq!(config.score_per_food, 5);
    }
}
