//! Параметры матча, которые задаются один раз при старте.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::resources::Amount;

/// Минимум участников за столом на старте.
pub const MIN_PARTICIPANTS: usize = 2;
/// Максимум участников за столом на старте.
pub const MAX_PARTICIPANTS: usize = 20;

/// Как раздаются стартовые ресурсы.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ResourceSetup {
    /// Всем одинаково.
    Fixed { wealth: Amount, followers: Amount },
    /// Случайно в границах (включительно).
    Random {
        wealth_min: Amount,
        wealth_max: Amount,
        followers_min: Amount,
        followers_max: Amount,
    },
}

impl ResourceSetup {
    /// Стандартные границы: 100–599 доблонов, 50–249 последователей.
    pub const fn standard_random() -> Self {
        ResourceSetup::Random {
            wealth_min: Amount(100),
            wealth_max: Amount(599),
            followers_min: Amount(50),
            followers_max: Amount(249),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            ResourceSetup::Fixed { wealth, followers } => {
                if wealth.is_zero() || followers.is_zero() {
                    return Err(ConfigError::ZeroFixedResources);
                }
                Ok(())
            }
            ResourceSetup::Random {
                wealth_min,
                wealth_max,
                followers_min,
                followers_max,
            } => {
                if wealth_min > wealth_max || wealth_max.is_zero() {
                    return Err(ConfigError::InvalidRandomBounds {
                        resource: "wealth",
                        min: wealth_min.0,
                        max: wealth_max.0,
                    });
                }
                if followers_min > followers_max || followers_max.is_zero() {
                    return Err(ConfigError::InvalidRandomBounds {
                        resource: "followers",
                        min: followers_min.0,
                        max: followers_max.0,
                    });
                }
                Ok(())
            }
        }
    }
}

impl Default for ResourceSetup {
    fn default() -> Self {
        Self::standard_random()
    }
}

/// Конфиг матча.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MatchConfig {
    /// Сколько участников садится за стол.
    pub participant_count: usize,
    /// N: сколько соседей просматривается при устранении (1 ≤ N < participant_count).
    pub elimination_radius: usize,
    pub resources: ResourceSetup,
    /// Seed для воспроизводимых матчей. `None` – системный RNG.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            participant_count: 10,
            elimination_radius: 2,
            resources: ResourceSetup::default(),
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn new(participant_count: usize, elimination_radius: usize) -> Self {
        Self {
            participant_count,
            elimination_radius,
            ..Self::default()
        }
    }

    pub fn with_fixed_resources(mut self, wealth: u64, followers: u64) -> Self {
        self.resources = ResourceSetup::Fixed {
            wealth: Amount(wealth),
            followers: Amount(followers),
        };
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Полная проверка конфига перед созданием матча.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.participant_count < MIN_PARTICIPANTS {
            return Err(ConfigError::TooFewParticipants {
                count: self.participant_count,
                min: MIN_PARTICIPANTS,
            });
        }
        if self.participant_count > MAX_PARTICIPANTS {
            return Err(ConfigError::TooManyParticipants {
                count: self.participant_count,
                max: MAX_PARTICIPANTS,
            });
        }
        if self.elimination_radius < 1 || self.elimination_radius >= self.participant_count {
            return Err(ConfigError::InvalidRadius {
                radius: self.elimination_radius,
                participants: self.participant_count,
            });
        }
        self.resources.validate()
    }

    /// Прочитать конфиг из JSON и сразу проверить его.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Ошибки конфигурации матча. Матч с такой конфигурацией не создаётся.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Too few participants: {count} (min {min})")]
    TooFewParticipants { count: usize, min: usize },

    #[error("Too many participants: {count} (max {max})")]
    TooManyParticipants { count: usize, max: usize },

    #[error("Elimination radius {radius} must satisfy 1 <= N < {participants}")]
    InvalidRadius { radius: usize, participants: usize },

    #[error("Fixed wealth and followers must be positive")]
    ZeroFixedResources,

    #[error("Invalid random bounds for {resource}: min={min}, max={max}")]
    InvalidRandomBounds {
        resource: &'static str,
        min: u64,
        max: u64,
    },

    #[error("Participant {0} appears twice in the lineup")]
    DuplicateParticipant(u64),

    #[error("Invalid config JSON: {0}")]
    Parse(String),
}
