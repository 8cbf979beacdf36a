use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::Action;

/// Пауза между ходами по умолчанию.
pub const DEFAULT_PACING_MS: u64 = 300;

/// Настройки цикла ходов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TurnLoopConfig {
    /// Пауза после успешного действия. 0 – без паузы.
    pub pacing_ms: u64,
    /// Сколько ждать действие от слоя отображения. `None` – ждать, пока не отменят.
    pub action_timeout_ms: Option<u64>,
    /// Что применять, когда действие не пришло.
    pub default_action: Action,
}

impl Default for TurnLoopConfig {
    fn default() -> Self {
        Self {
            pacing_ms: DEFAULT_PACING_MS,
            action_timeout_ms: None,
            default_action: Action::DEFAULT,
        }
    }
}

impl TurnLoopConfig {
    pub fn with_pacing_ms(mut self, pacing_ms: u64) -> Self {
        self.pacing_ms = pacing_ms;
        self
    }

    pub fn with_action_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.action_timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_default_action(mut self, action: Action) -> Self {
        self.default_action = action;
        self
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn action_timeout(&self) -> Option<Duration> {
        self.action_timeout_ms.map(Duration::from_millis)
    }
}
