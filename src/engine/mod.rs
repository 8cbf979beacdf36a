//! Движок круглого стола: проверка действий, устранение, спасение, кража, смена хода.
//!
//! Высокоуровневый объект: `GameEngine`
//! Основные операции:
//!   - `GameEngine::new` – рассадить участников по конфигу
//!   - `apply_action` – применить действие текущего участника
//!   - `legal_actions` – что текущий участник может сделать прямо сейчас

pub mod actions;
pub mod errors;
pub mod game_loop;
pub mod history;
pub mod setup;
pub mod validation;

pub use crate::domain::Direction;
pub use actions::Action;
pub use errors::{EmptyCollectionKind, EngineError, IllegalActionReason};
pub use game_loop::{ActionOutcome, EngineState, GameEngine, MatchStatus};
pub use history::{MatchEvent, MatchEventKind, MatchHistory};
pub use validation::{can_rescue, can_steal, legal_actions, validate_action};

/// RNG интерфейс для engine.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Случайное число в `[low, high]` включительно. При `low >= high` – `low`.
    fn gen_range_inclusive(&mut self, low: u64, high: u64) -> u64;
}
