use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ConfigError, EmptyStack, ParticipantId};
use crate::engine::actions::Action;

/// Почему действие нарушает своё предусловие.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IllegalActionReason {
    #[error("Только беднейший может красть")]
    OnlyPoorestMaySteal,

    #[error("Нельзя красть у самого себя")]
    CannotStealFromSelf,

    #[error("Для устранения за столом нужно хотя бы 2 участника")]
    NotEnoughParticipants,

    #[error("Действие {0} сейчас недоступно")]
    NotLegalNow(Action),
}

/// Какая коллекция оказалась пустой.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyCollectionKind {
    #[error("Некого спасать: стопка выбывших пуста")]
    NothingToRescue,

    #[error("Нет подходящего соседа")]
    NoEligibleNeighbor,

    #[error("За столом никого нет")]
    EmptyTable,
}

/// Ошибки движка матча.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Плохой конфиг – матч не создаётся.
    #[error("Некорректная конфигурация: {0}")]
    IllegalConfiguration(#[from] ConfigError),

    /// Предусловие действия не выполнено; ход остаётся у того же участника.
    #[error("Недопустимое действие: {0}")]
    IllegalAction(IllegalActionReason),

    #[error("Пустая коллекция: {0}")]
    EmptyCollection(EmptyCollectionKind),

    /// Слой ввода не прислал действие.
    #[error("Сбой канала ввода: {0}")]
    InputChannelFailure(String),

    #[error("Матч уже завершён")]
    MatchFinished,

    #[error("Участник {0} не найден")]
    UnknownParticipant(ParticipantId),
}

impl EngineError {
    /// Можно ли продолжать матч после этой ошибки.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EngineError::IllegalConfiguration(_))
    }
}

impl From<IllegalActionReason> for EngineError {
    fn from(reason: IllegalActionReason) -> Self {
        EngineError::IllegalAction(reason)
    }
}

impl From<EmptyCollectionKind> for EngineError {
    fn from(kind: EmptyCollectionKind) -> Self {
        EngineError::EmptyCollection(kind)
    }
}

impl From<EmptyStack> for EngineError {
    fn from(_: EmptyStack) -> Self {
        EngineError::EmptyCollection(EmptyCollectionKind::NothingToRescue)
    }
}
