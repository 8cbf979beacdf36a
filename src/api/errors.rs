use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// Класс ошибки, как его видит слой отображения.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorKind {
    IllegalConfiguration,
    IllegalAction,
    EmptyCollection,
    InputChannelFailure,
    MatchFinished,
    UnknownParticipant,
}

/// Ошибка для показа пользователю.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
    /// `false` только для ошибок конфигурации: матч не создан.
    pub recoverable: bool,
}

impl From<&EngineError> for ErrorReport {
    fn from(err: &EngineError) -> Self {
        let kind = match err {
            EngineError::IllegalConfiguration(_) => ErrorKind::IllegalConfiguration,
            EngineError::IllegalAction(_) => ErrorKind::IllegalAction,
            EngineError::EmptyCollection(_) => ErrorKind::EmptyCollection,
            EngineError::InputChannelFailure(_) => ErrorKind::InputChannelFailure,
            EngineError::MatchFinished => ErrorKind::MatchFinished,
            EngineError::UnknownParticipant(_) => ErrorKind::UnknownParticipant,
        };

        ErrorReport {
            kind,
            message: err.to_string(),
            recoverable: err.is_recoverable(),
        }
    }
}

impl From<EngineError> for ErrorReport {
    fn from(err: EngineError) -> Self {
        ErrorReport::from(&err)
    }
}
