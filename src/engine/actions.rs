use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Direction;

/// Действие участника, чей сейчас ход.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Action {
    /// Устранить одного из N соседей слева.
    EliminateLeft,
    /// Устранить одного из N соседей справа.
    EliminateRight,
    /// Вернуть за стол вершину стопки выбывших.
    Rescue,
    /// Забрать треть у богатейшего (только для беднейшего).
    Theft,
}

impl Action {
    /// Действие по умолчанию, когда слой ввода ничего не прислал.
    pub const DEFAULT: Action = Action::EliminateRight;

    /// Направление для действий устранения.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::EliminateLeft => Some(Direction::Left),
            Action::EliminateRight => Some(Direction::Right),
            Action::Rescue | Action::Theft => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::EliminateLeft => "eliminate-left",
            Action::EliminateRight => "eliminate-right",
            Action::Rescue => "rescue",
            Action::Theft => "theft",
        };
        f.write_str(label)
    }
}
