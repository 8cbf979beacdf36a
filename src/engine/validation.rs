use crate::domain::{DispossessedStack, Roster, Table};
use crate::engine::actions::Action;
use crate::engine::errors::{EmptyCollectionKind, EngineError, IllegalActionReason};

/// Проверка, может ли текущий участник выполнить действие при текущем столе.
///
/// Ничего не меняет: если проверка прошла, действие применяется без ошибок.
pub fn validate_action(
    table: &Table,
    roster: &Roster,
    stack: &DispossessedStack,
    action: Action,
) -> Result<(), EngineError> {
    let actor = table
        .current()
        .ok_or(EngineError::EmptyCollection(EmptyCollectionKind::EmptyTable))?;

    match action {
        Action::EliminateLeft | Action::EliminateRight => {
            if table.len() < 2 {
                return Err(IllegalActionReason::NotEnoughParticipants.into());
            }
            let Some(direction) = action.direction() else {
                return Err(IllegalActionReason::NotLegalNow(action).into());
            };
            if table.neighbors(direction, table.elimination_radius()).is_empty() {
                return Err(EmptyCollectionKind::NoEligibleNeighbor.into());
            }
            Ok(())
        }

        Action::Rescue => {
            if stack.is_empty() {
                return Err(EmptyCollectionKind::NothingToRescue.into());
            }
            Ok(())
        }

        Action::Theft => {
            if table.poorest(roster) != Some(actor) {
                return Err(IllegalActionReason::OnlyPoorestMaySteal.into());
            }
            // Беднейший одновременно богатейший: все за столом равны.
            if table.richest(roster) == Some(actor) {
                return Err(IllegalActionReason::CannotStealFromSelf.into());
            }
            Ok(())
        }
    }
}

/// Может ли текущий участник украсть.
pub fn can_steal(table: &Table, roster: &Roster) -> bool {
    match (table.current(), table.poorest(roster), table.richest(roster)) {
        (Some(actor), Some(poorest), Some(richest)) => actor == poorest && actor != richest,
        _ => false,
    }
}

/// Есть ли кого спасать.
pub fn can_rescue(stack: &DispossessedStack) -> bool {
    !stack.is_empty()
}

/// Все действия, доступные текущему участнику, в порядке показа в меню.
pub fn legal_actions(table: &Table, roster: &Roster, stack: &DispossessedStack) -> Vec<Action> {
    [
        Action::EliminateRight,
        Action::EliminateLeft,
        Action::Rescue,
        Action::Theft,
    ]
    .into_iter()
    .filter(|&action| validate_action(table, roster, stack, action).is_ok())
    .collect()
}
