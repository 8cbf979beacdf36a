use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::participant::Category;
use crate::domain::resources::ResourceTotals;
use crate::domain::roster::Roster;
use crate::domain::ParticipantId;

/// Попытка снять участника с пустой стопки.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Стопка выбывших пуста")]
pub struct EmptyStack;

/// Стопка выбывших: последний выбывший выходит первым.
///
/// Вектор хранится снизу вверх: индекс 0 – дно, последний элемент – вершина.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DispossessedStack {
    items: Vec<ParticipantId>,
}

impl DispossessedStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Положить участника на вершину. Участник помечается как не сидящий.
    pub fn push(&mut self, id: ParticipantId, roster: &mut Roster) {
        roster.set_seated(id, false);
        self.items.push(id);
    }

    /// Снять вершину. Снятый участник помечается как сидящий.
    pub fn pop(&mut self, roster: &mut Roster) -> Result<ParticipantId, EmptyStack> {
        let id = self.items.pop().ok_or(EmptyStack)?;
        roster.set_seated(id, true);
        Ok(id)
    }

    pub fn peek_top(&self) -> Option<ParticipantId> {
        self.items.last().copied()
    }

    /// Дно стопки – тот, кто выбыл раньше всех.
    pub fn bottom(&self) -> Option<ParticipantId> {
        self.items.first().copied()
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Очистить стопку; все её участники остаются не сидящими.
    pub fn clear(&mut self, roster: &mut Roster) {
        for id in self.items.drain(..) {
            roster.set_seated(id, false);
        }
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.items.contains(&id)
    }

    /// Позиция в стопке: 0 – дно, size-1 – вершина.
    pub fn position_of(&self, id: ParticipantId) -> Option<usize> {
        self.items.iter().position(|&s| s == id)
    }

    /// Снизу вверх.
    pub fn as_slice(&self) -> &[ParticipantId] {
        &self.items
    }

    /// Сверху вниз (для отрисовки колонкой).
    pub fn iter_top_down(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.items.iter().rev().copied()
    }

    pub fn total_resources(&self, roster: &Roster) -> ResourceTotals {
        roster.totals(self.items.iter())
    }

    pub fn category_counts(&self, roster: &Roster) -> BTreeMap<Category, usize> {
        roster.category_counts(self.items.iter())
    }
}
