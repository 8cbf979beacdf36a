use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Category, ParticipantId, ResourceTotals};
use crate::engine::Action;

/// DTO участника (за столом или в стопке).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantDto {
    pub id: ParticipantId,
    pub name: String,
    pub wealth: Amount,
    pub followers: Amount,
    pub category: Category,
    /// Место за столом; `None` – участник в стопке.
    pub seat_index: Option<usize>,
    /// Его ли сейчас ход.
    pub is_current: bool,
}

/// Снимок матча для отрисовки. Полная копия, ссылок на движок нет.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchSnapshot {
    /// Участники за столом в порядке посадки.
    pub seated: Vec<ParticipantDto>,
    pub current: Option<ParticipantDto>,
    /// Стопка выбывших снизу вверх.
    pub dispossessed: Vec<ParticipantDto>,
    pub can_steal: bool,
    pub can_rescue: bool,
    pub legal_actions: Vec<Action>,
    pub turn_number: u32,
    pub is_terminal: bool,
    pub winner: Option<ParticipantDto>,
    pub richest: Option<ParticipantId>,
    pub poorest: Option<ParticipantId>,
    pub elimination_radius: usize,
    /// Выполняется ли сейчас правило соседства.
    pub adjacency_valid: bool,
    pub table_totals: ResourceTotals,
    pub stack_totals: ResourceTotals,
    pub table_categories: BTreeMap<Category, usize>,
    pub stack_categories: BTreeMap<Category, usize>,
}

impl MatchSnapshot {
    pub fn seated_ids(&self) -> Vec<ParticipantId> {
        self.seated.iter().map(|p| p.id).collect()
    }

    pub fn dispossessed_ids(&self) -> Vec<ParticipantId> {
        self.dispossessed.iter().map(|p| p.id).collect()
    }

    pub fn is_legal(&self, action: Action) -> bool {
        self.legal_actions.contains(&action)
    }
}
