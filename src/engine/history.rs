use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Direction, ParticipantId};
use crate::engine::actions::Action;

/// Тип события в матче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchEventKind {
    /// Все расселись, первый ход у богатейшего.
    MatchStarted {
        participants: usize,
        elimination_radius: usize,
        first: ParticipantId,
    },

    /// Участник выбыл, его ресурсы ушли устранившему.
    Elimination {
        actor: ParticipantId,
        victim: ParticipantId,
        direction: Direction,
        wealth: Amount,
        followers: Amount,
    },

    /// Вершина стопки вернулась за стол.
    Rescue {
        actor: ParticipantId,
        rescued: ParticipantId,
        wealth: Amount,
        followers: Amount,
    },

    /// Беднейший забрал треть у богатейшего.
    Theft {
        actor: ParticipantId,
        victim: ParticipantId,
        wealth: Amount,
        followers: Amount,
    },

    /// Пересадка по правилу соседства.
    TableReorganized {
        swaps: usize,
        resolved: bool,
    },

    /// Ход передан следующему.
    TurnAdvanced {
        turn: u32,
        current: ParticipantId,
    },

    /// Действие не прошло проверку или не пришло вовремя.
    ActionRejected {
        actor: Option<ParticipantId>,
        action: Option<Action>,
        reason: String,
    },

    /// За столом остался один.
    Victory {
        winner: ParticipantId,
    },
}

/// Событие в матче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchEvent {
    pub index: u32,
    pub kind: MatchEventKind,
}

/// Полная история матча.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchHistory {
    pub events: Vec<MatchEvent>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: MatchEventKind) -> MatchEvent {
        let idx = self.events.len() as u32;
        let event = MatchEvent { index: idx, kind };
        self.events.push(event.clone());
        event
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&MatchEvent> {
        self.events.last()
    }

    /// События начиная с номера `from` (для догоняющих подписчиков).
    pub fn since(&self, from: u32) -> &[MatchEvent] {
        let start = (from as usize).min(self.events.len());
        &self.events[start..]
    }

    pub fn eliminations(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, MatchEventKind::Elimination { .. }))
            .count()
    }
}
