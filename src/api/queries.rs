use crate::domain::{Participant, Table};
use crate::engine::GameEngine;

use super::dto::{MatchSnapshot, ParticipantDto};

/// Собрать снимок матча. Всё копируется, снимок можно отдавать в другой поток.
pub fn build_snapshot(engine: &GameEngine) -> MatchSnapshot {
    let table = engine.table();
    let roster = engine.roster();
    let stack = engine.stack();

    let seated: Vec<ParticipantDto> = table
        .seated_ids()
        .iter()
        .filter_map(|&id| roster.get(id))
        .map(|p| build_participant_dto(p, table))
        .collect();

    let dispossessed = stack
        .as_slice()
        .iter()
        .filter_map(|&id| roster.get(id))
        .map(|p| build_participant_dto(p, table))
        .collect();

    let current = engine
        .current_participant()
        .map(|p| build_participant_dto(p, table));

    let winner = engine
        .winner()
        .and_then(|id| roster.get(id))
        .map(|p| build_participant_dto(p, table));

    MatchSnapshot {
        seated,
        current,
        dispossessed,
        can_steal: engine.can_steal(),
        can_rescue: engine.can_rescue(),
        legal_actions: engine.legal_actions(),
        turn_number: engine.turn_number(),
        is_terminal: engine.is_terminal(),
        winner,
        richest: table.richest(roster),
        poorest: table.poorest(roster),
        elimination_radius: table.elimination_radius(),
        adjacency_valid: table.is_adjacency_valid(roster),
        table_totals: roster.totals(table.seated_ids().iter()),
        stack_totals: stack.total_resources(roster),
        table_categories: roster.category_counts(table.seated_ids().iter()),
        stack_categories: stack.category_counts(roster),
    }
}

/// DTO одного участника; место и флаг хода берутся со стола.
pub fn build_participant_dto(participant: &Participant, table: &Table) -> ParticipantDto {
    let seat_index = table.position_of(participant.id);
    ParticipantDto {
        id: participant.id,
        name: participant.name.clone(),
        wealth: participant.wealth,
        followers: participant.followers,
        category: participant.category,
        seat_index,
        is_current: seat_index.is_some() && table.current() == Some(participant.id),
    }
}
