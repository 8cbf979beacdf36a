//! Начальная рассадка: имена, ремёсла, стартовые ресурсы.

use crate::domain::{
    Amount, Category, MatchConfig, Participant, ParticipantId, ReorganizeOutcome, ResourceSetup,
    Roster, Table,
};
use crate::engine::RandomSource;

/// Имена первых десяти участников; дальше – "Participant k".
pub const DISPLAY_NAMES: [&str; 10] = [
    "Fray Ambrosio",
    "Don Rodrigo",
    "Padre Benito",
    "Mosén García",
    "Capellán Ruiz",
    "Abad Martín",
    "Prior Fernández",
    "Canónigo López",
    "Vicario Sánchez",
    "Deán Jiménez",
];

/// Имя участника по его порядковому номеру (с нуля).
pub fn participant_name(index: usize) -> String {
    DISPLAY_NAMES
        .get(index)
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Participant {}", index + 1))
}

/// Стартовые (доблоны, последователи) по режиму раздачи.
pub fn starting_resources<R: RandomSource>(setup: &ResourceSetup, rng: &mut R) -> (Amount, Amount) {
    match *setup {
        ResourceSetup::Fixed { wealth, followers } => (wealth, followers),
        ResourceSetup::Random {
            wealth_min,
            wealth_max,
            followers_min,
            followers_max,
        } => {
            let wealth = rng.gen_range_inclusive(wealth_min.0, wealth_max.0);
            let followers = rng.gen_range_inclusive(followers_min.0, followers_max.0);
            (Amount(wealth), Amount(followers))
        }
    }
}

/// Собрать участников по конфигу. Id идут с 1, ремёсла – по кругу.
pub fn build_lineup<R: RandomSource>(config: &MatchConfig, rng: &mut R) -> Vec<Participant> {
    (0..config.participant_count)
        .map(|i| {
            let (wealth, followers) = starting_resources(&config.resources, rng);
            Participant::new(
                (i + 1) as ParticipantId,
                participant_name(i),
                wealth,
                followers,
                Category::round_robin(i),
            )
        })
        .collect()
}

/// Посадить участников в заданном порядке, пересадить по правилу соседства
/// и отдать первый ход богатейшему.
pub fn seat_lineup(lineup: Vec<Participant>, elimination_radius: usize) -> (Roster, Table, ReorganizeOutcome) {
    let mut roster = Roster::new();
    let mut table = Table::new(elimination_radius);

    for participant in lineup {
        let id = participant.id;
        roster.insert(participant);
        table.seat(id, &mut roster);
    }

    let outcome = table.reorganize(&roster);
    table.start_with_richest(&roster);

    (roster, table, outcome)
}
