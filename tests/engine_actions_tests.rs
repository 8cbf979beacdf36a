// tests/engine_actions_tests.rs
//
// Тесты действий движка на заданных составах:
//  1) Устранение: победитель соседа забирает всё, жертва уходит в стопку.
//  2) Спасение: ровно половина (с округлением вниз), одно деление.
//  3) Кража: треть богатейшего, сумма сохраняется.
//  4) Полный матч до победы и поведение после неё.

use round_table_engine::domain::*;
use round_table_engine::engine::{
    Action, EngineState, GameEngine, MatchEventKind, MatchStatus,
};

fn person(id: ParticipantId, wealth: u64, followers: u64, category: Category) -> Participant {
    Participant::new(id, format!("P{id}"), Amount(wealth), Amount(followers), category)
}

fn wealth(engine: &GameEngine, id: ParticipantId) -> u64 {
    engine.participant(id).unwrap().wealth.0
}

fn followers(engine: &GameEngine, id: ParticipantId) -> u64 {
    engine.participant(id).unwrap().followers.0
}

/// A, B, C, D из описания игры: X = Merchant, Y = Artisan.
fn four_seat_engine() -> GameEngine {
    GameEngine::with_participants(
        vec![
            person(1, 100, 50, Category::Merchant),
            person(2, 100, 50, Category::Artisan),
            person(3, 50, 20, Category::Merchant),
            person(4, 200, 80, Category::Artisan),
        ],
        1,
    )
    .unwrap()
}

/// Три ремесла, P2 – богатейший.
fn three_seat_engine() -> GameEngine {
    GameEngine::with_participants(
        vec![
            person(1, 100, 40, Category::Merchant),
            person(2, 300, 90, Category::Artisan),
            person(3, 50, 10, Category::Farmer),
        ],
        1,
    )
    .unwrap()
}

/// Для кражи: P1 беден и уйдёт первым, потом P3 станет беднейшим.
fn theft_engine() -> GameEngine {
    GameEngine::with_participants(
        vec![
            person(1, 30, 10, Category::Merchant),
            person(2, 300, 91, Category::Artisan),
            person(3, 100, 50, Category::Farmer),
        ],
        1,
    )
    .unwrap()
}

#[test]
fn match_starts_with_richest_on_turn_one() {
    let engine = four_seat_engine();

    assert_eq!(engine.state(), EngineState::AwaitingAction);
    assert_eq!(engine.turn_number(), 1);
    assert_eq!(engine.current_participant().unwrap().id, 4);
    assert_eq!(engine.table().seated_ids(), &[1, 2, 3, 4]);
    assert!(engine.stack().is_empty());
    assert!(matches!(
        engine.history().last().unwrap().kind,
        MatchEventKind::MatchStarted { participants: 4, elimination_radius: 1, first: 4 }
    ));
}

#[test]
fn eliminate_right_takes_everything_from_victim() {
    let mut engine = four_seat_engine();

    let outcome = engine.apply_action(Action::EliminateRight).unwrap();
    assert_eq!(outcome.actor, 4);
    assert_eq!(outcome.status, MatchStatus::Ongoing);

    assert_eq!((wealth(&engine, 4), followers(&engine, 4)), (300, 130));
    assert_eq!((wealth(&engine, 1), followers(&engine, 1)), (0, 0));
    assert!(!engine.participant(1).unwrap().seated);
    assert_eq!(engine.stack().as_slice(), &[1]);

    let mut seated = engine.table().seated_ids().to_vec();
    seated.sort_unstable();
    assert_eq!(seated, vec![2, 3, 4]);

    assert!(outcome.events.iter().any(|e| matches!(
        e.kind,
        MatchEventKind::Elimination {
            actor: 4,
            victim: 1,
            direction: Direction::Right,
            wealth: Amount(100),
            followers: Amount(50),
        }
    )));
    // B и D одного ремесла оказываются рядом после снятия A.
    assert!(outcome
        .events
        .iter()
        .any(|e| matches!(e.kind, MatchEventKind::TableReorganized { .. })));
    assert_eq!(engine.turn_number(), 2);
}

fn roster_sum(engine: &GameEngine) -> u128 {
    engine
        .roster()
        .iter()
        .map(|p| p.wealth.0 as u128 + p.followers.0 as u128)
        .sum()
}

#[test]
fn eliminate_at_resource_ceiling_conserves_totals() {
    let mut engine = GameEngine::with_participants(
        vec![
            person(1, u64::MAX, u64::MAX, Category::Merchant),
            person(2, u64::MAX, u64::MAX, Category::Artisan),
        ],
        1,
    )
    .unwrap();
    let before = roster_sum(&engine);

    let outcome = engine.apply_action(Action::EliminateRight).unwrap();
    assert!(matches!(outcome.status, MatchStatus::Finished { .. }));
    assert_eq!(roster_sum(&engine), before);

    let victim = engine.stack().as_slice()[0];
    assert_eq!(wealth(&engine, victim), u64::MAX);
    assert_eq!(followers(&engine, victim), u64::MAX);
}

#[test]
fn eliminate_picks_fewest_followers_among_radius() {
    let mut engine = GameEngine::with_participants(
        vec![
            person(1, 500, 90, Category::Merchant),
            person(2, 100, 40, Category::Artisan),
            person(3, 100, 15, Category::Farmer),
            person(4, 100, 60, Category::Rancher),
            person(5, 100, 5, Category::Banker),
        ],
        2,
    )
    .unwrap();

    // Справа от P1 в радиусе 2: P2 (40) и P3 (15); P5 (5) дальше.
    engine.apply_action(Action::EliminateRight).unwrap();
    assert_eq!(engine.stack().peek_top(), Some(3));
    assert_eq!(wealth(&engine, 1), 600);
    assert_eq!(followers(&engine, 1), 105);
}

#[test]
fn eliminate_left_looks_counterclockwise() {
    let mut engine = three_seat_engine();

    // P2 на месте 1, слева – P1.
    engine.apply_action(Action::EliminateLeft).unwrap();
    assert_eq!(engine.stack().peek_top(), Some(1));
    assert_eq!(engine.table().seated_ids(), &[2, 3]);
    assert_eq!(wealth(&engine, 2), 400);
}

#[test]
fn rescue_donates_exactly_half_once() {
    let mut engine = three_seat_engine();

    engine.apply_action(Action::EliminateRight).unwrap();
    assert_eq!(engine.stack().as_slice(), &[3]);
    assert_eq!(engine.current_participant().unwrap().id, 1);

    let outcome = engine.apply_action(Action::Rescue).unwrap();
    assert_eq!(outcome.actor, 1);

    assert_eq!((wealth(&engine, 1), followers(&engine, 1)), (50, 20));
    assert_eq!((wealth(&engine, 3), followers(&engine, 3)), (50, 20));
    assert!(engine.stack().is_empty());
    assert!(engine.participant(3).unwrap().seated);
    assert_eq!(engine.table().seated_ids(), &[1, 2, 3]);
    assert!(outcome.events.iter().any(|e| matches!(
        e.kind,
        MatchEventKind::Rescue { actor: 1, rescued: 3, wealth: Amount(50), followers: Amount(20) }
    )));
    assert_eq!(engine.current_participant().unwrap().id, 2);
    assert_eq!(engine.turn_number(), 3);
}

#[test]
fn rescue_with_odd_amounts_floors_and_conserves() {
    let mut engine = GameEngine::with_participants(
        vec![
            person(1, 99, 7, Category::Merchant),
            person(2, 301, 91, Category::Artisan),
            person(3, 40, 5, Category::Farmer),
        ],
        1,
    )
    .unwrap();
    let total_before = engine.roster().totals_all();

    engine.apply_action(Action::EliminateRight).unwrap(); // P2 забирает P3: 341 / 96
    engine.apply_action(Action::Rescue).unwrap(); // P1 отдаёт 49 / 3

    assert_eq!((wealth(&engine, 1), followers(&engine, 1)), (50, 4));
    assert_eq!((wealth(&engine, 3), followers(&engine, 3)), (49, 3));
    assert_eq!(engine.roster().totals_all(), total_before);
}

/// Спасённый садится в конец рядом с тем же ремеслом – стол пересаживается.
#[test]
fn rescue_next_to_same_category_triggers_reorganize() {
    let mut engine = GameEngine::with_participants(
        vec![
            person(1, 500, 50, Category::Merchant),
            person(2, 100, 10, Category::Artisan),
            person(3, 100, 40, Category::Farmer),
            person(4, 100, 40, Category::Merchant),
            person(5, 100, 40, Category::Artisan),
        ],
        1,
    )
    .unwrap();
    assert!(engine.table().is_adjacency_valid(engine.roster()));

    let first = engine.apply_action(Action::EliminateRight).unwrap();
    assert_eq!(first.actor, 1);
    assert!(!first
        .events
        .iter()
        .any(|e| matches!(e.kind, MatchEventKind::TableReorganized { .. })));
    assert_eq!(engine.table().seated_ids(), &[1, 3, 4, 5]);
    assert_eq!(engine.table().current(), Some(3));

    let second = engine.apply_action(Action::Rescue).unwrap();
    assert_eq!(second.actor, 3);
    assert!(second.events.iter().any(|e| matches!(
        e.kind,
        MatchEventKind::TableReorganized { resolved: true, .. }
    )));
    assert!(engine.table().is_adjacency_valid(engine.roster()));
    assert_eq!(engine.table().len(), 5);
    assert!(engine.stack().is_empty());
}

#[test]
fn theft_moves_a_third_from_richest() {
    let mut engine = theft_engine();

    engine.apply_action(Action::EliminateLeft).unwrap();
    assert_eq!(engine.current_participant().unwrap().id, 3);
    assert!(engine.can_steal());

    let outcome = engine.apply_action(Action::Theft).unwrap();
    assert!(outcome.events.iter().any(|e| matches!(
        e.kind,
        MatchEventKind::Theft { actor: 3, victim: 2, wealth: Amount(110), followers: Amount(33) }
    )));

    assert_eq!((wealth(&engine, 2), followers(&engine, 2)), (220, 68));
    assert_eq!((wealth(&engine, 3), followers(&engine, 3)), (210, 83));
    assert_eq!(engine.current_participant().unwrap().id, 2);
}

#[test]
fn legal_actions_follow_preconditions() {
    let mut engine = theft_engine();
    assert_eq!(
        engine.legal_actions(),
        vec![Action::EliminateRight, Action::EliminateLeft]
    );
    assert!(!engine.can_rescue());
    assert!(!engine.can_steal());

    engine.apply_action(Action::EliminateLeft).unwrap();
    assert_eq!(
        engine.legal_actions(),
        vec![
            Action::EliminateRight,
            Action::EliminateLeft,
            Action::Rescue,
            Action::Theft
        ]
    );
}

#[test]
fn last_participant_wins_and_match_is_frozen() {
    let mut engine = theft_engine();
    engine.apply_action(Action::EliminateLeft).unwrap();
    engine.apply_action(Action::Theft).unwrap();

    let outcome = engine.apply_action(Action::EliminateRight).unwrap();
    assert_eq!(outcome.status, MatchStatus::Finished { winner: 2 });
    assert!(outcome
        .events
        .iter()
        .any(|e| matches!(e.kind, MatchEventKind::Victory { winner: 2 })));

    assert!(engine.is_terminal());
    assert_eq!(engine.state(), EngineState::Terminal);
    assert_eq!(engine.winner(), Some(2));
    assert_eq!(engine.status(), MatchStatus::Finished { winner: 2 });
    assert_eq!((wealth(&engine, 2), followers(&engine, 2)), (430, 151));
    assert_eq!(engine.stack().as_slice(), &[1, 3]);
    assert!(engine.legal_actions().is_empty());
    assert!(!engine.can_rescue());
}

#[test]
fn reset_restores_fixed_lineup() {
    let mut engine = theft_engine();
    engine.apply_action(Action::EliminateLeft).unwrap();
    engine.apply_action(Action::Theft).unwrap();

    let mut rng = round_table_engine::infra::DeterministicRng::from_seed(1);
    engine.reset(&mut rng);

    assert_eq!(engine.turn_number(), 1);
    assert!(engine.stack().is_empty());
    assert_eq!(engine.table().len(), 3);
    assert_eq!(engine.current_participant().unwrap().id, 2);
    assert_eq!(wealth(&engine, 1), 30);
    assert_eq!(wealth(&engine, 2), 300);
    assert!(engine.participant(1).unwrap().seated);
    assert!(!engine.is_terminal());
}
