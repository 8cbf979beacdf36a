//! Интеграционные тесты для доменной модели (crate::domain).

use round_table_engine::domain::*;

fn person(id: ParticipantId, wealth: u64, followers: u64, category: Category) -> Participant {
    Participant::new(id, format!("P{id}"), Amount(wealth), Amount(followers), category)
}

/// Amount: деление с округлением вниз и насыщающее вычитание.
#[test]
fn amount_floor_division_and_saturation() {
    assert_eq!(Amount(101).half(), Amount(50));
    assert_eq!(Amount(100).third(), Amount(33));
    assert_eq!(Amount(2).third(), Amount::ZERO);
    assert_eq!(Amount(5) - Amount(9), Amount::ZERO);
    assert_eq!(Amount(5).saturating_sub(Amount(2)), Amount(3));

    let mut a = Amount(u64::MAX);
    a += Amount(1);
    assert_eq!(a, Amount(u64::MAX));
}

/// Ремёсла раздаются по кругу из пяти.
#[test]
fn categories_round_robin_over_five() {
    assert_eq!(Category::round_robin(0), Category::Merchant);
    assert_eq!(Category::round_robin(4), Category::Banker);
    assert_eq!(Category::round_robin(5), Category::Merchant);
    assert_eq!(Category::round_robin(7), Category::Farmer);
    assert_eq!(Category::Rancher.to_string(), "RANCHER");
}

#[test]
fn participant_starts_unseated() {
    let p = person(1, 100, 50, Category::Artisan);
    assert!(!p.seated);
    assert_eq!(p.total_resources(), 150);
    assert!(p.same_category(&person(2, 1, 1, Category::Artisan)));
    assert!(!p.same_category(&person(3, 1, 1, Category::Farmer)));
}

/// Перевод не может увести отправителя в минус: переводится не больше, чем есть.
#[test]
fn roster_transfer_is_capped_and_zero_sum() {
    let mut roster = Roster::new();
    roster.insert(person(1, 100, 10, Category::Merchant));
    roster.insert(person(2, 20, 5, Category::Artisan));

    let before = roster.totals_all();
    let moved = roster.transfer(2, 1, Amount(50), Amount(3)).unwrap();
    assert_eq!(moved, (Amount(20), Amount(3)));

    assert_eq!(roster.get(2).unwrap().wealth, Amount::ZERO);
    assert_eq!(roster.get(2).unwrap().followers, Amount(2));
    assert_eq!(roster.get(1).unwrap().wealth, Amount(120));
    assert_eq!(roster.get(1).unwrap().followers, Amount(13));

    let after = roster.totals_all();
    assert_eq!(before.combined(), after.combined());
}

/// У получателя у потолка u64 перевод урезается, а не теряет ресурсы.
#[test]
fn roster_transfer_stops_at_receiver_ceiling() {
    let mut roster = Roster::new();
    roster.insert(person(1, u64::MAX - 5, u64::MAX, Category::Merchant));
    roster.insert(person(2, 40, 7, Category::Artisan));

    let moved = roster.transfer(2, 1, Amount(40), Amount(7)).unwrap();
    assert_eq!(moved, (Amount(5), Amount::ZERO));

    assert_eq!(roster.get(1).unwrap().wealth, Amount(u64::MAX));
    assert_eq!(roster.get(1).unwrap().followers, Amount(u64::MAX));
    assert_eq!(roster.get(2).unwrap().wealth, Amount(35));
    assert_eq!(roster.get(2).unwrap().followers, Amount(7));
}

#[test]
fn roster_transfer_to_self_or_unknown() {
    let mut roster = Roster::new();
    roster.insert(person(1, 100, 10, Category::Merchant));

    assert_eq!(
        roster.transfer(1, 1, Amount(10), Amount(10)),
        Some((Amount::ZERO, Amount::ZERO))
    );
    assert_eq!(roster.get(1).unwrap().wealth, Amount(100));
    assert_eq!(roster.transfer(1, 99, Amount(10), Amount(10)), None);
    assert_eq!(roster.transfer(99, 1, Amount(10), Amount(10)), None);
}

#[test]
fn roster_insert_replaces_same_id() {
    let mut roster = Roster::new();
    roster.insert(person(1, 100, 10, Category::Merchant));
    roster.insert(person(1, 7, 7, Category::Banker));

    assert_eq!(roster.len(), 1);
    assert_eq!(roster.get(1).unwrap().category, Category::Banker);
}

#[test]
fn roster_totals_and_category_counts() {
    let mut roster = Roster::new();
    roster.insert(person(1, 100, 10, Category::Merchant));
    roster.insert(person(2, 50, 30, Category::Merchant));
    roster.insert(person(3, 30, 20, Category::Farmer));

    let totals = roster.totals([1, 2].iter());
    assert_eq!(totals.total_wealth, Amount(150));
    assert_eq!(totals.total_followers, Amount(40));
    assert_eq!(totals.participants, 2);
    assert_eq!(totals.average_wealth(), 75.0);

    let counts = roster.category_counts([1, 2, 3].iter());
    assert_eq!(counts.get(&Category::Merchant), Some(&2));
    assert_eq!(counts.get(&Category::Farmer), Some(&1));
    assert_eq!(counts.get(&Category::Banker), None);

    assert_eq!(ResourceTotals::default().average_followers(), 0.0);
}

// ---------------------------------------------------
// MatchConfig
// ---------------------------------------------------

#[test]
fn default_config_is_valid() {
    let config = MatchConfig::default();
    assert_eq!(config.participant_count, 10);
    assert_eq!(config.elimination_radius, 2);
    assert!(config.validate().is_ok());
}

#[test]
fn config_rejects_bad_participant_counts() {
    assert_eq!(
        MatchConfig::new(1, 1).validate(),
        Err(ConfigError::TooFewParticipants { count: 1, min: MIN_PARTICIPANTS })
    );
    assert_eq!(
        MatchConfig::new(21, 2).validate(),
        Err(ConfigError::TooManyParticipants { count: 21, max: MAX_PARTICIPANTS })
    );
    assert!(MatchConfig::new(2, 1).validate().is_ok());
    assert!(MatchConfig::new(20, 19).validate().is_ok());
}

#[test]
fn config_rejects_bad_radius() {
    assert_eq!(
        MatchConfig::new(5, 0).validate(),
        Err(ConfigError::InvalidRadius { radius: 0, participants: 5 })
    );
    assert_eq!(
        MatchConfig::new(5, 5).validate(),
        Err(ConfigError::InvalidRadius { radius: 5, participants: 5 })
    );
}

#[test]
fn config_rejects_bad_resources() {
    let zero = MatchConfig::new(4, 1).with_fixed_resources(0, 10);
    assert_eq!(zero.validate(), Err(ConfigError::ZeroFixedResources));

    let mut inverted = MatchConfig::new(4, 1);
    inverted.resources = ResourceSetup::Random {
        wealth_min: Amount(500),
        wealth_max: Amount(100),
        followers_min: Amount(1),
        followers_max: Amount(2),
    };
    assert!(matches!(
        inverted.validate(),
        Err(ConfigError::InvalidRandomBounds { resource: "wealth", .. })
    ));
}

#[test]
fn config_from_json_fills_defaults() {
    let config = MatchConfig::from_json(r#"{ "participant_count": 4 }"#).unwrap();
    assert_eq!(config.participant_count, 4);
    assert_eq!(config.elimination_radius, 2);
    assert_eq!(config.resources, ResourceSetup::standard_random());
    assert_eq!(config.seed, None);

    let fixed = MatchConfig::from_json(
        r#"{
            "participant_count": 6,
            "elimination_radius": 3,
            "seed": 42,
            "resources": { "mode": "fixed", "wealth": 100, "followers": 40 }
        }"#,
    )
    .unwrap();
    assert_eq!(
        fixed.resources,
        ResourceSetup::Fixed { wealth: Amount(100), followers: Amount(40) }
    );
    assert_eq!(fixed.seed, Some(42));
}

#[test]
fn config_from_json_reports_parse_and_validation_errors() {
    assert!(matches!(
        MatchConfig::from_json("{ not json"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        MatchConfig::from_json(r#"{ "participant_count": 3, "elimination_radius": 3 }"#),
        Err(ConfigError::InvalidRadius { .. })
    ));
}
