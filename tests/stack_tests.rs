//! Тесты стопки выбывших (LIFO).

use round_table_engine::domain::*;

fn roster_of(n: u64) -> Roster {
    let mut roster = Roster::new();
    for id in 1..=n {
        roster.insert(Participant::new(
            id,
            format!("P{id}"),
            Amount(10 * id),
            Amount(id),
            Category::round_robin(id as usize),
        ));
        roster.set_seated(id, true);
    }
    roster
}

#[test]
fn pop_returns_last_pushed() {
    let mut roster = roster_of(3);
    let mut stack = DispossessedStack::new();

    stack.push(1, &mut roster);
    stack.push(2, &mut roster);
    assert_eq!(stack.peek_top(), Some(2));
    assert_eq!(stack.bottom(), Some(1));
    assert_eq!(stack.size(), 2);

    assert_eq!(stack.pop(&mut roster), Ok(2));
    stack.push(3, &mut roster);
    assert_eq!(stack.pop(&mut roster), Ok(3));
    assert_eq!(stack.pop(&mut roster), Ok(1));
    assert!(stack.is_empty());
}

#[test]
fn pop_on_empty_stack_is_a_checked_failure() {
    let mut roster = roster_of(1);
    let mut stack = DispossessedStack::new();

    assert_eq!(stack.pop(&mut roster), Err(EmptyStack));
    assert_eq!(stack.peek_top(), None);
    assert_eq!(stack.bottom(), None);
}

#[test]
fn push_and_pop_toggle_seated_flag() {
    let mut roster = roster_of(2);
    let mut stack = DispossessedStack::new();

    stack.push(2, &mut roster);
    assert!(!roster.get(2).unwrap().seated);

    stack.pop(&mut roster).unwrap();
    assert!(roster.get(2).unwrap().seated);
}

#[test]
fn clear_leaves_everyone_unseated() {
    let mut roster = roster_of(3);
    let mut stack = DispossessedStack::new();
    stack.push(1, &mut roster);
    stack.push(3, &mut roster);

    stack.clear(&mut roster);
    assert!(stack.is_empty());
    assert!(!roster.get(1).unwrap().seated);
    assert!(!roster.get(3).unwrap().seated);
    assert!(roster.get(2).unwrap().seated);
}

#[test]
fn positions_and_display_order() {
    let mut roster = roster_of(3);
    let mut stack = DispossessedStack::new();
    for id in [2, 3, 1] {
        stack.push(id, &mut roster);
    }

    assert!(stack.contains(3));
    assert!(!stack.contains(4));
    assert_eq!(stack.position_of(2), Some(0));
    assert_eq!(stack.position_of(1), Some(2));
    assert_eq!(stack.as_slice(), &[2, 3, 1]);
    assert_eq!(stack.iter_top_down().collect::<Vec<_>>(), vec![1, 3, 2]);
}

#[test]
fn stack_statistics() {
    let mut roster = roster_of(3);
    let mut stack = DispossessedStack::new();
    stack.push(1, &mut roster);
    stack.push(3, &mut roster);

    let totals = stack.total_resources(&roster);
    assert_eq!(totals.total_wealth, Amount(40));
    assert_eq!(totals.total_followers, Amount(4));
    assert_eq!(totals.participants, 2);

    let counts = stack.category_counts(&roster);
    assert_eq!(counts.values().sum::<usize>(), 2);
}
