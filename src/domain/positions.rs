//! Арифметика индексов по кругу.
//!
//! Все функции работают с "сырыми" индексами и длиной стола,
//! ничего не знают об участниках.

use serde::{Deserialize, Serialize};

/// Направление взгляда от текущего участника.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    /// По возрастанию индекса.
    Right,
    /// По убыванию индекса.
    Left,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }
}

/// Индекс, отстоящий от `from` на `steps` шагов в направлении `direction`.
/// При `len == 0` возвращает `None`.
pub fn step(from: usize, steps: usize, direction: Direction, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let from = from % len;
    let steps = steps % len;
    let idx = match direction {
        Direction::Right => (from + steps) % len,
        Direction::Left => (from + len - steps) % len,
    };
    Some(idx)
}

/// Следующий индекс по кругу.
pub fn next_index(from: usize, len: usize) -> Option<usize> {
    step(from, 1, Direction::Right, len)
}

/// Предыдущий индекс по кругу.
pub fn prev_index(from: usize, len: usize) -> Option<usize> {
    step(from, 1, Direction::Left, len)
}

/// Индексы до `count` соседей начиная с шага 1 от `current` (сам `current` не входит).
///
/// Соседей не больше `len - 1`, так что по кругу никто не попадает дважды.
pub fn neighbor_indices(current: usize, direction: Direction, count: usize, len: usize) -> Vec<usize> {
    if len == 0 || count == 0 {
        return Vec::new();
    }

    let limit = count.min(len - 1);
    (1..=limit)
        .filter_map(|i| step(current, i, direction, len))
        .collect()
}
