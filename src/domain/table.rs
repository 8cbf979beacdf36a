use serde::{Deserialize, Serialize};

use crate::domain::participant::Category;
use crate::domain::positions::{self, Direction};
use crate::domain::roster::Roster;
use crate::domain::ParticipantId;

/// Итог одного прохода реорганизации.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReorganizeOutcome {
    /// Сколько обменов местами сделано.
    pub swaps: usize,
    /// Сколько итераций поиска потрачено (не больше 2 × размер стола).
    pub attempts: usize,
    /// Выполняется ли правило соседства после прохода.
    pub resolved: bool,
}

/// Круглый стол.
///
/// Хранит только порядок посадки (id участников); сами записи – в `Roster`.
/// Индекс вектора = место за столом, арифметика мест всегда по модулю длины.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    seating: Vec<ParticipantId>,
    /// Место участника, чей сейчас ход.
    current_turn: usize,
    /// Сколько соседей просматривается при устранении (N).
    elimination_radius: usize,
}

impl Table {
    /// Создать пустой стол с радиусом устранения N.
    pub fn new(elimination_radius: usize) -> Self {
        Self {
            seating: Vec::new(),
            current_turn: 0,
            elimination_radius,
        }
    }

    pub fn len(&self) -> usize {
        self.seating.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seating.is_empty()
    }

    pub fn elimination_radius(&self) -> usize {
        self.elimination_radius
    }

    pub fn current_turn_index(&self) -> usize {
        self.current_turn
    }

    /// Порядок посадки (read-only).
    pub fn seated_ids(&self) -> &[ParticipantId] {
        &self.seating
    }

    pub fn id_at(&self, index: usize) -> Option<ParticipantId> {
        self.seating.get(index).copied()
    }

    /// Участник, чей сейчас ход.
    pub fn current(&self) -> Option<ParticipantId> {
        self.id_at(self.current_turn)
    }

    pub fn position_of(&self, id: ParticipantId) -> Option<usize> {
        self.seating.iter().position(|&s| s == id)
    }

    /// Передать ход месту `index`. Вне диапазона – ничего не меняем.
    pub fn set_current_turn(&mut self, index: usize) -> bool {
        if index < self.seating.len() {
            self.current_turn = index;
            true
        } else {
            false
        }
    }

    /// Остался ли ровно один участник.
    pub fn has_one_remaining(&self) -> bool {
        self.seating.len() == 1
    }

    // ------------------------------------------------------------------
    // Поиск
    // ------------------------------------------------------------------

    /// До `count` ближайших соседей текущего участника в направлении `direction`.
    pub fn neighbors(&self, direction: Direction, count: usize) -> Vec<ParticipantId> {
        positions::neighbor_indices(self.current_turn, direction, count, self.seating.len())
            .into_iter()
            .filter_map(|idx| self.id_at(idx))
            .collect()
    }

    /// Богатейший за столом. При равенстве побеждает первый по порядку посадки.
    pub fn richest(&self, roster: &Roster) -> Option<ParticipantId> {
        let mut best: Option<(ParticipantId, u64)> = None;
        for p in self.seating.iter().filter_map(|&id| roster.get(id)) {
            match best {
                Some((_, w)) if p.wealth.0 <= w => {}
                _ => best = Some((p.id, p.wealth.0)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Беднейший за столом. При равенстве побеждает первый по порядку посадки.
    pub fn poorest(&self, roster: &Roster) -> Option<ParticipantId> {
        let mut best: Option<(ParticipantId, u64)> = None;
        for p in self.seating.iter().filter_map(|&id| roster.get(id)) {
            match best {
                Some((_, w)) if p.wealth.0 >= w => {}
                _ => best = Some((p.id, p.wealth.0)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Участник с наименьшим числом последователей среди `candidates`.
    /// При равенстве – первый в списке кандидатов.
    pub fn fewest_followers(&self, roster: &Roster, candidates: &[ParticipantId]) -> Option<ParticipantId> {
        let mut best: Option<(ParticipantId, u64)> = None;
        for p in candidates.iter().filter_map(|&id| roster.get(id)) {
            match best {
                Some((_, f)) if p.followers.0 >= f => {}
                _ => best = Some((p.id, p.followers.0)),
            }
        }
        best.map(|(id, _)| id)
    }

    // ------------------------------------------------------------------
    // Посадка / снятие
    // ------------------------------------------------------------------

    /// Посадить участника в конец порядка посадки.
    /// Возвращает `false`, если он уже за столом.
    pub fn seat(&mut self, id: ParticipantId, roster: &mut Roster) -> bool {
        if self.position_of(id).is_some() {
            return false;
        }
        self.seating.push(id);
        roster.set_seated(id, true);
        true
    }

    /// Снять участника с места `index`.
    ///
    /// Если снятое место стояло раньше текущего – текущий индекс сдвигается на 1 назад;
    /// если после этого он вышел за пределы стола – ход переходит на место 0.
    pub fn remove(&mut self, index: usize, roster: &mut Roster) -> Option<ParticipantId> {
        if index >= self.seating.len() {
            return None;
        }

        let removed = self.seating.remove(index);
        roster.set_seated(removed, false);

        if index < self.current_turn {
            self.current_turn -= 1;
        }
        if self.current_turn >= self.seating.len() {
            self.current_turn = 0;
        }

        Some(removed)
    }

    /// Передать ход следующему по кругу.
    pub fn advance_turn(&mut self) {
        if self.seating.len() <= 1 {
            return;
        }
        self.current_turn = (self.current_turn + 1) % self.seating.len();
    }

    /// Отдать первый ход богатейшему.
    pub fn start_with_richest(&mut self, roster: &Roster) {
        if let Some(idx) = self.richest(roster).and_then(|id| self.position_of(id)) {
            self.current_turn = idx;
        }
    }

    // ------------------------------------------------------------------
    // Правило соседства
    // ------------------------------------------------------------------

    /// Нет ли за столом двух соседей одного ремесла (с учётом замыкания круга).
    pub fn is_adjacency_valid(&self, roster: &Roster) -> bool {
        let len = self.seating.len();
        if len < 2 {
            return true;
        }
        (0..len).all(|i| !self.same_category(roster, i, (i + 1) % len))
    }

    /// Индексы пар соседей (i, i+1), нарушающих правило соседства.
    pub fn adjacency_conflicts(&self, roster: &Roster) -> Vec<(usize, usize)> {
        let len = self.seating.len();
        if len < 2 {
            return Vec::new();
        }
        (0..len)
            .map(|i| (i, (i + 1) % len))
            .filter(|&(a, b)| self.same_category(roster, a, b))
            .collect()
    }

    /// Пересадить участников так, чтобы соседи были разных ремёсел.
    ///
    /// За итерацию ищется первая конфликтная пара (i, i+1) и первый кандидат j,
    /// чьё ремесло отличается от ремесла места i и чей обмен с местом i+1 не ставит
    /// вытесненного участника рядом с тем же ремеслом на месте j-1. После обмена
    /// проход начинается заново. Итераций не больше 2 × размер стола: когда
    /// одного ремесла больше половины, часть конфликтов просто остаётся.
    pub fn reorganize(&mut self, roster: &Roster) -> ReorganizeOutcome {
        let len = self.seating.len();
        let mut outcome = ReorganizeOutcome::default();

        if len >= 2 {
            let max_attempts = len * 2;
            while outcome.attempts < max_attempts {
                outcome.attempts += 1;
                if !self.repair_first_conflict(roster) {
                    break;
                }
                outcome.swaps += 1;
            }
        }

        if self.current_turn >= len {
            self.current_turn = 0;
        }

        outcome.resolved = self.is_adjacency_valid(roster);
        outcome
    }

    /// Один обмен для первой исправимой конфликтной пары. `false` – исправить нечего.
    fn repair_first_conflict(&mut self, roster: &Roster) -> bool {
        let len = self.seating.len();

        for i in 0..len {
            let next = (i + 1) % len;
            if !self.same_category(roster, i, next) {
                continue;
            }

            let candidate = (0..len).find(|&j| {
                j != i
                    && j != next
                    && !self.same_category(roster, i, j)
                    && !self.swap_creates_conflict(roster, next, j)
            });

            if let Some(j) = candidate {
                self.seating.swap(next, j);
                return true;
            }
        }

        false
    }

    /// Окажется ли участник с места `from`, пересаженный на место `to`,
    /// рядом с тем же ремеслом на месте `to - 1`.
    fn swap_creates_conflict(&self, roster: &Roster, from: usize, to: usize) -> bool {
        let len = self.seating.len();
        let (Some(before_to), Some(after_to)) = (positions::prev_index(to, len), positions::next_index(to, len)) else {
            return false;
        };

        if before_to == from || after_to == from {
            return false;
        }

        self.same_category(roster, before_to, from)
    }

    fn category_at(&self, roster: &Roster, index: usize) -> Option<Category> {
        self.id_at(index)
            .and_then(|id| roster.get(id))
            .map(|p| p.category)
    }

    fn same_category(&self, roster: &Roster, a: usize, b: usize) -> bool {
        match (self.category_at(roster, a), self.category_at(roster, b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}
