use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::participant::{Category, Participant};
use crate::domain::resources::{Amount, ResourceTotals};
use crate::domain::ParticipantId;

/// Арена всех участников матча.
///
/// Стол и стопка выбывших хранят только `ParticipantId`,
/// сами записи живут здесь и никогда не удаляются до конца матча.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
    /// ParticipantId -> индекс в `participants`.
    index: HashMap<ParticipantId, usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить участника. Если id уже есть – запись заменяется.
    pub fn insert(&mut self, participant: Participant) {
        match self.index.get(&participant.id) {
            Some(&idx) => self.participants[idx] = participant,
            None => {
                self.index.insert(participant.id, self.participants.len());
                self.participants.push(participant);
            }
        }
    }

    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.index.get(&id).and_then(|&idx| self.participants.get(idx))
    }

    pub fn get_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        let idx = *self.index.get(&id)?;
        self.participants.get_mut(idx)
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Все участники в порядке добавления.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn set_seated(&mut self, id: ParticipantId, seated: bool) {
        if let Some(p) = self.get_mut(id) {
            p.seated = seated;
        }
    }

    /// Перевести ресурсы от `from` к `to`.
    ///
    /// Переводится не больше, чем есть у отправителя, и не больше, чем
    /// влезает получателю до `u64::MAX`, поэтому сумма у пары до и после
    /// одинакова. Возвращает фактически переведённые
    /// (доблоны, последователи) или `None`, если кого-то из пары нет в арене.
    pub fn transfer(
        &mut self,
        from: ParticipantId,
        to: ParticipantId,
        wealth: Amount,
        followers: Amount,
    ) -> Option<(Amount, Amount)> {
        if !self.contains(to) {
            return None;
        }
        if from == to {
            return self.contains(from).then_some((Amount::ZERO, Amount::ZERO));
        }

        let (wealth_room, followers_room) = {
            let target = self.get(to)?;
            (target.wealth.headroom(), target.followers.headroom())
        };

        let (moved_wealth, moved_followers) = {
            let source = self.get_mut(from)?;
            let w = wealth.min(source.wealth).min(wealth_room);
            let f = followers.min(source.followers).min(followers_room);
            source.wealth -= w;
            source.followers -= f;
            (w, f)
        };

        let target = self.get_mut(to)?;
        target.wealth += moved_wealth;
        target.followers += moved_followers;

        Some((moved_wealth, moved_followers))
    }

    /// Сводка ресурсов по подмножеству участников.
    pub fn totals<'a, I>(&self, ids: I) -> ResourceTotals
    where
        I: IntoIterator<Item = &'a ParticipantId>,
    {
        let mut totals = ResourceTotals::default();
        for p in ids.into_iter().filter_map(|&id| self.get(id)) {
            totals.total_wealth += p.wealth;
            totals.total_followers += p.followers;
            totals.participants += 1;
        }
        totals
    }

    /// Сводка по всей арене.
    pub fn totals_all(&self) -> ResourceTotals {
        let ids: Vec<ParticipantId> = self.participants.iter().map(|p| p.id).collect();
        self.totals(ids.iter())
    }

    /// Сколько участников каждого ремесла среди `ids`.
    pub fn category_counts<'a, I>(&self, ids: I) -> BTreeMap<Category, usize>
    where
        I: IntoIterator<Item = &'a ParticipantId>,
    {
        let mut counts = BTreeMap::new();
        for p in ids.into_iter().filter_map(|&id| self.get(id)) {
            *counts.entry(p.category).or_insert(0) += 1;
        }
        counts
    }
}
