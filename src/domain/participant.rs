use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::resources::Amount;
use crate::domain::ParticipantId;

/// Ремесло участника. Два соседа за столом не должны быть одного ремесла.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Merchant,
    Artisan,
    Farmer,
    Rancher,
    Banker,
}

impl Category {
    /// Все ремёсла в порядке раздачи при посадке.
    pub const ALL: [Category; 5] = [
        Category::Merchant,
        Category::Artisan,
        Category::Farmer,
        Category::Rancher,
        Category::Banker,
    ];

    /// Ремесло по порядковому номеру участника (по кругу).
    pub fn round_robin(index: usize) -> Category {
        Self::ALL[index % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Merchant => "MERCHANT",
            Category::Artisan => "ARTISAN",
            Category::Farmer => "FARMER",
            Category::Rancher => "RANCHER",
            Category::Banker => "BANKER",
        };
        f.write_str(label)
    }
}

/// Участник игры: живёт весь матч, только переходит между столом и стопкой.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub wealth: Amount,
    pub followers: Amount,
    pub category: Category,
    /// Сидит ли сейчас за столом.
    pub seated: bool,
}

impl Participant {
    pub fn new(
        id: ParticipantId,
        name: impl Into<String>,
        wealth: Amount,
        followers: Amount,
        category: Category,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            wealth,
            followers,
            category,
            seated: false,
        }
    }

    pub fn same_category(&self, other: &Participant) -> bool {
        self.category == other.category
    }

    /// Сумма доблонов и последователей.
    pub fn total_resources(&self) -> u64 {
        self.wealth.0.saturating_add(self.followers.0)
    }
}
