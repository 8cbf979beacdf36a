use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Количество ресурса (доблоны или последователи).
/// Обёртка над u64: ниже нуля уйти нельзя, вычитание всегда насыщающее.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(pub u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn new(amount: u64) -> Self {
        Amount(amount)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Половина с округлением вниз (доля при спасении).
    pub fn half(self) -> Amount {
        Amount(self.0 / 2)
    }

    /// Треть с округлением вниз (доля при краже у богатейшего).
    pub fn third(self) -> Amount {
        Amount(self.0 / 3)
    }

    pub fn saturating_sub(self, other: Amount) -> Amount {
        Amount(self.0.saturating_sub(other.0))
    }

    /// Сколько ещё можно добавить без переполнения.
    pub fn headroom(self) -> Amount {
        Amount(u64::MAX - self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Self::Output {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Amount) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

/// Сводка ресурсов по группе участников (стол или стопка выбывших).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceTotals {
    pub total_wealth: Amount,
    pub total_followers: Amount,
    pub participants: usize,
}

impl ResourceTotals {
    /// Сумма доблонов и последователей – величина, которую сохраняют переводы.
    pub fn combined(&self) -> u64 {
        self.total_wealth.0.saturating_add(self.total_followers.0)
    }

    pub fn average_wealth(&self) -> f64 {
        if self.participants == 0 {
            return 0.0;
        }
        self.total_wealth.0 as f64 / self.participants as f64
    }

    pub fn average_followers(&self) -> f64 {
        if self.participants == 0 {
            return 0.0;
        }
        self.total_followers.0 as f64 / self.participants as f64
    }
}
