use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::RandomSource;

/// RNG на основе `thread_rng` – для обычных матчей.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut rand::thread_rng());
    }

    fn gen_range_inclusive(&mut self, low: u64, high: u64) -> u64 {
        if low >= high {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же матчи при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    fn gen_range_inclusive(&mut self, low: u64, high: u64) -> u64 {
        if low >= high {
            return low;
        }
        self.inner.gen_range(low..=high)
    }
}

/// RNG, выбранный по seed из конфига: с seed – детерминированный, без – системный.
#[derive(Clone, Debug)]
pub enum MatchRng {
    System(SystemRng),
    Seeded(DeterministicRng),
}

impl MatchRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => MatchRng::Seeded(DeterministicRng::from_seed(seed)),
            None => MatchRng::System(SystemRng),
        }
    }
}

impl RandomSource for MatchRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        match self {
            MatchRng::System(rng) => rng.shuffle(slice),
            MatchRng::Seeded(rng) => rng.shuffle(slice),
        }
    }

    fn gen_range_inclusive(&mut self, low: u64, high: u64) -> u64 {
        match self {
            MatchRng::System(rng) => rng.gen_range_inclusive(low, high),
            MatchRng::Seeded(rng) => rng.gen_range_inclusive(low, high),
        }
    }
}
