//! Seeded random sources.
//!
//! All engine randomness comes from one [`RandomGenerator`] plus one
//! [`BulkRandomGenerator`] derived from it. Both wrap `ChaCha8Rng`, so a run
//! is reproducible from its construction seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Reproducible stream of uniform and integer draws.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    rng: ChaCha8Rng,
}

impl RandomGenerator {
    /// Seeds from `seed`, or from OS entropy when `None`.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn random(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform integer in `[lo, hi)`. Returns `lo` for an empty range.
    pub fn randrange(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Uniformly chosen element, `None` for an empty slice.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.randrange(0, items.len());
        items.get(idx)
    }

    /// A fresh integer seed for a child stream.
    pub fn random_seed_int(&mut self) -> u64 {
        self.rng.gen::<u64>()
    }

    /// Bernoulli trial with probability `p` (clamped to `[0, 1]`).
    pub fn chance(&mut self, p: f64) -> bool {
        self.random() < p.clamp(0.0, 1.0)
    }

    /// Direct access for `rand` distributions.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

/// Unbounded sequence of independent child seeds.
#[derive(Debug, Clone)]
pub struct BulkRandomGenerator {
    rng: ChaCha8Rng,
}

impl BulkRandomGenerator {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn next_seed(&mut self) -> u64 {
        self.rng.gen::<u64>()
    }
}

impl Iterator for BulkRandomGenerator {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        Some(self.next_seed())
    }
}
