//! Recorded distributions of match outcomes, used to skip simulation.

use crate::error::{MoranError, Result};
use crate::interaction::{Match, MatchSettings};
use crate::player::Player;
use crate::random::{BulkRandomGenerator, RandomGenerator};
use rand::distributions::{Distribution, WeightedIndex};
use std::collections::{BTreeMap, HashMap};

/// Empirical distribution over score pairs with its own seeded stream.
#[derive(Debug, Clone)]
pub struct Pdf {
    sample_space: Vec<(f64, f64)>,
    counts: Vec<usize>,
    index: WeightedIndex<usize>,
    rng: RandomGenerator,
}

impl Pdf {
    /// Builds a distribution from `(outcome, count)` pairs.
    pub fn from_counts<I>(counts: I, seed: Option<u64>) -> Result<Self>
    where
        I: IntoIterator<Item = ((f64, f64), usize)>,
    {
        let (sample_space, counts): (Vec<_>, Vec<_>) =
            counts.into_iter().filter(|(_, n)| *n > 0).unzip();
        let index = WeightedIndex::new(&counts)
            .map_err(|e| MoranError::invalid_config(format!("empty outcome distribution: {e}")))?;
        Ok(Self {
            sample_space,
            counts,
            index,
            rng: RandomGenerator::new(seed),
        })
    }

    /// Counts identical outcomes (compared bitwise) in `samples`.
    pub fn from_samples(samples: &[(f64, f64)], seed: Option<u64>) -> Result<Self> {
        let mut tally: BTreeMap<(u64, u64), usize> = BTreeMap::new();
        for &(a, b) in samples {
            *tally.entry((a.to_bits(), b.to_bits())).or_insert(0) += 1;
        }
        Self::from_counts(
            tally
                .into_iter()
                .map(|((a, b), n)| ((f64::from_bits(a), f64::from_bits(b)), n)),
            seed,
        )
    }

    pub fn sample(&mut self) -> (f64, f64) {
        let i = self.index.sample(self.rng.rng_mut());
        self.sample_space[i]
    }

    #[must_use]
    pub fn sample_space(&self) -> &[(f64, f64)] {
        &self.sample_space
    }

    #[must_use]
    pub fn probability(&self, outcome: (f64, f64)) -> f64 {
        let total: usize = self.counts.iter().sum();
        self.sample_space
            .iter()
            .zip(&self.counts)
            .filter(|(o, _)| o.0 == outcome.0 && o.1 == outcome.1)
            .map(|(_, &n)| n as f64 / total as f64)
            .sum()
    }
}

/// Outcome distributions keyed by an ordered pair of display names.
#[derive(Debug, Clone, Default)]
pub struct OutcomeCache {
    outcomes: HashMap<(String, String), Pdf>,
}

impl OutcomeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<A: Into<String>, B: Into<String>>(&mut self, first: A, second: B, pdf: Pdf) {
        self.outcomes.insert((first.into(), second.into()), pdf);
    }

    #[must_use]
    pub fn contains(&self, first: &str, second: &str) -> bool {
        self.outcomes
            .contains_key(&(first.to_string(), second.to_string()))
    }

    pub fn get_mut(&mut self, first: &str, second: &str) -> Option<&mut Pdf> {
        self.outcomes
            .get_mut(&(first.to_string(), second.to_string()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Plays every unordered pairing of the distinct strategies in `players`
    /// (self-pairings included) `samples` times and records the outcomes.
    pub fn from_simulation(
        players: &[Box<dyn Player>],
        samples: usize,
        settings: &MatchSettings,
        seed: u64,
    ) -> Result<Self> {
        if samples == 0 {
            return Err(MoranError::invalid_config(
                "at least one sample per pairing is required",
            ));
        }
        let mut representatives: BTreeMap<String, &dyn Player> = BTreeMap::new();
        for player in players {
            representatives
                .entry(player.name())
                .or_insert_with(|| player.as_ref());
        }
        let reps: Vec<(&String, &&dyn Player)> = representatives.iter().collect();

        let mut seeds = BulkRandomGenerator::new(seed);
        let mut cache = Self::new();
        for (i, (first_name, first)) in reps.iter().enumerate() {
            for (second_name, second) in &reps[i..] {
                let mut a = first.clone_box();
                let mut b = second.clone_box();
                let outcomes: Vec<(f64, f64)> = (0..samples)
                    .map(|_| Match::new(settings, seeds.next_seed()).play(a.as_mut(), b.as_mut(), None))
                    .collect();
                let pdf = Pdf::from_samples(&outcomes, Some(seeds.next_seed()))?;
                cache.insert(first_name.as_str(), second_name.as_str(), pdf);
            }
        }
        tracing::debug!(pairings = cache.len(), samples, "Built outcome cache");
        Ok(cache)
    }
}
