//! Pairwise match play and the memo of deterministic match outcomes.

use crate::game::Game;
use crate::player::Player;
use crate::random::RandomGenerator;
use moran_data::Action;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters shared by every match of a run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchSettings {
    /// Number of turns, or the cap on a stochastic length when `prob_end` is set.
    pub turns: usize,
    /// Probability that any given turn is the last one.
    pub prob_end: Option<f64>,
    /// Probability that each played action is flipped.
    pub noise: f64,
    pub game: Game,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            turns: crate::DEFAULT_TURNS,
            prob_end: None,
            noise: 0.0,
            game: Game::default(),
        }
    }
}

/// Moves of one match, first player's move first.
pub type Interactions = Vec<(Action, Action)>;

/// Memo of interaction sequences for deterministic pairings, keyed by the two
/// display names (in play order) and the match length.
#[derive(Debug, Clone, Default)]
pub struct DeterministicCache {
    entries: HashMap<(String, String, usize), Interactions>,
}

impl DeterministicCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, first: &str, second: &str, turns: usize) -> Option<&Interactions> {
        self.entries
            .get(&(first.to_string(), second.to_string(), turns))
    }

    pub fn insert(&mut self, first: String, second: String, turns: usize, value: Interactions) {
        self.entries.insert((first, second, turns), value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One seeded match between two players.
#[derive(Debug, Clone)]
pub struct Match<'a> {
    settings: &'a MatchSettings,
    seed: u64,
}

impl<'a> Match<'a> {
    #[must_use]
    pub fn new(settings: &'a MatchSettings, seed: u64) -> Self {
        Self { settings, seed }
    }

    /// Plays the match and returns each side's average score per turn.
    ///
    /// Both players are reset and reseeded first. The cache is consulted only
    /// when the outcome cannot depend on the seed.
    pub fn play(
        &self,
        first: &mut dyn Player,
        second: &mut dyn Player,
        cache: Option<&mut DeterministicCache>,
    ) -> (f64, f64) {
        let mut rng = RandomGenerator::new(Some(self.seed));
        let turns = self.length(&mut rng);

        first.reset();
        second.reset();
        first.set_seed(rng.random_seed_int());
        second.set_seed(rng.random_seed_int());

        let cacheable = self.settings.prob_end.is_none()
            && self.settings.noise == 0.0
            && !first.is_stochastic()
            && !second.is_stochastic();

        let (first_name, second_name) = (first.name(), second.name());
        let interactions = match cache {
            Some(cache) if cacheable => {
                if let Some(hit) = cache.get(&first_name, &second_name, turns) {
                    hit.clone()
                } else {
                    let played = self.simulate(first, second, turns, &mut rng);
                    cache.insert(first_name, second_name, turns, played.clone());
                    played
                }
            }
            _ => self.simulate(first, second, turns, &mut rng),
        };

        self.score_per_turn(&interactions)
    }

    fn length(&self, rng: &mut RandomGenerator) -> usize {
        match self.settings.prob_end {
            Some(p) => sample_length(p, rng).min(self.settings.turns),
            None => self.settings.turns,
        }
    }

    fn simulate(
        &self,
        first: &mut dyn Player,
        second: &mut dyn Player,
        turns: usize,
        rng: &mut RandomGenerator,
    ) -> Interactions {
        let mut own = Vec::with_capacity(turns);
        let mut other = Vec::with_capacity(turns);
        for _ in 0..turns {
            let mut a = first.strategy(&own, &other);
            let mut b = second.strategy(&other, &own);
            if self.settings.noise > 0.0 {
                if rng.chance(self.settings.noise) {
                    a = a.flip();
                }
                if rng.chance(self.settings.noise) {
                    b = b.flip();
                }
            }
            own.push(a);
            other.push(b);
        }
        own.into_iter().zip(other).collect()
    }

    fn score_per_turn(&self, interactions: &[(Action, Action)]) -> (f64, f64) {
        if interactions.is_empty() {
            return (0.0, 0.0);
        }
        let (a, b) = interactions
            .iter()
            .map(|&(x, y)| self.settings.game.score(x, y))
            .fold((0.0, 0.0), |(sa, sb), (x, y)| (sa + x, sb + y));
        let n = interactions.len() as f64;
        (a / n, b / n)
    }
}

/// Geometric match length: the turn on which a per-turn ending probability
/// `p` first fires.
pub fn sample_length(p: f64, rng: &mut RandomGenerator) -> usize {
    if p <= 0.0 {
        return usize::MAX;
    }
    if p >= 1.0 {
        return 1;
    }
    let x = rng.random();
    let turns = ((1.0 - x).ln() / (1.0 - p).ln()).floor();
    if turns.is_finite() && turns >= 0.0 {
        (turns as usize).saturating_add(1)
    } else {
        usize::MAX
    }
}
