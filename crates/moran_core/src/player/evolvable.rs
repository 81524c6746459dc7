use super::{Evolvable, Player};
use crate::error::{MoranError, Result};
use crate::random::RandomGenerator;
use moran_data::Action;

const DEFAULT_GENE_FLIP_PROBABILITY: f64 = 0.1;

/// Plays a fixed cycle of moves. Mutation flips individual positions of the
/// cycle, so the display name (which spells the cycle out) changes with it.
#[derive(Debug, Clone)]
pub struct EvolvableCycler {
    cycle: Vec<Action>,
    gene_flip_probability: f64,
    rng: RandomGenerator,
}

impl EvolvableCycler {
    /// `cycle` must be non-empty.
    pub fn new(cycle: Vec<Action>, gene_flip_probability: f64, seed: Option<u64>) -> Result<Self> {
        if cycle.is_empty() {
            return Err(MoranError::invalid_config("cycle must not be empty"));
        }
        if !(0.0..=1.0).contains(&gene_flip_probability) {
            return Err(MoranError::invalid_config(format!(
                "gene flip probability must be in [0, 1], got {gene_flip_probability}"
            )));
        }
        Ok(Self {
            cycle,
            gene_flip_probability,
            rng: RandomGenerator::new(Some(seed.unwrap_or(0))),
        })
    }

    /// Parses a cycle such as `"CCD"`.
    pub fn from_cycle_str(cycle: &str, seed: Option<u64>) -> Result<Self> {
        let actions = cycle
            .chars()
            .map(|c| {
                Action::from_char(c)
                    .ok_or_else(|| MoranError::invalid_config(format!("bad action {c:?} in cycle")))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(actions, DEFAULT_GENE_FLIP_PROBABILITY, seed)
    }

    #[must_use]
    pub fn with_gene_flip_probability(mut self, p: f64) -> Self {
        self.gene_flip_probability = p.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn cycle(&self) -> &[Action] {
        &self.cycle
    }
}

impl Player for EvolvableCycler {
    fn name(&self) -> String {
        let genes: String = self.cycle.iter().map(|a| a.as_char()).collect();
        format!("EvolvableCycler: {genes}")
    }

    fn strategy(&mut self, own: &[Action], _opponent: &[Action]) -> Action {
        self.cycle[own.len() % self.cycle.len()]
    }

    fn clone_box(&self) -> Box<dyn Player> {
        Box::new(self.clone())
    }

    fn as_evolvable(&self) -> Option<&dyn Evolvable> {
        Some(self)
    }

    fn as_evolvable_mut(&mut self) -> Option<&mut dyn Evolvable> {
        Some(self)
    }
}

impl Evolvable for EvolvableCycler {
    fn create_new(&self, seed: u64) -> Box<dyn Player> {
        Box::new(Self {
            cycle: self.cycle.clone(),
            gene_flip_probability: self.gene_flip_probability,
            rng: RandomGenerator::new(Some(seed)),
        })
    }

    fn mutate(&mut self) -> Box<dyn Player> {
        let p = self.gene_flip_probability;
        let cycle = self
            .cycle
            .iter()
            .map(|&a| if self.rng.chance(p) { a.flip() } else { a })
            .collect();
        let child_seed = self.rng.random_seed_int();
        Box::new(Self {
            cycle,
            gene_flip_probability: p,
            rng: RandomGenerator::new(Some(child_seed)),
        })
    }
}
