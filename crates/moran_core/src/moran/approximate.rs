use super::{Generation, Generations, MoranOptions, MoranProcess, Population, Scorer};
use crate::error::{MoranError, Result};
use crate::history::History;
use crate::interaction::MatchSettings;
use crate::outcome::OutcomeCache;
use crate::player::Player;
use moran_data::PopulationDistribution;

/// A Moran process that never plays matches. Every pairing's scores are
/// drawn from a precomputed [`OutcomeCache`], which makes generations cheap
/// at the cost of fidelity to the underlying game.
///
/// Runs birth-death with transition mutation on the complete graph and
/// always stops on fixation.
pub struct ApproximateMoranProcess {
    process: MoranProcess,
}

impl ApproximateMoranProcess {
    pub fn new(
        players: Vec<Box<dyn Player>>,
        cached_outcomes: OutcomeCache,
        mutation_rate: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        let options = MoranOptions {
            match_settings: MatchSettings {
                turns: 0,
                noise: 0.0,
                prob_end: None,
                ..Default::default()
            },
            mutation_rate,
            seed,
            ..Default::default()
        };
        let process = MoranProcess::build(players, options, Scorer::Cached(cached_outcomes), false)?;
        Ok(Self { process })
    }

    pub fn step(&mut self) -> Result<Generation> {
        self.process.step()
    }

    pub fn play(&mut self) -> Result<&[PopulationDistribution]> {
        self.process.play()
    }

    pub fn generations(&mut self) -> Generations<'_> {
        self.process.generations()
    }

    pub fn reset(&mut self) {
        self.process.reset();
    }

    #[must_use]
    pub fn populations(&self) -> &[PopulationDistribution] {
        self.process.populations()
    }

    #[must_use]
    pub fn score_history(&self) -> &[Vec<f64>] {
        self.process.score_history()
    }

    #[must_use]
    pub fn history(&self) -> &History {
        self.process.history()
    }

    #[must_use]
    pub fn winning_strategy_name(&self) -> Option<String> {
        self.process.winning_strategy_name()
    }

    #[must_use]
    pub fn fixated(&self) -> bool {
        self.process.fixated()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.process.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.process.is_empty()
    }

    /// The underlying engine, for read-only inspection.
    #[must_use]
    pub fn process(&self) -> &MoranProcess {
        &self.process
    }
}

/// Samples every living pair `i < j` once.
pub(super) fn score_from_cache(
    population: &Population,
    outcomes: &mut OutcomeCache,
) -> Result<Vec<f64>> {
    let n = population.len();
    let mut scores = vec![0.0; n];
    for i in 0..n {
        let Some(first) = population.get(i) else {
            continue;
        };
        for j in (i + 1)..n {
            let Some(second) = population.get(j) else {
                continue;
            };
            let (a, b) = sample_outcome(outcomes, first.name(), second.name())?;
            scores[i] += a;
            scores[j] += b;
        }
    }
    Ok(scores)
}

/// One outcome for `first` against `second`. A pairing recorded only in the
/// other order is sampled there and returned swapped.
///
/// # Errors
/// [`MoranError::UncoveredOutcome`] when neither order is recorded.
pub fn sample_outcome(outcomes: &mut OutcomeCache, first: &str, second: &str) -> Result<(f64, f64)> {
    if let Some(pdf) = outcomes.get_mut(first, second) {
        return Ok(pdf.sample());
    }
    match outcomes.get_mut(second, first) {
        Some(pdf) => {
            let (b, a) = pdf.sample();
            Ok((a, b))
        }
        None => Err(MoranError::uncovered(first, second)),
    }
}
