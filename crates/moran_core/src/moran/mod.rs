//! The Moran process engine.
//!
//! Each generation every agent is scored against its interaction neighbors,
//! one agent is chosen to reproduce in proportion to fitness, one agent is
//! chosen to die, and the offspring (possibly mutated) takes the dead agent's
//! slot. With zero mutation the population eventually fixates on a single
//! strategy type, at which point stepping reports
//! [`Generation::Terminated`].
//!
//! ## Update disciplines
//! - **bd** (birth-death): reproducer chosen over the whole population, the
//!   victim among the reproducer's neighbors in the reproduction graph.
//! - **db** (death-birth): victim chosen uniformly, only its interaction
//!   neighborhood is scored and the reproducer is chosen among the rest.

mod approximate;
pub mod matchups;
pub mod population;
pub mod selection;

pub use approximate::{sample_outcome, ApproximateMoranProcess};
pub use population::{Agent, MutationTargets, Population};
pub use selection::{fitness_proportionate_selection, FitnessTransformation};

use crate::config::{MutationMethod, UpdateMode};
use crate::error::{MoranError, Result};
use crate::graph::{complete_graph, Graph};
use crate::history::History;
use crate::interaction::{DeterministicCache, Match, MatchSettings};
use crate::metrics::Metrics;
use crate::outcome::OutcomeCache;
use crate::player::Player;
use crate::random::{BulkRandomGenerator, RandomGenerator};
use matchups::matchup_indices;
use moran_data::PopulationDistribution;
use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

/// Outcome of one call to [`MoranProcess::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// One slot was replaced and a snapshot appended.
    Advanced,
    /// The population is fixated and stop-on-fixation is enabled. Nothing
    /// changed.
    Terminated,
}

/// Construction parameters for [`MoranProcess`].
#[derive(Clone)]
pub struct MoranOptions {
    pub match_settings: MatchSettings,
    /// Prebuilt memo of deterministic match outcomes; a fresh one otherwise.
    pub deterministic_cache: Option<DeterministicCache>,
    pub mutation_rate: f64,
    pub mutation_method: MutationMethod,
    pub mode: UpdateMode,
    /// Defaults to the complete graph without loops.
    pub interaction_graph: Option<Graph>,
    /// Defaults to the interaction graph plus a self-loop at every vertex.
    pub reproduction_graph: Option<Graph>,
    pub fitness_transformation: Option<FitnessTransformation>,
    pub stop_on_fixation: bool,
    pub seed: Option<u64>,
}

impl Default for MoranOptions {
    fn default() -> Self {
        Self {
            match_settings: MatchSettings::default(),
            deterministic_cache: None,
            mutation_rate: 0.0,
            mutation_method: MutationMethod::Transition,
            mode: UpdateMode::BirthDeath,
            interaction_graph: None,
            reproduction_graph: None,
            fitness_transformation: None,
            stop_on_fixation: true,
            seed: None,
        }
    }
}

/// Where scores come from.
enum Scorer {
    /// Simulate a match for every interaction-graph matchup.
    Matches {
        settings: MatchSettings,
        cache: DeterministicCache,
    },
    /// Sample every pairing from recorded outcome distributions.
    Cached(OutcomeCache),
}

/// RNG positions and history length at the start of a step.
struct Checkpoint {
    random: RandomGenerator,
    bulk_random: BulkRandomGenerator,
    scores: usize,
}

pub struct MoranProcess {
    initial_players: Vec<Box<dyn Player>>,
    population: Population,
    history: History,
    mutation_rate: f64,
    mutation_method: MutationMethod,
    mode: UpdateMode,
    stop_on_fixation: bool,
    interaction_graph: Graph,
    reproduction_graph: Graph,
    /// Graph vertex of each population index.
    locations: Vec<usize>,
    /// Population index of each graph vertex.
    index: HashMap<usize, usize>,
    mutation_targets: MutationTargets,
    fitness_transformation: Option<FitnessTransformation>,
    scorer: Scorer,
    reseed_evolvable: bool,
    random: RandomGenerator,
    bulk_random: BulkRandomGenerator,
    /// Slot chosen by a global death, consumed by the next matchup build.
    dead: Option<usize>,
    seed: Option<u64>,
    metrics: Metrics,
}

impl MoranProcess {
    /// Builds a process that scores agents by playing matches.
    ///
    /// # Errors
    /// [`MoranError::InvalidConfiguration`] for out-of-range rates, an empty
    /// population, a death-birth population smaller than two, or graphs
    /// whose vertex sets differ from each other or from the population size.
    pub fn new(players: Vec<Box<dyn Player>>, mut options: MoranOptions) -> Result<Self> {
        let settings = options.match_settings.clone();
        if !(0.0..=1.0).contains(&settings.noise) {
            return Err(MoranError::invalid_config(format!(
                "noise must be in [0, 1], got {}",
                settings.noise
            )));
        }
        if let Some(p) = settings.prob_end {
            if !(0.0..=1.0).contains(&p) {
                return Err(MoranError::invalid_config(format!(
                    "prob_end must be in [0, 1], got {p}"
                )));
            }
        }
        let cache = options.deterministic_cache.take().unwrap_or_default();
        Self::build(players, options, Scorer::Matches { settings, cache }, true)
    }

    fn build(
        players: Vec<Box<dyn Player>>,
        options: MoranOptions,
        scorer: Scorer,
        reseed_evolvable: bool,
    ) -> Result<Self> {
        let n = players.len();
        if n == 0 {
            return Err(MoranError::invalid_config("the population is empty"));
        }
        if !(0.0..=1.0).contains(&options.mutation_rate) {
            return Err(MoranError::invalid_config(format!(
                "mutation_rate must be in [0, 1], got {}",
                options.mutation_rate
            )));
        }
        if options.mode == UpdateMode::DeathBirth && n < 2 {
            return Err(MoranError::invalid_config(
                "death-birth needs at least two agents",
            ));
        }

        let interaction_graph = options
            .interaction_graph
            .unwrap_or_else(|| complete_graph(n, false));
        let reproduction_graph = options.reproduction_graph.unwrap_or_else(|| {
            let mut graph = interaction_graph.clone();
            graph.add_loops();
            graph
        });
        let locations = interaction_graph.vertices();
        if locations != reproduction_graph.vertices() {
            return Err(MoranError::invalid_config(
                "interaction and reproduction graphs have different vertex sets",
            ));
        }
        if locations.len() != n {
            return Err(MoranError::invalid_config(format!(
                "graph has {} vertices for {n} agents",
                locations.len()
            )));
        }
        if options.mode == UpdateMode::BirthDeath {
            if let Some(v) = locations
                .iter()
                .find(|&&v| reproduction_graph.out_vertices(v).is_empty())
            {
                return Err(MoranError::invalid_config(format!(
                    "vertex {v} has no outbound reproduction edge"
                )));
            }
        }
        let index = locations.iter().enumerate().map(|(i, &v)| (v, i)).collect();

        let mut random = RandomGenerator::new(options.seed);
        let bulk_random = BulkRandomGenerator::new(random.random_seed_int());
        let mutation_targets = MutationTargets::build(&players);

        let mut process = Self {
            initial_players: players,
            population: Population::default(),
            history: History::new(),
            mutation_rate: options.mutation_rate,
            mutation_method: options.mutation_method,
            mode: options.mode,
            stop_on_fixation: options.stop_on_fixation,
            interaction_graph,
            reproduction_graph,
            locations,
            index,
            mutation_targets,
            fitness_transformation: options.fitness_transformation,
            scorer,
            reseed_evolvable,
            random,
            bulk_random,
            dead: None,
            seed: options.seed,
            metrics: Metrics::new(),
        };
        process.set_players();
        tracing::debug!(
            population = n,
            mode = %process.mode,
            mutation_method = %process.mutation_method,
            mutation_rate = process.mutation_rate,
            "Moran process created"
        );
        Ok(process)
    }

    /// Copies the initial players into a fresh population. Under atomic
    /// mutation every evolvable player is replaced by a newly seeded one.
    fn set_players(&mut self) {
        let reseed = self.reseed_evolvable && self.mutation_method == MutationMethod::Atomic;
        let mut agents = Vec::with_capacity(self.initial_players.len());
        for player in &self.initial_players {
            let fresh = match player.as_evolvable() {
                Some(evolvable) if reseed => evolvable.create_new(self.bulk_random.next_seed()),
                _ => {
                    let mut copy = player.clone_box();
                    copy.reset();
                    copy
                }
            };
            agents.push(Agent::new(fresh));
        }
        self.population = Population::new(agents);
        self.history.restart(self.population.distribution());
    }

    /// Advances one generation.
    ///
    /// # Errors
    /// [`MoranError::IncompatibleAgent`] when atomic mutation meets a player
    /// that cannot mutate, [`MoranError::UncoveredOutcome`] when a cached
    /// pairing is missing. A failed step leaves population, history and
    /// random streams as they were.
    pub fn step(&mut self) -> Result<Generation> {
        if self.stop_on_fixation {
            if let Some(winner) = self.population.fixated_name() {
                tracing::info!(
                    winner = winner.as_str(),
                    generations = self.history.generations(),
                    "Population fixated"
                );
                return Ok(Generation::Terminated);
            }
        }

        let started = Instant::now();
        let checkpoint = Checkpoint {
            random: self.random.clone(),
            bulk_random: self.bulk_random.clone(),
            scores: self.history.score_history().len(),
        };
        if let Err(e) = self.advance() {
            self.random = checkpoint.random;
            self.bulk_random = checkpoint.bulk_random;
            self.history.truncate_scores(checkpoint.scores);
            self.dead = None;
            return Err(e);
        }

        let distinct = self.history.populations().last().map_or(0, |d| d.len());
        self.metrics
            .record_generation(started.elapsed(), self.population.len(), distinct);
        Ok(Generation::Advanced)
    }

    fn advance(&mut self) -> Result<()> {
        let (i, j, offspring) = match self.mode {
            UpdateMode::BirthDeath => {
                let j = self.birth(None)?;
                let i = self.death(Some(j))?;
                (i, j, self.mutate(j)?)
            }
            UpdateMode::DeathBirth => {
                let i = self.death(None)?;
                let previous = self.population.vacate(i);
                let chosen = self
                    .birth(Some(i))
                    .and_then(|j| self.mutate(j).map(|offspring| (j, offspring)));
                match chosen {
                    Ok((j, offspring)) => (i, j, offspring),
                    Err(e) => {
                        self.population.restore(i, previous);
                        return Err(e);
                    }
                }
            }
        };

        tracing::debug!(
            generation = self.history.generations() + 1,
            reproducer = j,
            victim = i,
            offspring = offspring.name(),
            "Replacing agent"
        );
        self.population.install(i, offspring);
        self.history.push_population(self.population.distribution());
        Ok(())
    }

    /// Scores the population and picks the agent to reproduce. With `dead`
    /// set, that index is excluded from the candidates.
    fn birth(&mut self, dead: Option<usize>) -> Result<usize> {
        let scores = self.score_all()?;
        let transformation = self.fitness_transformation.as_ref();
        let j = match dead {
            Some(d) => {
                let mut candidates = scores;
                if d < candidates.len() {
                    candidates.remove(d);
                }
                let j = fitness_proportionate_selection(&candidates, transformation, &mut self.random);
                if j >= d {
                    j + 1
                } else {
                    j
                }
            }
            None => fitness_proportionate_selection(&scores, transformation, &mut self.random),
        };
        Ok(j)
    }

    /// Picks the agent to be replaced: uniformly over the population when
    /// `reproducer` is `None` (recorded for the next matchup build), else
    /// uniformly among the reproducer's reproduction-graph neighbors.
    fn death(&mut self, reproducer: Option<usize>) -> Result<usize> {
        match reproducer {
            None => {
                let i = self.random.randrange(0, self.population.len());
                self.dead = Some(i);
                Ok(i)
            }
            Some(j) => {
                let vertex = self
                    .locations
                    .get(j)
                    .copied()
                    .ok_or_else(|| vacant_slot(j))?;
                let neighbors = self.reproduction_graph.out_vertices(vertex);
                let target = *self.random.choice(&neighbors).ok_or_else(|| {
                    MoranError::invalid_config(format!(
                        "vertex {vertex} has no outbound reproduction edge"
                    ))
                })?;
                self.index
                    .get(&target)
                    .copied()
                    .ok_or_else(|| vacant_slot(j))
            }
        }
    }

    /// The offspring of the agent at `j`.
    fn mutate(&mut self, j: usize) -> Result<Agent> {
        match self.mutation_method {
            MutationMethod::Atomic => {
                let agent = self.population.get_mut(j).ok_or_else(|| vacant_slot(j))?;
                let name = agent.name().to_string();
                let evolvable = agent.player_mut().as_evolvable_mut().ok_or_else(|| {
                    MoranError::incompatible_agent(format!(
                        "{name} is not evolvable; atomic mutation needs an evolvable player"
                    ))
                })?;
                let child = Agent::new(evolvable.mutate());
                self.metrics.record_mutation();
                Ok(child)
            }
            MutationMethod::Transition => {
                let agent = self.population.get(j).ok_or_else(|| vacant_slot(j))?;
                if self.mutation_rate > 0.0 && self.random.random() < self.mutation_rate {
                    match self.mutation_targets.get(agent.name()) {
                        Some(targets) if !targets.is_empty() => {
                            let k = self.random.randrange(0, targets.len());
                            self.metrics.record_mutation();
                            return Ok(targets[k].offspring());
                        }
                        _ => tracing::warn!(
                            strategy = agent.name(),
                            "No mutation target for strategy, cloning instead"
                        ),
                    }
                }
                Ok(agent.offspring())
            }
        }
    }

    /// Scores every agent for this generation and appends the vector to the
    /// score history.
    fn score_all(&mut self) -> Result<Vec<f64>> {
        let dead = self.dead.take();
        let scores = match &mut self.scorer {
            Scorer::Matches { settings, cache } => {
                let pairs = matchup_indices(
                    &self.interaction_graph,
                    &self.locations,
                    &self.index,
                    &self.population,
                    dead,
                );
                self.metrics.record_matches(pairs.len());
                play_matchups(
                    &pairs,
                    &mut self.population,
                    settings,
                    cache,
                    &mut self.bulk_random,
                )
            }
            Scorer::Cached(outcomes) => approximate::score_from_cache(&self.population, outcomes)?,
        };
        self.history.push_scores(scores.clone());
        Ok(scores)
    }

    /// True when every living agent shares one display name. Evaluated
    /// against the current population on every call.
    #[must_use]
    pub fn fixation_check(&self) -> bool {
        self.population.fixated_name().is_some()
    }

    /// Steps until fixation.
    ///
    /// # Errors
    /// [`MoranError::InvalidConfiguration`], before any step, when the run
    /// could never end: nonzero mutation rate or stop-on-fixation disabled.
    pub fn play(&mut self) -> Result<&[PopulationDistribution]> {
        if !self.stop_on_fixation || self.mutation_rate != 0.0 {
            return Err(MoranError::invalid_config(
                "play() would never return with a nonzero mutation rate or with \
                 stop_on_fixation disabled; step the process instead",
            ));
        }
        while self.step()? == Generation::Advanced {}
        Ok(self.history.populations())
    }

    /// Iterator over the distributions produced by successive steps. Ends at
    /// termination, or after yielding the first error.
    pub fn generations(&mut self) -> Generations<'_> {
        Generations {
            process: self,
            done: false,
        }
    }

    /// Rebuilds the population from the initial players and forgets all
    /// history. Random streams continue from where they were.
    pub fn reset(&mut self) {
        self.history.clear_scores();
        self.dead = None;
        self.set_players();
        self.metrics.reset();
    }

    #[must_use]
    pub fn populations(&self) -> &[PopulationDistribution] {
        self.history.populations()
    }

    #[must_use]
    pub fn score_history(&self) -> &[Vec<f64>] {
        self.history.score_history()
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Current population distribution.
    #[must_use]
    pub fn population_distribution(&self) -> PopulationDistribution {
        self.population.distribution()
    }

    /// The shared name of a fixated population, `None` otherwise.
    #[must_use]
    pub fn winning_strategy_name(&self) -> Option<String> {
        self.population.fixated_name()
    }

    #[must_use]
    pub fn fixated(&self) -> bool {
        self.fixation_check()
    }

    /// Number of recorded population snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.populations().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.populations().is_empty()
    }

    #[must_use]
    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    #[must_use]
    pub fn mutation_method(&self) -> MutationMethod {
        self.mutation_method
    }

    #[must_use]
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    #[must_use]
    pub fn stop_on_fixation(&self) -> bool {
        self.stop_on_fixation
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn interaction_graph(&self) -> &Graph {
        &self.interaction_graph
    }

    #[must_use]
    pub fn reproduction_graph(&self) -> &Graph {
        &self.reproduction_graph
    }

    /// Graph vertex of each population index.
    #[must_use]
    pub fn locations(&self) -> &[usize] {
        &self.locations
    }

    #[must_use]
    pub fn mutation_targets(&self) -> &MutationTargets {
        &self.mutation_targets
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The memo of deterministic outcomes, for reuse by another engine.
    #[must_use]
    pub fn deterministic_cache(&self) -> Option<&DeterministicCache> {
        match &self.scorer {
            Scorer::Matches { cache, .. } => Some(cache),
            Scorer::Cached(_) => None,
        }
    }

    /// Matchups the next generation would play, without consuming anything.
    #[must_use]
    pub fn pending_matchups(&self) -> BTreeSet<(usize, usize)> {
        matchup_indices(
            &self.interaction_graph,
            &self.locations,
            &self.index,
            &self.population,
            self.dead,
        )
    }
}

/// Plays one seeded match per pair and sums the per-turn scores by index.
/// Seeds are drawn in pair order.
fn play_matchups(
    pairs: &BTreeSet<(usize, usize)>,
    population: &mut Population,
    settings: &MatchSettings,
    cache: &mut DeterministicCache,
    seeds: &mut BulkRandomGenerator,
) -> Vec<f64> {
    let mut scores = vec![0.0; population.len()];
    for &(i, j) in pairs {
        let game = Match::new(settings, seeds.next_seed());
        let (a, b) = if i == j {
            let Some(agent) = population.get_mut(i) else {
                continue;
            };
            let mut twin = agent.player().clone_box();
            game.play(agent.player_mut(), twin.as_mut(), Some(&mut *cache))
        } else {
            let Some((first, second)) = population.pair_mut(i, j) else {
                continue;
            };
            game.play(first.player_mut(), second.player_mut(), Some(&mut *cache))
        };
        scores[i] += a;
        scores[j] += b;
    }
    scores
}

fn vacant_slot(index: usize) -> MoranError {
    MoranError::invalid_config(format!("no agent at population index {index}"))
}

/// See [`MoranProcess::generations`].
pub struct Generations<'a> {
    process: &'a mut MoranProcess,
    done: bool,
}

impl Iterator for Generations<'_> {
    type Item = Result<PopulationDistribution>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.process.step() {
            Ok(Generation::Advanced) => self.process.populations().last().cloned().map(Ok),
            Ok(Generation::Terminated) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
