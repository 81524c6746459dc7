use anyhow::{Context, Result};
use moran_core::config::{GraphKind, MoranConfig};
use moran_core::outcome::OutcomeCache;
use moran_core::random::RandomGenerator;
use moran_core::{ApproximateMoranProcess, Generation, MoranProcess, UpdateMode};
use moran_io::{summarize, RunArchive};
use std::path::Path;

/// Anything that can be advanced one generation at a time.
trait Engine {
    fn step(&mut self) -> moran_core::Result<Generation>;
    fn play(&mut self) -> moran_core::Result<()>;
    fn process(&self) -> &MoranProcess;
}

impl Engine for MoranProcess {
    fn step(&mut self) -> moran_core::Result<Generation> {
        MoranProcess::step(self)
    }

    fn play(&mut self) -> moran_core::Result<()> {
        MoranProcess::play(self).map(|_| ())
    }

    fn process(&self) -> &MoranProcess {
        self
    }
}

impl Engine for ApproximateMoranProcess {
    fn step(&mut self) -> moran_core::Result<Generation> {
        ApproximateMoranProcess::step(self)
    }

    fn play(&mut self) -> moran_core::Result<()> {
        ApproximateMoranProcess::play(self).map(|_| ())
    }

    fn process(&self) -> &MoranProcess {
        ApproximateMoranProcess::process(self)
    }
}

/// Runs one configured simulation to an archive.
pub struct Runner {
    config: MoranConfig,
}

impl Runner {
    pub fn new(config: MoranConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = MoranConfig::from_toml(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &MoranConfig {
        &self.config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.run.seed = Some(seed);
        self
    }

    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.config.run.max_generations = generations;
        self
    }

    /// Builds the engine the config asks for and runs it.
    ///
    /// Plays to fixation when the run is guaranteed to end, otherwise steps
    /// at most `run.max_generations` times.
    pub fn run(&self) -> Result<RunArchive> {
        let players = self.config.build_players()?;
        tracing::info!(
            population = players.len(),
            strategies = self.config.population.strategies.len(),
            approximate = self.config.run.approximate,
            seed = ?self.config.run.seed,
            "Starting Moran run"
        );

        if self.config.run.approximate {
            self.warn_ignored_for_approximate();
            let settings = self.config.match_settings();
            let cache_seed = RandomGenerator::new(self.config.run.seed).random_seed_int();
            let cache =
                OutcomeCache::from_simulation(&players, self.config.run.samples, &settings, cache_seed)?;
            tracing::info!(pairings = cache.len(), "Outcome cache built");
            let mut engine = ApproximateMoranProcess::new(
                players,
                cache,
                self.config.evolution.mutation_rate,
                self.config.run.seed,
            )?;
            self.drive(&mut engine)
        } else {
            let mut engine = MoranProcess::new(players, self.config.options()?)?;
            self.drive(&mut engine)
        }
    }

    fn drive<E: Engine>(&self, engine: &mut E) -> Result<RunArchive> {
        let evolution = &self.config.evolution;
        let terminates = evolution.stop_on_fixation && evolution.mutation_rate == 0.0;
        if terminates {
            engine.play()?;
        } else {
            for _ in 0..self.config.run.max_generations {
                if engine.step()? == Generation::Terminated {
                    break;
                }
            }
        }

        let process = engine.process();
        let summary = summarize(process, &self.config.fingerprint());
        tracing::info!(
            generations = summary.generations,
            fixated = summary.fixated,
            winner = summary.winning_strategy_name.as_deref().unwrap_or("-"),
            "Moran run finished"
        );
        Ok(RunArchive::new(summary, process.history().clone()))
    }

    fn warn_ignored_for_approximate(&self) {
        if self.config.evolution.mode.parse::<UpdateMode>().ok() != Some(UpdateMode::BirthDeath) {
            tracing::warn!("Approximate runs always use birth-death; mode is ignored");
        }
        if self.config.graph.kind != GraphKind::Complete {
            tracing::warn!("Approximate runs always use the complete graph; graph kind is ignored");
        }
        if !self.config.evolution.stop_on_fixation {
            tracing::warn!("Approximate runs always stop on fixation");
        }
    }
}
