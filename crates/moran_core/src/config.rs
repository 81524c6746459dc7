//! Configuration management for Moran process runs.
//!
//! Strongly-typed structures that map to a `moran.toml` file. Every field
//! has a default, so a file only needs the values it changes.
//!
//! ## Example `moran.toml`
//!
//! ```toml
//! [population]
//! strategies = ["Tit For Tat", "Defector", "Cooperator"]
//! copies = 4
//!
//! [play]
//! turns = 200
//! noise = 0.0
//!
//! [evolution]
//! mutation_rate = 0.0
//! mutation_method = "transition"
//! mode = "bd"
//!
//! [graph]
//! kind = "cycle"
//!
//! [run]
//! seed = 42
//! ```

use crate::error::{MoranError, Result};
use crate::game::Game;
use crate::graph::{self, Graph};
use crate::interaction::MatchSettings;
use crate::moran::MoranOptions;
use crate::player::{player_from_name, Player};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a reproducing agent's offspring may differ from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MutationMethod {
    /// Occasionally swap in a different initial strategy type.
    #[default]
    Transition,
    /// Delegate to the agent's own mutation operator.
    Atomic,
}

impl FromStr for MutationMethod {
    type Err = MoranError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "transition" => Ok(Self::Transition),
            "atomic" => Ok(Self::Atomic),
            _ => Err(MoranError::invalid_config(format!(
                "Invalid mutation method {s}"
            ))),
        }
    }
}

impl fmt::Display for MutationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transition => write!(f, "transition"),
            Self::Atomic => write!(f, "atomic"),
        }
    }
}

/// Order of the birth and death events within a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UpdateMode {
    /// Reproducer chosen globally, victim among its neighbors.
    #[default]
    #[serde(rename = "bd")]
    BirthDeath,
    /// Victim chosen globally, reproducer among its neighbors.
    #[serde(rename = "db")]
    DeathBirth,
}

impl FromStr for UpdateMode {
    type Err = MoranError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "bd" => Ok(Self::BirthDeath),
            "db" => Ok(Self::DeathBirth),
            _ => Err(MoranError::invalid_config(format!(
                "Invalid mode {s}, expected bd or db"
            ))),
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BirthDeath => write!(f, "bd"),
            Self::DeathBirth => write!(f, "db"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    #[default]
    Complete,
    Cycle,
    /// Two equal complete halves joined by one edge.
    AttachedComplete,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PopulationConfig {
    /// Strategy display names, see [`player_from_name`].
    pub strategies: Vec<String>,
    /// Copies of each strategy in the initial population.
    pub copies: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            strategies: vec!["Cooperator".to_string(), "Defector".to_string()],
            copies: 1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PlayConfig {
    pub turns: usize,
    pub prob_end: Option<f64>,
    pub noise: f64,
    pub game: Game,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            turns: crate::DEFAULT_TURNS,
            prob_end: None,
            noise: 0.0,
            game: Game::default(),
        }
    }
}

/// Mutation and update parameters. Method and mode stay strings here so a
/// bad value is reported by engine construction like any other caller's.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EvolutionConfig {
    pub mutation_rate: f64,
    pub mutation_method: String,
    pub mode: String,
    pub stop_on_fixation: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.0,
            mutation_method: "transition".to_string(),
            mode: "bd".to_string(),
            stop_on_fixation: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct GraphConfig {
    pub kind: GraphKind,
    pub directed: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub seed: Option<u64>,
    /// Step limit for runs that cannot play to completion.
    pub max_generations: usize,
    /// Sample match outcomes from a prebuilt cache instead of playing them.
    pub approximate: bool,
    /// Matches recorded per pairing when building the outcome cache.
    pub samples: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_generations: 1000,
            approximate: false,
            samples: 100,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct MoranConfig {
    pub population: PopulationConfig,
    pub play: PlayConfig,
    pub evolution: EvolutionConfig,
    pub graph: GraphConfig,
    pub run: RunConfig,
}

impl MoranConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.population.strategies.is_empty(),
            "At least one strategy is required"
        );
        anyhow::ensure!(self.population.copies > 0, "Copies must be positive");
        anyhow::ensure!(
            self.population_size() <= 10000,
            "Population too large (max 10000)"
        );

        anyhow::ensure!(
            self.play.noise >= 0.0 && self.play.noise <= 1.0,
            "Noise must be in [0.0, 1.0]"
        );
        if let Some(p) = self.play.prob_end {
            anyhow::ensure!(
                (0.0..=1.0).contains(&p),
                "Probability of ending must be in [0.0, 1.0]"
            );
        }

        anyhow::ensure!(
            self.evolution.mutation_rate >= 0.0 && self.evolution.mutation_rate <= 1.0,
            "Mutation rate must be in [0.0, 1.0]"
        );
        self.evolution.mutation_method.parse::<MutationMethod>()?;
        self.evolution.mode.parse::<UpdateMode>()?;

        if self.graph.kind == GraphKind::AttachedComplete {
            anyhow::ensure!(
                self.population_size() % 2 == 0,
                "Attached complete graphs need an even population"
            );
        }

        if self.run.approximate {
            anyhow::ensure!(self.run.samples > 0, "Samples must be positive");
        }
        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population.strategies.len() * self.population.copies
    }

    /// Initial players, each strategy repeated `copies` times in order.
    pub fn build_players(&self) -> Result<Vec<Box<dyn Player>>> {
        let mut players = Vec::with_capacity(self.population_size());
        for name in &self.population.strategies {
            let template = player_from_name(name)?;
            for _ in 0..self.population.copies {
                players.push(template.clone_box());
            }
        }
        Ok(players)
    }

    #[must_use]
    pub fn build_graph(&self) -> Graph {
        let n = self.population_size();
        match self.graph.kind {
            GraphKind::Complete => graph::complete_graph(n, false),
            GraphKind::Cycle => graph::cycle(n, self.graph.directed),
            GraphKind::AttachedComplete => graph::attached_complete_graphs(n / 2, false),
        }
    }

    #[must_use]
    pub fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            turns: self.play.turns,
            prob_end: self.play.prob_end,
            noise: self.play.noise,
            game: self.play.game,
        }
    }

    /// Engine options for a graph-based run.
    pub fn options(&self) -> Result<MoranOptions> {
        Ok(MoranOptions {
            match_settings: self.match_settings(),
            mutation_rate: self.evolution.mutation_rate,
            mutation_method: self.evolution.mutation_method.parse()?,
            mode: self.evolution.mode.parse()?,
            interaction_graph: Some(self.build_graph()),
            stop_on_fixation: self.evolution.stop_on_fixation,
            seed: self.run.seed,
            ..Default::default()
        })
    }

    /// Engine-relevant settings hashed, so runs can be matched to their
    /// parameters.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.population).as_bytes());
        hasher.update(format!("{:?}", self.play).as_bytes());
        hasher.update(format!("{:?}", self.evolution).as_bytes());
        hasher.update(format!("{:?}", self.graph).as_bytes());
        hasher.update(format!("{:?}", self.run.seed).as_bytes());
        hex::encode(hasher.finalize())
    }
}
