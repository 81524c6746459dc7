//! # Moran Core
//!
//! Evolutionary dynamics of repeated-game strategies in a finite population.
//!
//! This crate contains the simulation logic, including:
//! - The Moran process engine with birth-death and death-birth updates
//! - Transition and atomic mutation
//! - Interaction and reproduction graphs
//! - Seeded match play with a memo of deterministic outcomes
//! - An approximate engine that samples scores from recorded outcomes
//! - Metrics collection and structured logging
//!
//! ## Determinism
//!
//! Every random decision is drawn from a seeded `ChaCha8Rng`. Two engines
//! built from the same players, options and seed produce identical
//! population and score histories.
//!
//! ## Example
//!
//! ```
//! use moran_core::moran::{MoranOptions, MoranProcess};
//! use moran_core::player::{Cooperator, Defector, Player};
//!
//! let players: Vec<Box<dyn Player>> = vec![
//!     Box::new(Cooperator),
//!     Box::new(Cooperator),
//!     Box::new(Defector),
//! ];
//! let options = MoranOptions {
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let mut process = MoranProcess::new(players, options).unwrap();
//! process.play().unwrap();
//! assert!(process.winning_strategy_name().is_some());
//! ```

/// Typed configuration loaded from `moran.toml`
pub mod config;
/// Error types and result alias
pub mod error;
/// Two-player payoff matrix
pub mod game;
/// Directed and undirected graphs over population locations
pub mod graph;
/// Population and score histories
pub mod history;
/// Seeded match play and the deterministic outcome memo
pub mod interaction;
/// Performance metrics collection and logging
pub mod metrics;
/// The Moran process engines
pub mod moran;
/// Outcome distributions for approximate runs
pub mod outcome;
/// Strategies and the evolvable capability
pub mod player;
/// Seeded random streams
pub mod random;

/// Match length when none is configured.
pub const DEFAULT_TURNS: usize = 200;

pub use config::{MoranConfig, MutationMethod, UpdateMode};
pub use error::{MoranError, Result};
pub use history::History;
pub use metrics::{init_logging, init_logging_with_filter, Metrics};
pub use moran::{ApproximateMoranProcess, Generation, MoranOptions, MoranProcess};
pub use moran_data::{Action, PopulationDistribution};
