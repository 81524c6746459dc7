//! Plain data types shared by the Moran process crates.

pub mod data;

pub use data::action::Action;
pub use data::population::{GenerationRecord, PopulationDistribution, RunSummary};
