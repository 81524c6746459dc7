use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts of each strategy display name in one population snapshot.
///
/// A `BTreeMap` keeps iteration and serialization order stable, which the
/// determinism checks rely on.
pub type PopulationDistribution = BTreeMap<String, usize>;

/// One completed generation as exported to disk.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenerationRecord {
    /// Generation number, starting at 1 for the first completed step.
    pub generation: usize,
    /// Per-index scores computed while selecting the reproducer.
    pub scores: Vec<f64>,
    /// Population distribution after the replacement was installed.
    pub distribution: PopulationDistribution,
}

/// Summary of a finished (or interrupted) run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub seed: Option<u64>,
    pub population_size: usize,
    pub generations: usize,
    pub fixated: bool,
    pub winning_strategy_name: Option<String>,
    pub final_distribution: PopulationDistribution,
    /// SHA-256 of the recorded histories, hex encoded.
    pub history_digest: String,
    pub config_fingerprint: String,
    pub timestamp: String,
}

impl RunSummary {
    /// Share of the final population held by the given strategy name.
    #[must_use]
    pub fn final_share(&self, name: &str) -> f64 {
        if self.population_size == 0 {
            return 0.0;
        }
        self.final_distribution.get(name).copied().unwrap_or(0) as f64
            / self.population_size as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_share() {
        let mut final_distribution = PopulationDistribution::new();
        final_distribution.insert("Defector".to_string(), 3);
        final_distribution.insert("Cooperator".to_string(), 1);
        let summary = RunSummary {
            seed: Some(1),
            population_size: 4,
            generations: 10,
            fixated: false,
            winning_strategy_name: None,
            final_distribution,
            history_digest: String::new(),
            config_fingerprint: String::new(),
            timestamp: String::new(),
        };
        assert!((summary.final_share("Defector") - 0.75).abs() < 1e-12);
        assert_eq!(summary.final_share("Grudger"), 0.0);
    }

    #[test]
    fn test_record_json_shape() {
        let record = GenerationRecord {
            generation: 1,
            scores: vec![1.0, 2.0],
            distribution: PopulationDistribution::from([("Cooperator".to_string(), 2)]),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"generation\":1"));
        assert!(json.contains("\"Cooperator\":2"));
    }
}
