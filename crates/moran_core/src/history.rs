use moran_data::{GenerationRecord, PopulationDistribution};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Append-only record of a run: one distribution snapshot at setup plus one
/// per completed generation, and one score vector per completed generation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct History {
    populations: Vec<PopulationDistribution>,
    score_history: Vec<Vec<f64>>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every snapshot and starts again from `initial`.
    pub fn restart(&mut self, initial: PopulationDistribution) {
        self.populations.clear();
        self.populations.push(initial);
    }

    pub fn push_population(&mut self, distribution: PopulationDistribution) {
        self.populations.push(distribution);
    }

    pub fn push_scores(&mut self, scores: Vec<f64>) {
        self.score_history.push(scores);
    }

    /// Drops score vectors beyond `len`. Used to discard a half-finished step.
    pub(crate) fn truncate_scores(&mut self, len: usize) {
        self.score_history.truncate(len);
    }

    pub fn clear_scores(&mut self) {
        self.score_history.clear();
    }

    #[must_use]
    pub fn populations(&self) -> &[PopulationDistribution] {
        &self.populations
    }

    #[must_use]
    pub fn score_history(&self) -> &[Vec<f64>] {
        &self.score_history
    }

    /// Number of completed generations.
    #[must_use]
    pub fn generations(&self) -> usize {
        self.populations.len().saturating_sub(1)
    }

    /// Per-generation records pairing each score vector with the
    /// distribution that followed it.
    #[must_use]
    pub fn records(&self) -> Vec<GenerationRecord> {
        self.score_history
            .iter()
            .zip(self.populations.iter().skip(1))
            .enumerate()
            .map(|(i, (scores, distribution))| GenerationRecord {
                generation: i + 1,
                scores: scores.clone(),
                distribution: distribution.clone(),
            })
            .collect()
    }

    /// Hex SHA-256 over both histories. Equal digests mean bit-identical
    /// trajectories.
    #[must_use]
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for distribution in &self.populations {
            for (name, count) in distribution {
                hasher.update(name.as_bytes());
                hasher.update(count.to_le_bytes());
            }
            hasher.update(b"|");
        }
        for scores in &self.score_history {
            for score in scores {
                hasher.update(score.to_bits().to_le_bytes());
            }
            hasher.update(b"|");
        }
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(pairs: &[(&str, usize)]) -> PopulationDistribution {
        pairs.iter().map(|(n, c)| (n.to_string(), *c)).collect()
    }

    #[test]
    fn test_records_align_scores_with_following_snapshot() {
        let mut history = History::new();
        history.push_population(dist(&[("A", 1), ("B", 1)]));
        history.push_scores(vec![1.0, 2.0]);
        history.push_population(dist(&[("B", 2)]));
        let records = history.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].generation, 1);
        assert_eq!(records[0].distribution, dist(&[("B", 2)]));
        assert_eq!(history.generations(), 1);
    }

    #[test]
    fn test_digest_changes_with_scores() {
        let mut a = History::new();
        a.push_population(dist(&[("A", 2)]));
        let mut b = a.clone();
        assert_eq!(a.digest(), b.digest());
        a.push_scores(vec![1.0, 1.0]);
        b.push_scores(vec![1.0, 1.5]);
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn test_json_field_names() {
        let mut history = History::new();
        history.push_population(dist(&[("A", 2)]));
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["populations"][0]["A"], 2);
        assert!(json["score_history"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_truncate_scores() {
        let mut history = History::new();
        history.push_scores(vec![1.0]);
        history.push_scores(vec![2.0]);
        history.truncate_scores(1);
        assert_eq!(history.score_history(), &[vec![1.0]]);
    }
}
