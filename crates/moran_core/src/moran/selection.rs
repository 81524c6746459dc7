use crate::random::RandomGenerator;

/// Maps a raw score to a non-negative selection weight.
pub type FitnessTransformation = std::sync::Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Picks an index with probability proportional to its (transformed) score.
///
/// One uniform draw `u` is scaled by the total weight and the first index
/// whose running sum reaches it is returned. A zero total always yields index
/// 0; runs replayed from the same seed depend on that. When the draw is
/// exactly zero the first positively weighted index wins, so a lone nonzero
/// candidate is chosen for every draw.
pub fn fitness_proportionate_selection(
    scores: &[f64],
    transformation: Option<&FitnessTransformation>,
    rng: &mut RandomGenerator,
) -> usize {
    let mut running = 0.0;
    let csums: Vec<f64> = scores
        .iter()
        .map(|&s| {
            running += transformation.map_or(s, |f| (**f)(s));
            running
        })
        .collect();
    let total = csums.last().copied().unwrap_or(0.0);
    let r = rng.random() * total;

    let found = if total > 0.0 {
        csums.iter().position(|&x| x >= r && x > 0.0)
    } else {
        csums.iter().position(|&x| x >= r)
    };
    found.unwrap_or(scores.len().saturating_sub(1))
}
