use moran_core::graph::{complete_graph, cycle};
use moran_core::moran::matchups::matchup_indices;
use moran_core::moran::{fitness_proportionate_selection, Agent, Population};
use moran_core::player::{Cooperator, Player};
use moran_core::random::RandomGenerator;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

fn population(n: usize) -> (Vec<usize>, HashMap<usize, usize>, Population) {
    let locations: Vec<usize> = (0..n).collect();
    let index = locations.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    let agents = (0..n)
        .map(|_| Agent::new(Box::new(Cooperator) as Box<dyn Player>))
        .collect();
    (locations, index, Population::new(agents))
}

proptest! {
    #[test]
    fn test_selection_stays_in_range(
        scores in prop::collection::vec(0.0f64..100.0, 1..40),
        seed in any::<u64>()
    ) {
        let mut rng = RandomGenerator::new(Some(seed));
        let i = fitness_proportionate_selection(&scores, None, &mut rng);
        prop_assert!(i < scores.len());
        if scores.iter().any(|&s| s > 0.0) {
            prop_assert!(scores[i] > 0.0);
        } else {
            prop_assert_eq!(i, 0);
        }
    }

    #[test]
    fn test_lone_positive_score_always_wins(
        n in 1usize..30,
        pick in any::<prop::sample::Index>(),
        score in 0.001f64..1000.0,
        seed in any::<u64>()
    ) {
        let k = pick.index(n);
        let mut scores = vec![0.0; n];
        scores[k] = score;
        let mut rng = RandomGenerator::new(Some(seed));
        for _ in 0..20 {
            prop_assert_eq!(fitness_proportionate_selection(&scores, None, &mut rng), k);
        }
    }

    #[test]
    fn test_matchups_are_unique_unordered_pairs(n in 2usize..25, directed in any::<bool>()) {
        let (locations, index, pop) = population(n);
        for graph in [complete_graph(n, false), cycle(n, directed)] {
            let pairs = matchup_indices(&graph, &locations, &index, &pop, None);
            let unordered: BTreeSet<(usize, usize)> =
                pairs.iter().map(|&(i, j)| (i.min(j), i.max(j))).collect();
            prop_assert_eq!(unordered.len(), pairs.len());
        }
    }

    #[test]
    fn test_matchups_exclude_dead_slot(
        n in 3usize..25,
        pick in any::<prop::sample::Index>(),
        directed in any::<bool>()
    ) {
        let (locations, index, mut pop) = population(n);
        let dead = pick.index(n);
        pop.vacate(dead);
        for graph in [complete_graph(n, false), cycle(n, directed)] {
            let pairs = matchup_indices(&graph, &locations, &index, &pop, Some(dead));
            prop_assert!(pairs.iter().all(|&(i, j)| i != dead && j != dead));
            prop_assert!(!pairs.is_empty());
        }
    }
}
