use super::population::Population;
use crate::graph::Graph;
use std::collections::{BTreeSet, HashMap};

/// Unordered index pairs to be played this generation.
///
/// With `dead` set (death-birth), only the interaction neighbors of the dead
/// slot's vertex act as sources; otherwise every vertex does. Sources pair
/// with all of their own neighbors, so on sparse graphs agents two hops from
/// the dead slot are scored and can reproduce into it. Pairs touching
/// a vacant slot are skipped, and each unordered pair appears once, stored
/// in the orientation first encountered. The set is ordered, which fixes the
/// order in which match seeds are drawn.
pub fn matchup_indices(
    graph: &Graph,
    locations: &[usize],
    index: &HashMap<usize, usize>,
    population: &Population,
    dead: Option<usize>,
) -> BTreeSet<(usize, usize)> {
    let sources = match dead {
        Some(d) => locations
            .get(d)
            .map(|&vertex| graph.out_vertices(vertex))
            .unwrap_or_default(),
        None => locations.to_vec(),
    };

    let mut pairs = BTreeSet::new();
    for source in sources {
        let Some(&i) = index.get(&source) else {
            continue;
        };
        for target in graph.out_vertices(source) {
            let Some(&j) = index.get(&target) else {
                continue;
            };
            if population.is_vacant(i) || population.is_vacant(j) {
                continue;
            }
            if pairs.contains(&(i, j)) || pairs.contains(&(j, i)) {
                continue;
            }
            pairs.insert((i, j));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{complete_graph, cycle};
    use crate::moran::population::Agent;
    use crate::player::{Cooperator, Player};

    fn setup(n: usize) -> (Vec<usize>, HashMap<usize, usize>, Population) {
        let locations: Vec<usize> = (0..n).collect();
        let index = locations.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let agents = (0..n)
            .map(|_| Agent::new(Box::new(Cooperator) as Box<dyn Player>))
            .collect();
        (locations, index, Population::new(agents))
    }

    #[test]
    fn test_complete_graph_pairs_each_once() {
        let g = complete_graph(4, false);
        let (locations, index, pop) = setup(4);
        let pairs = matchup_indices(&g, &locations, &index, &pop, None);
        assert_eq!(pairs.len(), 6);
        for &(i, j) in &pairs {
            assert!(!pairs.contains(&(j, i)));
        }
    }

    #[test]
    fn test_death_birth_restricts_to_neighbors_and_skips_dead() {
        let g = cycle(5, false);
        let (locations, index, mut pop) = setup(5);
        pop.vacate(0);
        let pairs = matchup_indices(&g, &locations, &index, &pop, Some(0));
        // Sources 1 and 4 play their living neighbors 2 and 3.
        assert_eq!(pairs.into_iter().collect::<Vec<_>>(), vec![(1, 2), (4, 3)]);
    }

    #[test]
    fn test_self_loops_produce_self_pairs() {
        let g = complete_graph(2, true);
        let (locations, index, pop) = setup(2);
        let pairs = matchup_indices(&g, &locations, &index, &pop, None);
        assert_eq!(
            pairs.into_iter().collect::<Vec<_>>(),
            vec![(0, 0), (0, 1), (1, 1)]
        );
    }
}
