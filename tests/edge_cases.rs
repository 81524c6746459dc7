mod common;

use common::ProcessBuilder;
use moran_lib::model::graph::{complete_graph, cycle, Graph};
use moran_lib::model::player::{Cooperator, Defector, EvolvableCycler};
use moran_lib::model::{Generation, MoranError, MutationMethod};

#[test]
fn test_play_with_mutation_fails_before_stepping() {
    let mut process = ProcessBuilder::new()
        .with_strategy("Cooperator", 2)
        .with_strategy("Defector", 2)
        .with_mutation(0.1, MutationMethod::Transition)
        .with_seed(1)
        .build();
    let digest = process.history().digest();
    assert!(matches!(
        process.play(),
        Err(MoranError::InvalidConfiguration(_))
    ));
    assert_eq!(process.len(), 1);
    assert_eq!(process.history().digest(), digest);
}

#[test]
fn test_play_without_stop_on_fixation_fails() {
    let mut process = ProcessBuilder::new()
        .with_strategy("Cooperator", 2)
        .with_strategy("Defector", 2)
        .without_stop_on_fixation()
        .build();
    assert!(matches!(
        process.play(),
        Err(MoranError::InvalidConfiguration(_))
    ));
    assert!(process.score_history().is_empty());
}

#[test]
fn test_reset_restores_construction_state() {
    let mut process = ProcessBuilder::new()
        .with_strategy("Tit For Tat", 2)
        .with_strategy("Defector", 2)
        .with_seed(6)
        .build();
    let initial = process.populations().to_vec();
    process.play().unwrap();
    assert!(process.len() > 1);

    process.reset();
    assert_eq!(process.populations(), initial.as_slice());
    assert!(process.score_history().is_empty());
    assert!(!process.fixated());
    assert_eq!(process.winning_strategy_name(), None);
    assert_eq!(process.metrics().generation_count(), 0);
}

#[test]
fn test_atomic_mutation_of_fixed_strategy_aborts_step() {
    let mut process = ProcessBuilder::new()
        .with_player(Box::new(Cooperator))
        .with_player(Box::new(Defector))
        .with_mutation(0.0, MutationMethod::Atomic)
        .with_seed(2)
        .build();
    assert!(matches!(
        process.step(),
        Err(MoranError::IncompatibleAgent(_))
    ));
    assert_eq!(process.len(), 1);
    assert!(process.score_history().is_empty());
    // A failed step can be retried and fails the same way.
    assert!(matches!(
        process.step(),
        Err(MoranError::IncompatibleAgent(_))
    ));
}

#[test]
fn test_atomic_mutation_changes_evolvable_names() {
    let mut builder = ProcessBuilder::new()
        .with_mutation(0.0, MutationMethod::Atomic)
        .without_stop_on_fixation()
        .with_seed(13);
    for genes in ["CC", "DD", "CD"] {
        let cycler = EvolvableCycler::from_cycle_str(genes, None)
            .unwrap()
            .with_gene_flip_probability(0.5);
        builder = builder.with_player(Box::new(cycler));
    }
    let mut process = builder.build();
    for _ in 0..60 {
        assert_eq!(process.step().unwrap(), Generation::Advanced);
    }
    assert!(process.metrics().mutation_count() >= 60);
    assert!(process
        .populations()
        .iter()
        .flat_map(|d| d.keys())
        .all(|name| name.starts_with("EvolvableCycler: ")));
}

#[test]
fn test_mismatched_graphs_rejected() {
    let err = ProcessBuilder::new()
        .with_strategy("Cooperator", 2)
        .with_strategy("Defector", 2)
        .with_interaction_graph(cycle(4, false))
        .with_reproduction_graph(Graph::new([(0, 1), (1, 2), (2, 7)], false))
        .build_err();
    assert!(matches!(err, MoranError::InvalidConfiguration(_)));
}

#[test]
fn test_directed_graph_without_outbound_edge_rejected_in_birth_death() {
    let graph = Graph::with_vertices(0..3, [(0, 1), (1, 2)], true);
    let err = ProcessBuilder::new()
        .with_strategy("Cooperator", 2)
        .with_strategy("Defector", 1)
        .with_interaction_graph(graph.clone())
        .with_reproduction_graph(graph)
        .build_err();
    assert!(matches!(err, MoranError::InvalidConfiguration(_)));
}

#[test]
fn test_out_of_range_noise_rejected() {
    let err = ProcessBuilder::new()
        .with_strategy("Cooperator", 2)
        .with_noise(1.5)
        .build_err();
    assert!(matches!(err, MoranError::InvalidConfiguration(_)));
}

#[test]
fn test_transition_without_other_types_clones() {
    let mut process = ProcessBuilder::new()
        .with_strategy("Grudger", 3)
        .with_mutation(1.0, MutationMethod::Transition)
        .without_stop_on_fixation()
        .with_seed(21)
        .build();
    for _ in 0..20 {
        process.step().unwrap();
    }
    assert!(process
        .populations()
        .iter()
        .all(|d| d.get("Grudger") == Some(&3)));
}

#[test]
fn test_interaction_loops_play_self_matches() {
    let mut process = ProcessBuilder::new()
        .with_player(Box::new(Cooperator))
        .with_player(Box::new(Defector))
        .with_interaction_graph(complete_graph(2, true))
        .with_seed(5)
        .build();
    assert_eq!(
        process.pending_matchups().into_iter().collect::<Vec<_>>(),
        vec![(0, 0), (0, 1), (1, 1)]
    );
    process.step().unwrap();
    // Self-matches credit both sides to the same agent: 3 + 3 for the
    // cooperator, 1 + 1 plus 5 from exploiting it for the defector.
    assert_eq!(process.score_history()[0], vec![6.0, 7.0]);
}
