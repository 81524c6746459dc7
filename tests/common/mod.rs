pub mod macros;

use moran_lib::model::graph::Graph;
use moran_lib::model::interaction::MatchSettings;
use moran_lib::model::player::{player_from_name, Player};
use moran_lib::model::{MoranOptions, MoranProcess, MutationMethod, UpdateMode};

#[allow(dead_code)]
pub struct ProcessBuilder {
    players: Vec<Box<dyn Player>>,
    options: MoranOptions,
}

#[allow(dead_code)]
impl ProcessBuilder {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            options: MoranOptions {
                match_settings: MatchSettings {
                    turns: 10,
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.options.seed = Some(seed);
        self
    }

    /// Adds `copies` agents of the named strategy.
    pub fn with_strategy(mut self, name: &str, copies: usize) -> Self {
        let template = player_from_name(name).expect("unknown strategy in test builder");
        for _ in 0..copies {
            self.players.push(template.clone_box());
        }
        self
    }

    pub fn with_player(mut self, player: Box<dyn Player>) -> Self {
        self.players.push(player);
        self
    }

    pub fn with_turns(mut self, turns: usize) -> Self {
        self.options.match_settings.turns = turns;
        self
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.options.match_settings.noise = noise;
        self
    }

    pub fn with_mutation(mut self, rate: f64, method: MutationMethod) -> Self {
        self.options.mutation_rate = rate;
        self.options.mutation_method = method;
        self
    }

    pub fn death_birth(mut self) -> Self {
        self.options.mode = UpdateMode::DeathBirth;
        self
    }

    pub fn with_interaction_graph(mut self, graph: Graph) -> Self {
        self.options.interaction_graph = Some(graph);
        self
    }

    pub fn with_reproduction_graph(mut self, graph: Graph) -> Self {
        self.options.reproduction_graph = Some(graph);
        self
    }

    pub fn without_stop_on_fixation(mut self) -> Self {
        self.options.stop_on_fixation = false;
        self
    }

    pub fn with_options<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut MoranOptions),
    {
        modifier(&mut self.options);
        self
    }

    pub fn players(&self) -> Vec<Box<dyn Player>> {
        self.players.clone()
    }

    pub fn build_err(self) -> moran_lib::model::MoranError {
        match MoranProcess::new(self.players, self.options) {
            Ok(_) => panic!("expected construction to fail"),
            Err(e) => e,
        }
    }

    pub fn build(self) -> MoranProcess {
        MoranProcess::new(self.players, self.options).expect("Failed to create process in test builder")
    }
}
