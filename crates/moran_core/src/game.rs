use moran_data::Action;
use serde::{Deserialize, Serialize};

/// Payoff table for a symmetric two-player, two-action game.
///
/// `r` reward for mutual cooperation, `p` punishment for mutual defection,
/// `s` sucker's payoff, `t` temptation to defect.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Game {
    pub r: f64,
    pub p: f64,
    pub s: f64,
    pub t: f64,
}

impl Default for Game {
    /// The standard Prisoner's Dilemma.
    fn default() -> Self {
        Self {
            r: 3.0,
            p: 1.0,
            s: 0.0,
            t: 5.0,
        }
    }
}

impl Game {
    #[must_use]
    pub fn new(r: f64, p: f64, s: f64, t: f64) -> Self {
        Self { r, p, s, t }
    }

    /// Payoffs for one round, row player first.
    #[must_use]
    pub fn score(&self, a: Action, b: Action) -> (f64, f64) {
        match (a, b) {
            (Action::Cooperate, Action::Cooperate) => (self.r, self.r),
            (Action::Defect, Action::Defect) => (self.p, self.p),
            (Action::Cooperate, Action::Defect) => (self.s, self.t),
            (Action::Defect, Action::Cooperate) => (self.t, self.s),
        }
    }
}
