use super::Player;
use crate::random::RandomGenerator;
use moran_data::Action;

#[derive(Debug, Clone, Copy, Default)]
pub struct Cooperator;

impl Player for Cooperator {
    fn name(&self) -> String {
        "Cooperator".to_string()
    }

    fn strategy(&mut self, _own: &[Action], _opponent: &[Action]) -> Action {
        Action::Cooperate
    }

    fn clone_box(&self) -> Box<dyn Player> {
        Box::new(*self)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Defector;

impl Player for Defector {
    fn name(&self) -> String {
        "Defector".to_string()
    }

    fn strategy(&mut self, _own: &[Action], _opponent: &[Action]) -> Action {
        Action::Defect
    }

    fn clone_box(&self) -> Box<dyn Player> {
        Box::new(*self)
    }
}

/// Cooperates first, then copies the opponent's previous move.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitForTat;

impl Player for TitForTat {
    fn name(&self) -> String {
        "Tit For Tat".to_string()
    }

    fn strategy(&mut self, _own: &[Action], opponent: &[Action]) -> Action {
        opponent.last().copied().unwrap_or(Action::Cooperate)
    }

    fn clone_box(&self) -> Box<dyn Player> {
        Box::new(*self)
    }
}

/// Cooperates until the opponent defects once, then defects forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grudger;

impl Player for Grudger {
    fn name(&self) -> String {
        "Grudger".to_string()
    }

    fn strategy(&mut self, _own: &[Action], opponent: &[Action]) -> Action {
        if opponent.contains(&Action::Defect) {
            Action::Defect
        } else {
            Action::Cooperate
        }
    }

    fn clone_box(&self) -> Box<dyn Player> {
        Box::new(*self)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Alternator;

impl Player for Alternator {
    fn name(&self) -> String {
        "Alternator".to_string()
    }

    fn strategy(&mut self, own: &[Action], _opponent: &[Action]) -> Action {
        match own.last() {
            Some(Action::Cooperate) => Action::Defect,
            _ => Action::Cooperate,
        }
    }

    fn clone_box(&self) -> Box<dyn Player> {
        Box::new(*self)
    }
}

/// Cooperates with probability `p`.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    p: f64,
    rng: RandomGenerator,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(p: f64) -> Self {
        Self {
            p: p.clamp(0.0, 1.0),
            rng: RandomGenerator::new(Some(0)),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> String {
        format!("Random: {}", self.p)
    }

    fn strategy(&mut self, _own: &[Action], _opponent: &[Action]) -> Action {
        // Degenerate probabilities consume no draws.
        if self.p <= 0.0 {
            Action::Defect
        } else if self.p >= 1.0 {
            Action::Cooperate
        } else if self.rng.chance(self.p) {
            Action::Cooperate
        } else {
            Action::Defect
        }
    }

    fn clone_box(&self) -> Box<dyn Player> {
        Box::new(self.clone())
    }

    fn set_seed(&mut self, seed: u64) {
        self.rng = RandomGenerator::new(Some(seed));
    }

    fn is_stochastic(&self) -> bool {
        self.p > 0.0 && self.p < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moran_data::Action::{Cooperate as C, Defect as D};

    #[test]
    fn test_tit_for_tat_mirrors() {
        let mut tft = TitForTat;
        assert_eq!(tft.strategy(&[], &[]), C);
        assert_eq!(tft.strategy(&[C], &[D]), D);
        assert_eq!(tft.strategy(&[C, D], &[D, C]), C);
    }

    #[test]
    fn test_grudger_never_forgives() {
        let mut grudger = Grudger;
        assert_eq!(grudger.strategy(&[C], &[C]), C);
        assert_eq!(grudger.strategy(&[C, C, C], &[C, D, C]), D);
    }

    #[test]
    fn test_alternator() {
        let mut alt = Alternator;
        assert_eq!(alt.strategy(&[], &[]), C);
        assert_eq!(alt.strategy(&[C], &[C]), D);
        assert_eq!(alt.strategy(&[C, D], &[C, C]), C);
    }

    #[test]
    fn test_random_player_seeded_reproducibly() {
        let mut a = RandomPlayer::new(0.5);
        let mut b = RandomPlayer::new(0.5);
        a.set_seed(99);
        b.set_seed(99);
        let moves_a: Vec<Action> = (0..20).map(|_| a.strategy(&[], &[])).collect();
        let moves_b: Vec<Action> = (0..20).map(|_| b.strategy(&[], &[])).collect();
        assert_eq!(moves_a, moves_b);
        assert!(a.is_stochastic());
    }

    #[test]
    fn test_random_extremes_are_deterministic() {
        let mut always = RandomPlayer::new(1.0);
        assert!(!always.is_stochastic());
        assert_eq!(always.strategy(&[], &[]), C);
        let mut never = RandomPlayer::new(0.0);
        assert_eq!(never.strategy(&[], &[]), D);
    }
}
