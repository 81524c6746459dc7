//! Strategic agents.
//!
//! The engine only relies on the [`Player`] contract: a display name, a move
//! rule, reset, deep clone and an optional [`Evolvable`] capability. The
//! catalog here is intentionally small.

use crate::error::{MoranError, Result};
use moran_data::Action;
use std::fmt;

pub mod basic;
pub mod evolvable;

pub use basic::{Alternator, Cooperator, Defector, Grudger, RandomPlayer, TitForTat};
pub use evolvable::EvolvableCycler;

/// A strategy that can take part in a repeated game.
pub trait Player: fmt::Debug + Send {
    /// Display name. Equal names mean "same strategy type".
    fn name(&self) -> String;

    /// Chooses the next move given both histories of the current match.
    fn strategy(&mut self, own: &[Action], opponent: &[Action]) -> Action;

    /// Restores the state the player had before its first match.
    fn reset(&mut self) {}

    fn clone_box(&self) -> Box<dyn Player>;

    /// Reseeds any randomness used by [`Player::strategy`].
    fn set_seed(&mut self, _seed: u64) {}

    fn is_stochastic(&self) -> bool {
        false
    }

    /// The mutation capability, for players that have one.
    fn as_evolvable(&self) -> Option<&dyn Evolvable> {
        None
    }

    fn as_evolvable_mut(&mut self) -> Option<&mut dyn Evolvable> {
        None
    }
}

/// Players that carry their own mutation operator.
pub trait Evolvable {
    /// A fresh player with the same parameters and its own seeded stream.
    fn create_new(&self, seed: u64) -> Box<dyn Player>;

    /// A mutated offspring. May return an unchanged copy.
    fn mutate(&mut self) -> Box<dyn Player>;
}

impl Clone for Box<dyn Player> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Builds a catalog player from its display name.
///
/// Accepts the names players report (`"Tit For Tat"`, `"Random: 0.3"`,
/// `"EvolvableCycler: CCD"`) plus a few lowercase aliases.
pub fn player_from_name(name: &str) -> Result<Box<dyn Player>> {
    let trimmed = name.trim();
    let (head, arg) = match trimmed.split_once(':') {
        Some((head, arg)) => (head.trim(), Some(arg.trim())),
        None => (trimmed, None),
    };
    let player: Box<dyn Player> = match head.to_lowercase().as_str() {
        "cooperator" => Box::new(Cooperator),
        "defector" => Box::new(Defector),
        "tit for tat" | "titfortat" | "tft" => Box::new(TitForTat),
        "grudger" => Box::new(Grudger),
        "alternator" => Box::new(Alternator),
        "random" => {
            let p = match arg {
                Some(raw) => raw.parse::<f64>().map_err(|_| {
                    MoranError::invalid_config(format!("bad cooperation probability in {name:?}"))
                })?,
                None => 0.5,
            };
            if !(0.0..=1.0).contains(&p) {
                return Err(MoranError::invalid_config(format!(
                    "cooperation probability must be in [0, 1], got {p}"
                )));
            }
            Box::new(RandomPlayer::new(p))
        }
        "evolvablecycler" => {
            let cycle = arg.unwrap_or("C");
            Box::new(EvolvableCycler::from_cycle_str(cycle, None)?)
        }
        _ => {
            return Err(MoranError::invalid_config(format!(
                "unknown strategy {name:?}"
            )))
        }
    };
    Ok(player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_round_trips_display_names() {
        for name in [
            "Cooperator",
            "Defector",
            "Tit For Tat",
            "Grudger",
            "Alternator",
            "Random: 0.25",
            "EvolvableCycler: CDD",
        ] {
            let player = player_from_name(name).unwrap();
            assert_eq!(player.name(), name);
        }
    }

    #[test]
    fn test_lookup_aliases() {
        assert_eq!(player_from_name("tft").unwrap().name(), "Tit For Tat");
        assert_eq!(player_from_name("random").unwrap().name(), "Random: 0.5");
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert!(matches!(
            player_from_name("Shapley"),
            Err(MoranError::InvalidConfiguration(_))
        ));
        assert!(player_from_name("Random: 2.0").is_err());
        assert!(player_from_name("EvolvableCycler: CXD").is_err());
    }

    #[test]
    fn test_boxed_clone_keeps_name() {
        let player = player_from_name("Grudger").unwrap();
        let copy = player.clone();
        assert_eq!(copy.name(), "Grudger");
    }
}
