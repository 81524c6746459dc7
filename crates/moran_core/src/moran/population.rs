//! Population slots, strategy identity tags and the mutation-target table.

use crate::player::Player;
use moran_data::PopulationDistribution;
use std::collections::{BTreeMap, BTreeSet};

/// A living population member: the player plus its strategy identity tag.
///
/// The tag is the player's display name captured when the agent was
/// installed. Two agents with equal tags are the same strategy type even
/// though they are distinct objects.
#[derive(Debug, Clone)]
pub struct Agent {
    name: String,
    player: Box<dyn Player>,
}

impl Agent {
    #[must_use]
    pub fn new(player: Box<dyn Player>) -> Self {
        Self {
            name: player.name(),
            player,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn player(&self) -> &dyn Player {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> &mut dyn Player {
        self.player.as_mut()
    }

    /// A fresh copy in its initial state, carrying the same tag.
    #[must_use]
    pub fn offspring(&self) -> Self {
        let mut player = self.player.clone_box();
        player.reset();
        Self {
            name: self.name.clone(),
            player,
        }
    }
}

/// Fixed-size sequence of slots. `None` marks the slot vacated between a
/// death and the following birth.
#[derive(Debug, Clone, Default)]
pub struct Population {
    slots: Vec<Option<Agent>>,
}

impl Population {
    #[must_use]
    pub fn new(agents: Vec<Agent>) -> Self {
        Self {
            slots: agents.into_iter().map(Some).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Agent> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Agent> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    #[must_use]
    pub fn is_vacant(&self, index: usize) -> bool {
        self.get(index).is_none()
    }

    /// Empties a slot and hands back its previous occupant.
    pub fn vacate(&mut self, index: usize) -> Option<Agent> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Replaces the whole slot.
    pub fn install(&mut self, index: usize, agent: Agent) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(agent);
        }
    }

    /// Puts a previously vacated occupant back (used to roll back a failed step).
    pub fn restore(&mut self, index: usize, agent: Option<Agent>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = agent;
        }
    }

    /// Mutable access to two distinct living slots.
    pub fn pair_mut(&mut self, i: usize, j: usize) -> Option<(&mut Agent, &mut Agent)> {
        if i == j || i >= self.slots.len() || j >= self.slots.len() {
            return None;
        }
        let (lo, hi) = (i.min(j), i.max(j));
        let (left, right) = self.slots.split_at_mut(hi);
        let (a, b) = (left[lo].as_mut()?, right[0].as_mut()?);
        if i < j {
            Some((a, b))
        } else {
            Some((b, a))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.slots.iter().flatten()
    }

    /// Display names per slot, `None` for a vacant slot.
    #[must_use]
    pub fn names(&self) -> Vec<Option<&str>> {
        self.slots
            .iter()
            .map(|slot| slot.as_ref().map(Agent::name))
            .collect()
    }

    /// Counts of each display name among living agents.
    #[must_use]
    pub fn distribution(&self) -> PopulationDistribution {
        let mut counts = PopulationDistribution::new();
        for agent in self.iter() {
            *counts.entry(agent.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// The sole display name among living agents, if there is exactly one.
    #[must_use]
    pub fn fixated_name(&self) -> Option<String> {
        let names: BTreeSet<&str> = self.iter().map(Agent::name).collect();
        if names.len() == 1 {
            names.into_iter().next().map(str::to_string)
        } else {
            None
        }
    }
}

/// For each initial display name, one representative of every other initial
/// display name, sorted by name.
///
/// Built once from deep copies of the initial players; the key set never
/// changes afterwards, whatever happens to the living population.
#[derive(Debug, Clone, Default)]
pub struct MutationTargets {
    targets: BTreeMap<String, Vec<Agent>>,
}

impl MutationTargets {
    #[must_use]
    pub fn build(players: &[Box<dyn Player>]) -> Self {
        // Later players overwrite earlier ones with the same name.
        let mut representatives: BTreeMap<String, Agent> = BTreeMap::new();
        for player in players {
            let agent = Agent::new(player.clone_box());
            representatives.insert(agent.name().to_string(), agent);
        }
        let targets = representatives
            .keys()
            .map(|key| {
                let others = representatives
                    .iter()
                    .filter(|(name, _)| *name != key)
                    .map(|(_, agent)| agent.clone())
                    .collect();
                (key.clone(), others)
            })
            .collect();
        Self { targets }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Agent]> {
        self.targets.get(name).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
