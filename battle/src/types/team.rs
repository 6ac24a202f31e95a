//! The local player's team

use rotom_protocol::TeamPokemon;

pub const TEAM_SIZE: usize = 6;

/// Six team slots, fully known to the local player
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    slots: [TeamPokemon; TEAM_SIZE],
}

impl Team {
    pub fn new(slots: [TeamPokemon; TEAM_SIZE]) -> Self {
        Self { slots }
    }

    /// Get a slot; `None` when out of range
    pub fn get(&self, index: usize) -> Option<&TeamPokemon> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TeamPokemon> {
        self.slots.get_mut(index)
    }

    /// Whether the slot holds a pokemon that can still battle
    pub fn is_usable(&self, index: usize) -> bool {
        self.get(index).is_some_and(TeamPokemon::is_alive)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamPokemon> {
        self.slots.iter()
    }
}

impl From<[TeamPokemon; TEAM_SIZE]> for Team {
    fn from(slots: [TeamPokemon; TEAM_SIZE]) -> Self {
        Self::new(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(num: u16, life: u16) -> TeamPokemon {
        TeamPokemon {
            num,
            nick: format!("Poke{num}"),
            total_life_points: 100,
            life_points: life,
            level: 50,
            ..Default::default()
        }
    }

    #[test]
    fn test_usable_slots() {
        let mut slots: [TeamPokemon; TEAM_SIZE] = Default::default();
        slots[0] = member(1, 100);
        slots[1] = member(2, 0);
        let team = Team::new(slots);

        assert!(team.is_usable(0));
        assert!(!team.is_usable(1)); // fainted
        assert!(!team.is_usable(2)); // empty
        assert!(!team.is_usable(6)); // out of range
    }
}
