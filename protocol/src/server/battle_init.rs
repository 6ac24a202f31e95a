//! Battle start payload: participants and the local team snapshot

use serde::{Deserialize, Serialize};

use super::battle::{BattleConfiguration, Perspective};
use crate::DecodeError;
use crate::wire::{Reader, Writer};

/// One move of a team member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamMove {
    /// Move number (0 = empty slot)
    pub num: u16,
    pub pp: u8,
    pub total_pp: u8,
}

impl TeamMove {
    pub fn new(num: u16, total_pp: u8) -> Self {
        Self {
            num,
            pp: total_pp,
            total_pp,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.num == 0
    }
}

/// A member of the local team, fully known
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamPokemon {
    /// Species number (0 = empty slot)
    pub num: u16,
    pub nick: String,
    pub total_life_points: u16,
    pub life_points: u16,
    pub gender: u8,
    pub shiny: bool,
    pub level: u8,
    /// Raw status code
    pub status: i8,
    pub moves: [TeamMove; 4],
}

impl TeamPokemon {
    pub fn is_empty(&self) -> bool {
        self.num == 0
    }

    /// Populated and still standing
    pub fn is_alive(&self) -> bool {
        !self.is_empty() && self.life_points > 0
    }

    fn read(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut poke = Self {
            num: r.u16()?,
            nick: r.string()?,
            total_life_points: r.u16()?,
            life_points: r.u16()?,
            gender: r.u8()?,
            shiny: r.bool()?,
            level: r.u8()?,
            status: r.i8()?,
            moves: Default::default(),
        };

        for slot in poke.moves.iter_mut() {
            *slot = TeamMove {
                num: r.u16()?,
                pp: r.u8()?,
                total_pp: r.u8()?,
            };
        }

        Ok(poke)
    }

    fn write(&self, w: &mut Writer) {
        w.u16(self.num)
            .string(&self.nick)
            .u16(self.total_life_points)
            .u16(self.life_points)
            .u8(self.gender)
            .bool(self.shiny)
            .u8(self.level)
            .i8(self.status);

        for slot in &self.moves {
            w.u16(slot.num).u8(slot.pp).u8(slot.total_pp);
        }
    }
}

/// Everything known when a battle is engaged
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BattleSetup {
    pub configuration: BattleConfiguration,
    pub my_id: i32,
    /// Our display name
    pub me: String,
    /// Opponent display name
    pub opponent: String,
    pub team: [TeamPokemon; 6],
}

impl BattleSetup {
    pub fn perspective(&self) -> Perspective {
        Perspective::new(&self.configuration, self.my_id)
    }

    /// Decode `i32 id0, i32 id1, i32 my_id, string me, string opponent, 6 × pokemon`
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut r = Reader::new(bytes, "BattleSetup");

        let configuration = BattleConfiguration {
            ids: [r.i32()?, r.i32()?],
        };
        let my_id = r.i32()?;
        let me = r.string()?;
        let opponent = r.string()?;

        let mut team: [TeamPokemon; 6] = Default::default();
        for slot in team.iter_mut() {
            *slot = TeamPokemon::read(&mut r)?;
        }

        Ok(Self {
            configuration,
            my_id,
            me,
            opponent,
            team,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.i32(self.configuration.ids[0])
            .i32(self.configuration.ids[1])
            .i32(self.my_id)
            .string(&self.me)
            .string(&self.opponent);

        for poke in &self.team {
            poke.write(&mut w);
        }

        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pikachu() -> TeamPokemon {
        TeamPokemon {
            num: 25,
            nick: "Sparky".to_string(),
            total_life_points: 95,
            life_points: 95,
            gender: 1,
            shiny: true,
            level: 50,
            status: 0,
            moves: [
                TeamMove::new(85, 24),
                TeamMove::new(98, 48),
                TeamMove::default(),
                TeamMove::default(),
            ],
        }
    }

    #[test]
    fn test_decode_setup() {
        let mut setup = BattleSetup {
            configuration: BattleConfiguration { ids: [7, 9] },
            my_id: 9,
            me: "Ash".to_string(),
            opponent: "Gary".to_string(),
            ..Default::default()
        };
        setup.team[0] = pikachu();

        let decoded = BattleSetup::decode(&setup.encode()).unwrap();

        assert_eq!(decoded.team[0].nick, "Sparky");
        assert_eq!(decoded.team[0].moves[1].total_pp, 48);
        assert!(decoded.team[1].is_empty());
        assert_eq!(decoded.perspective().own_slot(), Some(1));
    }

    #[test]
    fn test_decode_truncated_team() {
        let setup = BattleSetup::default();
        let bytes = setup.encode();

        let result = BattleSetup::decode(&bytes[..bytes.len() - 1]);
        assert!(matches!(result, Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn test_alive() {
        let mut poke = pikachu();
        assert!(poke.is_alive());

        poke.life_points = 0;
        assert!(!poke.is_alive());
        assert!(!TeamPokemon::default().is_alive());
    }
}
