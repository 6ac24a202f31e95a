//! Shared types for battle event payloads

use serde::{Deserialize, Serialize};

use crate::DecodeError;
use crate::wire::{Reader, Writer};

/// Which participant an event concerns, relative to the local player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Me,
    Opponent,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Me => Side::Opponent,
            Side::Opponent => Side::Me,
        }
    }

    pub fn is_me(self) -> bool {
        self == Side::Me
    }
}

/// Participant ids for the two wire player slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BattleConfiguration {
    pub ids: [i32; 2],
}

/// Maps wire player slots (0/1) to [`Side`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perspective {
    mine: [bool; 2],
}

impl Perspective {
    /// Slot `n` is ours when `conf.ids[n] == my_id`
    pub fn new(conf: &BattleConfiguration, my_id: i32) -> Self {
        Self {
            mine: [conf.ids[0] == my_id, conf.ids[1] == my_id],
        }
    }

    /// Perspective of whoever plays in the given slot
    pub fn for_slot(slot: u8) -> Self {
        Self {
            mine: [slot == 0, slot == 1],
        }
    }

    /// Resolve a raw wire player byte
    pub fn side(&self, player: i8) -> Result<Side, DecodeError> {
        match player {
            0 | 1 if self.mine[player as usize] => Ok(Side::Me),
            0 | 1 => Ok(Side::Opponent),
            _ => Err(DecodeError::InvalidPlayer(player)),
        }
    }

    /// Wire slot of the local player, if it takes part
    pub fn own_slot(&self) -> Option<u8> {
        self.mine.iter().position(|&m| m).map(|slot| slot as u8)
    }
}

/// What is publicly known about a pokemon sent out by the opponent
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PokemonSnapshot {
    /// Species number (0 = unknown)
    pub num: u16,
    pub nick: String,
    /// Remaining life as a percentage (0-100)
    pub life_percent: u8,
    /// Raw status code
    pub status: i8,
    pub gender: u8,
    pub shiny: bool,
    pub level: u8,
}

impl PokemonSnapshot {
    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            num: r.u16()?,
            nick: r.string()?,
            life_percent: r.u8()?,
            status: r.i8()?,
            gender: r.u8()?,
            shiny: r.bool()?,
            level: r.u8()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        w.u16(self.num)
            .string(&self.nick)
            .u8(self.life_percent)
            .i8(self.status)
            .u8(self.gender)
            .bool(self.shiny)
            .u8(self.level);
    }
}

/// Legal actions for the current turn, as declared by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChoiceSet {
    pub switch_allowed: bool,
    pub attacks_allowed: bool,
    pub attack_allowed: [bool; 4],
}

impl ChoiceSet {
    /// Attacks are allowed but no slot is: the only option is the fallback move
    pub fn is_forced(&self) -> bool {
        self.attacks_allowed && !self.attack_allowed.iter().any(|&allowed| allowed)
    }

    /// Whether the attack in `slot` can be chosen
    pub fn is_attack_allowed(&self, slot: usize) -> bool {
        self.attacks_allowed && self.attack_allowed.get(slot).copied().unwrap_or(false)
    }

    /// First selectable attack slot
    pub fn first_allowed_attack(&self) -> Option<u8> {
        if !self.attacks_allowed {
            return None;
        }
        self.attack_allowed
            .iter()
            .position(|&allowed| allowed)
            .map(|slot| slot as u8)
    }

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let switch_allowed = r.bool()?;
        let attacks_allowed = r.bool()?;
        let mut attack_allowed = [false; 4];
        for allowed in attack_allowed.iter_mut() {
            *allowed = r.bool()?;
        }

        Ok(Self {
            switch_allowed,
            attacks_allowed,
            attack_allowed,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        w.bool(self.switch_allowed).bool(self.attacks_allowed);
        for allowed in self.attack_allowed {
            w.bool(allowed);
        }
    }
}

/// Payload of a send-out, which depends on whose pokemon it is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentOut {
    /// Index into our own team
    Own { slot: u8 },
    /// Newly revealed opponent pokemon
    Foe(PokemonSnapshot),
}

/// Move-specific message reference, resolved against a template table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveMessage {
    pub move_num: u16,
    /// Which of the move's messages to use
    pub part: u8,
    /// Elemental type used for `%t` and for coloring
    pub type_id: i8,
    pub foe: i8,
    /// Auxiliary value: a move number for `%m` or a number for `%d`
    pub other: i16,
    /// Free-text token for `%q`
    pub token: String,
}

impl MoveMessage {
    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            move_num: r.u16()?,
            part: r.u8()?,
            type_id: r.i8()?,
            foe: r.i8()?,
            other: r.i16()?,
            token: r.string()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        w.u16(self.move_num)
            .u8(self.part)
            .i8(self.type_id)
            .i8(self.foe)
            .i16(self.other)
            .string(&self.token);
    }
}
