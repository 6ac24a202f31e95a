//! Elemental types and effectiveness tiers

/// Elemental types, numbered as on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Type {
    Normal = 0,
    Fighting = 1,
    Flying = 2,
    Poison = 3,
    Ground = 4,
    Rock = 5,
    Bug = 6,
    Ghost = 7,
    Steel = 8,
    Fire = 9,
    Water = 10,
    Grass = 11,
    Electric = 12,
    Psychic = 13,
    Ice = 14,
    Dragon = 15,
    Dark = 16,
    /// Typeless moves such as Curse
    Mystery = 17,
}

impl Type {
    pub const ALL: [Type; 18] = [
        Type::Normal,
        Type::Fighting,
        Type::Flying,
        Type::Poison,
        Type::Ground,
        Type::Rock,
        Type::Bug,
        Type::Ghost,
        Type::Steel,
        Type::Fire,
        Type::Water,
        Type::Grass,
        Type::Electric,
        Type::Psychic,
        Type::Ice,
        Type::Dragon,
        Type::Dark,
        Type::Mystery,
    ];

    /// Parse a wire type id
    pub fn from_protocol(id: i8) -> Option<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Type::Normal => "Normal",
            Type::Fighting => "Fighting",
            Type::Flying => "Flying",
            Type::Poison => "Poison",
            Type::Ground => "Ground",
            Type::Rock => "Rock",
            Type::Bug => "Bug",
            Type::Ghost => "Ghost",
            Type::Steel => "Steel",
            Type::Fire => "Fire",
            Type::Water => "Water",
            Type::Grass => "Grass",
            Type::Electric => "Electric",
            Type::Psychic => "Psychic",
            Type::Ice => "Ice",
            Type::Dragon => "Dragon",
            Type::Dark => "Dark",
            Type::Mystery => "???",
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Effectiveness tier announced after a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effectiveness {
    NoEffect,
    NotVeryEffective,
    SuperEffective,
}

impl Effectiveness {
    /// Map the raw wire magnitude (0, 1-2 reduced, 8/16 super).
    /// Neutral hits (4) and unknown codes have no tier.
    pub fn from_protocol(code: u8) -> Option<Self> {
        match code {
            0 => Some(Effectiveness::NoEffect),
            1 | 2 => Some(Effectiveness::NotVeryEffective),
            8 | 16 => Some(Effectiveness::SuperEffective),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Effectiveness::NoEffect => "It had no effect!",
            Effectiveness::NotVeryEffective => "It's not very effective...",
            Effectiveness::SuperEffective => "It's super effective!",
        }
    }
}
