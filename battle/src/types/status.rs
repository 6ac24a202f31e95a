//! Status conditions and the status messages printed around them

use super::pokemon_type::Type;

/// Wire code announcing confusion instead of a non-volatile status
pub const CONFUSED: i8 = -1;

/// Non-volatile status conditions (persist through switching)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Paralysed,
    Burnt,
    Frozen,
    Asleep,
    Poisoned,
    DeeplyPoisoned,
}

impl Status {
    /// Parse a wire status code (0 = fine, which is no condition)
    pub fn from_protocol(code: i8) -> Option<Self> {
        match code {
            1 => Some(Status::Paralysed),
            2 => Some(Status::Burnt),
            3 => Some(Status::Frozen),
            4 => Some(Status::Asleep),
            5 => Some(Status::Poisoned),
            6 => Some(Status::DeeplyPoisoned),
            _ => None,
        }
    }

    pub fn to_protocol(&self) -> i8 {
        match self {
            Status::Paralysed => 1,
            Status::Burnt => 2,
            Status::Frozen => 3,
            Status::Asleep => 4,
            Status::Poisoned => 5,
            Status::DeeplyPoisoned => 6,
        }
    }

    /// Type whose color the condition is shown in
    pub fn color_type(&self) -> Type {
        match self {
            Status::Paralysed => Type::Electric,
            Status::Burnt => Type::Fire,
            Status::Frozen => Type::Ice,
            Status::Asleep => Type::Psychic,
            Status::Poisoned | Status::DeeplyPoisoned => Type::Poison,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Paralysed => "Paralysis",
            Status::Burnt => "Burn",
            Status::Frozen => "Freeze",
            Status::Asleep => "Sleep",
            Status::Poisoned => "Poison",
            Status::DeeplyPoisoned => "Toxic",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pokemon gained a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusChange {
    Inflicted(Status),
    Confused,
}

impl StatusChange {
    pub fn from_protocol(code: i8) -> Option<Self> {
        if code == CONFUSED {
            return Some(StatusChange::Confused);
        }
        Status::from_protocol(code).map(StatusChange::Inflicted)
    }

    pub fn color_type(&self) -> Type {
        match self {
            StatusChange::Inflicted(status) => status.color_type(),
            StatusChange::Confused => Type::Ghost,
        }
    }

    /// Narration for the pokemon called `nick`
    pub fn message(&self, nick: &str) -> String {
        match self {
            StatusChange::Inflicted(Status::Asleep) => format!("{nick} fell asleep!"),
            StatusChange::Inflicted(Status::Burnt) => format!("{nick} was burned!"),
            StatusChange::Inflicted(Status::Paralysed) => {
                format!("{nick} is paralyzed! It may be unable to move!")
            }
            StatusChange::Inflicted(Status::Poisoned) => format!("{nick} was poisoned!"),
            StatusChange::Inflicted(Status::DeeplyPoisoned) => {
                format!("{nick} was badly poisoned!")
            }
            StatusChange::Inflicted(Status::Frozen) => format!("{nick} was frozen solid!"),
            StatusChange::Confused => format!("{nick} became confused!"),
        }
    }
}

/// Per-turn status effects reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum StatusTick {
    FeelConfusion = 0,
    HurtConfusion = 1,
    FreeConfusion = 2,
    PrevParalysed = 3,
    PrevFrozen = 4,
    FreeFrozen = 5,
    FeelAsleep = 6,
    FreeAsleep = 7,
    HurtBurn = 8,
    HurtPoison = 9,
}

impl StatusTick {
    pub fn from_protocol(code: i8) -> Option<Self> {
        let tick = match code {
            0 => StatusTick::FeelConfusion,
            1 => StatusTick::HurtConfusion,
            2 => StatusTick::FreeConfusion,
            3 => StatusTick::PrevParalysed,
            4 => StatusTick::PrevFrozen,
            5 => StatusTick::FreeFrozen,
            6 => StatusTick::FeelAsleep,
            7 => StatusTick::FreeAsleep,
            8 => StatusTick::HurtBurn,
            9 => StatusTick::HurtPoison,
            _ => return None,
        };
        Some(tick)
    }

    pub fn color_type(&self) -> Type {
        match self {
            StatusTick::FeelConfusion | StatusTick::HurtConfusion => Type::Ghost,
            StatusTick::FreeConfusion | StatusTick::FreeFrozen | StatusTick::FreeAsleep => {
                Type::Dark
            }
            StatusTick::PrevParalysed => Type::Electric,
            StatusTick::PrevFrozen => Type::Ice,
            StatusTick::FeelAsleep => Type::Psychic,
            StatusTick::HurtBurn => Type::Fire,
            StatusTick::HurtPoison => Type::Poison,
        }
    }

    pub fn message(&self, nick: &str) -> String {
        match self {
            StatusTick::FeelConfusion => format!("{nick} is confused!"),
            StatusTick::HurtConfusion => "It hurt itself in its confusion!".to_string(),
            StatusTick::FreeConfusion => format!("{nick} snapped out of its confusion!"),
            StatusTick::PrevParalysed => format!("{nick} is paralyzed! It can't move!"),
            StatusTick::PrevFrozen => format!("{nick} is frozen solid!"),
            StatusTick::FreeFrozen => format!("{nick} was defrosted!"),
            StatusTick::FeelAsleep => format!("{nick} is fast asleep!"),
            StatusTick::FreeAsleep => format!("{nick} woke up!"),
            StatusTick::HurtBurn => format!("{nick} is hurt by its burn!"),
            StatusTick::HurtPoison => format!("{nick} is hurt by poison!"),
        }
    }
}
