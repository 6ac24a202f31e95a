//! How a battle ended

use rotom_protocol::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Forfeit { by: Side },
    Win { winner: Side },
    Tie,
}

impl BattleOutcome {
    /// Map a wire result code (0 forfeit, 1 win, 2 tie) reported for `side`
    pub fn from_protocol(code: u8, side: Side) -> Option<Self> {
        match code {
            0 => Some(BattleOutcome::Forfeit { by: side }),
            1 => Some(BattleOutcome::Win { winner: side }),
            2 => Some(BattleOutcome::Tie),
            _ => None,
        }
    }

    /// The side that won, if any
    pub fn winner(&self) -> Option<Side> {
        match self {
            BattleOutcome::Forfeit { by } => Some(by.opposite()),
            BattleOutcome::Win { winner } => Some(*winner),
            BattleOutcome::Tie => None,
        }
    }
}
