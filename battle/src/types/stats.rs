//! Stats as referenced by stat-change events

/// Battle stats, numbered as on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    Speed,
    SpAttack,
    SpDefense,
    Accuracy,
    Evasion,
}

impl Stat {
    pub fn from_protocol(id: i8) -> Option<Self> {
        match id {
            0 => Some(Stat::Hp),
            1 => Some(Stat::Attack),
            2 => Some(Stat::Defense),
            3 => Some(Stat::Speed),
            4 => Some(Stat::SpAttack),
            5 => Some(Stat::SpDefense),
            6 => Some(Stat::Accuracy),
            7 => Some(Stat::Evasion),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Attack => "Attack",
            Stat::Defense => "Defense",
            Stat::Speed => "Speed",
            Stat::SpAttack => "Special Attack",
            Stat::SpDefense => "Special Defense",
            Stat::Accuracy => "Accuracy",
            Stat::Evasion => "Evasion",
        }
    }
}

/// Describe a stat stage change, e.g. "Pikachu's Speed sharply rose!"
pub fn describe_boost(nick: &str, stat: &str, delta: i8) -> String {
    let magnitude = if delta.unsigned_abs() > 1 { "sharply " } else { "" };
    let direction = if delta > 0 { "rose" } else { "fell" };
    format!("{nick}'s {stat} {magnitude}{direction}!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_from_protocol() {
        assert_eq!(Stat::from_protocol(3), Some(Stat::Speed));
        assert_eq!(Stat::from_protocol(8), None);
    }

    #[test]
    fn test_describe_boost() {
        assert_eq!(describe_boost("Pikachu", "Speed", 2), "Pikachu's Speed sharply rose!");
        assert_eq!(describe_boost("Onix", "Defense", -1), "Onix's Defense fell!");
        assert_eq!(describe_boost("Onix", "Defense", -3), "Onix's Defense sharply fell!");
        assert_eq!(describe_boost("Abra", "Evasion", 1), "Abra's Evasion rose!");
    }
}
