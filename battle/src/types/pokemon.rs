//! Life display helpers shared by both sides

use rotom_protocol::TeamPokemon;

/// Coarse life bracket used to color life bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthBand {
    /// Above 50%
    Healthy,
    /// 34% to 50%
    Wounded,
    /// Below 34%
    Critical,
}

impl HealthBand {
    pub fn from_percent(percent: u8) -> Self {
        if percent > 50 {
            HealthBand::Healthy
        } else if percent >= 34 {
            HealthBand::Wounded
        } else {
            HealthBand::Critical
        }
    }
}

/// Remaining life of a team member as a percentage (0-100)
pub fn life_percent(poke: &TeamPokemon) -> u8 {
    if poke.total_life_points == 0 {
        return 0;
    }
    let percent = u32::from(poke.life_points) * 100 / u32::from(poke.total_life_points);
    percent.min(100) as u8
}
