//! Domain types for battle sessions

mod outcome;
mod pokemon;
mod pokemon_type;
mod stats;
mod status;
mod team;

pub use outcome::BattleOutcome;
pub use pokemon::{HealthBand, life_percent};
pub use pokemon_type::{Effectiveness, Type};
pub use stats::{Stat, describe_boost};
pub use status::{CONFUSED, Status, StatusChange, StatusTick};
pub use team::{TEAM_SIZE, Team};
