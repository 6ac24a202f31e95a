//! Battle state tracking from server events

mod battle;
mod choices;
mod updater;

pub use battle::{BattleSession, PLACEHOLDER_NICK};
pub use choices::{ChoiceAvailability, ChoiceRejected};
pub use updater::{Applied, RenderHint};
