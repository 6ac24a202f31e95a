//! Battle session tracking for the rotom battle protocol.
//!
//! This crate turns decoded server events into a per-battle model, narration
//! and render hints, and validates the player's decisions before they are sent.
//!
//! # Overview
//!
//! `rotom-battle` sits between `rotom-protocol` (wire format) and the client:
//!
//! ```text
//! rotom-protocol (wire format)
//!        │
//!        ▼
//! rotom-battle (session model + interpreter + choices) ← THIS CRATE
//!        │
//!        └─> rotom-client (transport and handler dispatch)
//! ```
//!
//! # Main Types
//!
//! - [`BattleSession`] - what one participant knows about a battle
//! - [`Applied`] / [`RenderHint`] - output of applying one event
//! - [`Narration`] - log lines with emphasis metadata
//! - [`ChoiceRejected`] - why an intent did not become a decision
//! - [`Dex`] / [`StaticDex`] - injected lookup tables
//!
//! # Example Usage
//!
//! ```ignore
//! use rotom_battle::{BattleSession, StaticDex};
//! use rotom_protocol::decode_event;
//!
//! let dex = StaticDex::new().with_move(85, "Thunderbolt", Type::Electric);
//! let mut session = BattleSession::from_setup(setup);
//!
//! let event = decode_event(&frame, session.perspective())?;
//! for line in session.apply(&event, &dex).narration {
//!     println!("{line}");
//! }
//!
//! if session.is_armed() {
//!     let choice = session.attempt_default_attack()?;
//! }
//! ```

pub mod dex;
pub mod narration;
pub mod tracking;
pub mod types;

pub use dex::{Dex, StaticDex};
pub use narration::{Emphasis, Narration, Span};
pub use tracking::{
    Applied, BattleSession, ChoiceAvailability, ChoiceRejected, PLACEHOLDER_NICK, RenderHint,
};
pub use types::{
    BattleOutcome, Effectiveness, HealthBand, Stat, Status, StatusChange, StatusTick, TEAM_SIZE,
    Team, Type,
};

// Re-export commonly used protocol types
pub use rotom_protocol::{BattleChoice, BattleEvent, ChoiceSet, Side};
