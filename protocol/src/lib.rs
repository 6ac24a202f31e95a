use thiserror::Error;

pub mod client;
mod framing;
pub mod server;
mod wire;

pub use client::{AttackSlot, BattleChoice, ClientCommand, ClientMessage};
pub use framing::{FrameBuffer, MAX_FRAME_LEN, frame};
pub use server::{
    BattleCommand, BattleConfiguration, BattleEvent, BattleSetup, ChoiceSet, CommandTag,
    MoveMessage, Perspective, PokemonSnapshot, SentOut, Side, TeamMove, TeamPokemon,
    decode_event,
};

/// A single frame could not be decoded. The stream itself is still usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Empty frame")]
    Empty,

    #[error("Truncated {command} payload: {needed} more byte(s) required")]
    Truncated { command: &'static str, needed: usize },

    #[error("Invalid UTF-8 string in {command} payload")]
    InvalidString { command: &'static str },

    #[error("Invalid player slot: {0}")]
    InvalidPlayer(i8),

    #[error("Unknown client command tag: {0}")]
    UnknownClientCommand(u8),

    #[error("Invalid choice value: {0}")]
    InvalidChoice(i8),
}

/// The length framing of the stream is broken; no further frame can be trusted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("Frame length {length} exceeds maximum of {max}")]
    FrameTooLarge { length: usize, max: usize },
}
