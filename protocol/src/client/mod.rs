//! Messages the client sends to the server

use serde::{Deserialize, Serialize};

use crate::DecodeError;
use crate::wire::{Reader, Writer};

/// Wire value of the fallback attack
const STRUGGLE: i8 = -1;

/// Outbound command tag byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ClientCommand {
    Attack = 0,
    Switch = 1,
    Chat = 2,
    Forfeit = 3,
}

impl ClientCommand {
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(ClientCommand::Attack),
            1 => Some(ClientCommand::Switch),
            2 => Some(ClientCommand::Chat),
            3 => Some(ClientCommand::Forfeit),
            _ => None,
        }
    }
}

/// Attack selection: one of the four move slots, or the forced fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackSlot {
    Slot(u8),
    Struggle,
}

impl AttackSlot {
    fn to_wire(self) -> i8 {
        match self {
            AttackSlot::Slot(slot) => slot as i8,
            AttackSlot::Struggle => STRUGGLE,
        }
    }

    fn from_wire(value: i8) -> Result<Self, DecodeError> {
        match value {
            STRUGGLE => Ok(AttackSlot::Struggle),
            0..=3 => Ok(AttackSlot::Slot(value as u8)),
            _ => Err(DecodeError::InvalidChoice(value)),
        }
    }
}

/// A player decision for the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleChoice {
    Attack(AttackSlot),
    /// Team slot to bring in
    Switch(u8),
}

/// Everything the client can put on the wire during a battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientMessage {
    Choice(BattleChoice),
    Chat(String),
    Forfeit,
}

impl ClientMessage {
    pub fn command(&self) -> ClientCommand {
        match self {
            ClientMessage::Choice(BattleChoice::Attack(_)) => ClientCommand::Attack,
            ClientMessage::Choice(BattleChoice::Switch(_)) => ClientCommand::Switch,
            ClientMessage::Chat(_) => ClientCommand::Chat,
            ClientMessage::Forfeit => ClientCommand::Forfeit,
        }
    }

    /// Serialize to wire format: `[tag][payload]`
    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.u8(self.command() as u8);

        match self {
            ClientMessage::Choice(BattleChoice::Attack(slot)) => {
                w.i8(slot.to_wire());
            }
            ClientMessage::Choice(BattleChoice::Switch(slot)) => {
                w.i8(*slot as i8);
            }
            ClientMessage::Chat(message) => {
                w.string(message);
            }
            ClientMessage::Forfeit => {}
        }

        w.finish()
    }

    /// Parse a frame produced by [`ClientMessage::encode`]
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (&tag, payload) = bytes.split_first().ok_or(DecodeError::Empty)?;
        let command = ClientCommand::from_u8(tag).ok_or(DecodeError::UnknownClientCommand(tag))?;

        let message = match command {
            ClientCommand::Attack => {
                let mut r = Reader::new(payload, "Attack");
                ClientMessage::Choice(BattleChoice::Attack(AttackSlot::from_wire(r.i8()?)?))
            }
            ClientCommand::Switch => {
                let mut r = Reader::new(payload, "Switch");
                let slot = r.i8()?;
                if !(0..6).contains(&slot) {
                    return Err(DecodeError::InvalidChoice(slot));
                }
                ClientMessage::Choice(BattleChoice::Switch(slot as u8))
            }
            ClientCommand::Chat => {
                let mut r = Reader::new(payload, "Chat");
                ClientMessage::Chat(r.string()?)
            }
            ClientCommand::Forfeit => ClientMessage::Forfeit,
        };

        Ok(message)
    }
}

impl From<BattleChoice> for ClientMessage {
    fn from(choice: BattleChoice) -> Self {
        ClientMessage::Choice(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_wire_format() {
        let msg = ClientMessage::Choice(BattleChoice::Attack(AttackSlot::Slot(2)));
        let bytes = msg.encode();

        assert_eq!(bytes, vec![0, 2]);
        assert_eq!(ClientMessage::decode(&bytes).unwrap(), msg);
    }

    #[test]
    fn test_struggle_wire_format() {
        let msg = ClientMessage::Choice(BattleChoice::Attack(AttackSlot::Struggle));
        assert_eq!(msg.encode(), vec![0, 0xFF]);
    }

    #[test]
    fn test_switch_wire_format() {
        let msg = ClientMessage::from(BattleChoice::Switch(4));
        assert_eq!(msg.encode(), vec![1, 4]);
    }

    #[test]
    fn test_chat_wire_format() {
        let msg = ClientMessage::Chat("hi".to_string());
        let bytes = msg.encode();

        assert_eq!(bytes, vec![2, 0, 0, 0, 2, b'h', b'i']);
        assert_eq!(ClientMessage::decode(&bytes).unwrap(), msg);
    }

    #[test]
    fn test_forfeit_has_no_payload() {
        assert_eq!(ClientMessage::Forfeit.encode(), vec![3]);
    }

    #[test]
    fn test_decode_rejects_bad_values() {
        assert_eq!(
            ClientMessage::decode(&[0, 7]),
            Err(DecodeError::InvalidChoice(7))
        );
        assert_eq!(
            ClientMessage::decode(&[1, 6]),
            Err(DecodeError::InvalidChoice(6))
        );
        assert_eq!(
            ClientMessage::decode(&[9]),
            Err(DecodeError::UnknownClientCommand(9))
        );
        assert_eq!(ClientMessage::decode(&[]), Err(DecodeError::Empty));
    }
}
