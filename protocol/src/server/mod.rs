mod battle;
mod battle_init;

pub use battle::{
    BattleConfiguration, ChoiceSet, MoveMessage, Perspective, PokemonSnapshot, SentOut, Side,
};
pub use battle_init::{BattleSetup, TeamMove, TeamPokemon};

use serde::{Deserialize, Serialize};

use crate::DecodeError;
use crate::wire::{Reader, Writer};

/// Command tag byte leading every inbound frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandTag {
    SendOut = 0,
    SendBack = 1,
    UseAttack = 2,
    OfferChoice = 3,
    BeginTurn = 4,
    ChangePp = 5,
    ChangeHp = 6,
    Ko = 7,
    Effective = 8,
    Miss = 9,
    CriticalHit = 10,
    Hit = 11,
    StatChange = 12,
    StatusChange = 13,
    StatusMessage = 14,
    Failed = 15,
    BattleChat = 16,
    MoveMessage = 17,
    BattleEnd = 18,
}

impl CommandTag {
    pub fn from_u8(tag: u8) -> Option<Self> {
        let tag = match tag {
            0 => CommandTag::SendOut,
            1 => CommandTag::SendBack,
            2 => CommandTag::UseAttack,
            3 => CommandTag::OfferChoice,
            4 => CommandTag::BeginTurn,
            5 => CommandTag::ChangePp,
            6 => CommandTag::ChangeHp,
            7 => CommandTag::Ko,
            8 => CommandTag::Effective,
            9 => CommandTag::Miss,
            10 => CommandTag::CriticalHit,
            11 => CommandTag::Hit,
            12 => CommandTag::StatChange,
            13 => CommandTag::StatusChange,
            14 => CommandTag::StatusMessage,
            15 => CommandTag::Failed,
            16 => CommandTag::BattleChat,
            17 => CommandTag::MoveMessage,
            18 => CommandTag::BattleEnd,
            _ => return None,
        };
        Some(tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandTag::SendOut => "SendOut",
            CommandTag::SendBack => "SendBack",
            CommandTag::UseAttack => "UseAttack",
            CommandTag::OfferChoice => "OfferChoice",
            CommandTag::BeginTurn => "BeginTurn",
            CommandTag::ChangePp => "ChangePP",
            CommandTag::ChangeHp => "ChangeHp",
            CommandTag::Ko => "Ko",
            CommandTag::Effective => "Effective",
            CommandTag::Miss => "Miss",
            CommandTag::CriticalHit => "CriticalHit",
            CommandTag::Hit => "Hit",
            CommandTag::StatChange => "StatChange",
            CommandTag::StatusChange => "StatusChange",
            CommandTag::StatusMessage => "StatusMessage",
            CommandTag::Failed => "Failed",
            CommandTag::BattleChat => "BattleChat",
            CommandTag::MoveMessage => "MoveMessage",
            CommandTag::BattleEnd => "BattleEnd",
        }
    }
}

/// Decoded command payloads.
///
/// Codes (effectiveness, status, stat, result) are kept raw; mapping them to
/// meaning is the battle layer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleCommand {
    SendOut(SentOut),
    SendBack,
    UseAttack { move_num: i16 },
    OfferChoice(ChoiceSet),
    BeginTurn(i32),
    ChangePp { slot: u8, pp: u8 },
    /// Absolute life points for us, a percentage for the opponent
    ChangeHp(u16),
    Ko,
    Effective(u8),
    Miss,
    CriticalHit,
    Hit,
    StatChange { stat: i8, delta: i8 },
    StatusChange(i8),
    StatusMessage(i8),
    Failed,
    BattleChat(String),
    MoveMessage(MoveMessage),
    /// 0 forfeit, 1 win, 2 tie
    BattleEnd(u8),
    /// Tag this client does not know; the payload was skipped
    Unknown(u8),
}

impl BattleCommand {
    pub fn tag(&self) -> Option<CommandTag> {
        let tag = match self {
            BattleCommand::SendOut(_) => CommandTag::SendOut,
            BattleCommand::SendBack => CommandTag::SendBack,
            BattleCommand::UseAttack { .. } => CommandTag::UseAttack,
            BattleCommand::OfferChoice(_) => CommandTag::OfferChoice,
            BattleCommand::BeginTurn(_) => CommandTag::BeginTurn,
            BattleCommand::ChangePp { .. } => CommandTag::ChangePp,
            BattleCommand::ChangeHp(_) => CommandTag::ChangeHp,
            BattleCommand::Ko => CommandTag::Ko,
            BattleCommand::Effective(_) => CommandTag::Effective,
            BattleCommand::Miss => CommandTag::Miss,
            BattleCommand::CriticalHit => CommandTag::CriticalHit,
            BattleCommand::Hit => CommandTag::Hit,
            BattleCommand::StatChange { .. } => CommandTag::StatChange,
            BattleCommand::StatusChange(_) => CommandTag::StatusChange,
            BattleCommand::StatusMessage(_) => CommandTag::StatusMessage,
            BattleCommand::Failed => CommandTag::Failed,
            BattleCommand::BattleChat(_) => CommandTag::BattleChat,
            BattleCommand::MoveMessage(_) => CommandTag::MoveMessage,
            BattleCommand::BattleEnd(_) => CommandTag::BattleEnd,
            BattleCommand::Unknown(_) => return None,
        };
        Some(tag)
    }
}

/// One decoded inbound frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleEvent {
    /// Raw wire player slot (0 or 1)
    pub player: u8,
    /// The slot resolved against the local perspective
    pub side: Side,
    pub command: BattleCommand,
}

impl BattleEvent {
    pub fn new(player: u8, side: Side, command: BattleCommand) -> Self {
        Self {
            player,
            side,
            command,
        }
    }

    pub fn is_self(&self) -> bool {
        self.side.is_me()
    }

    /// Serialize to the inbound wire layout (used by servers and tests)
    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::new();
        let tag = match &self.command {
            BattleCommand::Unknown(tag) => *tag,
            command => command.tag().map_or(u8::MAX, |tag| tag as u8),
        };
        w.u8(tag).i8(self.player as i8);

        match &self.command {
            BattleCommand::SendOut(SentOut::Own { slot }) => {
                w.u8(*slot);
            }
            BattleCommand::SendOut(SentOut::Foe(snapshot)) => snapshot.write(&mut w),
            BattleCommand::UseAttack { move_num } => {
                w.i16(*move_num);
            }
            BattleCommand::OfferChoice(choices) => choices.write(&mut w),
            BattleCommand::BeginTurn(turn) => {
                w.i32(*turn);
            }
            BattleCommand::ChangePp { slot, pp } => {
                w.u8(*slot).u8(*pp);
            }
            BattleCommand::ChangeHp(value) => {
                w.u16(*value);
            }
            BattleCommand::Effective(code) | BattleCommand::BattleEnd(code) => {
                w.u8(*code);
            }
            BattleCommand::StatChange { stat, delta } => {
                w.i8(*stat).i8(*delta);
            }
            BattleCommand::StatusChange(code) | BattleCommand::StatusMessage(code) => {
                w.i8(*code);
            }
            BattleCommand::BattleChat(message) => {
                w.string(message);
            }
            BattleCommand::MoveMessage(message) => message.write(&mut w),
            BattleCommand::SendBack
            | BattleCommand::Ko
            | BattleCommand::Miss
            | BattleCommand::CriticalHit
            | BattleCommand::Hit
            | BattleCommand::Failed
            | BattleCommand::Unknown(_) => {}
        }

        w.finish()
    }
}

/// Decode one inbound frame: `[u8 command][i8 player][payload]`.
///
/// Unknown command tags decode to [`BattleCommand::Unknown`] so that newer
/// servers don't break older clients; their player byte is not validated
/// and an unresolvable one maps to [`Side::Opponent`]. Trailing bytes are
/// ignored.
pub fn decode_event(frame: &[u8], perspective: &Perspective) -> Result<BattleEvent, DecodeError> {
    let (&raw_tag, rest) = frame.split_first().ok_or(DecodeError::Empty)?;

    let Some(tag) = CommandTag::from_u8(raw_tag) else {
        let player = rest.first().map_or(0, |&p| p as i8);
        return Ok(BattleEvent {
            player: player as u8,
            side: perspective.side(player).unwrap_or(Side::Opponent),
            command: BattleCommand::Unknown(raw_tag),
        });
    };

    let mut r = Reader::new(rest, tag.as_str());
    let player = r.i8()?;
    let side = perspective.side(player)?;
    let command = parse_command(tag, side, &mut r)?;

    Ok(BattleEvent {
        player: player as u8,
        side,
        command,
    })
}

fn parse_command(tag: CommandTag, side: Side, r: &mut Reader<'_>) -> Result<BattleCommand, DecodeError> {
    let command = match tag {
        CommandTag::SendOut => parse_send_out(side, r)?,
        CommandTag::SendBack => BattleCommand::SendBack,
        CommandTag::UseAttack => BattleCommand::UseAttack { move_num: r.i16()? },
        CommandTag::OfferChoice => BattleCommand::OfferChoice(ChoiceSet::read(r)?),
        CommandTag::BeginTurn => BattleCommand::BeginTurn(r.i32()?),
        CommandTag::ChangePp => BattleCommand::ChangePp {
            slot: r.u8()?,
            pp: r.u8()?,
        },
        CommandTag::ChangeHp => BattleCommand::ChangeHp(r.u16()?),
        CommandTag::Ko => BattleCommand::Ko,
        CommandTag::Effective => BattleCommand::Effective(r.u8()?),
        CommandTag::Miss => BattleCommand::Miss,
        CommandTag::CriticalHit => BattleCommand::CriticalHit,
        CommandTag::Hit => BattleCommand::Hit,
        CommandTag::StatChange => BattleCommand::StatChange {
            stat: r.i8()?,
            delta: r.i8()?,
        },
        CommandTag::StatusChange => BattleCommand::StatusChange(r.i8()?),
        CommandTag::StatusMessage => BattleCommand::StatusMessage(r.i8()?),
        CommandTag::Failed => BattleCommand::Failed,
        CommandTag::BattleChat => BattleCommand::BattleChat(r.string()?),
        CommandTag::MoveMessage => BattleCommand::MoveMessage(MoveMessage::read(r)?),
        CommandTag::BattleEnd => BattleCommand::BattleEnd(r.u8()?),
    };

    Ok(command)
}

/// Our own send-outs carry a team slot, the opponent's a full snapshot
fn parse_send_out(side: Side, r: &mut Reader<'_>) -> Result<BattleCommand, DecodeError> {
    let sent = match side {
        Side::Me => SentOut::Own { slot: r.u8()? },
        Side::Opponent => SentOut::Foe(PokemonSnapshot::read(r)?),
    };
    Ok(BattleCommand::SendOut(sent))
}
