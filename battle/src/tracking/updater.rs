//! Event interpreter: applies decoded events to a BattleSession

use rotom_protocol::{BattleCommand, BattleEvent, ChoiceSet, MoveMessage, SentOut, Side};

use super::battle::{BattleSession, PLACEHOLDER_NICK};
use crate::dex::Dex;
use crate::narration::{Emphasis, Narration, Span};
use crate::types::{BattleOutcome, Effectiveness, StatusChange, StatusTick, describe_boost};

/// What a renderer should refresh after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderHint {
    /// The pokemon on the field changed (or left it)
    ActiveChanged(Side),
    LifeChanged(Side),
    /// A side's non-volatile status changed
    StatusChanged(Side),
    /// PP of one of our active pokemon's moves changed
    MoveChanged { slot: u8 },
    /// Decision availability changed
    ChoicesChanged,
    BattleEnded(BattleOutcome),
}

/// Result of applying one event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    pub narration: Vec<Narration>,
    pub hints: Vec<RenderHint>,
}

impl Applied {
    fn say(&mut self, line: Narration) {
        self.narration.push(line);
    }

    fn hint(&mut self, hint: RenderHint) {
        self.hints.push(hint);
    }

    pub fn is_empty(&self) -> bool {
        self.narration.is_empty() && self.hints.is_empty()
    }
}

impl BattleSession {
    /// Apply one decoded event.
    ///
    /// Never fails: references to unknown slots or ids degrade to no-op
    /// mutations and placeholder text, because the server stays authoritative.
    pub fn apply(&mut self, event: &BattleEvent, dex: &dyn Dex) -> Applied {
        let side = event.side;
        let mut out = Applied::default();

        match &event.command {
            BattleCommand::SendOut(sent) => self.handle_send_out(side, sent, &mut out),

            BattleCommand::SendBack => {
                out.say(Narration::plain(format!(
                    "{} called {} back!",
                    self.name(side),
                    self.nick(side)
                )));
                self.clear_side(side, &mut out);
            }

            BattleCommand::UseAttack { move_num } => {
                out.say(self.describe_attack(side, *move_num, dex));
            }

            BattleCommand::ChangePp { slot, pp } => {
                if self.set_move_pp(side, usize::from(*slot), *pp) {
                    out.hint(RenderHint::MoveChanged { slot: *slot });
                }
            }

            BattleCommand::OfferChoice(choices) => self.handle_offer_choice(*choices, &mut out),

            BattleCommand::BeginTurn(turn) => {
                self.set_turn(*turn);
                out.say(Narration::styled(format!("Start of turn {turn}"), Emphasis::Info).strong());
            }

            BattleCommand::ChangeHp(value) => {
                if self.adjust_life(side, *value) {
                    out.hint(RenderHint::LifeChanged(side));
                }
            }

            BattleCommand::Ko => {
                out.say(Narration::plain(format!("{} fainted!", self.nick(side))).strong());
                if side.is_me() {
                    self.faint_active();
                }
                self.clear_side(side, &mut out);
            }

            BattleCommand::Hit => out.say(Narration::plain("Hit!")),

            BattleCommand::Miss => out.say(Narration::plain("It missed!")),

            BattleCommand::CriticalHit => {
                out.say(Narration::styled("It's a critical hit!", Emphasis::Danger));
            }

            BattleCommand::Failed => out.say(Narration::plain("It failed!")),

            BattleCommand::Effective(code) => {
                if let Some(line) = describe_effectiveness(*code) {
                    out.say(line);
                }
            }

            BattleCommand::StatChange { stat, delta } => {
                let stat_name = dex.stat_name(*stat).unwrap_or("stat");
                out.say(Narration::plain(describe_boost(self.nick(side), stat_name, *delta)));
            }

            BattleCommand::StatusChange(code) => match StatusChange::from_protocol(*code) {
                Some(change) => self.handle_status_change(side, change, &mut out),
                None => tracing::debug!(code, "Unknown status change code"),
            },

            BattleCommand::StatusMessage(code) => match StatusTick::from_protocol(*code) {
                Some(tick) => out.say(Narration::styled(
                    tick.message(self.nick(side)),
                    Emphasis::Type(tick.color_type()),
                )),
                None => tracing::debug!(code, "Unknown status message code"),
            },

            BattleCommand::BattleChat(message) => {
                out.say(
                    Narration::new()
                        .push(
                            Span::new(
                                format!("{}: ", self.name(side)),
                                Emphasis::Chat { own: side.is_me() },
                            )
                            .strong(),
                        )
                        .push(Span::plain(message.clone())),
                );
            }

            BattleCommand::MoveMessage(message) => {
                if let Some(line) = self.describe_move_message(side, message, dex) {
                    out.say(line);
                }
            }

            BattleCommand::BattleEnd(code) => self.handle_battle_end(side, *code, &mut out),

            BattleCommand::Unknown(tag) => {
                tracing::debug!(tag, "Ignoring unknown battle command");
            }
        }

        out
    }

    fn handle_send_out(&mut self, side: Side, sent: &SentOut, out: &mut Applied) {
        let (side, nick) = match sent {
            SentOut::Own { slot } => {
                if side != Side::Me {
                    tracing::debug!(slot, "Own send-out reported for the opponent");
                }
                let idx = usize::from(*slot);
                if self.set_active(Side::Me, Some(idx)) {
                    out.hint(RenderHint::ActiveChanged(Side::Me));
                }
                // name the announced slot even when it could not be applied
                let nick = self
                    .team()
                    .get(idx)
                    .map(|p| p.nick.as_str())
                    .filter(|n| !n.is_empty())
                    .unwrap_or(PLACEHOLDER_NICK);
                (Side::Me, nick.to_string())
            }
            SentOut::Foe(snapshot) => {
                self.reveal_opponent(snapshot.clone());
                self.set_opponent_alive(true);
                out.hint(RenderHint::ActiveChanged(Side::Opponent));
                (Side::Opponent, self.nick(Side::Opponent).to_string())
            }
        };

        out.say(Narration::plain(format!(
            "{} sent out {}!",
            self.name(side),
            nick
        )));
    }

    /// Narrate a new condition and record it when it is non-volatile
    fn handle_status_change(&mut self, side: Side, change: StatusChange, out: &mut Applied) {
        out.say(Narration::styled(
            change.message(self.nick(side)),
            Emphasis::Type(change.color_type()),
        ));

        if let StatusChange::Inflicted(status) = change
            && self.set_status(side, status.to_protocol())
        {
            out.hint(RenderHint::StatusChanged(side));
        }
    }

    fn handle_offer_choice(&mut self, choices: ChoiceSet, out: &mut Applied) {
        self.set_choice_set(Some(choices));
        out.hint(RenderHint::ChoicesChanged);
    }

    fn handle_battle_end(&mut self, side: Side, code: u8, out: &mut Applied) {
        let Some(outcome) = BattleOutcome::from_protocol(code, side) else {
            tracing::debug!(code, "Unknown battle result code");
            return;
        };

        let was_armed = self.is_armed();
        self.set_outcome(outcome);

        let line = match outcome {
            BattleOutcome::Forfeit { by } => format!("{} forfeited!", self.name(by)),
            BattleOutcome::Win { winner } => format!("{} won the battle!", self.name(winner)),
            BattleOutcome::Tie => format!(
                "Tie between {} and {}!",
                self.name(Side::Me),
                self.name(Side::Opponent)
            ),
        };
        out.say(Narration::styled(line, Emphasis::Info).strong());

        if was_armed {
            out.hint(RenderHint::ChoicesChanged);
        }
        out.hint(RenderHint::BattleEnded(outcome));
    }

    /// Take a side's pokemon off the field
    fn clear_side(&mut self, side: Side, out: &mut Applied) {
        let was_armed = self.is_armed();
        self.set_active(side, None);
        out.hint(RenderHint::ActiveChanged(side));

        if was_armed && !self.is_armed() {
            out.hint(RenderHint::ChoicesChanged);
        }
    }

    fn describe_attack(&self, side: Side, move_num: i16, dex: &dyn Dex) -> Narration {
        let known = u16::try_from(move_num).ok().and_then(|num| {
            let name = dex.move_name(num)?;
            Some((name, dex.move_type(num)))
        });

        let attack = match known {
            Some((name, Some(move_type))) => Span::new(name, Emphasis::Type(move_type)),
            Some((name, None)) => Span::plain(name),
            None => {
                tracing::debug!(move_num, "Attack with unknown move id");
                Span::plain(format!("Move #{move_num}"))
            }
        };

        Narration::plain(format!("{} used ", self.nick(side)))
            .push(attack.strong())
            .push(Span::plain("!"))
    }

    fn describe_move_message(
        &self,
        side: Side,
        message: &MoveMessage,
        dex: &dyn Dex,
    ) -> Option<Narration> {
        let Some(template) = dex.move_message(message.move_num, message.part) else {
            tracing::debug!(
                move_num = message.move_num,
                part = message.part,
                "No template for move message"
            );
            return None;
        };

        let other_move = u16::try_from(message.other)
            .ok()
            .and_then(|num| dex.move_name(num))
            .unwrap_or("");

        let text = fill_template(template, |key| match key {
            's' => Some(self.nick(side).to_string()),
            't' => Some(dex.type_name(message.type_id).unwrap_or("").to_string()),
            'f' => Some(self.nick(side.opposite()).to_string()),
            'm' => Some(other_move.to_string()),
            'd' => Some(message.other.to_string()),
            'q' => Some(message.token.clone()),
            _ => None,
        });

        let emphasis = crate::types::Type::from_protocol(message.type_id)
            .map_or(Emphasis::Plain, Emphasis::Type);

        Some(Narration::styled(text, emphasis))
    }
}

fn describe_effectiveness(code: u8) -> Option<Narration> {
    let tier = Effectiveness::from_protocol(code)?;
    let emphasis = match tier {
        Effectiveness::NoEffect => Emphasis::Plain,
        Effectiveness::NotVeryEffective => Emphasis::Muted,
        Effectiveness::SuperEffective => Emphasis::Info,
    };
    Some(Narration::styled(tier.message(), emphasis))
}

/// Substitute `%x` placeholders in one pass, so substituted text (a nickname
/// containing `%t`, say) is never expanded again. Unknown keys stay verbatim.
fn fill_template(template: &str, mut lookup: impl FnMut(char) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some(key) => match lookup(key) {
                Some(value) => out.push_str(&value),
                None => {
                    out.push('%');
                    out.push(key);
                }
            },
            None => out.push('%'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use rotom_protocol::{PokemonSnapshot, TeamMove};

    use super::super::battle::test_support::{choices, session};
    use super::*;
    use crate::dex::StaticDex;
    use crate::types::Type;

    fn dex() -> StaticDex {
        StaticDex::new()
            .with_move(85, "Thunderbolt", Type::Electric)
            .with_move(33, "Tackle", Type::Normal)
            .with_move(73, "Leech Seed", Type::Grass)
            .with_move_message(73, 0, "%s planted a seed on %f!")
            .with_move_message(73, 1, "%f's %m was disabled for %d turns (%q, %t)")
    }

    fn mine(command: BattleCommand) -> BattleEvent {
        BattleEvent::new(0, Side::Me, command)
    }

    fn theirs(command: BattleCommand) -> BattleEvent {
        BattleEvent::new(1, Side::Opponent, command)
    }

    fn eevee() -> PokemonSnapshot {
        PokemonSnapshot {
            num: 133,
            nick: "Eevee".to_string(),
            life_percent: 100,
            level: 50,
            ..Default::default()
        }
    }

    #[test]
    fn test_own_send_out() {
        let mut session = session();
        let applied = session.apply(&mine(BattleCommand::SendOut(SentOut::Own { slot: 3 })), &dex());

        assert_eq!(session.active_index(), Some(3));
        assert_eq!(applied.narration[0].text(), "Ash sent out Squirt!");
        assert_eq!(applied.hints, vec![RenderHint::ActiveChanged(Side::Me)]);
    }

    #[test]
    fn test_send_out_keeps_choices() {
        let mut session = session();
        session.apply(&mine(BattleCommand::OfferChoice(choices(true, [true; 4]))), &dex());
        session.apply(&mine(BattleCommand::SendOut(SentOut::Own { slot: 1 })), &dex());

        assert_eq!(session.active_index(), Some(1));
        assert!(session.is_armed());
    }

    #[test]
    fn test_send_out_of_fainted_slot_is_ignored() {
        let mut session = session();
        session.apply(&mine(BattleCommand::SendOut(SentOut::Own { slot: 0 })), &dex());
        let applied = session.apply(&mine(BattleCommand::SendOut(SentOut::Own { slot: 4 })), &dex());

        assert_eq!(session.active_index(), Some(0));
        assert!(applied.hints.is_empty());
        assert_eq!(applied.narration.len(), 1);
        assert_eq!(applied.narration[0].text(), "Ash sent out Snorlax!");
    }

    #[test]
    fn test_send_out_of_unknown_slot_uses_placeholder() {
        let mut session = session();
        session.apply(&mine(BattleCommand::SendOut(SentOut::Own { slot: 0 })), &dex());
        let applied = session.apply(&mine(BattleCommand::SendOut(SentOut::Own { slot: 9 })), &dex());

        assert_eq!(session.active_index(), Some(0));
        assert_eq!(applied.narration[0].text(), "Ash sent out ???!");

        let applied = session.apply(&mine(BattleCommand::SendOut(SentOut::Own { slot: 5 })), &dex());
        assert_eq!(applied.narration[0].text(), "Ash sent out ???!");
    }

    #[test]
    fn test_foe_send_out() {
        let mut session = session();
        let applied = session.apply(&theirs(BattleCommand::SendOut(SentOut::Foe(eevee()))), &dex());

        assert!(session.opponent_alive());
        assert_eq!(session.opponent().unwrap().num, 133);
        assert_eq!(applied.narration[0].text(), "Gary sent out Eevee!");
    }

    #[test]
    fn test_send_back_disarms() {
        let mut session = session();
        session.apply(&mine(BattleCommand::SendOut(SentOut::Own { slot: 0 })), &dex());
        session.apply(&mine(BattleCommand::OfferChoice(choices(true, [true; 4]))), &dex());

        let applied = session.apply(&mine(BattleCommand::SendBack), &dex());

        assert_eq!(applied.narration[0].text(), "Ash called Sparky back!");
        assert_eq!(session.active_index(), None);
        assert!(!session.is_armed());
        assert!(applied.hints.contains(&RenderHint::ChoicesChanged));
    }

    #[test]
    fn test_foe_ko() {
        let mut session = session();
        session.apply(&theirs(BattleCommand::SendOut(SentOut::Foe(eevee()))), &dex());
        let applied = session.apply(&theirs(BattleCommand::Ko), &dex());

        assert_eq!(applied.narration[0].text(), "Eevee fainted!");
        assert!(applied.narration[0].spans[0].strong);
        assert!(!session.opponent_alive());
    }

    #[test]
    fn test_own_ko_faints_pokemon() {
        let mut session = session();
        session.apply(&mine(BattleCommand::SendOut(SentOut::Own { slot: 2 })), &dex());
        session.apply(&mine(BattleCommand::OfferChoice(choices(true, [true; 4]))), &dex());
        session.apply(&mine(BattleCommand::Ko), &dex());

        assert_eq!(session.active_index(), None);
        assert!(!session.is_armed());
        assert!(!session.team().is_usable(2));
    }

    #[test]
    fn test_use_attack_narration() {
        let mut session = session();
        session.apply(&mine(BattleCommand::SendOut(SentOut::Own { slot: 0 })), &dex());
        let applied = session.apply(&mine(BattleCommand::UseAttack { move_num: 85 }), &dex());

        let line = &applied.narration[0];
        assert_eq!(line.text(), "Sparky used Thunderbolt!");
        assert_eq!(line.spans[1].emphasis, Emphasis::Type(Type::Electric));
        assert!(line.spans[1].strong);
    }

    #[test]
    fn test_use_unknown_attack() {
        let mut session = session();
        let applied = session.apply(&theirs(BattleCommand::UseAttack { move_num: -4 }), &dex());

        assert_eq!(applied.narration[0].text(), "??? used Move #-4!");
    }

    #[test]
    fn test_change_pp_does_not_arm() {
        let mut session = session();
        session.apply(&mine(BattleCommand::SendOut(SentOut::Own { slot: 0 })), &dex());
        let applied = session.apply(&mine(BattleCommand::ChangePp { slot: 1, pp: 7 }), &dex());

        assert_eq!(session.active_pokemon().unwrap().moves[1], TeamMove { num: 45, pp: 7, total_pp: 40 });
        assert!(!session.is_armed());
        assert!(applied.narration.is_empty());
        assert_eq!(applied.hints, vec![RenderHint::MoveChanged { slot: 1 }]);
    }

    #[test]
    fn test_change_pp_without_active_is_noop() {
        let mut session = session();
        let applied = session.apply(&mine(BattleCommand::ChangePp { slot: 1, pp: 7 }), &dex());
        assert!(applied.is_empty());
    }

    #[test]
    fn test_offer_choice_arms() {
        let mut session = session();
        let applied = session.apply(&mine(BattleCommand::OfferChoice(choices(false, [true; 4]))), &dex());

        assert!(session.is_armed());
        assert!(applied.narration.is_empty());
        assert_eq!(applied.hints, vec![RenderHint::ChoicesChanged]);
    }

    #[test]
    fn test_begin_turn_banner() {
        let mut session = session();
        let applied = session.apply(&mine(BattleCommand::BeginTurn(3)), &dex());

        assert_eq!(session.turn(), 3);
        assert_eq!(applied.narration[0].text(), "Start of turn 3");
        assert_eq!(applied.narration[0].emphasis(), Emphasis::Info);
    }

    #[test]
    fn test_change_hp_on_unrevealed_opponent() {
        let mut session = session();
        let applied = session.apply(&theirs(BattleCommand::ChangeHp(42)), &dex());

        assert_eq!(session.life_percent(Side::Opponent), Some(42));
        assert!(applied.narration.is_empty());
        assert_eq!(applied.hints, vec![RenderHint::LifeChanged(Side::Opponent)]);
    }

    #[test]
    fn test_change_hp_own() {
        let mut session = session();
        session.apply(&mine(BattleCommand::SendOut(SentOut::Own { slot: 1 })), &dex());
        session.apply(&mine(BattleCommand::ChangeHp(61)), &dex());

        assert_eq!(session.active_pokemon().unwrap().life_points, 61);
    }

    #[test]
    fn test_effectiveness_categories() {
        let mut session = session();
        let mut emphasis_of = |code| {
            session
                .apply(&mine(BattleCommand::Effective(code)), &dex())
                .narration
                .first()
                .map(|line| (line.text(), line.emphasis()))
        };

        assert_eq!(
            emphasis_of(0),
            Some(("It had no effect!".to_string(), Emphasis::Plain))
        );
        assert_eq!(emphasis_of(1).map(|l| l.1), Some(Emphasis::Muted));
        assert_eq!(emphasis_of(2).map(|l| l.1), Some(Emphasis::Muted));
        assert_eq!(
            emphasis_of(8),
            Some(("It's super effective!".to_string(), Emphasis::Info))
        );
        assert_eq!(emphasis_of(16).map(|l| l.1), Some(Emphasis::Info));
        assert_eq!(emphasis_of(4), None);
        assert_eq!(emphasis_of(3), None);
    }

    #[test]
    fn test_simple_lines() {
        let mut session = session();
        let text = |session: &mut BattleSession, command| {
            session.apply(&mine(command), &dex()).narration[0].text()
        };

        assert_eq!(text(&mut session, BattleCommand::Hit), "Hit!");
        assert_eq!(text(&mut session, BattleCommand::Miss), "It missed!");
        assert_eq!(text(&mut session, BattleCommand::Failed), "It failed!");
        assert_eq!(
            text(&mut session, BattleCommand::CriticalHit),
            "It's a critical hit!"
        );
    }

    #[test]
    fn test_stat_change() {
        let mut session = session();
        session.apply(&theirs(BattleCommand::SendOut(SentOut::Foe(eevee()))), &dex());
        let applied = session.apply(&theirs(BattleCommand::StatChange { stat: 1, delta: -2 }), &dex());

        assert_eq!(applied.narration[0].text(), "Eevee's Attack sharply fell!");
    }

    #[test]
    fn test_status_change() {
        let mut session = session();
        session.apply(&mine(BattleCommand::SendOut(SentOut::Own { slot: 0 })), &dex());

        let applied = session.apply(&mine(BattleCommand::StatusChange(-1)), &dex());
        assert_eq!(applied.narration[0].text(), "Sparky became confused!");
        assert_eq!(applied.narration[0].emphasis(), Emphasis::Type(Type::Ghost));
        // confusion is volatile and not stored
        assert!(applied.hints.is_empty());
        assert_eq!(session.active_pokemon().unwrap().status, 0);

        let applied = session.apply(&mine(BattleCommand::StatusChange(1)), &dex());
        assert_eq!(
            applied.narration[0].text(),
            "Sparky is paralyzed! It may be unable to move!"
        );
        assert_eq!(applied.hints, vec![RenderHint::StatusChanged(Side::Me)]);
        assert_eq!(session.active_pokemon().unwrap().status, 1);

        let applied = session.apply(&mine(BattleCommand::StatusChange(42)), &dex());
        assert!(applied.narration.is_empty());
    }

    #[test]
    fn test_opponent_status_change_updates_snapshot() {
        let mut session = session();
        session.apply(&theirs(BattleCommand::SendOut(SentOut::Foe(eevee()))), &dex());

        let applied = session.apply(&theirs(BattleCommand::StatusChange(5)), &dex());

        assert_eq!(applied.narration[0].text(), "Eevee was poisoned!");
        assert_eq!(applied.hints, vec![RenderHint::StatusChanged(Side::Opponent)]);
        assert_eq!(session.opponent().unwrap().status, 5);
    }

    #[test]
    fn test_status_message() {
        let mut session = session();
        session.apply(&theirs(BattleCommand::SendOut(SentOut::Foe(eevee()))), &dex());

        let applied = session.apply(&theirs(BattleCommand::StatusMessage(9)), &dex());
        assert_eq!(applied.narration[0].text(), "Eevee is hurt by poison!");
        assert_eq!(applied.narration[0].emphasis(), Emphasis::Type(Type::Poison));
    }

    #[test]
    fn test_chat_attribution() {
        let mut session = session();
        let applied = session.apply(&theirs(BattleCommand::BattleChat("gl hf".to_string())), &dex());

        let line = &applied.narration[0];
        assert_eq!(line.text(), "Gary: gl hf");
        assert_eq!(line.spans[0].emphasis, Emphasis::Chat { own: false });
        assert_eq!(line.spans[1].emphasis, Emphasis::Plain);
        // chat never falls into move message handling
        assert_eq!(applied.narration.len(), 1);
    }

    #[test]
    fn test_move_message_substitution() {
        let mut session = session();
        session.apply(&mine(BattleCommand::SendOut(SentOut::Own { slot: 0 })), &dex());
        session.apply(&theirs(BattleCommand::SendOut(SentOut::Foe(eevee()))), &dex());

        let message = MoveMessage {
            move_num: 73,
            part: 0,
            type_id: Type::Grass as i8,
            ..Default::default()
        };
        let applied = session.apply(&mine(BattleCommand::MoveMessage(message)), &dex());

        assert_eq!(applied.narration[0].text(), "Sparky planted a seed on Eevee!");
        assert_eq!(applied.narration[0].emphasis(), Emphasis::Type(Type::Grass));
    }

    #[test]
    fn test_move_message_all_placeholders() {
        let mut session = session();
        session.apply(&theirs(BattleCommand::SendOut(SentOut::Foe(eevee()))), &dex());

        let message = MoveMessage {
            move_num: 73,
            part: 1,
            type_id: 9,
            foe: 1,
            other: 33,
            token: "so sad".to_string(),
        };
        let applied = session.apply(&mine(BattleCommand::MoveMessage(message)), &dex());

        assert_eq!(
            applied.narration[0].text(),
            "Eevee's Tackle was disabled for 33 turns (so sad, Fire)"
        );
    }

    #[test]
    fn test_move_message_without_template() {
        let mut session = session();
        let message = MoveMessage {
            move_num: 999,
            ..Default::default()
        };
        let applied = session.apply(&mine(BattleCommand::MoveMessage(message)), &dex());
        assert!(applied.narration.is_empty());
    }

    #[test]
    fn test_battle_end() {
        let mut session = session();
        session.apply(&mine(BattleCommand::OfferChoice(choices(true, [true; 4]))), &dex());
        let applied = session.apply(&theirs(BattleCommand::BattleEnd(0)), &dex());

        assert_eq!(applied.narration[0].text(), "Gary forfeited!");
        assert_eq!(session.outcome(), Some(BattleOutcome::Forfeit { by: Side::Opponent }));
        assert!(!session.is_armed());
        assert!(applied.hints.contains(&RenderHint::BattleEnded(BattleOutcome::Forfeit {
            by: Side::Opponent
        })));
    }

    #[test]
    fn test_unknown_command_is_noop() {
        let mut session = session();
        let before = session.clone();
        let applied = session.apply(&mine(BattleCommand::Unknown(99)), &dex());

        assert!(applied.is_empty());
        assert_eq!(session, before);
    }

    #[test]
    fn test_fill_template_is_single_pass() {
        let text = fill_template("%s and %f (100%)", |key| match key {
            's' => Some("%f".to_string()),
            'f' => Some("Eevee".to_string()),
            _ => None,
        });
        assert_eq!(text, "%f and Eevee (100%)");
    }
}
