//! Turning user intent into validated decisions

use rotom_protocol::{AttackSlot, BattleChoice, ChoiceSet};
use thiserror::Error;

use super::battle::BattleSession;
use crate::types::TEAM_SIZE;

/// Why an intent did not produce a decision. Nothing is sent in that case.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ChoiceRejected {
    #[error("no decision is expected right now")]
    NotArmed,

    #[error("no pokemon of ours is on the field")]
    NoActivePokemon,

    #[error("attacking is not allowed this turn")]
    AttacksDisallowed,

    #[error("attack {0} is not allowed this turn")]
    AttackDisallowed(u8),

    #[error("switching is not allowed this turn")]
    SwitchDisallowed,

    #[error("team slot {0} cannot battle")]
    TargetUnavailable(u8),

    #[error("team slot {0} is already on the field")]
    AlreadyActive(u8),

    #[error("slot {0} is out of range")]
    OutOfRange(u8),
}

/// Which controls a UI should enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChoiceAvailability {
    pub attacks: [bool; 4],
    /// The generic attack control, also used for the forced move
    pub attack: bool,
    pub switch: bool,
    pub switch_targets: [bool; TEAM_SIZE],
}

impl BattleSession {
    /// Arm decisions with a new set of legal actions
    pub fn offer_choice(&mut self, choices: ChoiceSet) {
        self.set_choice_set(Some(choices));
    }

    /// Choose the attack in move slot `slot` (0-3).
    ///
    /// When the only legal option is the fallback move, any slot selects it.
    pub fn attempt_attack(&mut self, slot: u8) -> Result<BattleChoice, ChoiceRejected> {
        let choices = self.attack_choices()?;

        if choices.is_forced() {
            return Ok(self.commit(BattleChoice::Attack(AttackSlot::Struggle)));
        }
        if usize::from(slot) >= 4 {
            return Err(ChoiceRejected::OutOfRange(slot));
        }
        if !choices.is_attack_allowed(usize::from(slot)) {
            return Err(ChoiceRejected::AttackDisallowed(slot));
        }

        Ok(self.commit(BattleChoice::Attack(AttackSlot::Slot(slot))))
    }

    /// Choose the fallback move when forced, the first legal attack otherwise
    pub fn attempt_default_attack(&mut self) -> Result<BattleChoice, ChoiceRejected> {
        let choices = self.attack_choices()?;

        let attack = choices
            .first_allowed_attack()
            .map_or(AttackSlot::Struggle, AttackSlot::Slot);

        Ok(self.commit(BattleChoice::Attack(attack)))
    }

    /// Switch to team slot `target` (0-5).
    ///
    /// Picking the pokemon already on the field is rejected without
    /// disarming, so the player can still decide.
    pub fn attempt_switch(&mut self, target: u8) -> Result<BattleChoice, ChoiceRejected> {
        let choices = self.choices().copied().ok_or(ChoiceRejected::NotArmed)?;

        if !choices.switch_allowed {
            return Err(ChoiceRejected::SwitchDisallowed);
        }

        let idx = usize::from(target);
        if idx >= TEAM_SIZE {
            return Err(ChoiceRejected::OutOfRange(target));
        }
        if self.active_index() == Some(idx) {
            return Err(ChoiceRejected::AlreadyActive(target));
        }
        if !self.team().is_usable(idx) {
            return Err(ChoiceRejected::TargetUnavailable(target));
        }

        Ok(self.commit(BattleChoice::Switch(target)))
    }

    /// Controls to enable given the current choice set
    pub fn availability(&self) -> ChoiceAvailability {
        let Some(choices) = self.choices() else {
            return ChoiceAvailability::default();
        };

        let mut availability = ChoiceAvailability::default();

        if self.active_pokemon().is_some() && choices.attacks_allowed {
            availability.attack = true;
            for (slot, enabled) in availability.attacks.iter_mut().enumerate() {
                *enabled = choices.is_attack_allowed(slot);
            }
        }

        if choices.switch_allowed {
            availability.switch = true;
            for (idx, enabled) in availability.switch_targets.iter_mut().enumerate() {
                *enabled = self.active_index() != Some(idx) && self.team().is_usable(idx);
            }
        }

        availability
    }

    fn attack_choices(&self) -> Result<ChoiceSet, ChoiceRejected> {
        let choices = self.choices().copied().ok_or(ChoiceRejected::NotArmed)?;

        if self.active_pokemon().is_none() {
            return Err(ChoiceRejected::NoActivePokemon);
        }
        if !choices.attacks_allowed {
            return Err(ChoiceRejected::AttacksDisallowed);
        }

        Ok(choices)
    }

    /// Disarm before handing the decision out
    fn commit(&mut self, choice: BattleChoice) -> BattleChoice {
        self.set_choice_set(None);
        choice
    }
}
