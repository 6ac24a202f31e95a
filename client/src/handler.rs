use async_trait::async_trait;
use rotom_battle::{BattleOutcome, BattleSession, ChoiceAvailability, ChoiceRejected, Narration};
use rotom_protocol::{DecodeError, Side};

/// Trait for presenting a battle.
///
/// Implement this trait to render narration and react to state changes. All
/// methods have default no-op implementations, so you only need to implement
/// the events you care about. The session passed in is read-only; decisions
/// go through a [`Sender`](crate::Sender).
///
/// # Example
///
/// ```ignore
/// struct Printer;
///
/// #[async_trait]
/// impl Handler for Printer {
///     async fn on_narration(&mut self, line: &Narration) {
///         println!("{line}");
///     }
/// }
/// ```
#[async_trait]
pub trait Handler: Send {
    /// Called for every log line, in order.
    async fn on_narration(&mut self, line: &Narration) {
        let _ = line;
    }

    /// Called when a pokemon enters or leaves the field.
    async fn on_active_changed(&mut self, side: Side, session: &BattleSession) {
        let _ = (side, session);
    }

    /// Called when a side's life total changes.
    async fn on_life_changed(&mut self, side: Side, session: &BattleSession) {
        let _ = (side, session);
    }

    /// Called when a side's non-volatile status changes.
    async fn on_status_changed(&mut self, side: Side, session: &BattleSession) {
        let _ = (side, session);
    }

    /// Called when the PP of one of our active pokemon's moves changes.
    async fn on_move_changed(&mut self, slot: u8, session: &BattleSession) {
        let _ = (slot, session);
    }

    /// Called when decisions are armed or disarmed.
    async fn on_choices_changed(&mut self, availability: ChoiceAvailability) {
        let _ = availability;
    }

    async fn on_battle_end(&mut self, outcome: BattleOutcome) {
        let _ = outcome;
    }

    /// Called when an intent was not legal; nothing was sent.
    async fn on_choice_rejected(&mut self, rejection: ChoiceRejected) {
        let _ = rejection;
    }

    /// Called when an inbound frame could not be decoded. The frame is dropped
    /// and the battle continues.
    async fn on_malformed_frame(&mut self, error: &DecodeError) {
        let _ = error;
    }
}
