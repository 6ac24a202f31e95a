use anyhow::Result;
use rotom_battle::{Applied, BattleChoice, BattleSession, ChoiceRejected, Dex, RenderHint};
use rotom_protocol::{ClientMessage, decode_event};
use tokio::sync::mpsc;

use crate::ClientError;
use crate::handler::Handler;
use crate::sender::{Intent, Sender};

/// Drives one battle session.
///
/// Inbound frames and player intents are processed one at a time on the task
/// that calls [`BattleRunner::run`], so the session is never shared.
pub struct BattleRunner<D> {
    session: BattleSession,
    dex: D,
    inbound: mpsc::Receiver<Result<Vec<u8>>>,
    intents: mpsc::Receiver<Intent>,
    outbound: mpsc::Sender<ClientMessage>,
}

impl<D: Dex + Send> BattleRunner<D> {
    pub fn new(
        session: BattleSession,
        dex: D,
        inbound: mpsc::Receiver<Result<Vec<u8>>>,
        outbound: mpsc::Sender<ClientMessage>,
        capacity: usize,
    ) -> (Self, Sender) {
        let (intent_tx, intents) = mpsc::channel(capacity);
        let runner = Self {
            session,
            dex,
            inbound,
            intents,
            outbound,
        };
        (runner, Sender::new(intent_tx))
    }

    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    /// Run until the battle ends or the transport closes, dispatching to the
    /// handler. Returns the final session.
    pub async fn run<H: Handler>(mut self, handler: &mut H) -> Result<BattleSession> {
        while !self.session.is_over() {
            // server events first, so intents see the latest offered choices
            tokio::select! {
                biased;

                frame = self.inbound.recv() => {
                    match frame {
                        Some(frame) => self.process_frame(handler, &frame?).await,
                        None => {
                            tracing::info!("Transport closed before the battle ended");
                            break;
                        }
                    }
                }
                Some(intent) = self.intents.recv() => {
                    self.process_intent(handler, intent).await?;
                }
            }
        }

        Ok(self.session)
    }

    /// Decode and apply one inbound frame. Malformed frames are dropped.
    pub async fn process_frame<H: Handler>(&mut self, handler: &mut H, frame: &[u8]) {
        let event = match decode_event(frame, self.session.perspective()) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, len = frame.len(), "Dropping malformed battle frame");
                handler.on_malformed_frame(&e).await;
                return;
            }
        };

        tracing::trace!(command = ?event.command.tag(), side = ?event.side, "Applying battle event");
        let applied = self.session.apply(&event, &self.dex);
        self.dispatch(handler, applied).await;
    }

    /// Validate an intent and queue the resulting message
    pub async fn process_intent<H: Handler>(&mut self, handler: &mut H, intent: Intent) -> Result<()> {
        let attempt = match intent {
            Intent::Attack(slot) => self.session.attempt_attack(slot),
            Intent::DefaultAttack => self.session.attempt_default_attack(),
            Intent::Switch(target) => self.session.attempt_switch(target),
            Intent::Chat(message) => return self.send(ClientMessage::Chat(message)).await,
            Intent::Forfeit => return self.send(ClientMessage::Forfeit).await,
        };

        match attempt {
            Ok(choice) => self.submit(handler, choice).await,
            Err(rejection) => {
                self.reject(handler, rejection).await;
                Ok(())
            }
        }
    }

    async fn submit<H: Handler>(&mut self, handler: &mut H, choice: BattleChoice) -> Result<()> {
        tracing::debug!(?choice, "Submitting choice");
        self.send(ClientMessage::Choice(choice)).await?;
        handler.on_choices_changed(self.session.availability()).await;
        Ok(())
    }

    async fn reject<H: Handler>(&mut self, handler: &mut H, rejection: ChoiceRejected) {
        tracing::debug!(%rejection, "Choice rejected");
        handler.on_choice_rejected(rejection).await;
    }

    async fn send(&self, message: ClientMessage) -> Result<()> {
        self.outbound
            .send(message)
            .await
            .map_err(|_| ClientError::ConnectionClosed)?;
        Ok(())
    }

    async fn dispatch<H: Handler>(&self, handler: &mut H, applied: Applied) {
        for line in &applied.narration {
            handler.on_narration(line).await;
        }

        for hint in applied.hints {
            match hint {
                RenderHint::ActiveChanged(side) => {
                    handler.on_active_changed(side, &self.session).await;
                }
                RenderHint::LifeChanged(side) => {
                    handler.on_life_changed(side, &self.session).await;
                }
                RenderHint::StatusChanged(side) => {
                    handler.on_status_changed(side, &self.session).await;
                }
                RenderHint::MoveChanged { slot } => {
                    handler.on_move_changed(slot, &self.session).await;
                }
                RenderHint::ChoicesChanged => {
                    handler.on_choices_changed(self.session.availability()).await;
                }
                RenderHint::BattleEnded(outcome) => {
                    handler.on_battle_end(outcome).await;
                }
            }
        }
    }
}
