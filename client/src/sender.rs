use tokio::sync::mpsc;

use crate::ClientError;

/// Something the player wants to do. Validated by the runner against the
/// latest offered choices before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Move slot 0-3
    Attack(u8),
    /// The forced move if that is the only option, else the first legal attack
    DefaultAttack,
    /// Team slot 0-5
    Switch(u8),
    Chat(String),
    Forfeit,
}

/// Cloneable handle for submitting intents to a running battle.
///
/// This can be passed to handlers and cloned freely.
#[derive(Clone)]
pub struct Sender {
    intents: mpsc::Sender<Intent>,
}

impl Sender {
    pub(crate) fn new(intents: mpsc::Sender<Intent>) -> Self {
        Self { intents }
    }

    /// Queue an intent for the runner
    pub async fn send(&self, intent: Intent) -> Result<(), ClientError> {
        self.intents
            .send(intent)
            .await
            .map_err(|_| ClientError::RunnerStopped)
    }

    pub async fn attack(&self, slot: u8) -> Result<(), ClientError> {
        self.send(Intent::Attack(slot)).await
    }

    pub async fn default_attack(&self) -> Result<(), ClientError> {
        self.send(Intent::DefaultAttack).await
    }

    pub async fn switch(&self, target: u8) -> Result<(), ClientError> {
        self.send(Intent::Switch(target)).await
    }

    /// Send a chat message to the battle
    pub async fn chat(&self, message: &str) -> Result<(), ClientError> {
        self.send(Intent::Chat(message.to_string())).await
    }

    pub async fn forfeit(&self) -> Result<(), ClientError> {
        self.send(Intent::Forfeit).await
    }
}
