//! Async client for the rotom battle protocol.
//!
//! A [`BattleClient`] owns the WebSocket, decodes the battle setup, and hands
//! the session to a [`BattleRunner`] that feeds events and player intents to a
//! [`Handler`] on a single task.
//!
//! ```ignore
//! let config = ClientConfig::new("ws://localhost:5080/battle");
//! let client = BattleClient::connect(config, StaticDex::new()).await?;
//! let sender = client.sender();
//! let session = client.run(&mut MyHandler { sender }).await?;
//! ```

mod config;
mod connection;
mod handler;
mod runner;
mod sender;

use anyhow::{Context, Result};
use rotom_battle::{BattleSession, Dex};
use rotom_protocol::BattleSetup;
use thiserror::Error;
use tokio::sync::mpsc;

pub use config::{ClientConfig, ReconnectPolicy};
pub use connection::Connection;
pub use handler::Handler;
pub use runner::BattleRunner;
pub use sender::{Intent, Sender};

pub use rotom_battle::{
    Applied, BattleOutcome, ChoiceAvailability, ChoiceRejected, Emphasis, Narration, RenderHint,
    Side, Span, StaticDex,
};
pub use rotom_protocol::{BattleChoice, ClientMessage, DecodeError};

pub const DEFAULT_URL: &str = "ws://localhost:5080/battle";

/// Failures between the runner and its queues
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClientError {
    #[error("connection closed")]
    ConnectionClosed,

    #[error("battle runner stopped")]
    RunnerStopped,
}

/// A connected battle, ready to run
pub struct BattleClient<D> {
    runner: BattleRunner<D>,
    sender: Sender,
}

impl<D: Dex + Send> BattleClient<D> {
    /// Connect and wait for the battle setup, which is the first frame the
    /// server sends.
    pub async fn connect(config: ClientConfig, dex: D) -> Result<Self> {
        let mut connection = Connection::connect(config.url.clone(), config.reconnect.clone()).await?;

        let setup_frame = connection
            .next_frame()
            .await
            .context("Connection closed before the battle started")?;
        let setup = BattleSetup::decode(&setup_frame).context("Failed to decode battle setup")?;

        tracing::info!(me = %setup.me, opponent = %setup.opponent, "Battle started");

        let (inbound_tx, inbound_rx) = mpsc::channel(config.channel_capacity);
        let (outbound_tx, outbound_rx) = mpsc::channel(config.channel_capacity);
        tokio::spawn(connection.pump(inbound_tx, outbound_rx));

        let (runner, sender) = BattleRunner::new(
            BattleSession::from_setup(setup),
            dex,
            inbound_rx,
            outbound_tx,
            config.channel_capacity,
        );

        Ok(Self { runner, sender })
    }

    /// Handle for submitting intents; clone it into the handler or a UI task
    pub fn sender(&self) -> Sender {
        self.sender.clone()
    }

    pub fn session(&self) -> &BattleSession {
        self.runner.session()
    }

    /// Run the battle to completion, returning the final session
    pub async fn run<H: Handler>(self, handler: &mut H) -> Result<BattleSession> {
        let Self { runner, sender } = self;
        drop(sender);
        runner.run(handler).await
    }
}
