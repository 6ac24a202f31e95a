use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use rotom_protocol::{ClientMessage, FrameBuffer, frame};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::config::ReconnectPolicy;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket connection carrying length-framed battle frames in binary messages
pub struct Connection {
    ws_stream: WsStream,
    frames: FrameBuffer,
    url: String,
    reconnect_policy: ReconnectPolicy,
}

impl Connection {
    pub async fn connect(url: String, policy: ReconnectPolicy) -> Result<Self> {
        let ws_stream = Self::establish_connection(&url)
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        Ok(Self {
            ws_stream,
            frames: FrameBuffer::new(),
            url,
            reconnect_policy: policy,
        })
    }

    async fn establish_connection(url: &str) -> Result<WsStream> {
        let (ws_stream, _) = connect_async(url)
            .await
            .with_context(|| "WebSocket handshake failed")?;
        Ok(ws_stream)
    }

    async fn reconnect(&mut self) -> Result<()> {
        let mut attempt = 1;

        loop {
            if !self.reconnect_policy.allows(attempt) {
                anyhow::bail!(
                    "Failed to reconnect after {} attempts to {}",
                    attempt - 1,
                    self.url
                );
            }

            tokio::time::sleep(self.reconnect_policy.delay_for(attempt)).await;

            match Self::establish_connection(&self.url).await {
                Ok(ws_stream) => {
                    self.ws_stream = ws_stream;
                    // a partial frame from the old socket can never complete
                    let discarded = self.frames.pending();
                    self.frames = FrameBuffer::new();
                    tracing::info!(attempt, discarded, url = %self.url, "Reconnected");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt,
                        max_attempts = ?self.reconnect_policy.max_attempts,
                        error = %e,
                        "Reconnection attempt failed"
                    );
                    attempt += 1;
                }
            }
        }
    }

    /// Feed one transport item into the frame buffer, answering pings and
    /// reconnecting when the socket drops.
    async fn handle_message(&mut self, item: Option<Result<Message, WsError>>) -> Result<()> {
        match item {
            Some(Ok(Message::Binary(data))) => self.frames.extend(&data),
            Some(Ok(Message::Ping(data))) => {
                self.ws_stream
                    .send(Message::Pong(data))
                    .await
                    .context("Failed to send pong")?;
            }
            Some(Ok(Message::Text(text))) => {
                tracing::debug!(len = text.len(), "Ignoring text message");
            }
            Some(Ok(Message::Close(_))) | None => {
                self.reconnect()
                    .await
                    .context("Connection lost and reconnection failed")?;
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                tracing::error!(error = %e, "WebSocket error, attempting reconnect");
                self.reconnect()
                    .await
                    .context("WebSocket error and reconnection failed")?;
            }
        }
        Ok(())
    }

    /// Receive the next complete frame, reconnecting when the socket drops
    pub async fn next_frame(&mut self) -> Result<Vec<u8>> {
        loop {
            if let Some(frame) = self
                .frames
                .next_frame()
                .context("Battle stream desynchronized")?
            {
                return Ok(frame);
            }

            let item = self.ws_stream.next().await;
            self.handle_message(item).await?;
        }
    }

    /// Send one message as a single length-framed binary message
    pub async fn send(&mut self, message: &ClientMessage) -> Result<()> {
        self.ws_stream
            .send(Message::Binary(frame(&message.encode())))
            .await
            .context("Failed to send message")?;
        Ok(())
    }

    /// Send, retrying once on a fresh socket if the current one is gone
    async fn send_or_reconnect(&mut self, message: &ClientMessage) -> Result<()> {
        if let Err(e) = self.send(message).await {
            tracing::warn!(error = %e, "Send failed, attempting reconnect");
            self.reconnect()
                .await
                .context("Send failed and reconnection failed")?;
            self.send(message).await?;
        }
        Ok(())
    }

    /// Shuttle frames between the socket and the runner's queues until either
    /// side goes away. Transport failures are forwarded as the last item.
    ///
    /// Only `next()` and `recv()` race in the select; the work each one
    /// triggers (reconnects included) runs to completion before the next
    /// race, and outbound messages wait in their queue meanwhile.
    pub async fn pump(
        mut self,
        inbound: mpsc::Sender<Result<Vec<u8>>>,
        mut outbound: mpsc::Receiver<ClientMessage>,
    ) {
        loop {
            let frames = match self.frames.drain_frames() {
                Ok(frames) => frames,
                Err(e) => {
                    let _ = inbound
                        .send(Err(anyhow::Error::new(e).context("Battle stream desynchronized")))
                        .await;
                    break;
                }
            };
            let mut runner_gone = false;
            for frame in frames {
                if inbound.send(Ok(frame)).await.is_err() {
                    runner_gone = true;
                    break;
                }
            }
            if runner_gone {
                break;
            }

            let result = tokio::select! {
                item = self.ws_stream.next() => self.handle_message(item).await,
                message = outbound.recv() => match message {
                    Some(message) => self.send_or_reconnect(&message).await,
                    None => break,
                },
            };

            if let Err(e) = result {
                let _ = inbound.send(Err(e)).await;
                break;
            }
        }

        if let Err(e) = self.ws_stream.close(None).await {
            tracing::debug!(error = %e, "Error closing WebSocket");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rotom_protocol::BattleChoice;
    use tokio::net::TcpListener;
    use tokio::time::timeout;
    use tokio_tungstenite::accept_async;

    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    async fn listen() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}", listener.local_addr().unwrap());
        (listener, url)
    }

    /// Accept one socket, send a single frame, then close it
    async fn serve_and_close(listener: &TcpListener, payload: &[u8]) {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.send(Message::Binary(frame(payload))).await.unwrap();
        ws.close(None).await.unwrap();
    }

    fn start(connection: Connection) -> (mpsc::Receiver<Result<Vec<u8>>>, mpsc::Sender<ClientMessage>) {
        let (inbound_tx, inbound_rx) = mpsc::channel(8);
        let (outbound_tx, outbound_rx) = mpsc::channel(8);
        tokio::spawn(connection.pump(inbound_tx, outbound_rx));
        (inbound_rx, outbound_tx)
    }

    #[tokio::test]
    async fn test_message_queued_during_reconnect_is_delivered() {
        let (listener, url) = listen().await;
        let server = tokio::spawn(async move {
            serve_and_close(&listener, &[7, 0]).await;

            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            let received = loop {
                match ws.next().await {
                    Some(Ok(Message::Binary(data))) => break data,
                    Some(Ok(_)) => continue,
                    other => panic!("socket ended before a message arrived: {other:?}"),
                }
            };
            ws.send(Message::Binary(frame(&[9, 1]))).await.unwrap();
            received
        });

        let policy = ReconnectPolicy {
            max_attempts: Some(3),
            initial_delay: Duration::from_millis(500),
            ..Default::default()
        };
        let connection = Connection::connect(url, policy).await.unwrap();
        let (mut inbound, outbound) = start(connection);

        let first = timeout(WAIT, inbound.recv()).await.unwrap().unwrap().unwrap();
        assert_eq!(first, vec![7, 0]);

        // the close has arrived and the reconnect delay is running
        tokio::time::sleep(Duration::from_millis(100)).await;
        let message = ClientMessage::Choice(BattleChoice::Switch(1));
        outbound.send(message.clone()).await.unwrap();

        let second = timeout(WAIT, inbound.recv()).await.unwrap().unwrap().unwrap();
        assert_eq!(second, vec![9, 1]);

        let received = timeout(WAIT, server).await.unwrap().unwrap();
        assert_eq!(received, frame(&message.encode()));
    }

    #[tokio::test]
    async fn test_failed_reconnect_is_forwarded() {
        let (listener, url) = listen().await;
        tokio::spawn(async move {
            serve_and_close(&listener, &[7, 0]).await;
        });

        let connection = Connection::connect(url, ReconnectPolicy::disabled())
            .await
            .unwrap();
        let (mut inbound, _outbound) = start(connection);

        let first = timeout(WAIT, inbound.recv()).await.unwrap().unwrap().unwrap();
        assert_eq!(first, vec![7, 0]);

        let err = timeout(WAIT, inbound.recv()).await.unwrap().unwrap().unwrap_err();
        assert!(err.to_string().contains("reconnection failed"));
        assert!(timeout(WAIT, inbound.recv()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_frames_split_across_messages() {
        let (listener, url) = listen().await;
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            let mut bytes = frame(&[1, 2, 3]);
            bytes.extend(frame(&[4]));
            ws.send(Message::Binary(bytes[..2].to_vec())).await.unwrap();
            ws.send(Message::Binary(bytes[2..].to_vec())).await.unwrap();
            // hold the socket open until the client hangs up
            while let Some(Ok(_)) = ws.next().await {}
        });

        let connection = Connection::connect(url, ReconnectPolicy::disabled())
            .await
            .unwrap();
        let (mut inbound, outbound) = start(connection);

        let first = timeout(WAIT, inbound.recv()).await.unwrap().unwrap().unwrap();
        let second = timeout(WAIT, inbound.recv()).await.unwrap().unwrap().unwrap();
        assert_eq!((first, second), (vec![1, 2, 3], vec![4]));
        drop(outbound);
    }
}
