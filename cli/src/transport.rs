//! One-shot delivery of an envelope to the display.
//!
//! Each delivery opens its own websocket, sends one text message, waits a
//! short window for at most one reply, then closes. Nothing is shared
//! between deliveries and nothing is retried.

use std::io::Write;
use std::time::Duration;

use face::Envelope;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};

pub const OPEN_TIMEOUT: Duration = Duration::from_secs(2);
pub const REPLY_TIMEOUT: Duration = Duration::from_millis(250);
pub const CLOSE_TIMEOUT: Duration = Duration::from_millis(200);

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("connect to {url} failed: {error}")]
    Connect {
        url: String,
        #[source]
        error: Box<tungstenite::Error>,
    },
    #[error("timed out connecting to {0}")]
    ConnectTimeout(String),
    #[error("send failed: {0}")]
    Send(Box<tungstenite::Error>),
    #[error("receive failed: {0}")]
    Receive(Box<tungstenite::Error>),
    #[error("close failed: {0}")]
    Close(Box<tungstenite::Error>),
    #[error("envelope encode failed: {0}")]
    Encode(#[from] face::CodecError),
    /// Writing the operator trace failed. Not a network problem.
    #[error("terminal output failed: {0}")]
    Output(#[from] std::io::Error),
}

/// Outcome of a successful delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    /// Raw reply text, if the display answered inside the reply window.
    pub reply: Option<String>,
}

/// Delivery strategy, picked once at startup.
#[derive(Clone, Debug)]
pub enum Transport {
    WebSocket(WsTransport),
    /// Print the payload instead of sending it.
    PrintOnly,
}

impl Transport {
    /// Deliver one envelope, tracing what happened to `out`.
    ///
    /// # Errors
    ///
    /// Any connect, send, receive or close failure, plus output failures.
    pub async fn deliver<W: Write>(
        &self,
        envelope: &Envelope,
        out: &mut W,
    ) -> Result<Delivery, TransportError> {
        match self {
            Self::WebSocket(ws) => ws.deliver(envelope, out).await,
            Self::PrintOnly => {
                let text = face::encode_envelope_pretty(envelope)?;
                writeln!(out, "Dry run, not sending. Payload:")?;
                writeln!(out, "{text}")?;
                Ok(Delivery { reply: None })
            }
        }
    }
}

/// Websocket client for a single display endpoint.
///
/// The client never sends pings, so an idle socket is never probed.
#[derive(Clone, Debug)]
pub struct WsTransport {
    url: String,
    open_timeout: Duration,
    reply_timeout: Duration,
    close_timeout: Duration,
}

impl WsTransport {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            open_timeout: OPEN_TIMEOUT,
            reply_timeout: REPLY_TIMEOUT,
            close_timeout: CLOSE_TIMEOUT,
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_timeouts(mut self, open: Duration, reply: Duration, close: Duration) -> Self {
        self.open_timeout = open;
        self.reply_timeout = reply;
        self.close_timeout = close;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn deliver<W: Write>(
        &self,
        envelope: &Envelope,
        out: &mut W,
    ) -> Result<Delivery, TransportError> {
        let text = face::encode_envelope(envelope)?;

        tracing::debug!(url = %self.url, "connecting");
        let (mut stream, _) = tokio::time::timeout(self.open_timeout, connect_async(self.url.as_str()))
            .await
            .map_err(|_| TransportError::ConnectTimeout(self.url.clone()))?
            .map_err(|error| TransportError::Connect {
                url: self.url.clone(),
                error: Box::new(error),
            })?;

        stream
            .send(Message::Text(text.clone().into()))
            .await
            .map_err(|error| TransportError::Send(Box::new(error)))?;
        tracing::info!(
            bytes = text.len(),
            mutations = envelope.payload.mutations.len(),
            ts = envelope.ts,
            "sent apply_mutations"
        );
        writeln!(out, "Sent: {text}")?;

        let reply = self.await_reply(&mut stream).await?;
        if let Some(reply) = &reply {
            writeln!(out, "Response: {reply}")?;
        }

        self.close(&mut stream).await?;
        Ok(Delivery { reply })
    }

    /// Wait up to the reply window for one data message. Silence, a close
    /// frame or end of stream all mean "no reply".
    async fn await_reply(&self, stream: &mut WsStream) -> Result<Option<String>, TransportError> {
        let read = async {
            while let Some(message) = stream.next().await {
                match message.map_err(|error| TransportError::Receive(Box::new(error)))? {
                    Message::Text(text) => return Ok(Some(text.as_str().to_owned())),
                    Message::Binary(bytes) => {
                        return Ok(Some(String::from_utf8_lossy(&bytes).into_owned()));
                    }
                    Message::Close(frame) => {
                        tracing::debug!(?frame, "display closed before replying");
                        return Ok(None);
                    }
                    Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
                }
            }
            Ok::<_, TransportError>(None)
        };

        if let Ok(result) = tokio::time::timeout(self.reply_timeout, read).await {
            if let Ok(Some(reply)) = &result {
                tracing::debug!(bytes = reply.len(), "reply received");
            }
            result
        } else {
            tracing::debug!("no reply inside window");
            Ok(None)
        }
    }

    /// Send a close frame and wait for the peer's, bounded by the close
    /// timeout. An expired timeout just drops the socket.
    async fn close(&self, stream: &mut WsStream) -> Result<(), TransportError> {
        let handshake = async {
            stream.close(None).await?;
            while let Some(message) = stream.next().await {
                message?;
            }
            Ok::<(), tungstenite::Error>(())
        };

        match tokio::time::timeout(self.close_timeout, handshake).await {
            Ok(Ok(()) | Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed)) => {
                Ok(())
            }
            Ok(Err(error)) => Err(TransportError::Close(Box::new(error))),
            Err(_) => {
                tracing::debug!("close handshake timed out; dropping socket");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
