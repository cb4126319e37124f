//! Loopback stand-in for the display service.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

pub struct DisplayStub {
    pub url: String,
    /// Text messages received, one entry per message, across all connections.
    pub received: mpsc::UnboundedReceiver<String>,
}

/// Start a websocket server that records every text message and answers
/// each one with `reply` when given.
pub async fn spawn_display(reply: Option<&'static str>) -> DisplayStub {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (tx, received) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let Ok((tcp, _)) = listener.accept().await else {
                return;
            };
            let Ok(mut ws) = tokio_tungstenite::accept_async(tcp).await else {
                continue;
            };
            while let Some(Ok(message)) = ws.next().await {
                let Message::Text(text) = message else {
                    continue;
                };
                if tx.send(text.as_str().to_owned()).is_err() {
                    return;
                }
                if let Some(reply) = reply {
                    if ws.send(Message::Text(reply.to_owned().into())).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    DisplayStub {
        url: format!("ws://{addr}/"),
        received,
    }
}

/// URL of a loopback port with nothing listening on it.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("ws://{addr}/")
}
