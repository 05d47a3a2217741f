//! WebSocket front end.
//!
//! [`RelayServer`] owns the listening socket for its whole lifetime. Every
//! HTTP request, whatever its path, is upgraded to a WebSocket and bridged
//! to the shared [`Relay`].

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt, future};
use log::{debug, error, info, warn};
use std::future::Future;
use std::net::SocketAddr;
use std::pin::pin;
use std::sync::Arc;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::sync::mpsc;

use crate::protocol::ServerMessage;
use crate::relay::Relay;

pub struct RelayServer {
    listener: TcpListener,
    relay: Arc<Relay>,
}

impl RelayServer {
    /// Bind the listening socket. Port 0 picks a free port.
    pub async fn bind<A: ToSocketAddrs>(addr: A, relay: Relay) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .context("failed to bind relay listener")?;
        Ok(Self {
            listener,
            relay: Arc::new(relay),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("failed to read listener address")
    }

    /// Serve connections until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = Router::new()
            .fallback(upgrade)
            .with_state(self.relay)
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .context("relay server failed")
    }
}

async fn upgrade(
    State(relay): State<Arc<Relay>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, relay, peer))
}

async fn handle_socket(socket: WebSocket, relay: Arc<Relay>, peer: SocketAddr) {
    info!("client connected: {peer}");
    let (mut sender, receiver) = socket.split();
    let (replies, mut outbox) = mpsc::unbounded_channel::<ServerMessage>();

    // Outlives the reader while searches started on this connection are
    // still running.
    tokio::spawn(async move {
        while let Some(reply) = outbox.recv().await {
            let json = match reply.to_json() {
                Ok(json) => json,
                Err(e) => {
                    error!("failed to encode reply for {peer}: {e}");
                    continue;
                }
            };
            if let Err(e) = sender.send(Message::Text(json.into())).await {
                debug!("dropping reply for {peer}: {e}");
                break;
            }
        }
    });

    let frames = receiver
        .take_while(move |frame| {
            future::ready(match frame {
                Ok(Message::Close(_)) => false,
                Ok(_) => true,
                Err(e) => {
                    warn!("connection error from {peer}: {e}");
                    false
                }
            })
        })
        .filter_map(move |frame| future::ready(frame_text(frame, peer)));
    relay.serve(pin!(frames), replies).await;

    info!("client disconnected: {peer}");
}

/// Payload of a data frame. Binary frames must be UTF-8; control frames
/// carry nothing for the relay.
fn frame_text(frame: Result<Message, axum::Error>, peer: SocketAddr) -> Option<String> {
    match frame {
        Ok(Message::Text(text)) => Some(text.to_string()),
        Ok(Message::Binary(bytes)) => match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("ignoring malformed message from {peer}: {e}");
                None
            }
        },
        _ => None,
    }
}
