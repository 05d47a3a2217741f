//! Per-connection dispatch.
//!
//! The relay is transport-agnostic: it consumes inbound text frames and
//! pushes [`ServerMessage`]s into the connection's reply queue. Compute
//! requests run in their own task so a connection keeps being served while
//! the engine thinks.

use futures::{Stream, StreamExt};
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::engine::Engine;
use crate::protocol::{self, ClientMessage, ServerMessage};

/// Reply queue of a single connection.
pub type ReplySender = mpsc::UnboundedSender<ServerMessage>;

pub struct Relay {
    engine: Arc<dyn Engine>,
}

impl Relay {
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self { engine }
    }

    /// Handle one inbound frame.
    ///
    /// Returns the handle of the spawned search for `ai_move`, `None` for
    /// everything else. Malformed frames are logged and dropped without a
    /// reply.
    pub fn handle_text(&self, text: &str, replies: &ReplySender) -> Option<JoinHandle<()>> {
        let command = match protocol::decode(text) {
            Ok(Some(command)) => command,
            Ok(None) => {
                debug!("ignoring message without a known type: {text}");
                return None;
            }
            Err(e) => {
                warn!("ignoring malformed message: {e}");
                return None;
            }
        };

        match command {
            ClientMessage::AssistantMove => {
                deliver(replies, ServerMessage::assistant());
                None
            }
            ClientMessage::AiMove { fen } => Some(self.spawn_search(fen, replies.clone())),
        }
    }

    /// Serve a whole connection: every frame from `incoming` is handled in
    /// arrival order until the stream ends. The server feeds each WebSocket
    /// through here.
    pub async fn serve<S>(&self, mut incoming: S, replies: ReplySender)
    where
        S: Stream<Item = String> + Unpin,
    {
        while let Some(text) = incoming.next().await {
            self.handle_text(&text, &replies);
        }
    }

    fn spawn_search(&self, fen: String, replies: ReplySender) -> JoinHandle<()> {
        let engine = Arc::clone(&self.engine);
        tokio::spawn(async move {
            let reply = match engine.best_move(&fen).await {
                Ok(bestmove) => {
                    info!("bestmove {bestmove} for {fen}");
                    ServerMessage::AiMove { bestmove }
                }
                Err(e) => {
                    error!("move computation for {fen:?} failed: {e}");
                    ServerMessage::Error {
                        message: e.to_string(),
                    }
                }
            };
            deliver(&replies, reply);
        })
    }
}

fn deliver(replies: &ReplySender, reply: ServerMessage) {
    if replies.send(reply).is_err() {
        debug!("client went away, dropping reply");
    }
}
